use crate::error::InvalidEmailError;

/// Validates an email address and extracts its normalized domain.
///
/// The address is trimmed, must contain exactly one `@` with content on both
/// sides, and the domain is lowercased and trimmed. A domain that is empty or
/// contains any whitespace is rejected.
///
/// # Examples
/// ```
/// use nodisposable::validation::syntax::extract_domain;
///
/// assert_eq!(extract_domain(" User@Mailinator.COM ").unwrap(), "mailinator.com");
/// assert!(extract_domain("no-at-sign").is_err());
/// assert!(extract_domain("a@b@c.com").is_err());
/// ```
pub fn extract_domain(email: &str) -> Result<String, InvalidEmailError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(InvalidEmailError::Empty);
    }

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(InvalidEmailError::MalformedAddress),
    };
    if local.is_empty() || domain.is_empty() {
        return Err(InvalidEmailError::MalformedAddress);
    }

    let domain = domain.trim().to_lowercase();
    if domain.is_empty() || domain.chars().any(char::is_whitespace) {
        return Err(InvalidEmailError::InvalidDomain);
    }

    Ok(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_standard_emails() {
        assert_eq!(extract_domain("simple@example.com").unwrap(), "example.com");
        assert_eq!(extract_domain("a.b+tag@sub.example.org").unwrap(), "sub.example.org");
        assert_eq!(extract_domain("x@y").unwrap(), "y");
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(extract_domain(" TEST@MAILINATOR.COM ").unwrap(), "mailinator.com");
        assert_eq!(extract_domain("\tuser@Example.Com\n").unwrap(), "example.com");
        // Local part is not the concern of normalization.
        assert_eq!(extract_domain("MiXeD@lower.com").unwrap(), "lower.com");
    }

    #[test]
    fn invalid_empty_input() {
        assert_eq!(extract_domain(""), Err(InvalidEmailError::Empty));
        assert_eq!(extract_domain("   "), Err(InvalidEmailError::Empty));
        assert_eq!(extract_domain("\n\t"), Err(InvalidEmailError::Empty));
    }

    #[test]
    fn invalid_at_placement() {
        for email in [
            "invalid-email",
            "no-at-sign",
            "@domain.com",
            "user@",
            "@",
            "user@@domain.com",
            "a@b@c.com",
        ] {
            assert_eq!(
                extract_domain(email),
                Err(InvalidEmailError::MalformedAddress),
                "{email:?} should be rejected"
            );
        }
    }

    #[test]
    fn invalid_domains() {
        assert_eq!(
            extract_domain("user@exa mple.com"),
            Err(InvalidEmailError::InvalidDomain)
        );
        assert_eq!(
            extract_domain("user@exa\tmple.com"),
            Err(InvalidEmailError::InvalidDomain)
        );
        assert_eq!(
            extract_domain("user@ mail example.com"),
            Err(InvalidEmailError::InvalidDomain)
        );
    }

    #[test]
    fn whitespace_only_domain_after_trim() {
        // The outer trim removes trailing spaces, leaving "user@" which is malformed.
        assert_eq!(
            extract_domain("user@   "),
            Err(InvalidEmailError::MalformedAddress)
        );
    }

    #[test]
    fn very_long_email() {
        let email = format!("{}@example.com", "a".repeat(1000));
        assert_eq!(extract_domain(&email).unwrap(), "example.com");
    }

    #[test]
    fn unicode_domain_is_lowercased_not_normalized() {
        assert_eq!(extract_domain("user@EXÄMPLE.de").unwrap(), "exämple.de");
    }
}
