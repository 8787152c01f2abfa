/// Validates an email address and extracts its normalized domain.
///
/// Checks performed, in order:
/// - the trimmed input is non-empty
/// - exactly one `@`, with content before and after it
/// - the lowercased, trimmed domain is non-empty and contains no whitespace
///
/// # Examples
/// ```
/// use nodisposable::validation::syntax::extract_domain;
///
/// assert_eq!(extract_domain("user@Example.com").unwrap(), "example.com");
/// assert!(extract_domain("user@@example.com").is_err());
/// ```
pub mod syntax;

/// Classifies email addresses as disposable or not.
///
/// Combines [`syntax::extract_domain`] with the cached domain list. Every
/// failure, whether malformed input or an unreadable domain list, is reported
/// in the returned [`DetectionResult`] rather than as an `Err`.
///
/// # Example
/// ```no_run
/// # async fn example() {
/// use nodisposable::validation::disposable::EmailDetector;
///
/// let detector = EmailDetector::bundled();
/// assert!(detector.is_disposable_email("example@10minutemail.com").await);
/// assert!(!detector.is_disposable_email("johndoe@gmail.com").await);
/// # }
/// ```
///
/// [`DetectionResult`]: crate::models::detection::DetectionResult
pub mod disposable;
