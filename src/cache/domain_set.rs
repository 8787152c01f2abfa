use std::collections::HashSet;

use serde_json::Value;

use crate::error::LoadError;

/// Immutable set of disposable domains.
///
/// Keeps the source order for introspection alongside a hash index for
/// membership tests. Entries are trimmed and lowercased on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisposableDomainSet {
    ordered: Vec<String>,
    index: HashSet<String>,
}

impl DisposableDomainSet {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ordered: Vec<String> = domains
            .into_iter()
            .map(|d| d.as_ref().trim().to_lowercase())
            .collect();
        let index = ordered.iter().cloned().collect();
        Self { ordered, index }
    }

    /// Exact match against an already-normalized domain.
    pub fn contains(&self, domain: &str) -> bool {
        self.index.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.ordered.clone()
    }
}

/// Decodes a serialized domain list.
///
/// The payload must be a JSON array whose entries are all strings.
/// `origin` names the source in parse error messages.
pub fn parse_domains(bytes: &[u8], origin: &str) -> Result<DisposableDomainSet, LoadError> {
    let raw: Value = serde_json::from_slice(bytes).map_err(|_| LoadError::InvalidJson {
        file: origin.to_string(),
    })?;

    let Value::Array(entries) = raw else {
        return Err(LoadError::NotAnArray);
    };

    let domains = entries
        .iter()
        .map(|entry| entry.as_str().ok_or(LoadError::NonStringEntry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DisposableDomainSet::new(domains))
}
