//! Key Namespace Module
//!
//! Maps caller keys onto backend keys owned by one cache instance.

// == Key Namespace ==
/// Prefix shared by every backend key a cache instance owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNamespace {
    prefix: String,
}

impl KeyNamespace {
    /// Creates a namespace for `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The namespace prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Backend key for the caller-visible `key`.
    pub fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Returns true if `backend_key` belongs to this namespace.
    pub fn owns(&self, backend_key: &str) -> bool {
        backend_key.starts_with(&self.prefix)
    }

    /// Caller-visible key for an owned `backend_key`.
    pub fn strip<'a>(&self, backend_key: &'a str) -> Option<&'a str> {
        backend_key.strip_prefix(&self.prefix)
    }
}
