pub mod doi;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use doi::Doi;

/// Non-empty text believed to be a DOI.
///
/// Only the shape checks local to the strategy that produced it have been
/// applied; use [`DoiCandidate::to_doi`] for normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoiCandidate(String);

impl DoiCandidate {
    /// Returns `None` for empty or whitespace-only text.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn to_doi(&self) -> Result<Doi> {
        Doi::parse(&self.0)
    }
}

impl fmt::Display for DoiCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DoiCandidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_candidate_rejected() {
        assert!(DoiCandidate::new("").is_none());
        assert!(DoiCandidate::new("  \n").is_none());
    }

    #[test]
    fn candidate_keeps_text_as_given() {
        let c = DoiCandidate::new("10.1000/ABC").unwrap();
        assert_eq!(c.as_str(), "10.1000/ABC");
        assert_eq!(c.to_doi().unwrap().normalized, "10.1000/abc");
    }
}
