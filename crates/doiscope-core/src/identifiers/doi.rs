use serde::{Deserialize, Serialize};

use crate::error::{DoiscopeError, Result};

const RESOLVER_PREFIXES: &[&str] = &[
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
];

/// A normalised DOI together with its resolver URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doi {
    pub raw: String,
    pub normalized: String,
    pub url: String,
}

impl Doi {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        let stripped = RESOLVER_PREFIXES
            .iter()
            .find_map(|prefix| input.strip_prefix(prefix))
            .or_else(|| input.strip_prefix("doi:").map(str::trim_start))
            .or_else(|| input.strip_prefix("DOI:").map(str::trim_start))
            .unwrap_or(input);

        if !stripped.starts_with("10.") {
            return Err(DoiscopeError::InvalidDoi(input.to_string()));
        }
        let slash_pos = stripped
            .find('/')
            .ok_or_else(|| DoiscopeError::InvalidDoi(input.to_string()))?;
        if stripped[slash_pos + 1..].is_empty() {
            return Err(DoiscopeError::InvalidDoi(input.to_string()));
        }

        let normalized = stripped.to_lowercase();
        let url = format!("https://doi.org/{normalized}");

        Ok(Self {
            raw: input.to_string(),
            normalized,
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_doi() {
        let doi = Doi::parse("10.1016/j.foo.2016.01.001").unwrap();
        assert_eq!(doi.normalized, "10.1016/j.foo.2016.01.001");
        assert_eq!(doi.url, "https://doi.org/10.1016/j.foo.2016.01.001");
    }

    #[test]
    fn resolver_url_prefix_stripped() {
        let doi = Doi::parse("http://dx.doi.org/10.1109/5.771073").unwrap();
        assert_eq!(doi.normalized, "10.1109/5.771073");
    }

    #[test]
    fn label_prefix_stripped() {
        let doi = Doi::parse("DOI: 10.1037/a0012345").unwrap();
        assert_eq!(doi.normalized, "10.1037/a0012345");
    }

    #[test]
    fn uppercase_normalized_to_lowercase() {
        let doi = Doi::parse("10.1001/JAMA.2020.1234").unwrap();
        assert_eq!(doi.normalized, "10.1001/jama.2020.1234");
        assert_eq!(doi.raw, "10.1001/JAMA.2020.1234");
    }

    #[test]
    fn reject_missing_suffix() {
        assert!(Doi::parse("10.1000").is_err());
        assert!(Doi::parse("10.1000/").is_err());
    }

    #[test]
    fn reject_not_a_doi() {
        assert!(Doi::parse("S0140673620301835").is_err());
        assert!(Doi::parse("").is_err());
    }
}
