use once_cell::sync::Lazy;
use regex::Regex;

use crate::identifiers::DoiCandidate;
use crate::snapshot::DocumentSnapshot;
use crate::strategy::StrategyResult;

static DOI_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)10\.\d{4,9}/[-._;()/:A-Z0-9]+[A-Z0-9/]").unwrap()
});

/// First DOI-shaped substring of the page title.
///
/// Only the title is searched: body text produces too many false positives
/// (reference lists, related articles) for this to run anywhere else.
pub fn title_pattern(snapshot: &DocumentSnapshot) -> StrategyResult {
    DOI_REGEX
        .find(snapshot.title())
        .and_then(|m| DoiCandidate::new(m.as_str()))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_title(title: &str) -> DocumentSnapshot {
        DocumentSnapshot::capture("<html></html>", "example.org").with_title(title)
    }

    #[test]
    fn doi_in_parenthesised_title() {
        let snap = with_title("Study of X (doi: 10.1001/jama.2020.1234)");
        assert_eq!(
            title_pattern(&snap).into_option().unwrap().as_str(),
            "10.1001/jama.2020.1234"
        );
    }

    #[test]
    fn first_of_several_wins() {
        let snap = with_title("10.1038/s41586-021-03819-2 vs 10.1145/3313831.3376166");
        assert_eq!(
            title_pattern(&snap).into_option().unwrap().as_str(),
            "10.1038/s41586-021-03819-2"
        );
    }

    #[test]
    fn title_without_doi() {
        let snap = with_title("Effects of sleep on memory, version 10.2");
        assert_eq!(title_pattern(&snap), StrategyResult::NotFound);
    }

    #[test]
    fn body_text_is_not_searched() {
        let snap = DocumentSnapshot::capture(
            "<html><head><title>Plain</title></head><body>see 10.1000/182</body></html>",
            "example.org",
        );
        assert_eq!(title_pattern(&snap), StrategyResult::NotFound);
    }
}
