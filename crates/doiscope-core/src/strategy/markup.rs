use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use scraper::Selector;

use crate::identifiers::DoiCandidate;
use crate::snapshot::DocumentSnapshot;
use crate::strategy::StrategyResult;

const DOI_META_NAMES: &[&str] = &[
    "citation_doi",
    "doi",
    "dc.doi",
    "dc.identifier",
    "dc.identifier.doi",
    "bepress_citation_doi",
    "rft_id",
    "dcsext.wt_doi",
];

static META_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name]").expect("valid meta selector"));

static DATA_DOI_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[data-doi]").expect("valid data-doi selector"));

/// Scan `<meta>` elements whose name is a known DOI field.
///
/// Elements are visited in document order and a later qualifying element
/// overwrites an earlier one. This last-wins behaviour is reproduced as
/// observed on real pages with several conflicting entries; do not turn it
/// into first-wins.
pub fn meta_tags(snapshot: &DocumentSnapshot) -> StrategyResult {
    let mut doi = None;

    for el in snapshot.tree().select(&META_SELECTOR) {
        let meta = el.value();
        let Some(name) = meta.attr("name") else { continue };
        if !DOI_META_NAMES
            .iter()
            .any(|known| name.trim().eq_ignore_ascii_case(known))
        {
            continue;
        }

        // Some platforms put their own identifiers in these fields and
        // declare it through `scheme`. An empty scheme counts as absent.
        if let Some(scheme) = meta.attr("scheme") {
            if !scheme.is_empty() && scheme != "doi" {
                continue;
            }
        }

        let Some(content) = meta.attr("content") else { continue };
        let content = content.trim();
        let value = content.strip_prefix("doi:").unwrap_or(content).trim();
        if value.starts_with("10.") {
            doi = DoiCandidate::new(value);
        }
    }

    doi.into()
}

/// Accept a `data-doi` value only when the whole page agrees on one.
///
/// Tables of contents and search listings carry one distinct value per
/// article and are rejected. Values are trimmed before comparison.
pub fn data_attribute(snapshot: &DocumentSnapshot) -> StrategyResult {
    let values: BTreeSet<&str> = snapshot
        .tree()
        .select(&DATA_DOI_SELECTOR)
        .filter_map(|el| el.value().attr("data-doi"))
        .map(str::trim)
        .collect();

    if values.len() != 1 {
        return StrategyResult::NotFound;
    }
    values
        .into_iter()
        .next()
        .and_then(DoiCandidate::new)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(head: &str, body: &str) -> DocumentSnapshot {
        DocumentSnapshot::capture(
            format!("<html><head>{head}</head><body>{body}</body></html>"),
            "example.org",
        )
    }

    fn found(result: StrategyResult) -> String {
        result.into_option().expect("expected a DOI").into_inner()
    }

    #[test]
    fn citation_doi_meta() {
        let snap = page(r#"<meta name="citation_doi" content="10.1038/nature12373">"#, "");
        assert_eq!(found(meta_tags(&snap)), "10.1038/nature12373");
    }

    #[test]
    fn meta_name_is_case_insensitive() {
        let snap = page(r#"<meta name="DC.Identifier" content="10.1145/3313831.3376166">"#, "");
        assert_eq!(found(meta_tags(&snap)), "10.1145/3313831.3376166");
    }

    #[test]
    fn last_qualifying_meta_wins() {
        let snap = page(
            r#"<meta name="citation_doi" content="10.1000/first">
               <meta name="dc.identifier" content="10.1000/second">"#,
            "",
        );
        assert_eq!(found(meta_tags(&snap)), "10.1000/second");
    }

    #[test]
    fn later_non_doi_value_does_not_erase_earlier_one() {
        let snap = page(
            r#"<meta name="citation_doi" content="10.1000/first">
               <meta name="dc.identifier" content="urn:isbn:9783161484100">"#,
            "",
        );
        assert_eq!(found(meta_tags(&snap)), "10.1000/first");
    }

    #[test]
    fn foreign_scheme_is_skipped() {
        let snap = page(
            r#"<meta name="dc.identifier" scheme="publisher-id" content="10.1000/looks.valid">"#,
            "",
        );
        assert_eq!(meta_tags(&snap), StrategyResult::NotFound);
    }

    #[test]
    fn doi_scheme_is_accepted() {
        let snap = page(
            r#"<meta name="dc.identifier" scheme="doi" content="10.1000/ok">"#,
            "",
        );
        assert_eq!(found(meta_tags(&snap)), "10.1000/ok");
    }

    #[test]
    fn empty_scheme_is_treated_as_absent() {
        let snap = page(r#"<meta name="citation_doi" scheme="" content="10.1000/x">"#, "");
        assert_eq!(found(meta_tags(&snap)), "10.1000/x");
    }

    #[test]
    fn doi_colon_prefix_is_stripped() {
        let snap = page(r#"<meta name="citation_doi" content=" doi:10.1234/abc ">"#, "");
        assert_eq!(found(meta_tags(&snap)), "10.1234/abc");
    }

    #[test]
    fn value_not_starting_with_10_is_rejected() {
        let snap = page(r#"<meta name="citation_doi" content="doi:11.1234/abc">"#, "");
        assert_eq!(meta_tags(&snap), StrategyResult::NotFound);

        let snap = page(r#"<meta name="citation_doi" content="DOI:10.1234/abc">"#, "");
        assert_eq!(meta_tags(&snap), StrategyResult::NotFound);
    }

    #[test]
    fn unrelated_meta_ignored() {
        let snap = page(r#"<meta name="description" content="10.1000/not-this">"#, "");
        assert_eq!(meta_tags(&snap), StrategyResult::NotFound);
    }

    #[test]
    fn shared_data_doi_value_accepted() {
        let snap = page(
            "",
            r#"<div data-doi="10.1000/same"></div>
               <span data-doi="10.1000/same"></span>
               <a data-doi="10.1000/same">cite</a>"#,
        );
        assert_eq!(found(data_attribute(&snap)), "10.1000/same");
    }

    #[test]
    fn distinct_data_doi_values_rejected() {
        let snap = page(
            "",
            r#"<li data-doi="10.1000/one"></li><li data-doi="10.1000/two"></li>"#,
        );
        assert_eq!(data_attribute(&snap), StrategyResult::NotFound);
    }

    #[test]
    fn data_doi_values_differing_only_in_whitespace_agree() {
        let snap = page(
            "",
            r#"<div data-doi=" 10.1000/a"></div><div data-doi="10.1000/a "></div>"#,
        );
        assert_eq!(found(data_attribute(&snap)), "10.1000/a");
    }

    #[test]
    fn no_data_doi_is_not_found() {
        let snap = page("", "<p>plain</p>");
        assert_eq!(data_attribute(&snap), StrategyResult::NotFound);
    }

    #[test]
    fn empty_data_doi_is_not_found() {
        let snap = page("", r#"<div data-doi=""></div>"#);
        assert_eq!(data_attribute(&snap), StrategyResult::NotFound);
    }
}
