//! Heuristics keyed to one publisher's markup. Each is gated by a
//! [`HostScope`] and reports `NotFound` on any other host.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

use crate::identifiers::DoiCandidate;
use crate::matcher::{HostScope, PatternMatcher};
use crate::snapshot::{DocumentSnapshot, normalize_whitespace};
use crate::strategy::StrategyResult;

static SDM_DOI_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"SDM\.doi\s*=\s*'([^']+)'").unwrap());

static DOI_ORG_PATH_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"doi\.org/(.+)").unwrap());

static SCRIPTED_JSON_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"['"]doi['"]\s*:\s*['"]([^'"]+)['"]"#).unwrap());

static PLAIN_TEXT_LABEL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Document Object Identifier \(DOI\): (.*?)</p>").unwrap());

// The capture starts at `10.` so the returned DOI keeps its prefix.
static PATH_EMBEDDED_LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"href='/doi/(10\.[^']+)'").unwrap());

static SD_DOI_LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.doi").expect("valid a.doi selector"));

static REGISTRY_ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"a[ref="aid_type=doi"]"#).expect("valid aid_type selector")
});

pub fn scripted_json_matcher(host: &str) -> PatternMatcher {
    PatternMatcher::scoped(SCRIPTED_JSON_REGEX.clone(), HostScope::new(host))
}

pub fn plain_text_label_matcher(host: &str) -> PatternMatcher {
    PatternMatcher::scoped(PLAIN_TEXT_LABEL_REGEX.clone(), HostScope::new(host))
}

pub fn path_embedded_link_matcher(host: &str) -> PatternMatcher {
    PatternMatcher::scoped(PATH_EMBEDDED_LINK_REGEX.clone(), HostScope::new(host))
}

/// ScienceDirect ships two templates: the older server-rendered one assigns
/// `SDM.doi` in a script, the newer one renders an `a.doi` link to doi.org.
/// The script variable is checked first.
pub fn sciencedirect(snapshot: &DocumentSnapshot, scope: &HostScope) -> StrategyResult {
    if !scope.matches(snapshot.hostname()) {
        return StrategyResult::NotFound;
    }

    let legacy = PatternMatcher::new(SDM_DOI_REGEX.clone()).find(snapshot);
    if legacy.is_found() {
        return legacy;
    }

    snapshot
        .tree()
        .select(&SD_DOI_LINK_SELECTOR)
        .next()
        .and_then(|link| {
            let text = link.text().collect::<String>();
            DOI_ORG_PATH_REGEX
                .captures(&text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| DoiCandidate::new(m.as_str().trim()))
        })
        .into()
}

/// PubMed lists article identifiers as anchors tagged `ref="aid_type=doi"`;
/// the anchor text is the DOI itself, usually on its own indented line.
pub fn registry_anchor(snapshot: &DocumentSnapshot, scope: &HostScope) -> StrategyResult {
    if !scope.matches(snapshot.hostname()) {
        return StrategyResult::NotFound;
    }

    snapshot
        .tree()
        .select(&REGISTRY_ANCHOR_SELECTOR)
        .next()
        .and_then(|anchor| {
            let text = anchor.text().collect::<String>();
            DoiCandidate::new(normalize_whitespace(&text))
        })
        .into()
}
