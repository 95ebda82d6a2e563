use regex::Regex;

use crate::identifiers::DoiCandidate;
use crate::snapshot::DocumentSnapshot;
use crate::strategy::StrategyResult;

/// Restricts a heuristic to pages served from one publisher's host.
///
/// Matching is a case-insensitive substring test on the hostname, so the
/// scope `sciencedirect.com` accepts `www.sciencedirect.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostScope(String);

impl HostScope {
    pub fn new(host: impl Into<String>) -> Self {
        Self(host.into().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty hostname never matches.
    pub fn matches(&self, hostname: &str) -> bool {
        !self.0.is_empty()
            && !hostname.is_empty()
            && hostname.to_ascii_lowercase().contains(self.0.as_str())
    }
}

/// Runs a capturing regex over the raw markup of a snapshot and yields the
/// first capture group, optionally only on one host.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Regex,
    scope: Option<HostScope>,
}

impl PatternMatcher {
    pub fn new(pattern: Regex) -> Self {
        Self {
            pattern,
            scope: None,
        }
    }

    pub fn scoped(pattern: Regex, scope: HostScope) -> Self {
        Self {
            pattern,
            scope: Some(scope),
        }
    }

    pub fn scope(&self) -> Option<&HostScope> {
        self.scope.as_ref()
    }

    pub fn find(&self, snapshot: &DocumentSnapshot) -> StrategyResult {
        if let Some(scope) = &self.scope {
            if !scope.matches(snapshot.hostname()) {
                return StrategyResult::NotFound;
            }
        }

        self.pattern
            .captures(snapshot.raw_markup())
            .and_then(|caps| caps.get(1))
            .and_then(|m| DoiCandidate::new(m.as_str().trim()))
            .into()
    }
}
