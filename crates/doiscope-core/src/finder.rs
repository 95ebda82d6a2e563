use serde::Serialize;
use tracing::{debug, info};

use crate::config::HostsConfig;
use crate::identifiers::DoiCandidate;
use crate::snapshot::DocumentSnapshot;
use crate::strategy::{Strategy, StrategyResult};

/// A DOI together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub doi: DoiCandidate,
    pub strategy: &'static str,
}

/// Runs strategies in a fixed priority order and stops at the first hit.
///
/// High-precision structured metadata and host-specific heuristics come
/// first; the title pattern is the last resort.
#[derive(Debug, Clone)]
pub struct DoiFinder {
    strategies: Vec<Strategy>,
}

impl DoiFinder {
    pub fn new(hosts: &HostsConfig) -> Self {
        Self {
            strategies: Strategy::standard_order(hosts),
        }
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn find(&self, snapshot: &DocumentSnapshot) -> Option<Detection> {
        for strategy in &self.strategies {
            match strategy.extract(snapshot) {
                StrategyResult::Found(doi) => {
                    info!(
                        strategy = strategy.name(),
                        host = snapshot.hostname(),
                        doi = doi.as_str(),
                        "DOI found"
                    );
                    return Some(Detection {
                        doi,
                        strategy: strategy.name(),
                    });
                }
                StrategyResult::NotFound => {
                    debug!(strategy = strategy.name(), "no DOI");
                }
            }
        }

        debug!(host = snapshot.hostname(), "no strategy found a DOI");
        None
    }

    pub fn extract(&self, snapshot: &DocumentSnapshot) -> Option<DoiCandidate> {
        self.find(snapshot).map(|d| d.doi)
    }
}

impl Default for DoiFinder {
    fn default() -> Self {
        Self::new(&HostsConfig::default())
    }
}

/// Extract with the default host scopes. A missing document yields `None`,
/// the same as a page without a DOI.
pub fn extract_doi(snapshot: Option<&DocumentSnapshot>) -> Option<DoiCandidate> {
    let Some(snapshot) = snapshot else {
        debug!("no document available");
        return None;
    };
    DoiFinder::default().extract(snapshot)
}
