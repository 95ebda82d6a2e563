//! Detection strategies.
//!
//! Each strategy exploits one convention publishers use to expose a DOI and
//! commits to either [`StrategyResult::Found`] or [`StrategyResult::NotFound`].
//! None of them ever errors: missing elements, absent attributes and
//! non-matching patterns all mean "not here".

pub mod markup;
pub mod publishers;
pub mod title;

use crate::config::HostsConfig;
use crate::identifiers::DoiCandidate;
use crate::matcher::{HostScope, PatternMatcher};
use crate::snapshot::DocumentSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyResult {
    Found(DoiCandidate),
    NotFound,
}

impl StrategyResult {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn into_option(self) -> Option<DoiCandidate> {
        match self {
            Self::Found(doi) => Some(doi),
            Self::NotFound => None,
        }
    }
}

impl From<Option<DoiCandidate>> for StrategyResult {
    fn from(value: Option<DoiCandidate>) -> Self {
        match value {
            Some(doi) => Self::Found(doi),
            None => Self::NotFound,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Strategy {
    /// `<meta name="citation_doi" ...>` and friends.
    MetaTags,
    /// A single distinct `data-doi` attribute value across the page.
    DataAttribute,
    /// ScienceDirect: legacy `SDM.doi` script variable, then the `a.doi` link.
    ScienceDirect { scope: HostScope },
    /// IEEE Xplore: `'doi':'...'` fragment in the page's script metadata.
    ScriptedJson { matcher: PatternMatcher },
    /// Preprint host printing `Document Object Identifier (DOI): ...`.
    PlainTextLabel { matcher: PatternMatcher },
    /// PsycNET: `href='/doi/10....'` links.
    PathEmbeddedLink { matcher: PatternMatcher },
    /// PubMed: `<a ref="aid_type=doi">` in the identifier listing.
    RegistryAnchor { scope: HostScope },
    /// DOI-shaped text in the page title.
    TitlePattern,
}

impl Strategy {
    /// All strategies in arbitration order.
    pub fn standard_order(hosts: &HostsConfig) -> Vec<Self> {
        vec![
            Self::MetaTags,
            Self::DataAttribute,
            Self::ScienceDirect {
                scope: HostScope::new(&hosts.sciencedirect),
            },
            Self::ScriptedJson {
                matcher: publishers::scripted_json_matcher(&hosts.ieee),
            },
            Self::PlainTextLabel {
                matcher: publishers::plain_text_label_matcher(&hosts.preprint_label),
            },
            Self::PathEmbeddedLink {
                matcher: publishers::path_embedded_link_matcher(&hosts.psycnet),
            },
            Self::RegistryAnchor {
                scope: HostScope::new(&hosts.pubmed),
            },
            Self::TitlePattern,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::MetaTags => "meta-tags",
            Self::DataAttribute => "data-attribute",
            Self::ScienceDirect { .. } => "sciencedirect",
            Self::ScriptedJson { .. } => "scripted-json",
            Self::PlainTextLabel { .. } => "plain-text-label",
            Self::PathEmbeddedLink { .. } => "path-embedded-link",
            Self::RegistryAnchor { .. } => "registry-anchor",
            Self::TitlePattern => "title-pattern",
        }
    }

    /// Host this strategy is restricted to, if any.
    pub fn scope(&self) -> Option<&HostScope> {
        match self {
            Self::ScienceDirect { scope } | Self::RegistryAnchor { scope } => Some(scope),
            Self::ScriptedJson { matcher }
            | Self::PlainTextLabel { matcher }
            | Self::PathEmbeddedLink { matcher } => matcher.scope(),
            Self::MetaTags | Self::DataAttribute | Self::TitlePattern => None,
        }
    }

    pub fn extract(&self, snapshot: &DocumentSnapshot) -> StrategyResult {
        match self {
            Self::MetaTags => markup::meta_tags(snapshot),
            Self::DataAttribute => markup::data_attribute(snapshot),
            Self::ScienceDirect { scope } => publishers::sciencedirect(snapshot, scope),
            Self::ScriptedJson { matcher }
            | Self::PlainTextLabel { matcher }
            | Self::PathEmbeddedLink { matcher } => matcher.find(snapshot),
            Self::RegistryAnchor { scope } => publishers::registry_anchor(snapshot, scope),
            Self::TitlePattern => title::title_pattern(snapshot),
        }
    }
}
