use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

use crate::error::{DoiscopeError, Result};

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid title selector"));

/// Frozen view of a rendered page.
///
/// Every strategy reads from the same snapshot, so one extraction attempt
/// never observes the page changing underneath it.
#[derive(Debug)]
pub struct DocumentSnapshot {
    raw_markup: String,
    title: String,
    hostname: String,
    tree: Html,
}

impl DocumentSnapshot {
    /// Parse `markup` served from `hostname`. The title is taken from the
    /// first `<title>` element.
    pub fn capture(markup: impl Into<String>, hostname: &str) -> Self {
        let raw_markup = markup.into();
        let tree = Html::parse_document(&raw_markup);
        let title = tree
            .select(&TITLE_SELECTOR)
            .next()
            .map(|el| normalize_whitespace(&el.text().collect::<String>()))
            .unwrap_or_default();

        Self {
            raw_markup,
            title,
            hostname: hostname.trim().to_ascii_lowercase(),
            tree,
        }
    }

    /// Like [`DocumentSnapshot::capture`], with the hostname taken from `url`.
    pub fn from_url(markup: impl Into<String>, url: &str) -> Result<Self> {
        let host = hostname_from_url(url)?;
        Ok(Self::capture(markup, &host))
    }

    /// Replace the title, e.g. with the live `document.title` of the page.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = normalize_whitespace(&title.into());
        self
    }

    pub fn raw_markup(&self) -> &str {
        &self.raw_markup
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn tree(&self) -> &Html {
        &self.tree
    }
}

/// Hostname of `url`, lowercased.
pub fn hostname_from_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| DoiscopeError::InvalidUrl(format!("{url}: {e}")))?;
    parsed
        .host_str()
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| DoiscopeError::InvalidUrl(format!("{url}: no host")))
}

pub(crate) fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
