use thiserror::Error;

/// All errors that can occur in doiscope-core.
///
/// DOI extraction itself never fails; these cover the surrounding
/// configuration and normalisation helpers.
#[derive(Debug, Error)]
pub enum DoiscopeError {
    #[error("invalid DOI: {0}")]
    InvalidDoi(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, DoiscopeError>;
