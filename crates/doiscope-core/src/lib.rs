//! Doiscope Core: finds the DOI of a scholarly article in a rendered web page.

pub mod error;
pub mod config;
pub mod identifiers;
pub mod snapshot;
pub mod matcher;
pub mod strategy;
pub mod finder;
pub mod present;
#[cfg(feature = "async")]
pub mod invocation;

pub use error::{DoiscopeError, Result};
pub use config::{AppConfig, HostsConfig, ScheduleConfig};
pub use identifiers::{DoiCandidate, doi::Doi};
pub use snapshot::{DocumentSnapshot, hostname_from_url};
pub use matcher::{HostScope, PatternMatcher};
pub use strategy::{Strategy, StrategyResult};
pub use finder::{Detection, DoiFinder, extract_doi};
pub use present::{OncePresenter, Presenter};
#[cfg(feature = "async")]
pub use invocation::Invocation;
