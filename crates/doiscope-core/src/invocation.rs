//! The single scheduled extraction attempt for one page load.

use std::time::Duration;

use tracing::debug;

use crate::config::ScheduleConfig;
use crate::finder::{Detection, DoiFinder};
use crate::present::Presenter;
use crate::snapshot::DocumentSnapshot;

/// Waits the host-dependent delay, captures the page once, runs the finder
/// and hands a found DOI to the presenter. There is no retry or polling.
pub struct Invocation<'a> {
    finder: &'a DoiFinder,
    delay: Duration,
}

impl<'a> Invocation<'a> {
    pub fn new(finder: &'a DoiFinder, schedule: &ScheduleConfig, hostname: &str) -> Self {
        Self {
            finder,
            delay: schedule.delay_for(hostname),
        }
    }

    pub fn immediate(finder: &'a DoiFinder) -> Self {
        Self {
            finder,
            delay: Duration::ZERO,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// `capture` runs after the delay so content rendered client-side has
    /// had a chance to appear. `None` means no document is available.
    pub async fn run<F, P>(self, capture: F, presenter: &P) -> Option<Detection>
    where
        F: FnOnce() -> Option<DocumentSnapshot>,
        P: Presenter + ?Sized,
    {
        if !self.delay.is_zero() {
            debug!(delay_ms = self.delay.as_millis() as u64, "waiting before extraction");
            tokio::time::sleep(self.delay).await;
        }

        let Some(snapshot) = capture() else {
            debug!("no document available");
            return None;
        };

        let detection = self.finder.find(&snapshot)?;
        presenter.present(&detection.doi);
        Some(detection)
    }
}
