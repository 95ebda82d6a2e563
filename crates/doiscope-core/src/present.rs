use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::identifiers::DoiCandidate;

/// Shows a found DOI to the user. Rendering, positioning and any lookups
/// against a backing API belong to the implementor.
pub trait Presenter {
    fn present(&self, doi: &DoiCandidate);
}

/// Page-load-scoped guard: forwards at most one DOI to the wrapped presenter.
#[derive(Debug, Default)]
pub struct OncePresenter<P> {
    inner: P,
    shown: AtomicBool,
}

impl<P: Presenter> OncePresenter<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            shown: AtomicBool::new(false),
        }
    }

    pub fn already_shown(&self) -> bool {
        self.shown.load(Ordering::Acquire)
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Presenter> Presenter for OncePresenter<P> {
    fn present(&self, doi: &DoiCandidate) {
        if self.shown.swap(true, Ordering::AcqRel) {
            debug!(doi = doi.as_str(), "overlay already shown, skipping");
            return;
        }
        self.inner.present(doi);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl Presenter for Recorder {
        fn present(&self, doi: &DoiCandidate) {
            self.0.borrow_mut().push(doi.to_string());
        }
    }

    #[test]
    fn presents_only_once() {
        let once = OncePresenter::new(Recorder::default());
        let a = DoiCandidate::new("10.1000/a").unwrap();
        let b = DoiCandidate::new("10.1000/b").unwrap();

        assert!(!once.already_shown());
        once.present(&a);
        once.present(&b);
        assert!(once.already_shown());
        assert_eq!(once.into_inner().0.into_inner(), vec!["10.1000/a".to_string()]);
    }
}
