//! Environment scheme watcher
//!
//! [`resolve_scheme`](crate::resolve_scheme) is not reactive. Consumers that
//! must restyle when the environment flips (a particle field whose colors
//! follow the scheme) start a watcher, which polls the source on the timer
//! queue and reports changes. Dropping the watcher stops polling.

use crate::platform::ColorSchemeSource;
use crate::theme::ColorScheme;
use attest_core::sync::lock;
use attest_core::{SchedulerHandle, TimerGuard};
use std::sync::{Arc, Mutex};

/// Default poll interval in milliseconds
pub const DEFAULT_POLL_MS: u64 = 1000;

/// Polls a [`ColorSchemeSource`] and reports changes
pub struct SchemeWatcher {
    last: Arc<Mutex<Option<ColorScheme>>>,
    _timer: Option<TimerGuard>,
}

impl SchemeWatcher {
    /// Start polling every `poll_ms`; `on_change` runs with each new scheme
    pub fn start<F>(
        source: Arc<dyn ColorSchemeSource>,
        scheduler: &SchedulerHandle,
        poll_ms: u64,
        mut on_change: F,
    ) -> Self
    where
        F: FnMut(ColorScheme) + Send + 'static,
    {
        let last = Arc::new(Mutex::new(source.query()));
        let seen = last.clone();

        let timer = scheduler.interval(poll_ms, move |_| {
            let Some(scheme) = source.query() else {
                return;
            };
            let mut seen = lock(&seen);
            if *seen != Some(scheme) {
                tracing::debug!(%scheme, "environment color scheme changed");
                *seen = Some(scheme);
                drop(seen);
                on_change(scheme);
            }
        });

        Self {
            last,
            _timer: timer,
        }
    }

    /// Last scheme seen from the source
    pub fn last_seen(&self) -> Option<ColorScheme> {
        *lock(&self.last)
    }

    /// Whether polling is scheduled
    pub fn is_polling(&self) -> bool {
        self._timer.as_ref().is_some_and(TimerGuard::is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_core::Scheduler;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    #[test]
    fn test_reports_each_change_once() {
        let scheduler = Scheduler::new();
        let dark = Arc::new(AtomicBool::new(false));
        let flag = dark.clone();
        let source: Arc<dyn ColorSchemeSource> = Arc::new(move || {
            Some(if flag.load(Ordering::SeqCst) {
                ColorScheme::Dark
            } else {
                ColorScheme::Light
            })
        });

        let changes = Arc::new(AtomicU32::new(0));
        let counter = changes.clone();
        let watcher = SchemeWatcher::start(source, &scheduler.handle(), 100, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(watcher.is_polling());
        assert_eq!(watcher.last_seen(), Some(ColorScheme::Light));

        scheduler.advance(500);
        assert_eq!(changes.load(Ordering::SeqCst), 0);

        dark.store(true, Ordering::SeqCst);
        scheduler.advance(500);
        assert_eq!(changes.load(Ordering::SeqCst), 1);
        assert_eq!(watcher.last_seen(), Some(ColorScheme::Dark));

        drop(watcher);
        dark.store(false, Ordering::SeqCst);
        scheduler.advance(500);
        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_detached_scheduler_does_not_poll() {
        let watcher = SchemeWatcher::start(
            Arc::new(crate::platform::Unavailable),
            &SchedulerHandle::detached(),
            DEFAULT_POLL_MS,
            |_| {},
        );
        assert!(!watcher.is_polling());
        assert_eq!(watcher.last_seen(), None);
    }
}
