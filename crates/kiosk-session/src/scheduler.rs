// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Periodic scheduling capability used by the idle check.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Callback invoked on every tick.
pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

/// "Invoke this callback every `period`."
pub trait PeriodicScheduler: Send + Sync {
    fn every(&self, period: Duration, callback: TickCallback) -> ScheduleHandle;
}

/// Registration returned by a scheduler or notifier. Dropping it deregisters
/// the callback.
#[must_use = "dropping the handle cancels the registration"]
pub struct ScheduleHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl ScheduleHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle with nothing to cancel.
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for ScheduleHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for ScheduleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Scheduler backed by a tokio interval task per registration.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Scheduler on the ambient runtime, if there is one.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl PeriodicScheduler for TokioScheduler {
    fn every(&self, period: Duration, mut callback: TickCallback) -> ScheduleHandle {
        debug!(period_ms = period.as_millis() as u64, "scheduling periodic task");
        let task = self.runtime.spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                callback();
            }
        });
        ScheduleHandle::new(move || task.abort())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn handle_runs_cancel_once_on_drop() {
        let cancelled = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&cancelled);
        let handle = ScheduleHandle::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        handle.cancel();
        assert_eq!(cancelled.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_ticks_until_dropped() {
        let scheduler = TokioScheduler::current().expect("inside runtime");
        let ticks = Arc::new(AtomicUsize::new(0));
        let t = Arc::clone(&ticks);

        let handle = scheduler.every(
            Duration::from_secs(1),
            Box::new(move || {
                t.fetch_add(1, Ordering::SeqCst);
            }),
        );

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);

        drop(handle);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn no_runtime_no_scheduler() {
        assert!(TokioScheduler::current().is_none());
    }
}
