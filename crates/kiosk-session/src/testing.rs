// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory fakes for the controller's injected capabilities. Time, ticks and
// connectivity only change when a test says so.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use kiosk_core::error::{KioskError, Result};
use kiosk_core::{OfflineCachePrimer, TrackingEvent, TrackingSink};

use crate::connectivity::{ConnectivityNotifier, StatusCallback};
use crate::scheduler::{PeriodicScheduler, ScheduleHandle, TickCallback};

fn locked<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

type Registry<C> = Arc<Mutex<Vec<(u64, Arc<Mutex<C>>)>>>;

fn register<C>(registry: &Registry<C>, ids: &AtomicU64, callback: C) -> ScheduleHandle
where
    C: Send + 'static,
{
    let id = ids.fetch_add(1, Ordering::SeqCst);
    locked(registry).push((id, Arc::new(Mutex::new(callback))));
    let registry = Arc::clone(registry);
    ScheduleHandle::new(move || locked(&registry).retain(|(i, _)| *i != id))
}

fn snapshot<C>(registry: &Registry<C>) -> Vec<Arc<Mutex<C>>> {
    locked(registry).iter().map(|(_, c)| Arc::clone(c)).collect()
}

/// Scheduler whose ticks are fired by hand.
#[derive(Default)]
pub struct ManualScheduler {
    callbacks: Registry<TickCallback>,
    ids: AtomicU64,
    periods: Mutex<Vec<Duration>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every registered callback once.
    pub fn fire(&self) {
        for callback in snapshot(&self.callbacks) {
            let mut tick = locked(&callback);
            (*tick)();
        }
    }

    /// Number of live registrations.
    pub fn registered(&self) -> usize {
        locked(&self.callbacks).len()
    }

    /// Periods requested so far, in registration order.
    pub fn periods(&self) -> Vec<Duration> {
        locked(&self.periods).clone()
    }
}

impl PeriodicScheduler for ManualScheduler {
    fn every(&self, period: Duration, callback: TickCallback) -> ScheduleHandle {
        locked(&self.periods).push(period);
        register(&self.callbacks, &self.ids, callback)
    }
}

/// Connectivity flipped by hand.
#[derive(Default)]
pub struct ManualConnectivity {
    online: AtomicBool,
    callbacks: Registry<StatusCallback>,
    ids: AtomicU64,
}

impl ManualConnectivity {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
            ..Self::default()
        }
    }

    /// Change the status, notifying subscribers if it actually changed.
    pub fn set_online(&self, online: bool) {
        if self.online.swap(online, Ordering::SeqCst) == online {
            return;
        }
        self.emit(online);
    }

    /// Notify subscribers without checking for a change.
    pub fn emit(&self, online: bool) {
        for callback in snapshot(&self.callbacks) {
            let mut notify = locked(&callback);
            (*notify)(online);
        }
    }

    pub fn registered(&self) -> usize {
        locked(&self.callbacks).len()
    }
}

impl ConnectivityNotifier for ManualConnectivity {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn subscribe(&self, callback: StatusCallback) -> ScheduleHandle {
        register(&self.callbacks, &self.ids, callback)
    }
}

/// Tracking sink that keeps every event in memory.
#[derive(Default)]
pub struct RecordingTracker {
    events: Mutex<Vec<TrackingEvent>>,
}

impl RecordingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TrackingEvent> {
        locked(&self.events).clone()
    }
}

impl TrackingSink for RecordingTracker {
    fn track(&self, event: TrackingEvent) {
        locked(&self.events).push(event);
    }
}

/// Offline-cache primer that counts calls and can be told to fail.
#[derive(Default)]
pub struct CountingPrimer {
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl CountingPrimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl OfflineCachePrimer for CountingPrimer {
    fn prime(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(KioskError::CacheMissing);
        }
        Ok(())
    }
}
