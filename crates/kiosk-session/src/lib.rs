// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// kiosk-session — the navigation/session controller.
//
// Owns the screen history, the activity clock used for idle reset, and the
// online/offline flag. Timers and connectivity are injected capabilities so
// the whole state machine runs against fakes in tests.

pub mod clock;
pub mod connectivity;
pub mod controller;
pub mod history;
pub mod idle;
pub mod scheduler;
pub mod testing;

pub use clock::{Clock, ManualClock, SystemClock};
pub use connectivity::{ConnectivityNotifier, ProbeConnectivity};
pub use controller::{KioskController, SessionDeps, SessionSnapshot};
pub use history::History;
pub use idle::IdlePolicy;
pub use scheduler::{PeriodicScheduler, ScheduleHandle, TokioScheduler};
