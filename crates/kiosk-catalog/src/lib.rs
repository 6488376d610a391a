// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// kiosk-catalog — the data the kiosk shows and the data it collects.
//
// `catalog` loads menus, sectors and documents from JSON; `stats` is the
// append-only SQLite log behind the tracking sink and the admin dashboard;
// `offline` keeps a verified copy of the catalog for when the network is gone.

pub mod catalog;
pub mod offline;
pub mod stats;

pub use catalog::Catalog;
pub use offline::{OfflineCache, hash_bytes};
pub use stats::{DailyCount, DashboardSummary, StatsEntry, StatsLog, SubjectCount};
