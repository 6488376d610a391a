// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Kiosk — Core types, error definitions, and collaborator traits shared
// across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod traits;
pub mod types;

pub use config::KioskConfig;
pub use error::KioskError;
pub use traits::{CatalogLookup, OfflineCachePrimer, TrackingSink};
pub use types::*;
