// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{KioskError, Result};

/// Idle timeout on every screen except an open document (seconds).
pub const MENU_TIMEOUT_SECS: u64 = 90;
/// Idle timeout while a document is open in the PDF viewer (seconds).
pub const DOCUMENT_TIMEOUT_SECS: u64 = 180;

/// Persistent kiosk settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    /// Idle timeout on menu screens.
    pub menu_timeout_secs: u64,
    /// Idle timeout while a PDF is open.
    pub document_timeout_secs: u64,
    /// How often the idle check runs.
    pub tick_interval_ms: u64,
    /// Host probed to decide whether the kiosk is online.
    pub probe_host: String,
    pub probe_port: u16,
    /// Seconds between connectivity probes.
    pub probe_interval_secs: u64,
    /// Connect timeout for a single probe.
    pub probe_timeout_ms: u64,
    /// Catalog JSON file. Relative paths resolve against the data directory.
    pub catalog_path: String,
    /// Directory holding the PDF files referenced by the catalog.
    pub documents_dir: String,
    /// Record tracking events in the stats database.
    pub tracking_enabled: bool,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            menu_timeout_secs: MENU_TIMEOUT_SECS,
            document_timeout_secs: DOCUMENT_TIMEOUT_SECS,
            tick_interval_ms: 1_000,
            probe_host: "1.1.1.1".into(),
            probe_port: 443,
            probe_interval_secs: 15,
            probe_timeout_ms: 3_000,
            catalog_path: "catalog.json".into(),
            documents_dir: "documents".into(),
            tracking_enabled: true,
        }
    }
}

impl KioskConfig {
    pub fn menu_timeout(&self) -> Duration {
        Duration::from_secs(self.menu_timeout_secs)
    }

    pub fn document_timeout(&self) -> Duration {
        Duration::from_secs(self.document_timeout_secs)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Reject settings that would make the idle timer misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.menu_timeout_secs == 0 || self.document_timeout_secs == 0 {
            return Err(KioskError::Config("idle timeouts must be non-zero".into()));
        }
        if self.document_timeout_secs < self.menu_timeout_secs {
            return Err(KioskError::Config(format!(
                "document timeout ({}s) shorter than menu timeout ({}s)",
                self.document_timeout_secs, self.menu_timeout_secs
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(KioskError::Config("tick interval must be non-zero".into()));
        }
        if self.probe_interval_secs == 0 {
            return Err(KioskError::Config("probe interval must be non-zero".into()));
        }
        Ok(())
    }
}
