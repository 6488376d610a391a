// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Idle eviction rule.
//
// An open document gets the longer timeout. Home and Admin are never evicted:
// Home is already the destination, and an admin must not be logged out from
// under their hands. Everything else (video included) uses the menu timeout.

use std::time::Duration;

use kiosk_core::{KioskConfig, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdlePolicy {
    pub menu_timeout: Duration,
    pub document_timeout: Duration,
}

impl IdlePolicy {
    pub fn from_config(config: &KioskConfig) -> Self {
        Self {
            menu_timeout: config.menu_timeout(),
            document_timeout: config.document_timeout(),
        }
    }

    /// Timeout that applies while `screen` is showing.
    pub fn timeout_for(&self, screen: &Screen) -> Duration {
        if screen.is_document() {
            self.document_timeout
        } else {
            self.menu_timeout
        }
    }

    /// Whether `screen`, idle for `elapsed`, must be reset to Home.
    pub fn should_evict(&self, screen: &Screen, elapsed: Duration) -> bool {
        !screen.is_idle_exempt() && elapsed >= self.timeout_for(screen)
    }

    /// Time left before eviction, or `None` for exempt screens.
    pub fn remaining(&self, screen: &Screen, elapsed: Duration) -> Option<Duration> {
        if screen.is_idle_exempt() {
            return None;
        }
        Some(self.timeout_for(screen).saturating_sub(elapsed))
    }
}

impl Default for IdlePolicy {
    fn default() -> Self {
        Self::from_config(&KioskConfig::default())
    }
}
