// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state — the reactive mirror of the session controller.

use kiosk_core::Screen;
use kiosk_session::SessionSnapshot;

/// What the shell renders. Updated from the controller's snapshot channel;
/// pages never write it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KioskState {
    pub screen: Screen,
    pub depth: usize,
    pub online: bool,
}

impl KioskState {
    pub fn can_go_back(&self) -> bool {
        self.depth > 1
    }
}

impl From<SessionSnapshot> for KioskState {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            screen: snapshot.current,
            depth: snapshot.depth,
            online: snapshot.online,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_button_follows_depth() {
        let home = KioskState::from(SessionSnapshot {
            current: Screen::Home,
            depth: 1,
            online: true,
        });
        assert!(!home.can_go_back());

        let deeper = KioskState::from(SessionSnapshot {
            current: Screen::submenu("profil", "Profil"),
            depth: 2,
            online: false,
        });
        assert!(deeper.can_go_back());
        assert!(!deeper.online);
    }
}
