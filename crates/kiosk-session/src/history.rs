// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Screen history stack.

use kiosk_core::Screen;

static HOME: Screen = Screen::Home;

/// Ordered stack of visited screens.
///
/// `Home` is the floor and is never popped, so the history always holds at
/// least one screen. Only the screens above the floor are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    above_home: Vec<Screen>,
}

impl History {
    /// A fresh history: `[Home]`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The screen currently shown.
    pub fn current(&self) -> &Screen {
        self.above_home.last().unwrap_or(&HOME)
    }

    /// Number of entries, counting the Home floor.
    pub fn depth(&self) -> usize {
        self.above_home.len() + 1
    }

    pub fn can_go_back(&self) -> bool {
        !self.above_home.is_empty()
    }

    pub fn push(&mut self, screen: Screen) {
        self.above_home.push(screen);
    }

    /// Drop the current screen. Returns `None` (and changes nothing) when
    /// only Home is left.
    pub fn pop(&mut self) -> Option<Screen> {
        self.above_home.pop()
    }

    /// Truncate back to `[Home]`.
    pub fn reset(&mut self) {
        self.above_home.clear();
    }

    /// All entries, oldest first, starting with Home.
    pub fn entries(&self) -> Vec<Screen> {
        std::iter::once(HOME.clone())
            .chain(self.above_home.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_home() {
        let history = History::new();
        assert_eq!(history.current(), &Screen::Home);
        assert_eq!(history.depth(), 1);
        assert!(!history.can_go_back());
        assert_eq!(history.entries(), vec![Screen::Home]);
    }

    #[test]
    fn pop_on_floor_is_noop() {
        let mut history = History::new();
        assert_eq!(history.pop(), None);
        assert_eq!(history.entries(), vec![Screen::Home]);
    }

    #[test]
    fn push_then_pop_restores_previous() {
        let mut history = History::new();
        history.push(Screen::submenu("profil", "Profil"));
        let before = history.clone();

        history.push(Screen::content("profil", "tentang", "Tentang"));
        assert_eq!(history.depth(), 3);
        assert_eq!(
            history.pop(),
            Some(Screen::content("profil", "tentang", "Tentang"))
        );
        assert_eq!(history, before);
    }

    #[test]
    fn reset_from_any_depth() {
        let mut history = History::new();
        for i in 0..10 {
            history.push(Screen::submenu(format!("m{i}"), "Menu"));
        }
        history.reset();
        assert_eq!(history.entries(), vec![Screen::Home]);
    }

    #[test]
    fn home_can_be_pushed_above_the_floor() {
        let mut history = History::new();
        history.push(Screen::Admin);
        history.push(Screen::Home);
        assert_eq!(history.depth(), 3);
        assert_eq!(history.pop(), Some(Screen::Home));
        assert_eq!(history.current(), &Screen::Admin);
    }
}
