// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Collaborator traits. The navigation controller only ever talks to the
// catalog, the stats store and the offline cache through these.

use crate::error::Result;
use crate::types::{Category, DocumentEntry, Menu, Sector, Submenu, TrackingEvent};

/// Read-only access to menus, sectors and documents.
///
/// Lookups that miss return `None` or an empty list. Callers render a
/// placeholder instead of failing navigation.
pub trait CatalogLookup: Send + Sync {
    fn menus(&self) -> Vec<Menu>;

    fn menu(&self, menu_id: &str) -> Option<Menu>;

    fn submenu(&self, menu_id: &str, submenu_id: &str) -> Option<Submenu> {
        self.menu(menu_id)?
            .submenus
            .into_iter()
            .find(|s| s.id == submenu_id)
    }

    fn sectors_for(&self, menu_id: &str) -> Vec<Sector>;

    fn sector(&self, sector_id: &str) -> Option<Sector>;

    fn category(&self, category_id: &str) -> Option<Category>;

    /// Published documents in a category, optionally narrowed to one sector.
    fn documents_in(&self, category_id: &str, sector_id: Option<&str>) -> Vec<DocumentEntry>;

    fn document(&self, document_id: &str) -> Option<DocumentEntry>;
}

/// Receives usage events. Implementations log their own failures; the caller
/// never sees them.
pub trait TrackingSink: Send + Sync {
    fn track(&self, event: TrackingEvent);
}

/// Stores the catalog locally so the kiosk keeps working offline.
pub trait OfflineCachePrimer: Send + Sync {
    fn prime(&self) -> Result<()>;
}

/// Sink that drops every event (tracking disabled).
pub struct NullTracker;

impl TrackingSink for NullTracker {
    fn track(&self, _event: TrackingEvent) {}
}
