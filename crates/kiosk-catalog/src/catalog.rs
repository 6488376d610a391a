// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content catalog — menus, sectors, categories and documents loaded from a
// JSON file.
//
// File layout:
//   {
//     "menus":      [ { "id", "title", "icon", "description", "has_sectors",
//                       "submenus": [ { "id", "title", "target": {...} } ] } ],
//     "sectors":    [ { "id", "menu_id", "title", "description" } ],
//     "categories": [ { "id", "title" } ],
//     "documents":  [ { "id", "category_id", "sector_id", "title",
//                       "file_name", "public_url", "published" } ]
//   }

use std::collections::HashSet;
use std::path::Path;

use kiosk_core::error::{KioskError, Result};
use kiosk_core::{Category, CatalogLookup, DocumentEntry, Menu, Sector, SubmenuTarget};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Immutable, validated catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    menus: Vec<Menu>,
    #[serde(default)]
    sectors: Vec<Sector>,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    documents: Vec<DocumentEntry>,
}

impl Catalog {
    /// A catalog with nothing in it. Every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load and validate a catalog file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json(&data)?;
        info!(
            menus = catalog.menus.len(),
            documents = catalog.documents.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse and validate catalog JSON.
    pub fn from_json(data: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(data)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn all_documents(&self) -> &[DocumentEntry] {
        &self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Reject duplicate ids and references to entries that do not exist.
    fn validate(&self) -> Result<()> {
        unique("menu", self.menus.iter().map(|m| m.id.as_str()))?;
        unique("sector", self.sectors.iter().map(|s| s.id.as_str()))?;
        unique("category", self.categories.iter().map(|c| c.id.as_str()))?;
        unique("document", self.documents.iter().map(|d| d.id.as_str()))?;

        for menu in &self.menus {
            unique(
                &format!("submenu of menu '{}'", menu.id),
                menu.submenus.iter().map(|s| s.id.as_str()),
            )?;
            for submenu in &menu.submenus {
                if let SubmenuTarget::Documents { category_id } = &submenu.target
                    && self.find_category(category_id).is_none()
                {
                    return Err(KioskError::Catalog(format!(
                        "submenu '{}/{}' points at unknown category '{}'",
                        menu.id, submenu.id, category_id
                    )));
                }
            }
        }

        for sector in &self.sectors {
            if self.find_menu(&sector.menu_id).is_none() {
                return Err(KioskError::Catalog(format!(
                    "sector '{}' belongs to unknown menu '{}'",
                    sector.id, sector.menu_id
                )));
            }
        }

        for doc in &self.documents {
            if self.find_category(&doc.category_id).is_none() {
                return Err(KioskError::Catalog(format!(
                    "document '{}' is in unknown category '{}'",
                    doc.id, doc.category_id
                )));
            }
            if let Some(sector_id) = &doc.sector_id
                && self.find_sector(sector_id).is_none()
            {
                return Err(KioskError::Catalog(format!(
                    "document '{}' is in unknown sector '{}'",
                    doc.id, sector_id
                )));
            }
        }

        debug!("catalog validated");
        Ok(())
    }

    fn find_menu(&self, id: &str) -> Option<&Menu> {
        self.menus.iter().find(|m| m.id == id)
    }

    fn find_sector(&self, id: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.id == id)
    }

    fn find_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}

fn unique<'a>(what: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(KioskError::Catalog(format!("duplicate {what} id '{id}'")));
        }
    }
    Ok(())
}

impl CatalogLookup for Catalog {
    fn menus(&self) -> Vec<Menu> {
        self.menus.clone()
    }

    fn menu(&self, menu_id: &str) -> Option<Menu> {
        self.find_menu(menu_id).cloned()
    }

    fn sectors_for(&self, menu_id: &str) -> Vec<Sector> {
        self.sectors
            .iter()
            .filter(|s| s.menu_id == menu_id)
            .cloned()
            .collect()
    }

    fn sector(&self, sector_id: &str) -> Option<Sector> {
        self.find_sector(sector_id).cloned()
    }

    fn category(&self, category_id: &str) -> Option<Category> {
        self.find_category(category_id).cloned()
    }

    fn documents_in(&self, category_id: &str, sector_id: Option<&str>) -> Vec<DocumentEntry> {
        self.documents
            .iter()
            .filter(|d| d.published && d.category_id == category_id)
            .filter(|d| sector_id.is_none_or(|s| d.sector_id.as_deref() == Some(s)))
            .cloned()
            .collect()
    }

    fn document(&self, document_id: &str) -> Option<DocumentEntry> {
        self.documents
            .iter()
            .find(|d| d.id == document_id && d.published)
            .cloned()
    }
}
