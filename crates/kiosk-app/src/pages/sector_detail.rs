// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sector detail page — description plus the document categories that have
// files for this sector.

use dioxus::prelude::*;
use kiosk_core::human_errors::humanize_error;
use kiosk_core::{CatalogLookup, KioskError, Screen};

use crate::components::{ErrorPlaceholder, Placeholder, Tile, TileGrid};
use crate::services::app_services::AppServices;

#[component]
pub fn SectorDetailPage(sector_id: String) -> Element {
    let svc = use_context::<AppServices>();
    let catalog = svc.catalog();

    let Some(sector) = catalog.sector(&sector_id) else {
        return rsx! {
            ErrorPlaceholder { error: humanize_error(&KioskError::NotFound(sector_id.clone())) }
        };
    };

    let categories: Vec<_> = catalog
        .categories()
        .iter()
        .filter(|c| !catalog.documents_in(&c.id, Some(&sector.id)).is_empty())
        .cloned()
        .collect();

    rsx! {
        if !sector.description.is_empty() {
            p { style: "font-size: 22px; line-height: 1.6; max-width: 900px; margin-bottom: 24px;",
                "{sector.description}"
            }
        }
        if categories.is_empty() {
            Placeholder {
                message: "Belum ada dokumen untuk sektor ini.",
                hint: "Silakan hubungi petugas di meja layanan.",
            }
        } else {
            TileGrid {
                for category in categories {
                    Tile {
                        key: "{category.id}",
                        label: category.title.clone(),
                        onpress: {
                            let controller = svc.controller().clone();
                            let screen = Screen::documents(
                                category.id.clone(),
                                category.title.clone(),
                                Some(sector.id.clone()),
                            );
                            move |_| controller.navigate_to(screen.clone())
                        },
                    }
                }
            }
        }
    }
}
