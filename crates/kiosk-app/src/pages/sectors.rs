// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sectors page — the business sectors under a menu that has them.

use dioxus::prelude::*;
use kiosk_core::{CatalogLookup, Screen};

use crate::components::{Placeholder, Tile, TileGrid};
use crate::services::app_services::AppServices;

#[component]
pub fn SectorsPage(menu_id: String) -> Element {
    let svc = use_context::<AppServices>();
    let sectors = svc.catalog().sectors_for(&menu_id);

    if sectors.is_empty() {
        return rsx! {
            Placeholder {
                message: "Belum ada sektor untuk menu ini.",
                hint: "Silakan kembali ke beranda.",
            }
        };
    }

    rsx! {
        p { style: "color: #666; font-size: 20px; margin-bottom: 24px;",
            "Pilih sektor usaha Anda."
        }
        TileGrid {
            for sector in sectors {
                Tile {
                    key: "{sector.id}",
                    label: sector.title.clone(),
                    description: sector.description.clone(),
                    onpress: {
                        let controller = svc.controller().clone();
                        let screen = Screen::SectorDetail {
                            sector_id: sector.id.clone(),
                            sector_title: sector.title.clone(),
                        };
                        move |_| controller.navigate_to(screen.clone())
                    },
                }
            }
        }
    }
}
