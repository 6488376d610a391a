// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Submenu page — the tiles under one menu.

use dioxus::prelude::*;
use kiosk_core::human_errors::humanize_error;
use kiosk_core::{CatalogLookup, KioskError};

use crate::components::{ErrorPlaceholder, Placeholder, Tile, TileGrid};
use crate::services::app_services::AppServices;

#[component]
pub fn SubmenuPage(menu_id: String) -> Element {
    let svc = use_context::<AppServices>();

    let Some(menu) = svc.catalog().menu(&menu_id) else {
        return rsx! {
            ErrorPlaceholder { error: humanize_error(&KioskError::NotFound(menu_id.clone())) }
        };
    };

    rsx! {
        div {
            if !menu.description.is_empty() {
                p { style: "color: #666; font-size: 20px; margin-bottom: 24px;", "{menu.description}" }
            }
            if menu.submenus.is_empty() {
                Placeholder {
                    message: "Belum ada informasi di menu ini.",
                    hint: "Silakan kembali ke beranda.",
                }
            } else {
                TileGrid {
                    for submenu in menu.submenus.iter() {
                        Tile {
                            key: "{submenu.id}",
                            label: submenu.title.clone(),
                            onpress: {
                                let controller = svc.controller().clone();
                                let screen = submenu.screen(&menu.id);
                                move |_| controller.navigate_to(screen.clone())
                            },
                        }
                    }
                }
            }
        }
    }
}
