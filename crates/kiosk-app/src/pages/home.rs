// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Home page — one tile per top-level menu.

use dioxus::prelude::*;
use kiosk_core::{CatalogLookup, KioskError, Screen};
use kiosk_core::human_errors::humanize_error;

use crate::components::{ErrorPlaceholder, Tile, TileGrid};
use crate::services::app_services::AppServices;

/// Taps on the welcome heading that open the admin dashboard.
const ADMIN_TAPS: u32 = 5;

#[component]
pub fn Home() -> Element {
    let svc = use_context::<AppServices>();
    let mut taps = use_signal(|| 0u32);
    let menus = svc.catalog().menus();

    rsx! {
        div {
            h2 {
                style: "font-size: 32px; margin: 0 0 8px;",
                onclick: {
                    let controller = svc.controller().clone();
                    move |_| {
                        let count = *taps.read() + 1;
                        if count >= ADMIN_TAPS {
                            taps.set(0);
                            tracing::info!("admin dashboard opened");
                            controller.navigate_to(Screen::Admin);
                        } else {
                            taps.set(count);
                        }
                    }
                },
                "Selamat Datang"
            }
            p { style: "color: #666; font-size: 20px; margin-bottom: 24px;",
                "Sentuh salah satu menu untuk mulai."
            }

            if menus.is_empty() {
                ErrorPlaceholder { error: humanize_error(&KioskError::CacheMissing) }
            } else {
                TileGrid {
                    for menu in menus {
                        Tile {
                            key: "{menu.id}",
                            label: menu.title.clone(),
                            icon: menu.icon.clone(),
                            description: menu.description.clone(),
                            onpress: {
                                let controller = svc.controller().clone();
                                let screen = menu.entry_screen();
                                move |_| controller.navigate_to(screen.clone())
                            },
                        }
                    }
                }
            }
        }
    }
}
