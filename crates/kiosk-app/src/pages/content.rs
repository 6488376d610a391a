// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content page — static informational text.

use dioxus::prelude::*;
use kiosk_core::human_errors::humanize_error;
use kiosk_core::{CatalogLookup, KioskError, SubmenuTarget};

use crate::components::ErrorPlaceholder;
use crate::services::app_services::AppServices;

#[component]
pub fn ContentPage(menu_id: String, submenu_id: String) -> Element {
    let svc = use_context::<AppServices>();

    let body = svc
        .catalog()
        .submenu(&menu_id, &submenu_id)
        .and_then(|submenu| match submenu.target {
            SubmenuTarget::Content { body } => Some(body),
            _ => None,
        });
    let Some(body) = body else {
        return rsx! {
            ErrorPlaceholder {
                error: humanize_error(&KioskError::NotFound(format!("{menu_id}/{submenu_id}")))
            }
        };
    };

    rsx! {
        article { style: "max-width: 900px; font-size: 22px; line-height: 1.6;",
            for (i, paragraph) in body.split("\n\n").enumerate() {
                p { key: "{i}", "{paragraph}" }
            }
        }
    }
}
