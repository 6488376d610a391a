// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Documents page — published PDFs in one category, optionally narrowed to a
// sector.

use dioxus::prelude::*;
use kiosk_core::{CatalogLookup, Screen};

use crate::components::Placeholder;
use crate::services::app_services::AppServices;

#[component]
pub fn DocumentsPage(category_id: String, sector_id: Option<String>) -> Element {
    let svc = use_context::<AppServices>();
    let documents = svc
        .catalog()
        .documents_in(&category_id, sector_id.as_deref());

    if documents.is_empty() {
        return rsx! {
            Placeholder {
                message: "Belum ada dokumen di kategori ini.",
                hint: "Silakan hubungi petugas di meja layanan.",
            }
        };
    }

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 12px; max-width: 900px;",
            for doc in documents {
                button {
                    key: "{doc.id}",
                    style: "display: flex; align-items: center; gap: 16px; padding: 20px; border-radius: 12px; border: 1px solid #d0d7de; background: white; font-size: 22px; text-align: left;",
                    onclick: {
                        let controller = svc.controller().clone();
                        let screen = Screen::pdf(doc.to_ref());
                        move |_| controller.navigate_to(screen.clone())
                    },
                    span { style: "font-size: 32px;", "\u{1F4C4}" }
                    span { "{doc.title}" }
                }
            }
        }
    }
}
