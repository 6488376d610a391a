// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF viewer page — one page at a time with paging, zoom, and a download
// button for documents that are published online.

use dioxus::prelude::*;
use kiosk_core::DocumentRef;
use kiosk_core::human_errors::{HumanError, humanize_error};
use kiosk_document::PdfViewer;

use crate::components::{ErrorPlaceholder, Placeholder};
use crate::services::app_services::AppServices;

const CONTROL: &str = "padding: 14px 22px; font-size: 22px; border-radius: 10px; border: 1px solid #d0d7de; background: white;";

#[component]
pub fn PdfViewerPage(document: DocumentRef) -> Element {
    let svc = use_context::<AppServices>();

    let page_count: Result<u32, HumanError> = use_hook({
        let svc = svc.clone();
        let document = document.clone();
        move || {
            svc.page_count(&document).map_err(|e| {
                tracing::warn!(document = %document.id, error = %e, "document failed to open");
                humanize_error(&e)
            })
        }
    });
    let initial_pages = page_count.clone().unwrap_or(0);
    let mut viewer = use_signal(move || PdfViewer::new(initial_pages));

    let rendered = use_memo({
        let svc = svc.clone();
        let document = document.clone();
        move || {
            let page = viewer.read().page();
            if page == 0 {
                return None;
            }
            Some(svc.render_page(&document, page).map_err(|e| {
                tracing::warn!(document = %document.id, page, error = %e, "page failed to render");
                humanize_error(&e)
            }))
        }
    });

    match page_count {
        Err(error) => return rsx! { ErrorPlaceholder { error } },
        Ok(0) => {
            return rsx! {
                Placeholder {
                    message: "Dokumen ini kosong.",
                    hint: "Silakan hubungi petugas di meja layanan.",
                }
            };
        }
        Ok(_) => {}
    }

    let state = *viewer.read();
    let zoom = state.zoom();
    let label = state.label();

    rsx! {
        div { style: "display: flex; flex-direction: column; height: 100%; gap: 16px;",
            div { style: "flex: 1; overflow: auto; background: #525659; border-radius: 12px; display: flex; justify-content: center;",
                {
                    match rendered.read().clone() {
                        Some(Ok(path)) => {
                            let src = format!("file://{}#toolbar=0&navpanes=0", path.display());
                            rsx! {
                                embed {
                                    r#type: "application/pdf",
                                    src: "{src}",
                                    style: "width: {zoom}%; min-height: 100%; background: white;",
                                }
                            }
                        }
                        Some(Err(error)) => rsx! { ErrorPlaceholder { error } },
                        None => rsx! {},
                    }
                }
            }

            div { style: "display: flex; align-items: center; justify-content: center; gap: 12px;",
                button {
                    style: "{CONTROL}",
                    disabled: !state.has_previous(),
                    onclick: move |_| {
                        viewer.write().previous();
                    },
                    "\u{25C0} Sebelumnya"
                }
                span { style: "font-size: 22px; min-width: 120px; text-align: center;", "{label}" }
                button {
                    style: "{CONTROL}",
                    disabled: !state.has_next(),
                    onclick: move |_| {
                        viewer.write().next();
                    },
                    "Berikutnya \u{25B6}"
                }

                span { style: "width: 32px;" }

                button {
                    style: "{CONTROL}",
                    onclick: move |_| {
                        viewer.write().zoom_out();
                    },
                    "\u{2212}"
                }
                span { style: "font-size: 20px; min-width: 70px; text-align: center;", "{zoom}%" }
                button {
                    style: "{CONTROL}",
                    onclick: move |_| {
                        viewer.write().zoom_in();
                    },
                    "+"
                }

                if document.public_url.is_some() {
                    span { style: "width: 32px;" }
                    button {
                        style: "{CONTROL} background: #0b4f8a; color: white;",
                        onclick: {
                            let controller = svc.controller().clone();
                            let document = document.clone();
                            move |_| controller.request_download(&document)
                        },
                        "\u{2B07} Unduh"
                    }
                }
            }
        }
    }
}
