// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// QR page — points visitors at an online service or a downloadable copy.

use dioxus::prelude::*;

#[component]
pub fn QrCodePage(title: String, url: String, description: String) -> Element {
    rsx! {
        div { style: "display: flex; flex-direction: column; align-items: center; gap: 24px; margin-top: 48px; text-align: center;",
            h2 { style: "font-size: 30px; margin: 0;", "{title}" }
            if !description.is_empty() {
                p { style: "font-size: 22px; color: #444; max-width: 720px;", "{description}" }
            }
            div { style: "padding: 24px 32px; border: 3px dashed #0b4f8a; border-radius: 16px; font-size: 26px; font-family: monospace; word-break: break-all; max-width: 900px;",
                "{url}"
            }
            p { style: "font-size: 18px; color: #888;",
                "Buka alamat di atas melalui ponsel Anda."
            }
        }
    }
}
