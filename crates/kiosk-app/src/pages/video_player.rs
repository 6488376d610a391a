// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Video player page.

use dioxus::prelude::*;

use crate::services::app_services::AppServices;

#[component]
pub fn VideoPlayerPage(title: String, video_url: String) -> Element {
    let svc = use_context::<AppServices>();

    rsx! {
        div { style: "display: flex; flex-direction: column; align-items: center; gap: 16px;",
            video {
                src: "{video_url}",
                controls: true,
                autoplay: true,
                style: "width: 100%; max-height: 75vh; background: black; border-radius: 12px;",
                // Playback counts as activity so a running video is not cut off.
                ontimeupdate: {
                    let controller = svc.controller().clone();
                    move |_| controller.reset_activity()
                },
            }
            p { style: "font-size: 20px; color: #666;", "{title}" }
        }
    }
}
