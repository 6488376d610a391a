// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared UI pieces: header bar, offline banner, menu tiles, placeholders.

use dioxus::prelude::*;
use kiosk_core::Screen;
use kiosk_core::human_errors::{HumanError, Severity};

use crate::services::app_services::AppServices;
use crate::state::KioskState;

/// Title bar with Back and Home buttons.
#[component]
pub fn Header() -> Element {
    let state = use_context::<Signal<KioskState>>();
    let svc = use_context::<AppServices>();
    let title = state.read().screen.title().to_owned();
    let at_home = state.read().screen == Screen::Home;
    let can_go_back = state.read().can_go_back();

    rsx! {
        header {
            style: "display: flex; align-items: center; gap: 16px; padding: 12px 24px; background: #0b4f8a; color: white;",
            if can_go_back {
                button {
                    style: "{NAV_BUTTON}",
                    onclick: {
                        let controller = svc.controller().clone();
                        move |_| controller.go_back()
                    },
                    "\u{2190} Kembali"
                }
            }
            h1 { style: "flex: 1; margin: 0; font-size: 28px;", "{title}" }
            IdleCountdown {}
            if !at_home {
                button {
                    style: "{NAV_BUTTON}",
                    onclick: {
                        let controller = svc.controller().clone();
                        move |_| controller.go_home()
                    },
                    "\u{1F3E0} Beranda"
                }
            }
        }
    }
}

/// Seconds before an idle reset at which the visitor is warned.
const IDLE_WARNING_SECS: u64 = 15;

/// Shows how long until the kiosk returns Home once the countdown is nearly
/// over. Hidden on exempt screens.
#[component]
fn IdleCountdown() -> Element {
    let svc = use_context::<AppServices>();
    let mut remaining = use_signal(|| None::<u64>);

    let controller = svc.controller().clone();
    let _ticker = use_resource(move || {
        let controller = controller.clone();
        async move {
            loop {
                let secs = controller.idle_remaining().map(|d| d.as_secs());
                if *remaining.peek() != secs {
                    remaining.set(secs);
                }
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            }
        }
    });

    let secs = *remaining.read();
    rsx! {
        if let Some(secs) = secs.filter(|s| *s <= IDLE_WARNING_SECS) {
            span {
                style: "font-size: 16px; padding: 6px 12px; border-radius: 8px; background: #f0ad4e; color: #222;",
                "Kembali ke beranda dalam {secs} detik"
            }
        }
    }
}

const NAV_BUTTON: &str = "padding: 12px 20px; font-size: 20px; border-radius: 10px; border: none; background: rgba(255,255,255,0.15); color: white;";

#[component]
pub fn OfflineBanner() -> Element {
    rsx! {
        div {
            style: "padding: 8px 24px; background: #fff3cd; color: #856404; font-size: 16px; text-align: center;",
            "Kios sedang offline. Informasi yang ditampilkan mungkin bukan yang terbaru."
        }
    }
}

/// Large touch target used on every list page.
#[component]
pub fn Tile(
    label: String,
    #[props(default)] icon: String,
    #[props(default)] description: String,
    onpress: EventHandler<()>,
) -> Element {
    rsx! {
        button {
            style: "display: flex; flex-direction: column; align-items: flex-start; gap: 6px; padding: 24px; min-height: 120px; border-radius: 16px; border: 1px solid #d0d7de; background: white; text-align: left; font-size: 22px;",
            onclick: move |_| onpress.call(()),
            if !icon.is_empty() {
                span { style: "font-size: 40px;", "{icon}" }
            }
            strong { "{label}" }
            if !description.is_empty() {
                span { style: "color: #666; font-size: 16px;", "{description}" }
            }
        }
    }
}

/// Grid wrapper for tiles.
#[component]
pub fn TileGrid(children: Element) -> Element {
    rsx! {
        div { style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 20px;",
            {children}
        }
    }
}

/// Shown when a page has nothing to list.
#[component]
pub fn Placeholder(message: String, hint: String) -> Element {
    rsx! {
        div { style: "text-align: center; color: #666; margin: 64px auto; max-width: 560px;",
            p { style: "font-size: 24px; margin-bottom: 8px;", "{message}" }
            p { style: "font-size: 18px; color: #888;", "{hint}" }
        }
    }
}

/// Placeholder for a `HumanError`, coloured by severity.
#[component]
pub fn ErrorPlaceholder(error: HumanError) -> Element {
    let colour = match error.severity {
        Severity::Transient => "#856404",
        Severity::Missing => "#666",
        Severity::Permanent => "#a4262c",
    };
    rsx! {
        div { style: "text-align: center; color: {colour}; margin: 64px auto; max-width: 560px;",
            p { style: "font-size: 24px; margin-bottom: 8px;", "{error.message}" }
            p { style: "font-size: 18px;", "{error.suggestion}" }
        }
    }
}
