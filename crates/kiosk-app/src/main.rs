// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Kiosk — touchscreen public information kiosk.
//
// Entry point. Initialises logging and the background runtime that drives the
// idle tick and connectivity probe, then launches the Dioxus UI.

mod components;
mod pages;
mod services;
mod state;

use std::sync::OnceLock;

use dioxus::prelude::*;
use kiosk_core::Screen;
use tokio::runtime::{Handle, Runtime};

use components::{ErrorPlaceholder, Header, OfflineBanner};
use pages::admin::Admin;
use pages::content::ContentPage;
use pages::documents::DocumentsPage;
use pages::home::Home;
use pages::pdf_viewer::PdfViewerPage;
use pages::qr_page::QrCodePage;
use pages::sector_detail::SectorDetailPage;
use pages::sectors::SectorsPage;
use pages::submenu::SubmenuPage;
use pages::video_player::VideoPlayerPage;
use services::app_services::AppServices;
use state::KioskState;

/// Runs the session timers independently of the UI event loop.
static RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Kiosk starting");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("kiosk-session")
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "failed to start background runtime");
            std::process::exit(1);
        }
    };
    let _ = RUNTIME.set(runtime);

    dioxus::launch(app);
}

fn start_services(runtime: Handle) -> Option<AppServices> {
    match AppServices::init(runtime.clone()) {
        Ok(svc) => {
            tracing::info!("backend services initialised");
            Some(svc)
        }
        Err(e) => {
            tracing::error!(error = %e, "persistent storage failed — using in-memory fallback");
            match AppServices::fallback(runtime) {
                Ok(svc) => Some(svc),
                Err(e) => {
                    tracing::error!(error = %e, "fallback services failed");
                    None
                }
            }
        }
    }
}

/// Root component.
fn app() -> Element {
    let Some(runtime) = RUNTIME.get() else {
        return rsx! { Maintenance {} };
    };
    let handle = runtime.handle().clone();
    let svc = use_hook(move || start_services(handle));
    let Some(svc) = svc else {
        return rsx! { Maintenance {} };
    };

    use_context_provider(|| svc.clone());
    let mut state =
        use_context_provider(|| Signal::new(KioskState::from(svc.controller().snapshot())));

    // Mirror controller snapshots into the reactive state.
    let controller = svc.controller().clone();
    use_future(move || {
        let controller = controller.clone();
        async move {
            let mut snapshots = controller.subscribe();
            state.set(KioskState::from(snapshots.borrow_and_update().clone()));
            while snapshots.changed().await.is_ok() {
                let snapshot = snapshots.borrow_and_update().clone();
                state.set(KioskState::from(snapshot));
            }
        }
    });

    let shutdown = svc.clone();
    use_drop(move || shutdown.shutdown());

    let controller = svc.controller().clone();

    rsx! {
        div { class: "kiosk",
            tabindex: "0",
            style: "display: flex; flex-direction: column; height: 100vh; font-family: system-ui, -apple-system, sans-serif; outline: none; user-select: none;",
            onpointerdown: {
                let controller = controller.clone();
                move |_| controller.reset_activity()
            },
            onkeydown: {
                let controller = controller.clone();
                move |_| controller.reset_activity()
            },
            onwheel: move |_| controller.reset_activity(),

            if !state.read().online {
                OfflineBanner {}
            }
            Header {}
            div { class: "page-content",
                style: "flex: 1; overflow-y: auto; padding: 24px;",
                CurrentPage {}
            }
        }
    }
}

/// Renders the page for the controller's current screen.
#[component]
fn CurrentPage() -> Element {
    let state = use_context::<Signal<KioskState>>();
    let screen = state.read().screen.clone();

    match screen {
        Screen::Home => rsx! { Home {} },
        Screen::Submenu { menu_id, .. } => rsx! { SubmenuPage { menu_id } },
        Screen::Content { menu_id, submenu_id, .. } => rsx! {
            ContentPage { menu_id, submenu_id }
        },
        Screen::Documents { category_id, sector_id, .. } => rsx! {
            DocumentsPage { category_id, sector_id }
        },
        Screen::Sectors { menu_id, .. } => rsx! { SectorsPage { menu_id } },
        Screen::SectorDetail { sector_id, .. } => rsx! { SectorDetailPage { sector_id } },
        Screen::PdfViewer { document } => {
            let key = document.id.clone();
            rsx! { PdfViewerPage { key: "{key}", document } }
        }
        Screen::VideoPlayer { title, video_url } => rsx! {
            VideoPlayerPage { title, video_url }
        },
        Screen::QrPage { title, url, description } => rsx! {
            QrCodePage { title, url, description }
        },
        Screen::Admin => rsx! { Admin {} },
    }
}

#[component]
fn Maintenance() -> Element {
    let human = kiosk_core::human_errors::humanize_error(&kiosk_core::KioskError::Config(
        "services unavailable".into(),
    ));
    rsx! {
        div { style: "display: flex; height: 100vh; align-items: center; justify-content: center; font-family: system-ui, sans-serif;",
            ErrorPlaceholder { error: human }
        }
    }
}
