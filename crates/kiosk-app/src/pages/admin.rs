// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Admin page — usage dashboard backed by the stats database, plus the one
// setting staff may change on the device.

use dioxus::prelude::*;
use kiosk_catalog::{DailyCount, DashboardSummary, StatsEntry};
use kiosk_core::EventKind;

use crate::services::app_services::AppServices;

const CHART_DAYS: u32 = 7;

#[component]
pub fn Admin() -> Element {
    let svc = use_context::<AppServices>();
    let mut summary = use_signal(DashboardSummary::default);
    let mut daily = use_signal(Vec::<DailyCount>::new);
    let mut recent = use_signal(Vec::<StatsEntry>::new);
    let mut tracking = use_signal(|| svc.config().tracking_enabled);
    let mut status = use_signal(|| None::<String>);

    // Load on mount and refresh periodically.
    let svc_load = svc.clone();
    let _loader = use_resource(move || {
        let svc = svc_load.clone();
        async move {
            loop {
                match svc.dashboard() {
                    Ok(s) => summary.set(s),
                    Err(e) => tracing::warn!(error = %e, "dashboard query failed"),
                }
                let now = chrono::Local::now();
                if let Ok(days) = svc.stats().daily_counts(EventKind::DocumentOpened, CHART_DAYS, &now) {
                    daily.set(days);
                }
                if let Ok(entries) = svc.stats().recent(20) {
                    recent.set(entries);
                }
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            }
        }
    });

    let s = summary.read().clone();
    let data_dir = svc.data_dir().display().to_string();
    let peak = daily.read().iter().map(|d| d.count).max().unwrap_or(0).max(1);

    rsx! {
        div { style: "max-width: 1100px;",
            p { style: "color: #666;",
                "Statistik penggunaan kios. Data disimpan di {data_dir}."
            }

            div { style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px; margin: 24px 0;",
                StatCard { label: "Sesi", value: s.sessions }
                StatCard { label: "Menu dipilih", value: s.menu_selections }
                StatCard { label: "Dokumen dilihat", value: s.document_views }
                StatCard { label: "Dokumen diunduh", value: s.document_downloads }
                StatCard { label: "QR ditampilkan", value: s.qr_displays }
                StatCard { label: "Reset otomatis", value: s.idle_resets }
            }

            div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 24px;",
                div {
                    h3 { "Menu terpopuler" }
                    for entry in s.top_menus.iter() {
                        p { key: "{entry.subject}", "{entry.subject}: {entry.count}" }
                    }
                }
                div {
                    h3 { "Dokumen terpopuler" }
                    for entry in s.top_documents.iter() {
                        p { key: "{entry.subject}", "{entry.subject}: {entry.count}" }
                    }
                }
            }

            h3 { "Dokumen dilihat, {CHART_DAYS} hari terakhir" }
            div { style: "display: flex; align-items: flex-end; gap: 8px; height: 160px; border-bottom: 1px solid #ddd;",
                for day in daily.read().iter() {
                    {
                        let height = day.count * 150 / peak;
                        let date = day.date.format("%d/%m").to_string();
                        rsx! {
                            div { key: "{day.date}", style: "flex: 1; text-align: center; font-size: 12px; color: #666;",
                                div { style: "height: {height}px; background: #0b4f8a; border-radius: 4px 4px 0 0;" }
                                "{date} ({day.count})"
                            }
                        }
                    }
                }
            }

            h3 { style: "margin-top: 32px;", "Aktivitas terbaru" }
            if recent.read().is_empty() {
                p { style: "color: #aaa;", "Belum ada aktivitas." }
            }
            for entry in recent.read().iter() {
                {
                    let kind = entry.kind.as_str();
                    rsx! {
                        div { key: "{entry.id}", style: "display: flex; justify-content: space-between; padding: 6px 0; border-bottom: 1px solid #f0f0f0; font-size: 14px;",
                            span { strong { "{kind}" } " {entry.subject}" }
                            span { style: "color: #999;", "{entry.timestamp}" }
                        }
                    }
                }
            }

            h3 { style: "margin-top: 32px;", "Pengaturan" }
            label { style: "display: flex; align-items: center; gap: 12px; font-size: 18px;",
                input {
                    r#type: "checkbox",
                    checked: *tracking.read(),
                    onchange: {
                        let svc = svc.clone();
                        move |evt: FormEvent| {
                            let enabled = evt.checked();
                            let config = kiosk_core::KioskConfig {
                                tracking_enabled: enabled,
                                ..svc.config()
                            };
                            match svc.save_config(&config) {
                                Ok(()) => {
                                    tracking.set(enabled);
                                    status.set(Some("Tersimpan. Berlaku setelah kios dimulai ulang.".into()));
                                }
                                Err(e) => {
                                    tracing::error!(error = %e, "failed to save config");
                                    status.set(Some(format!("Gagal menyimpan: {e}")));
                                }
                            }
                        }
                    },
                }
                "Catat statistik penggunaan"
            }
            if let Some(msg) = status.read().as_ref() {
                p { style: "color: #666; font-size: 14px;", "{msg}" }
            }
        }
    }
}

#[component]
fn StatCard(label: &'static str, value: u64) -> Element {
    rsx! {
        div { style: "padding: 16px; border: 1px solid #e0e0e0; border-radius: 12px; background: #fafafa;",
            div { style: "font-size: 32px; font-weight: 600;", "{value}" }
            div { style: "color: #666;", "{label}" }
        }
    }
}
