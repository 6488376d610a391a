// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the navigation controller: a typical visitor walk
// (menu, documents, PDF, back, home) and the per-second idle check.

use std::sync::Arc;
use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use kiosk_core::{DocumentRef, KioskConfig, Screen};
use kiosk_session::testing::{CountingPrimer, ManualConnectivity, ManualScheduler};
use kiosk_session::{KioskController, ManualClock, SessionDeps};

fn controller(clock: Arc<ManualClock>) -> KioskController {
    KioskController::start(
        &KioskConfig::default(),
        SessionDeps {
            clock,
            scheduler: Arc::new(ManualScheduler::new()),
            connectivity: Arc::new(ManualConnectivity::new(false)),
            tracker: Arc::new(kiosk_core::traits::NullTracker),
            primer: Arc::new(CountingPrimer::new()),
        },
    )
}

fn bench_visitor_walk(c: &mut Criterion) {
    let kiosk = controller(Arc::new(ManualClock::new()));
    let doc = DocumentRef {
        id: "siup".into(),
        title: "Formulir SIUP".into(),
        file_name: "siup.pdf".into(),
        public_url: None,
    };

    c.bench_function("visitor walk (5 navigations)", |b| {
        b.iter(|| {
            kiosk.navigate_to(Screen::submenu("izin", "Perizinan"));
            kiosk.navigate_to(Screen::documents("formulir", "Formulir", None));
            kiosk.navigate_to(Screen::pdf(black_box(doc.clone())));
            kiosk.go_back();
            kiosk.go_home();
        });
    });
}

fn bench_idle_check(c: &mut Criterion) {
    let clock = Arc::new(ManualClock::new());
    let kiosk = controller(clock.clone());
    kiosk.navigate_to(Screen::submenu("profil", "Profil"));

    c.bench_function("idle check (not expired)", |b| {
        b.iter(|| {
            kiosk.reset_activity();
            clock.advance(Duration::from_millis(1));
            black_box(kiosk.check_idle());
        });
    });
}

criterion_group!(benches, bench_visitor_walk, bench_idle_check);
criterion_main!(benches);
