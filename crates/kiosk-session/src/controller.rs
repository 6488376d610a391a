// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Kiosk navigation/session controller.
//
// Single source of truth for which screen is showing. Holds the history stack,
// the last-activity instant and the online flag behind one mutex, publishes a
// snapshot on every change, and returns to Home after inactivity.
//
// Snapshots are published while the state lock is held so the watch channel
// always carries the latest state. Collaborator calls (tracking, cache
// priming) run after the lock is released, so they may call back in.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::{Duration, Instant};

use kiosk_core::{
    DocumentRef, KioskConfig, OfflineCachePrimer, Screen, SessionId, TrackingEvent, TrackingSink,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::connectivity::ConnectivityNotifier;
use crate::history::History;
use crate::idle::IdlePolicy;
use crate::scheduler::{PeriodicScheduler, ScheduleHandle};

/// What observers render: the current screen, how deep the history is, and
/// whether the kiosk is online.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current: Screen,
    pub depth: usize,
    pub online: bool,
}

impl SessionSnapshot {
    /// Whether a Back affordance should be shown.
    pub fn can_go_back(&self) -> bool {
        self.depth > 1
    }
}

/// Capabilities and collaborators injected at construction.
#[derive(Clone)]
pub struct SessionDeps {
    pub clock: Arc<dyn Clock>,
    pub scheduler: Arc<dyn PeriodicScheduler>,
    pub connectivity: Arc<dyn ConnectivityNotifier>,
    pub tracker: Arc<dyn TrackingSink>,
    pub primer: Arc<dyn OfflineCachePrimer>,
}

struct SessionState {
    history: History,
    last_activity: Instant,
    online: bool,
    torn_down: bool,
}

impl SessionState {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current: self.history.current().clone(),
            depth: self.history.depth(),
            online: self.online,
        }
    }
}

struct Inner {
    session_id: SessionId,
    state: Mutex<SessionState>,
    policy: IdlePolicy,
    clock: Arc<dyn Clock>,
    tracker: Arc<dyn TrackingSink>,
    primer: Arc<dyn OfflineCachePrimer>,
    snapshots: watch::Sender<SessionSnapshot>,
    registrations: Mutex<Vec<ScheduleHandle>>,
}

/// Cheaply cloneable handle to one kiosk session.
///
/// The idle tick and the connectivity callback only hold weak references, so
/// the session ends when the last handle is dropped or [`teardown`] is called.
///
/// [`teardown`]: KioskController::teardown
#[derive(Clone)]
pub struct KioskController {
    inner: Arc<Inner>,
}

impl KioskController {
    /// Start a session at `[Home]` and register the idle tick and the
    /// connectivity observer.
    pub fn start(config: &KioskConfig, deps: SessionDeps) -> Self {
        let online = deps.connectivity.is_online();
        let state = SessionState {
            history: History::new(),
            last_activity: deps.clock.now(),
            online,
            torn_down: false,
        };
        let (snapshots, _) = watch::channel(state.snapshot());

        let controller = Self {
            inner: Arc::new(Inner {
                session_id: SessionId::new(),
                state: Mutex::new(state),
                policy: IdlePolicy::from_config(config),
                clock: deps.clock,
                tracker: deps.tracker,
                primer: deps.primer,
                snapshots,
                registrations: Mutex::new(Vec::new()),
            }),
        };

        let weak = Arc::downgrade(&controller.inner);
        let tick = deps.scheduler.every(
            config.tick_interval(),
            Box::new(move || {
                if let Some(controller) = upgrade(&weak) {
                    controller.check_idle();
                }
            }),
        );

        let weak = Arc::downgrade(&controller.inner);
        let network = deps.connectivity.subscribe(Box::new(move |online| {
            if let Some(controller) = upgrade(&weak) {
                controller.set_online(online);
            }
        }));

        lock(&controller.inner.registrations).extend([tick, network]);

        info!(session = %controller.inner.session_id, online, "kiosk session started");
        controller.track(TrackingEvent::SessionStarted {
            session_id: controller.inner.session_id,
        });
        if online {
            controller.prime_cache();
        }
        controller
    }

    pub fn session_id(&self) -> SessionId {
        self.inner.session_id
    }

    // -- Reads ---------------------------------------------------------------

    pub fn current_screen(&self) -> Screen {
        self.state().history.current().clone()
    }

    pub fn history_depth(&self) -> usize {
        self.state().history.depth()
    }

    pub fn can_go_back(&self) -> bool {
        self.state().history.can_go_back()
    }

    /// Full history, oldest first.
    pub fn history(&self) -> Vec<Screen> {
        self.state().history.entries()
    }

    pub fn is_online(&self) -> bool {
        self.state().online
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state().snapshot()
    }

    /// Receiver that sees every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.snapshots.subscribe()
    }

    /// Time left before the idle timer returns to Home, or `None` on an
    /// exempt screen.
    pub fn idle_remaining(&self) -> Option<Duration> {
        let now = self.inner.clock.now();
        let state = self.state();
        let elapsed = now.saturating_duration_since(state.last_activity);
        self.inner.policy.remaining(state.history.current(), elapsed)
    }

    // -- Navigation ----------------------------------------------------------

    pub fn navigate_to(&self, screen: Screen) {
        debug!(screen = screen.kind(), "navigate");
        let event = screen.arrival_event();
        let now = self.inner.clock.now();
        {
            let mut state = self.state();
            state.history.push(screen);
            state.last_activity = now;
            self.publish(&state);
        }
        if let Some(event) = event {
            self.track(event);
        }
    }

    /// Return to the previous screen. No-op (apart from the activity reset)
    /// when already at the Home floor.
    pub fn go_back(&self) {
        let now = self.inner.clock.now();
        let mut state = self.state();
        state.last_activity = now;
        if let Some(screen) = state.history.pop() {
            debug!(from = screen.kind(), to = state.history.current().kind(), "back");
            self.publish(&state);
        }
    }

    pub fn go_home(&self) {
        let now = self.inner.clock.now();
        let mut state = self.state();
        state.last_activity = now;
        if state.history.can_go_back() {
            state.history.reset();
            debug!("home");
            self.publish(&state);
        }
    }

    /// A visitor asked for their own copy of `document`. Counts one download
    /// and, when the document is published online, shows its QR page.
    pub fn request_download(&self, document: &DocumentRef) {
        self.track(TrackingEvent::DocumentDownloaded {
            document_id: document.id.clone(),
        });
        match &document.public_url {
            Some(url) => self.navigate_to(Screen::QrPage {
                title: document.title.clone(),
                url: url.clone(),
                description: "Pindai kode ini untuk mengunduh dokumen.".into(),
            }),
            None => self.reset_activity(),
        }
    }

    /// Restart the idle countdown. Called by input-event listeners.
    pub fn reset_activity(&self) {
        let now = self.inner.clock.now();
        self.state().last_activity = now;
    }

    // -- Periodic / environment signals --------------------------------------

    /// Run one idle check. Returns `true` if the session was reset to Home.
    pub fn check_idle(&self) -> bool {
        let now = self.inner.clock.now();
        let from = {
            let mut state = self.state();
            if state.torn_down {
                return false;
            }
            let current = state.history.current();
            let elapsed = now.saturating_duration_since(state.last_activity);
            if !self.inner.policy.should_evict(current, elapsed) {
                return false;
            }
            let from = current.kind();
            info!(
                from,
                idle_secs = elapsed.as_secs(),
                depth = state.history.depth(),
                "idle timeout, returning home"
            );
            state.history.reset();
            state.last_activity = now;
            self.publish(&state);
            from
        };
        self.track(TrackingEvent::IdleReset { from: from.into() });
        true
    }

    /// Apply a connectivity change. Going from offline to online primes the
    /// offline catalog cache.
    pub fn set_online(&self, online: bool) {
        {
            let mut state = self.state();
            if state.torn_down || state.online == online {
                return;
            }
            state.online = online;
            info!(online, "network status changed");
            self.publish(&state);
        }
        if online {
            self.prime_cache();
        }
    }

    /// Deregister the idle tick and the connectivity observer. Signals that
    /// still arrive afterwards are ignored.
    pub fn teardown(&self) {
        self.state().torn_down = true;
        let registrations = std::mem::take(&mut *lock(&self.inner.registrations));
        info!(
            session = %self.inner.session_id,
            released = registrations.len(),
            "kiosk session torn down"
        );
        drop(registrations);
    }

    // -- Helpers -------------------------------------------------------------

    fn state(&self) -> MutexGuard<'_, SessionState> {
        lock(&self.inner.state)
    }

    /// Callers hold the state lock, so publications are ordered like the
    /// mutations they describe.
    fn publish(&self, state: &SessionState) {
        self.inner.snapshots.send_replace(state.snapshot());
    }

    fn track(&self, event: TrackingEvent) {
        self.inner.tracker.track(event);
    }

    fn prime_cache(&self) {
        match self.inner.primer.prime() {
            Ok(()) => info!("catalog cached for offline use"),
            Err(e) => warn!(error = %e, "offline cache priming failed"),
        }
    }
}

fn upgrade(weak: &Weak<Inner>) -> Option<KioskController> {
    weak.upgrade().map(|inner| KioskController { inner })
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::testing::{CountingPrimer, ManualConnectivity, ManualScheduler, RecordingTracker};

    struct Harness {
        controller: KioskController,
        clock: Arc<ManualClock>,
        scheduler: Arc<ManualScheduler>,
        network: Arc<ManualConnectivity>,
        tracker: Arc<RecordingTracker>,
        primer: Arc<CountingPrimer>,
    }

    impl Harness {
        fn new(online: bool) -> Self {
            let clock = Arc::new(ManualClock::new());
            let scheduler = Arc::new(ManualScheduler::new());
            let network = Arc::new(ManualConnectivity::new(online));
            let tracker = Arc::new(RecordingTracker::new());
            let primer = Arc::new(CountingPrimer::new());
            let controller = KioskController::start(
                &KioskConfig::default(),
                SessionDeps {
                    clock: clock.clone(),
                    scheduler: scheduler.clone(),
                    connectivity: network.clone(),
                    tracker: tracker.clone(),
                    primer: primer.clone(),
                },
            );
            Self {
                controller,
                clock,
                scheduler,
                network,
                tracker,
                primer,
            }
        }

        /// Advance the clock one second at a time, firing the tick each
        /// second like the real scheduler would.
        fn idle_for(&self, secs: u64) {
            for _ in 0..secs {
                self.clock.advance(Duration::from_secs(1));
                self.scheduler.fire();
            }
        }
    }

    fn doc() -> DocumentRef {
        DocumentRef {
            id: "siup".into(),
            title: "Formulir SIUP".into(),
            file_name: "siup.pdf".into(),
            public_url: None,
        }
    }

    #[test]
    fn starts_at_home_with_one_tick_registered() {
        let h = Harness::new(false);
        assert_eq!(h.controller.current_screen(), Screen::Home);
        assert_eq!(h.controller.history_depth(), 1);
        assert_eq!(h.scheduler.periods(), vec![Duration::from_secs(1)]);
        assert_eq!(h.network.registered(), 1);
    }

    #[test]
    fn back_on_home_is_noop() {
        let h = Harness::new(false);
        h.controller.go_back();
        assert_eq!(h.controller.history(), vec![Screen::Home]);
    }

    #[test]
    fn navigate_then_back_restores_history() {
        let h = Harness::new(false);
        h.controller.navigate_to(Screen::submenu("izin", "Perizinan"));
        h.controller.navigate_to(Screen::documents("formulir", "Formulir", None));
        let before = h.controller.history();

        h.controller.navigate_to(Screen::pdf(doc()));
        h.controller.go_back();
        assert_eq!(h.controller.history(), before);
    }

    #[test]
    fn history_never_empty() {
        let h = Harness::new(false);
        let ops: [fn(&KioskController); 4] = [
            |c| c.navigate_to(Screen::submenu("a", "A")),
            |c| c.go_back(),
            |c| c.go_back(),
            |c| c.go_home(),
        ];
        for round in 0..50 {
            ops[round % ops.len()](&h.controller);
            ops[(round * 7 + 3) % ops.len()](&h.controller);
            assert!(h.controller.history_depth() >= 1);
            assert_eq!(h.controller.history()[0], Screen::Home);
        }
    }

    #[test]
    fn go_home_from_any_depth() {
        let h = Harness::new(false);
        for i in 0..25 {
            h.controller.navigate_to(Screen::submenu(format!("m{i}"), "Menu"));
        }
        h.controller.go_home();
        assert_eq!(h.controller.history(), vec![Screen::Home]);
    }

    #[test]
    fn end_to_end_profile_walk() {
        let h = Harness::new(false);
        h.controller.navigate_to(Screen::submenu("profil", "Profil"));
        h.controller.navigate_to(Screen::content("profil", "tentang", "Tentang"));
        h.controller.go_back();
        assert_eq!(h.controller.current_screen(), Screen::submenu("profil", "Profil"));
        h.controller.go_home();
        assert_eq!(h.controller.current_screen(), Screen::Home);
    }

    #[test]
    fn documents_screen_evicted_after_menu_timeout() {
        let h = Harness::new(false);
        h.controller.navigate_to(Screen::submenu("izin", "Perizinan"));
        h.controller.navigate_to(Screen::documents("formulir", "Formulir", None));

        h.idle_for(89);
        assert!(matches!(h.controller.current_screen(), Screen::Documents { .. }));

        h.idle_for(1);
        assert_eq!(h.controller.history(), vec![Screen::Home]);
        assert!(
            h.tracker
                .events()
                .contains(&TrackingEvent::IdleReset { from: "documents".into() })
        );
    }

    #[test]
    fn pdf_viewer_survives_menu_timeout() {
        let h = Harness::new(false);
        h.controller.navigate_to(Screen::pdf(doc()));

        h.idle_for(90);
        assert_eq!(h.controller.current_screen(), Screen::pdf(doc()));

        h.idle_for(89);
        assert_eq!(h.controller.current_screen(), Screen::pdf(doc()));

        h.idle_for(1);
        assert_eq!(h.controller.current_screen(), Screen::Home);
    }

    #[test]
    fn admin_never_evicted() {
        let h = Harness::new(false);
        h.controller.navigate_to(Screen::Admin);
        h.idle_for(60 * 60);
        assert_eq!(h.controller.current_screen(), Screen::Admin);
        assert_eq!(h.controller.idle_remaining(), None);
    }

    #[test]
    fn home_tick_does_not_publish() {
        let h = Harness::new(false);
        let rx = h.controller.subscribe();
        h.idle_for(600);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn reset_activity_restarts_countdown() {
        let h = Harness::new(false);
        h.controller.navigate_to(Screen::submenu("profil", "Profil"));
        h.idle_for(89);
        h.controller.reset_activity();
        assert!(!h.controller.check_idle());
        assert_eq!(h.controller.idle_remaining(), Some(Duration::from_secs(90)));

        h.idle_for(89);
        assert_eq!(h.controller.current_screen(), Screen::submenu("profil", "Profil"));
    }

    #[test]
    fn navigation_restarts_countdown() {
        let h = Harness::new(false);
        h.controller.navigate_to(Screen::submenu("profil", "Profil"));
        h.idle_for(80);
        h.controller.navigate_to(Screen::content("profil", "visi", "Visi"));
        h.idle_for(80);
        h.controller.go_back();
        h.idle_for(80);
        assert_eq!(h.controller.current_screen(), Screen::submenu("profil", "Profil"));
    }

    #[test]
    fn pdf_scenario_with_mid_read_touch() {
        let h = Harness::new(false);
        h.controller.navigate_to(Screen::pdf(doc()));

        h.idle_for(170);
        h.controller.reset_activity();
        h.idle_for(170);
        assert_eq!(h.controller.current_screen(), Screen::pdf(doc()));

        h.idle_for(15);
        assert_eq!(h.controller.current_screen(), Screen::Home);
    }

    #[test]
    fn arrivals_are_tracked() {
        let h = Harness::new(false);
        h.controller.navigate_to(Screen::submenu("izin", "Perizinan"));
        h.controller.navigate_to(Screen::pdf(doc()));
        h.controller.navigate_to(Screen::Admin);

        let events = h.tracker.events();
        assert!(matches!(events[0], TrackingEvent::SessionStarted { .. }));
        assert_eq!(
            &events[1..],
            &[
                TrackingEvent::MenuSelected { menu_id: "izin".into() },
                TrackingEvent::DocumentOpened { document_id: "siup".into() },
            ]
        );
    }

    #[test]
    fn observers_see_each_change() {
        let h = Harness::new(false);
        let mut rx = h.controller.subscribe();

        h.controller.navigate_to(Screen::submenu("profil", "Profil"));
        assert!(rx.has_changed().unwrap());
        let snap = rx.borrow_and_update().clone();
        assert_eq!(snap.current, Screen::submenu("profil", "Profil"));
        assert_eq!(snap.depth, 2);
        assert!(snap.can_go_back());

        h.controller.go_back();
        let snap = rx.borrow_and_update().clone();
        assert_eq!(snap.current, Screen::Home);
        assert!(!snap.can_go_back());
    }

    #[test]
    fn published_snapshot_matches_state_under_concurrent_eviction() {
        let h = Harness::new(false);
        let rx = h.controller.subscribe();

        for round in 0..500 {
            h.controller.navigate_to(Screen::submenu("profil", "Profil"));
            h.clock.advance(Duration::from_secs(120));

            let barrier = Arc::new(std::sync::Barrier::new(2));
            let idle = {
                let controller = h.controller.clone();
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    controller.check_idle();
                })
            };
            let visitor = {
                let controller = h.controller.clone();
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    controller.navigate_to(Screen::content("profil", "visi", "Visi"));
                })
            };
            idle.join().unwrap();
            visitor.join().unwrap();

            assert_eq!(*rx.borrow(), h.controller.snapshot(), "round {round}");
            h.controller.go_home();
        }
    }

    #[test]
    fn starts_online_primes_once() {
        let h = Harness::new(true);
        assert!(h.controller.is_online());
        assert_eq!(h.primer.calls(), 1);
    }

    #[test]
    fn offline_to_online_primes_cache() {
        let h = Harness::new(false);
        assert_eq!(h.primer.calls(), 0);

        h.network.set_online(true);
        assert!(h.controller.is_online());
        assert_eq!(h.primer.calls(), 1);

        // A repeated "online" signal is not a transition.
        h.network.emit(true);
        assert_eq!(h.primer.calls(), 1);

        h.network.set_online(false);
        assert!(!h.controller.snapshot().online);
        h.network.set_online(true);
        assert_eq!(h.primer.calls(), 2);
    }

    #[test]
    fn primer_failure_is_swallowed() {
        let h = Harness::new(false);
        h.primer.set_failing(true);
        h.network.set_online(true);
        assert!(h.controller.is_online());
        assert_eq!(h.primer.calls(), 1);
    }

    #[test]
    fn teardown_deregisters_and_ignores_late_signals() {
        let h = Harness::new(false);
        h.controller.navigate_to(Screen::submenu("profil", "Profil"));
        h.controller.teardown();
        assert_eq!(h.scheduler.registered(), 0);
        assert_eq!(h.network.registered(), 0);

        h.clock.advance(Duration::from_secs(600));
        assert!(!h.controller.check_idle());
        h.controller.set_online(true);
        assert!(!h.controller.is_online());
        assert_eq!(h.controller.current_screen(), Screen::submenu("profil", "Profil"));
    }

    #[test]
    fn dropping_last_handle_releases_registrations() {
        let h = Harness::new(false);
        let scheduler = h.scheduler.clone();
        drop(h);
        assert_eq!(scheduler.registered(), 0);
    }

    #[test]
    fn download_counts_once_and_shows_qr_when_published() {
        let h = Harness::new(true);
        let published = DocumentRef {
            public_url: Some("https://dpmptsp.example.go.id/siup.pdf".into()),
            ..doc()
        };
        h.controller.navigate_to(Screen::pdf(published.clone()));
        h.controller.request_download(&published);

        assert!(matches!(h.controller.current_screen(), Screen::QrPage { .. }));
        let downloads = h
            .tracker
            .events()
            .into_iter()
            .filter(|e| matches!(e, TrackingEvent::DocumentDownloaded { .. }))
            .count();
        assert_eq!(downloads, 1);

        h.controller.go_back();
        assert_eq!(h.controller.current_screen(), Screen::pdf(published));
    }

    #[test]
    fn download_without_public_url_stays_on_document() {
        let h = Harness::new(false);
        h.controller.navigate_to(Screen::pdf(doc()));
        h.idle_for(170);
        h.controller.request_download(&doc());
        h.idle_for(170);
        assert_eq!(h.controller.current_screen(), Screen::pdf(doc()));
        assert!(h.tracker.events().contains(&TrackingEvent::DocumentDownloaded {
            document_id: "siup".into()
        }));
    }
}
