// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — initialises the backend crates and provides the
// methods the Dioxus pages call.
//
// The stats log wraps a rusqlite connection behind its own mutex and the
// controller is an `Arc` handle, so everything here is cheap to clone into
// event handlers and async blocks.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use kiosk_catalog::{Catalog, DashboardSummary, OfflineCache, StatsLog};
use kiosk_core::error::{KioskError, Result};
use kiosk_core::traits::NullTracker;
use kiosk_core::{CatalogLookup, DocumentRef, KioskConfig, TrackingSink};
use kiosk_document::PdfReader;
use kiosk_session::{KioskController, ProbeConnectivity, SessionDeps, SystemClock, TokioScheduler};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use super::data_dir;

const CONFIG_FILE: &str = "config.json";
const STATS_FILE: &str = "stats.db";
const TOP_ENTRIES: u32 = 5;

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    controller: KioskController,
    catalog: Arc<Catalog>,
    stats: Arc<StatsLog>,
    config: Arc<Mutex<KioskConfig>>,
    data_dir: PathBuf,
    documents_dir: PathBuf,
    render_dir: PathBuf,
}

impl AppServices {
    /// Initialise all services. Call once at app startup.
    ///
    /// Loads the config and catalog from the data directory, opens the stats
    /// database, and starts the kiosk session on `runtime`.
    pub fn init(runtime: Handle) -> Result<Self> {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");

        let config = load_config(&dir).unwrap_or_default();
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!(error = %e, "invalid config, using defaults");
                KioskConfig::default()
            }
        };

        let cache = OfflineCache::new(
            data_dir::subdir(&dir, "cache"),
            data_dir::resolve(&dir, &config.catalog_path),
        );
        let catalog = match cache.load_live_or_cached() {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "no catalog available, starting empty");
                Catalog::empty()
            }
        };

        let stats = Arc::new(StatsLog::open(dir.join(STATS_FILE))?);
        Ok(Self::assemble(dir, config, catalog, stats, cache, runtime))
    }

    /// In-memory services used when the data directory is unusable. The
    /// kiosk still navigates; it just shows an empty catalog and keeps no
    /// stats across restarts.
    pub fn fallback(runtime: Handle) -> Result<Self> {
        let dir = data_dir::subdir(&std::env::temp_dir(), "kiosk");
        let config = KioskConfig::default();
        let cache = OfflineCache::new(
            data_dir::subdir(&dir, "cache"),
            data_dir::resolve(&dir, &config.catalog_path),
        );
        let stats = Arc::new(StatsLog::open_in_memory()?);
        Ok(Self::assemble(
            dir,
            config,
            Catalog::empty(),
            stats,
            cache,
            runtime,
        ))
    }

    fn assemble(
        dir: PathBuf,
        config: KioskConfig,
        catalog: Catalog,
        stats: Arc<StatsLog>,
        cache: OfflineCache,
        runtime: Handle,
    ) -> Self {
        let tracker: Arc<dyn TrackingSink> = if config.tracking_enabled {
            Arc::clone(&stats) as Arc<dyn TrackingSink>
        } else {
            Arc::new(NullTracker)
        };

        let controller = KioskController::start(
            &config,
            SessionDeps {
                clock: Arc::new(SystemClock),
                scheduler: Arc::new(TokioScheduler::new(runtime.clone())),
                connectivity: Arc::new(ProbeConnectivity::from_config(&config, runtime)),
                tracker,
                primer: Arc::new(cache),
            },
        );

        let documents_dir = data_dir::resolve(&dir, &config.documents_dir);
        let render_dir = data_dir::subdir(&dir, "render");
        info!(
            menus = catalog.menus().len(),
            documents = %documents_dir.display(),
            "app services initialised"
        );

        Self {
            controller,
            catalog: Arc::new(catalog),
            stats,
            config: Arc::new(Mutex::new(config)),
            data_dir: dir,
            documents_dir,
            render_dir,
        }
    }

    // -- Session -------------------------------------------------------------

    pub fn controller(&self) -> &KioskController {
        &self.controller
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Stop the idle tick and connectivity probe.
    pub fn shutdown(&self) {
        self.controller.teardown();
    }

    // -- Documents -----------------------------------------------------------

    /// Path of a catalog document on disk.
    ///
    /// File names come from the catalog, so anything that could escape the
    /// documents directory is refused.
    pub fn document_path(&self, document: &DocumentRef) -> Result<PathBuf> {
        document_path(&self.documents_dir, &document.file_name)
    }

    pub fn page_count(&self, document: &DocumentRef) -> Result<u32> {
        Ok(PdfReader::open(self.document_path(document)?)?.page_count())
    }

    /// Extract one page of `document` into the render directory and return
    /// the file the viewer should display.
    pub fn render_page(&self, document: &DocumentRef, page: u32) -> Result<PathBuf> {
        let reader = PdfReader::open(self.document_path(document)?)?;
        let bytes = reader.extract_page(page)?;
        let out = self.render_dir.join(format!("{}-{page}.pdf", document.id));
        std::fs::write(&out, bytes)?;
        debug!(document = %document.id, page, "page rendered");
        Ok(out)
    }

    // -- Stats ---------------------------------------------------------------

    pub fn dashboard(&self) -> Result<DashboardSummary> {
        self.stats.dashboard_summary(TOP_ENTRIES)
    }

    pub fn stats(&self) -> &StatsLog {
        &self.stats
    }

    // -- Config --------------------------------------------------------------

    pub fn config(&self) -> KioskConfig {
        self.config
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Validate, store and persist the config. Timeouts take effect on the
    /// next start.
    pub fn save_config(&self, config: &KioskConfig) -> Result<()> {
        config.validate()?;
        *self.config.lock().unwrap_or_else(|e| e.into_inner()) = config.clone();
        persist_config(&self.data_dir, config)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn document_path(documents_dir: &Path, file_name: &str) -> Result<PathBuf> {
    let name = Path::new(file_name);
    let plain = name.components().count() == 1
        && matches!(name.components().next(), Some(std::path::Component::Normal(_)));
    if !plain {
        warn!(file_name, "refusing document path outside the documents directory");
        return Err(KioskError::NotFound(file_name.to_owned()));
    }
    Ok(documents_dir.join(name))
}

// ---------------------------------------------------------------------------
// Config persistence
// ---------------------------------------------------------------------------

fn load_config(data_dir: &Path) -> Option<KioskConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "config unreadable, using defaults");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &KioskConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_roundtrip_through_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(dir.path()).is_none());

        let config = KioskConfig {
            menu_timeout_secs: 60,
            tracking_enabled: false,
            ..KioskConfig::default()
        };
        persist_config(dir.path(), &config).unwrap();
        assert_eq!(load_config(dir.path()), Some(config));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{ "probe_host": "10.0.0.1" }"#).unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.probe_host, "10.0.0.1");
        assert_eq!(config.menu_timeout_secs, 90);
    }

    #[test]
    fn document_paths_stay_inside_documents_dir() {
        let docs = Path::new("/srv/kiosk/documents");
        assert_eq!(
            document_path(docs, "siup.pdf").unwrap(),
            PathBuf::from("/srv/kiosk/documents/siup.pdf")
        );
        assert!(document_path(docs, "../stats.db").is_err());
        assert!(document_path(docs, "/etc/passwd").is_err());
        assert!(document_path(docs, "sub/siup.pdf").is_err());
        assert!(document_path(docs, "").is_err());
    }

    #[tokio::test]
    async fn fallback_services_start_at_home() {
        let svc = AppServices::fallback(Handle::current()).unwrap();
        assert_eq!(svc.controller().current_screen(), kiosk_core::Screen::Home);
        assert_eq!(svc.dashboard().unwrap().sessions, 1);
        svc.shutdown();
    }
}
