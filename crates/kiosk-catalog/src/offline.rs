// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Offline catalog cache.
//
// When the kiosk comes online the catalog source is re-read, validated, and
// written next to a SHA-256 digest. If the source is unreachable at the next
// start, the cached copy is used, but only when its digest still matches.

use std::path::{Path, PathBuf};

use kiosk_core::OfflineCachePrimer;
use kiosk_core::error::{KioskError, Result};
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

use crate::catalog::Catalog;

const CACHE_FILE: &str = "catalog.cache.json";
const DIGEST_FILE: &str = "catalog.cache.sha256";

/// Lowercase hex SHA-256 of `data`.
pub fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Verified on-disk copy of the catalog.
#[derive(Debug, Clone)]
pub struct OfflineCache {
    dir: PathBuf,
    source: PathBuf,
}

impl OfflineCache {
    /// `dir` holds the cache files; `source` is the live catalog location.
    pub fn new(dir: impl Into<PathBuf>, source: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            source: source.into(),
        }
    }

    pub fn cache_path(&self) -> PathBuf {
        self.dir.join(CACHE_FILE)
    }

    fn digest_path(&self) -> PathBuf {
        self.dir.join(DIGEST_FILE)
    }

    /// Copy the live catalog into the cache.
    ///
    /// A source that does not parse or validate is not cached, so a broken
    /// upstream edit never overwrites the last good copy.
    #[instrument(skip(self), fields(source = %self.source.display()))]
    pub fn refresh(&self) -> Result<String> {
        let data = std::fs::read(&self.source)?;
        let text = std::str::from_utf8(&data)
            .map_err(|e| KioskError::Catalog(format!("catalog is not UTF-8: {e}")))?;
        Catalog::from_json(text)?;

        std::fs::create_dir_all(&self.dir)?;
        let digest = hash_bytes(&data);
        write_atomic(&self.cache_path(), &data)?;
        write_atomic(&self.digest_path(), digest.as_bytes())?;

        info!(%digest, bytes = data.len(), "catalog cached");
        Ok(digest)
    }

    /// Read the cached catalog back, verifying its digest.
    pub fn load(&self) -> Result<Catalog> {
        let data = match std::fs::read(self.cache_path()) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(KioskError::CacheMissing);
            }
            Err(e) => return Err(e.into()),
        };
        let expected = std::fs::read_to_string(self.digest_path())?;
        let expected = expected.trim();

        let actual = hash_bytes(&data);
        if actual != expected {
            warn!(%expected, %actual, "offline catalog cache failed integrity check");
            return Err(KioskError::IntegrityMismatch {
                expected: expected.to_owned(),
                actual,
            });
        }

        let text = std::str::from_utf8(&data)
            .map_err(|e| KioskError::Catalog(format!("cache is not UTF-8: {e}")))?;
        let catalog = Catalog::from_json(text)?;
        debug!("offline catalog loaded");
        Ok(catalog)
    }

    /// Live catalog if readable, otherwise the verified cache.
    pub fn load_live_or_cached(&self) -> Result<Catalog> {
        match Catalog::load(&self.source) {
            Ok(catalog) => Ok(catalog),
            Err(e) => {
                warn!(error = %e, "live catalog unavailable, falling back to offline cache");
                self.load()
            }
        }
    }
}

impl OfflineCachePrimer for OfflineCache {
    fn prime(&self) -> Result<()> {
        self.refresh().map(|_| ())
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, data)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use kiosk_core::CatalogLookup;

    use super::*;
    use crate::catalog::tests::SAMPLE;

    /// SHA-256 of the empty byte slice.
    const EMPTY_SHA256: &str =
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn setup() -> (tempfile::TempDir, OfflineCache) {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("catalog.json");
        std::fs::write(&source, SAMPLE).unwrap();
        let cache = OfflineCache::new(dir.path().join("cache"), source);
        (dir, cache)
    }

    #[test]
    fn hash_known_values() {
        assert_eq!(hash_bytes(b""), EMPTY_SHA256);
        assert_eq!(
            hash_bytes(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn load_before_prime_is_cache_missing() {
        let (_dir, cache) = setup();
        assert!(matches!(cache.load(), Err(KioskError::CacheMissing)));
    }

    #[test]
    fn prime_then_load() {
        let (_dir, cache) = setup();
        cache.prime().unwrap();
        let catalog = cache.load().unwrap();
        assert!(catalog.menu("profil").is_some());
    }

    #[test]
    fn tampered_cache_is_rejected() {
        let (_dir, cache) = setup();
        cache.prime().unwrap();
        std::fs::write(cache.cache_path(), r#"{"menus":[]}"#).unwrap();
        assert!(matches!(
            cache.load(),
            Err(KioskError::IntegrityMismatch { .. })
        ));
    }

    #[test]
    fn invalid_source_keeps_last_good_copy() {
        let (dir, cache) = setup();
        cache.prime().unwrap();

        std::fs::write(dir.path().join("catalog.json"), "{ not json").unwrap();
        assert!(cache.prime().is_err());
        assert!(cache.load().unwrap().menu("izin").is_some());
    }

    #[test]
    fn falls_back_to_cache_when_source_gone() {
        let (dir, cache) = setup();
        cache.prime().unwrap();
        std::fs::remove_file(dir.path().join("catalog.json")).unwrap();

        let catalog = cache.load_live_or_cached().unwrap();
        assert_eq!(catalog.menus().len(), 2);
    }
}
