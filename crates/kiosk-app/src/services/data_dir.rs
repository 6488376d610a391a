// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Data directory resolution.

use std::path::{Path, PathBuf};

/// Overrides the data directory, e.g. for a kiosk image with a read-only home.
const DATA_DIR_ENV: &str = "KIOSK_DATA_DIR";

/// Return the application data directory, creating it if needed.
pub fn data_dir() -> PathBuf {
    let dir = match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs_fallback().join("kiosk"),
    };
    std::fs::create_dir_all(&dir).ok();
    dir
}

/// Return a subdirectory inside `base` (e.g. "cache", "render").
pub fn subdir(base: &Path, name: &str) -> PathBuf {
    let dir = base.join(name);
    std::fs::create_dir_all(&dir).ok();
    dir
}

/// Resolve a configured path: absolute paths are kept, relative ones are
/// taken from `base`.
pub fn resolve(base: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn dirs_fallback() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    PathBuf::from("/tmp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_keeps_absolute_paths() {
        let base = Path::new("/var/lib/kiosk");
        assert_eq!(
            resolve(base, "/srv/catalog.json"),
            PathBuf::from("/srv/catalog.json")
        );
        assert_eq!(
            resolve(base, "documents"),
            PathBuf::from("/var/lib/kiosk/documents")
        );
    }

    #[test]
    fn subdir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let render = subdir(dir.path(), "render");
        assert!(render.is_dir());
    }
}
