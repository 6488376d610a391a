// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the kiosk.

use thiserror::Error;

/// Top-level error type for all kiosk operations.
///
/// The navigation controller never produces one of these; they come from the
/// collaborators around it (catalog loading, stats storage, the offline cache
/// and the PDF viewer).
#[derive(Debug, Error)]
pub enum KioskError {
    // -- Catalog --
    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("catalog entry not found: {0}")]
    NotFound(String),

    // -- Documents --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("page {page} out of range (document has {total} pages)")]
    PageOutOfRange { page: u32, total: u32 },

    // -- Offline cache --
    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    #[error("offline cache is empty")]
    CacheMissing,

    // -- Storage / persistence --
    #[error("database error: {0}")]
    Database(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, KioskError>;
