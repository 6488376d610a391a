// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Visitor-facing messages for kiosk errors.
//
// Kiosk visitors never see technical detail. Every error maps to a short
// Indonesian sentence plus a hint pointing them to the service desk.

use crate::error::KioskError;

/// How the UI presents a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Content exists but is temporarily unavailable (offline, busy disk).
    Transient,
    /// Content is missing from the catalog; only staff can fix it.
    Missing,
    /// Configuration or data is broken; only staff can fix it.
    Permanent,
}

/// A placeholder message shown in place of content that could not load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanError {
    /// Heading.
    pub message: String,
    /// Body text.
    pub suggestion: String,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

const ASK_DESK: &str = "Silakan hubungi petugas di meja layanan.";

/// Convert a `KioskError` into something a visitor can read.
pub fn humanize_error(err: &KioskError) -> HumanError {
    match err {
        KioskError::NotFound(_) => HumanError {
            message: "Informasi ini belum tersedia.".into(),
            suggestion: ASK_DESK.into(),
            severity: Severity::Missing,
        },

        KioskError::PdfError(_) | KioskError::PageOutOfRange { .. } => HumanError {
            message: "Dokumen tidak dapat ditampilkan.".into(),
            suggestion: format!("Coba buka dokumen lain. {ASK_DESK}"),
            severity: Severity::Permanent,
        },

        KioskError::CacheMissing => HumanError {
            message: "Kios sedang tidak terhubung ke internet.".into(),
            suggestion: "Sebagian informasi mungkin belum tersedia. Silakan coba lagi nanti."
                .into(),
            severity: Severity::Transient,
        },

        KioskError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => HumanError {
            message: "Berkas dokumen tidak ditemukan.".into(),
            suggestion: ASK_DESK.into(),
            severity: Severity::Missing,
        },

        KioskError::Io(_) | KioskError::Database(_) => HumanError {
            message: "Terjadi gangguan sementara.".into(),
            suggestion: "Silakan coba lagi sebentar lagi.".into(),
            severity: Severity::Transient,
        },

        KioskError::Catalog(_)
        | KioskError::IntegrityMismatch { .. }
        | KioskError::Serialization(_)
        | KioskError::Config(_) => HumanError {
            message: "Kios sedang dalam perbaikan.".into(),
            suggestion: ASK_DESK.into(),
            severity: Severity::Permanent,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entry_is_missing() {
        let human = humanize_error(&KioskError::NotFound("menu profil".into()));
        assert_eq!(human.severity, Severity::Missing);
    }

    #[test]
    fn missing_file_is_missing() {
        let err = KioskError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "siup.pdf"));
        assert_eq!(humanize_error(&err).severity, Severity::Missing);
    }

    #[test]
    fn offline_cache_is_transient() {
        assert_eq!(humanize_error(&KioskError::CacheMissing).severity, Severity::Transient);
    }

    #[test]
    fn broken_pdf_hides_detail() {
        let human = humanize_error(&KioskError::PdfError("xref table corrupt".into()));
        assert_eq!(human.severity, Severity::Permanent);
        assert!(!human.message.contains("xref"));
        assert!(!human.suggestion.contains("xref"));
    }
}
