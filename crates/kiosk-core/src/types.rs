// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the kiosk: screens, catalog entries, and tracking
// events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for one kiosk UI session (one launch of the app).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

/// Reference to a document opened in the PDF viewer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    pub id: String,
    pub title: String,
    /// File name relative to the configured documents directory.
    pub file_name: String,
    /// Where visitors can fetch their own copy, if published online.
    #[serde(default)]
    pub public_url: Option<String>,
}

/// One navigable view of the kiosk.
///
/// Screens are plain values: two screens are the same screen when all of
/// their fields are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Home,
    Submenu {
        menu_id: String,
        menu_title: String,
    },
    Content {
        menu_id: String,
        submenu_id: String,
        title: String,
    },
    Documents {
        category_id: String,
        category_title: String,
        sector_id: Option<String>,
    },
    Sectors {
        menu_id: String,
        menu_title: String,
    },
    SectorDetail {
        sector_id: String,
        sector_title: String,
    },
    PdfViewer {
        document: DocumentRef,
    },
    VideoPlayer {
        title: String,
        video_url: String,
    },
    QrPage {
        title: String,
        url: String,
        description: String,
    },
    Admin,
}

impl Screen {
    pub fn submenu(menu_id: impl Into<String>, menu_title: impl Into<String>) -> Self {
        Self::Submenu {
            menu_id: menu_id.into(),
            menu_title: menu_title.into(),
        }
    }

    pub fn content(
        menu_id: impl Into<String>,
        submenu_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self::Content {
            menu_id: menu_id.into(),
            submenu_id: submenu_id.into(),
            title: title.into(),
        }
    }

    pub fn documents(
        category_id: impl Into<String>,
        category_title: impl Into<String>,
        sector_id: Option<String>,
    ) -> Self {
        Self::Documents {
            category_id: category_id.into(),
            category_title: category_title.into(),
            sector_id,
        }
    }

    pub fn pdf(document: DocumentRef) -> Self {
        Self::PdfViewer { document }
    }

    /// Whether this screen is never evicted by the idle timer.
    pub fn is_idle_exempt(&self) -> bool {
        matches!(self, Self::Home | Self::Admin)
    }

    /// Whether a document is open (selects the longer idle timeout).
    pub fn is_document(&self) -> bool {
        matches!(self, Self::PdfViewer { .. })
    }

    /// Short name for logs and the stats table.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Submenu { .. } => "submenu",
            Self::Content { .. } => "content",
            Self::Documents { .. } => "documents",
            Self::Sectors { .. } => "sectors",
            Self::SectorDetail { .. } => "sector_detail",
            Self::PdfViewer { .. } => "pdf_viewer",
            Self::VideoPlayer { .. } => "video_player",
            Self::QrPage { .. } => "qr_page",
            Self::Admin => "admin",
        }
    }

    /// Title shown in the page header.
    pub fn title(&self) -> &str {
        match self {
            Self::Home => "Beranda",
            Self::Admin => "Admin",
            Self::Submenu { menu_title, .. } | Self::Sectors { menu_title, .. } => menu_title,
            Self::Content { title, .. }
            | Self::VideoPlayer { title, .. }
            | Self::QrPage { title, .. } => title,
            Self::Documents { category_title, .. } => category_title,
            Self::SectorDetail { sector_title, .. } => sector_title,
            Self::PdfViewer { document } => &document.title,
        }
    }

    /// The tracking event implied by arriving on this screen, if any.
    pub fn arrival_event(&self) -> Option<TrackingEvent> {
        match self {
            Self::Submenu { menu_id, .. } | Self::Sectors { menu_id, .. } => {
                Some(TrackingEvent::MenuSelected {
                    menu_id: menu_id.clone(),
                })
            }
            Self::PdfViewer { document } => Some(TrackingEvent::DocumentOpened {
                document_id: document.id.clone(),
            }),
            Self::QrPage { url, .. } => Some(TrackingEvent::QrDisplayed { url: url.clone() }),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog entries
// ---------------------------------------------------------------------------

/// What a submenu tile opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubmenuTarget {
    /// Static informational text.
    Content { body: String },
    /// A list of downloadable documents in one category.
    Documents { category_id: String },
    /// An embedded video.
    Video { url: String },
    /// A QR code pointing visitors to an online service.
    Qr { url: String, description: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submenu {
    pub id: String,
    pub title: String,
    pub target: SubmenuTarget,
}

impl Submenu {
    /// The screen this tile opens, as seen from menu `menu_id`.
    pub fn screen(&self, menu_id: &str) -> Screen {
        match &self.target {
            SubmenuTarget::Content { .. } => {
                Screen::content(menu_id, self.id.clone(), self.title.clone())
            }
            SubmenuTarget::Documents { category_id } => {
                Screen::documents(category_id.clone(), self.title.clone(), None)
            }
            SubmenuTarget::Video { url } => Screen::VideoPlayer {
                title: self.title.clone(),
                video_url: url.clone(),
            },
            SubmenuTarget::Qr { url, description } => Screen::QrPage {
                title: self.title.clone(),
                url: url.clone(),
                description: description.clone(),
            },
        }
    }
}

/// A top-level tile on the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub submenus: Vec<Submenu>,
    /// Menus with sectors open a sector picker instead of a submenu list.
    #[serde(default)]
    pub has_sectors: bool,
}

impl Menu {
    /// The screen a visitor lands on after tapping this menu.
    pub fn entry_screen(&self) -> Screen {
        if self.has_sectors {
            Screen::Sectors {
                menu_id: self.id.clone(),
                menu_title: self.title.clone(),
            }
        } else {
            Screen::submenu(self.id.clone(), self.title.clone())
        }
    }
}

/// A business sector (e.g. trade, health) grouping licensing documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub id: String,
    pub menu_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
}

/// A PDF available on the kiosk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub id: String,
    pub category_id: String,
    #[serde(default)]
    pub sector_id: Option<String>,
    pub title: String,
    pub file_name: String,
    #[serde(default)]
    pub public_url: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

impl DocumentEntry {
    pub fn to_ref(&self) -> DocumentRef {
        DocumentRef {
            id: self.id.clone(),
            title: self.title.clone(),
            file_name: self.file_name.clone(),
            public_url: self.public_url.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tracking
// ---------------------------------------------------------------------------

/// Events sent to the tracking sink. Fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingEvent {
    SessionStarted { session_id: SessionId },
    MenuSelected { menu_id: String },
    /// Counts as one document view.
    DocumentOpened { document_id: String },
    /// Counts as one download. Never emitted for QR displays.
    DocumentDownloaded { document_id: String },
    QrDisplayed { url: String },
    /// The idle timer returned the kiosk to Home from `from`.
    IdleReset { from: String },
}

/// Discriminant of a [`TrackingEvent`], stored as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    SessionStarted,
    MenuSelected,
    DocumentOpened,
    DocumentDownloaded,
    QrDisplayed,
    IdleReset,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionStarted => "session_started",
            Self::MenuSelected => "menu_selected",
            Self::DocumentOpened => "document_opened",
            Self::DocumentDownloaded => "document_downloaded",
            Self::QrDisplayed => "qr_displayed",
            Self::IdleReset => "idle_reset",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "session_started" => Some(Self::SessionStarted),
            "menu_selected" => Some(Self::MenuSelected),
            "document_opened" => Some(Self::DocumentOpened),
            "document_downloaded" => Some(Self::DocumentDownloaded),
            "qr_displayed" => Some(Self::QrDisplayed),
            "idle_reset" => Some(Self::IdleReset),
            _ => None,
        }
    }
}

impl TrackingEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::SessionStarted { .. } => EventKind::SessionStarted,
            Self::MenuSelected { .. } => EventKind::MenuSelected,
            Self::DocumentOpened { .. } => EventKind::DocumentOpened,
            Self::DocumentDownloaded { .. } => EventKind::DocumentDownloaded,
            Self::QrDisplayed { .. } => EventKind::QrDisplayed,
            Self::IdleReset { .. } => EventKind::IdleReset,
        }
    }

    /// The identifier the event is about (menu id, document id, ...).
    pub fn subject(&self) -> String {
        match self {
            Self::SessionStarted { session_id } => session_id.to_string(),
            Self::MenuSelected { menu_id } => menu_id.clone(),
            Self::DocumentOpened { document_id } | Self::DocumentDownloaded { document_id } => {
                document_id.clone()
            }
            Self::QrDisplayed { url } => url.clone(),
            Self::IdleReset { from } => from.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> DocumentRef {
        DocumentRef {
            id: "siup".into(),
            title: "Formulir SIUP".into(),
            file_name: "siup.pdf".into(),
            public_url: None,
        }
    }

    #[test]
    fn screens_compare_structurally() {
        assert_eq!(Screen::submenu("profil", "Profil"), Screen::submenu("profil", "Profil"));
        assert_ne!(Screen::submenu("profil", "Profil"), Screen::submenu("profil", "Other"));
        assert_eq!(Screen::pdf(doc()), Screen::pdf(doc()));
    }

    #[test]
    fn submenu_targets_map_to_screens() {
        let tile = |target| Submenu {
            id: "oss".into(),
            title: "OSS".into(),
            target,
        };
        assert_eq!(
            tile(SubmenuTarget::Content { body: "Isi".into() }).screen("izin"),
            Screen::content("izin", "oss", "OSS")
        );
        assert_eq!(
            tile(SubmenuTarget::Documents { category_id: "formulir".into() }).screen("izin"),
            Screen::documents("formulir", "OSS", None)
        );
        assert!(matches!(
            tile(SubmenuTarget::Qr { url: "https://oss.go.id".into(), description: String::new() })
                .screen("izin"),
            Screen::QrPage { .. }
        ));
    }

    #[test]
    fn only_home_and_admin_are_exempt() {
        assert!(Screen::Home.is_idle_exempt());
        assert!(Screen::Admin.is_idle_exempt());
        assert!(!Screen::pdf(doc()).is_idle_exempt());
        assert!(
            !Screen::VideoPlayer {
                title: "Tutorial".into(),
                video_url: "https://example.org/v.mp4".into(),
            }
            .is_idle_exempt()
        );
    }

    #[test]
    fn arrival_events() {
        assert_eq!(
            Screen::submenu("izin", "Perizinan").arrival_event(),
            Some(TrackingEvent::MenuSelected { menu_id: "izin".into() })
        );
        assert_eq!(
            Screen::pdf(doc()).arrival_event(),
            Some(TrackingEvent::DocumentOpened { document_id: "siup".into() })
        );
        assert_eq!(Screen::Home.arrival_event(), None);
        assert_eq!(Screen::content("a", "b", "c").arrival_event(), None);
    }

    #[test]
    fn event_kind_text_is_stable() {
        for kind in [
            EventKind::SessionStarted,
            EventKind::MenuSelected,
            EventKind::DocumentOpened,
            EventKind::DocumentDownloaded,
            EventKind::QrDisplayed,
            EventKind::IdleReset,
        ] {
            assert_eq!(EventKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EventKind::parse("download"), None);
    }

    #[test]
    fn sector_menu_enters_sector_picker() {
        let menu = Menu {
            id: "izin".into(),
            title: "Perizinan".into(),
            icon: String::new(),
            description: String::new(),
            submenus: Vec::new(),
            has_sectors: true,
        };
        assert!(matches!(menu.entry_screen(), Screen::Sectors { .. }));
    }

    #[test]
    fn submenu_target_json_shape() {
        let json = r#"{"type":"qr","url":"https://oss.go.id","description":"Daftar online"}"#;
        let target: SubmenuTarget = serde_json::from_str(json).unwrap();
        assert_eq!(
            target,
            SubmenuTarget::Qr {
                url: "https://oss.go.id".into(),
                description: "Daftar online".into(),
            }
        );
    }
}
