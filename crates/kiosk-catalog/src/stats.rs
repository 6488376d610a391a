// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Usage statistics — append-only SQLite log of kiosk tracking events, plus
// the aggregate queries behind the admin dashboard.
//
// Schema:
//   events(
//     id        INTEGER PRIMARY KEY AUTOINCREMENT,
//     timestamp TEXT    NOT NULL,   -- RFC 3339, UTC
//     kind      TEXT    NOT NULL,   -- EventKind::as_str()
//     subject   TEXT    NOT NULL    -- menu id, document id, url, ...
//   )
//
// Counters are derived from event kinds only: a view is one document_opened
// row, a download is one document_downloaded row, a QR display is one
// qr_displayed row. No counter is ever inferred from another.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use kiosk_core::error::{KioskError, Result};
use kiosk_core::{EventKind, TrackingEvent, TrackingSink};
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS events (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT    NOT NULL,
        kind      TEXT    NOT NULL,
        subject   TEXT    NOT NULL
    );
    CREATE INDEX IF NOT EXISTS events_kind_subject ON events (kind, subject);
"#;

/// Convert a `rusqlite::Error` into a `KioskError::Database`.
fn db_err(e: rusqlite::Error) -> KioskError {
    KioskError::Database(e.to_string())
}

/// A single stored event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsEntry {
    pub id: i64,
    pub timestamp: String,
    pub kind: EventKind,
    pub subject: String,
}

/// How often one subject appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectCount {
    pub subject: String,
    pub count: u64,
}

/// Events of one kind on one local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Everything the admin dashboard shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub sessions: u64,
    pub menu_selections: u64,
    pub document_views: u64,
    pub document_downloads: u64,
    pub qr_displays: u64,
    pub idle_resets: u64,
    pub top_menus: Vec<SubjectCount>,
    pub top_documents: Vec<SubjectCount>,
}

/// Append-only event log backed by SQLite.
///
/// The connection sits behind a mutex so the log can be shared as a
/// `TrackingSink` across the UI and the runtime's worker threads. All queries
/// are sub-millisecond, so contention is negligible.
pub struct StatsLog {
    conn: Mutex<Connection>,
}

impl StatsLog {
    /// Open (or create) the stats database at `path`, in WAL mode.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(db_err)?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(db_err)?;
        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;

        info!("stats database opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (useful for tests and the fallback path).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;

        debug!("in-memory stats database opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record an event stamped with the current time.
    pub fn record(&self, event: &TrackingEvent) -> Result<()> {
        self.record_at(event, Utc::now())
    }

    /// Record an event with an explicit timestamp.
    #[instrument(skip(self, event), fields(kind = event.kind().as_str()))]
    pub fn record_at(&self, event: &TrackingEvent, at: DateTime<Utc>) -> Result<()> {
        self.conn()
            .execute(
                "INSERT INTO events (timestamp, kind, subject) VALUES (?1, ?2, ?3)",
                params![at.to_rfc3339(), event.kind().as_str(), event.subject()],
            )
            .map_err(db_err)?;
        debug!("event recorded");
        Ok(())
    }

    /// Total number of stored events.
    pub fn total(&self) -> Result<u64> {
        self.conn()
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))
            .map_err(db_err)
    }

    pub fn count(&self, kind: EventKind) -> Result<u64> {
        self.conn()
            .query_row(
                "SELECT COUNT(*) FROM events WHERE kind = ?1",
                params![kind.as_str()],
                |row| row.get(0),
            )
            .map_err(db_err)
    }

    pub fn count_for(&self, kind: EventKind, subject: &str) -> Result<u64> {
        self.conn()
            .query_row(
                "SELECT COUNT(*) FROM events WHERE kind = ?1 AND subject = ?2",
                params![kind.as_str(), subject],
                |row| row.get(0),
            )
            .map_err(db_err)
    }

    /// Most frequent subjects for `kind`, highest count first. Ties are broken
    /// by subject so the order is stable.
    pub fn top_subjects(&self, kind: EventKind, limit: u32) -> Result<Vec<SubjectCount>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT subject, COUNT(*) AS n
                 FROM events
                 WHERE kind = ?1
                 GROUP BY subject
                 ORDER BY n DESC, subject ASC
                 LIMIT ?2",
            )
            .map_err(db_err)?;

        let rows = stmt
            .query_map(params![kind.as_str(), limit], |row| {
                Ok(SubjectCount {
                    subject: row.get(0)?,
                    count: row.get(1)?,
                })
            })
            .map_err(db_err)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(db_err)
    }

    pub fn top_menus(&self, limit: u32) -> Result<Vec<SubjectCount>> {
        self.top_subjects(EventKind::MenuSelected, limit)
    }

    /// Most viewed (`DocumentOpened`) or most downloaded
    /// (`DocumentDownloaded`) documents.
    pub fn top_documents(&self, kind: EventKind, limit: u32) -> Result<Vec<SubjectCount>> {
        self.top_subjects(kind, limit)
    }

    /// Per-day counts for the `days` days ending on the day of `now`, oldest
    /// first. Days are calendar days in `now`'s time zone, so a kiosk passing
    /// `Local::now()` sees events bucketed by its own wall clock. Days without
    /// events are reported as zero.
    pub fn daily_counts<Tz: TimeZone>(
        &self,
        kind: EventKind,
        days: u32,
        now: &DateTime<Tz>,
    ) -> Result<Vec<DailyCount>> {
        if days == 0 {
            return Ok(Vec::new());
        }
        let zone = now.timezone();
        let today = now.date_naive();
        let first = today - Duration::days(i64::from(days) - 1);

        // Stamps are stored in UTC; widen the window by a day on each side so
        // every local day in range is covered whatever the offset.
        let lower = (first - Duration::days(1)).to_string();
        let upper = (today + Duration::days(2)).to_string();

        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT timestamp
                 FROM events
                 WHERE kind = ?1 AND timestamp >= ?2 AND timestamp < ?3",
            )
            .map_err(db_err)?;

        let rows = stmt
            .query_map(params![kind.as_str(), lower, upper], |row| {
                row.get::<_, String>(0)
            })
            .map_err(db_err)?;

        let mut found: HashMap<NaiveDate, u64> = HashMap::new();
        for row in rows {
            let stamp = row.map_err(db_err)?;
            let Ok(at) = DateTime::parse_from_rfc3339(&stamp) else {
                continue;
            };
            let date = at.with_timezone(&zone).date_naive();
            if (first..=today).contains(&date) {
                *found.entry(date).or_default() += 1;
            }
        }

        Ok(first
            .iter_days()
            .take(days as usize)
            .map(|date| DailyCount {
                date,
                count: found.get(&date).copied().unwrap_or(0),
            })
            .collect())
    }

    /// The most recent `limit` events, newest first.
    pub fn recent(&self, limit: u32) -> Result<Vec<StatsEntry>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT id, timestamp, kind, subject
                 FROM events
                 ORDER BY id DESC
                 LIMIT ?1",
            )
            .map_err(db_err)?;

        let rows = stmt
            .query_map(params![limit], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(db_err)?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, timestamp, kind, subject) = row.map_err(db_err)?;
            let Some(kind) = EventKind::parse(&kind) else {
                // Written by a newer build; skip rather than fail the dashboard.
                continue;
            };
            entries.push(StatsEntry {
                id,
                timestamp,
                kind,
                subject,
            });
        }
        Ok(entries)
    }

    pub fn dashboard_summary(&self, top: u32) -> Result<DashboardSummary> {
        Ok(DashboardSummary {
            sessions: self.count(EventKind::SessionStarted)?,
            menu_selections: self.count(EventKind::MenuSelected)?,
            document_views: self.count(EventKind::DocumentOpened)?,
            document_downloads: self.count(EventKind::DocumentDownloaded)?,
            qr_displays: self.count(EventKind::QrDisplayed)?,
            idle_resets: self.count(EventKind::IdleReset)?,
            top_menus: self.top_menus(top)?,
            top_documents: self.top_documents(EventKind::DocumentOpened, top)?,
        })
    }
}

impl TrackingSink for StatsLog {
    fn track(&self, event: TrackingEvent) {
        if let Err(e) = self.record(&event) {
            error!(error = %e, kind = event.kind().as_str(), "failed to record tracking event");
        }
    }
}
