// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagination and zoom state for the on-screen document viewer.

use serde::{Deserialize, Serialize};

/// Zoom levels offered by the viewer, in percent.
pub const ZOOM_STEPS: [u16; 8] = [50, 75, 100, 125, 150, 200, 250, 300];

const DEFAULT_ZOOM_INDEX: usize = 2;

/// Where the visitor is in a document and how large it is drawn.
///
/// Pages are 1-indexed. A document with no pages sits on page 0 and every
/// move is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfViewer {
    page: u32,
    page_count: u32,
    zoom_index: usize,
}

impl PdfViewer {
    pub fn new(page_count: u32) -> Self {
        Self {
            page: page_count.min(1),
            page_count,
            zoom_index: DEFAULT_ZOOM_INDEX,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn next(&mut self) -> u32 {
        if self.has_next() {
            self.page += 1;
        }
        self.page
    }

    pub fn previous(&mut self) -> u32 {
        if self.has_previous() {
            self.page -= 1;
        }
        self.page
    }

    /// Jump to `page`, clamped to the document.
    pub fn go_to(&mut self, page: u32) -> u32 {
        if self.page_count > 0 {
            self.page = page.clamp(1, self.page_count);
        }
        self.page
    }

    /// Current zoom in percent.
    pub fn zoom(&self) -> u16 {
        ZOOM_STEPS[self.zoom_index]
    }

    pub fn zoom_in(&mut self) -> u16 {
        if self.zoom_index + 1 < ZOOM_STEPS.len() {
            self.zoom_index += 1;
        }
        self.zoom()
    }

    pub fn zoom_out(&mut self) -> u16 {
        self.zoom_index = self.zoom_index.saturating_sub(1);
        self.zoom()
    }

    pub fn reset_zoom(&mut self) -> u16 {
        self.zoom_index = DEFAULT_ZOOM_INDEX;
        self.zoom()
    }

    /// Page indicator such as "2 / 5"; empty documents read "0 / 0".
    pub fn label(&self) -> String {
        format!("{} / {}", self.page, self.page_count)
    }
}
