// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// kiosk-document — PDF handling for the kiosk's document viewer.
//
// Opens published PDFs, splits out single pages for the renderer, and keeps
// the visitor's pagination and zoom state.

pub mod pdf;
pub mod viewer;

pub use pdf::reader::PdfReader;
pub use viewer::PdfViewer;
