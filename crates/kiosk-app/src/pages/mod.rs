// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

pub mod admin;
pub mod content;
pub mod documents;
pub mod home;
pub mod pdf_viewer;
pub mod qr_page;
pub mod sector_detail;
pub mod sectors;
pub mod submenu;
pub mod video_player;
