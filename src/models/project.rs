// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project state management.
//!
//! A project is one upload session's immutable snapshot: the encoded
//! screenshot plus the raw element dump, identified by a deterministic
//! hash id and a short display id. Re-uploading the same bytes creates
//! a new project because the id is timestamp-salted.

use crate::models::element::Element;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// 64-character lowercase hex digest (see `identity`).
    pub id: String,
    /// Human-friendly display token, `DZ` + 8 characters.
    pub short_id: String,
    /// Original screenshot filename.
    pub filename: String,
    /// Screenshot as a `data:image/png;base64,...` string, the transit
    /// and storage representation.
    pub image_payload: String,
    /// Natural screenshot dimensions in pixels.
    pub width: u32,
    pub height: u32,
    /// Source-of-truth element snapshot as uploaded, priority-sorted.
    pub elements: Vec<Element>,
}

/// One row from the backend's project listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub short_id: String,
    pub filename: Option<String>,
    pub created_at: String,
    pub has_annotations: bool,
}
