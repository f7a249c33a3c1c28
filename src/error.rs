// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error taxonomy for the annotation pipeline.
//!
//! Every failure is terminal for the triggering operation only; none of
//! them may corrupt the in-memory element list or visibility set.

use std::fmt;

#[derive(Debug)]
pub enum DrizzError {
    /// Malformed bounds string or malformed element-dump JSON.
    Parse(String),

    /// Upload rejected before any decode or network call (wrong file
    /// type, oversized file, empty dump).
    Validation(String),

    /// Transport failure or non-success response from the backend.
    Network(String),

    /// Screenshot failed to decode into a displayable image.
    Decode(String),
}

impl fmt::Display for DrizzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrizzError::Parse(msg) => write!(f, "Parse error: {}", msg),
            DrizzError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DrizzError::Network(msg) => write!(f, "Network error: {}", msg),
            DrizzError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for DrizzError {}

impl From<serde_json::Error> for DrizzError {
    fn from(e: serde_json::Error) -> Self {
        DrizzError::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for DrizzError {
    fn from(e: reqwest::Error) -> Self {
        DrizzError::Network(e.to_string())
    }
}
