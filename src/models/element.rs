// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI element data structures.
//!
//! This module defines the bounding rectangle and the detected UI element
//! as ingested from an Android UI-automation dump.

use crate::error::DrizzError;
use crate::models::classify::{self, ElementType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An axis-aligned rectangle in source-image pixel coordinates.
///
/// Invariant from the dump format: `x2 >= x1`, `y2 >= y1`. Inverted
/// coordinates are passed through as-is, never normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Bounds {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Parse the Android bounds literal `[x1,y1][x2,y2]`.
    ///
    /// Fails on anything that is not exactly two bracketed pairs of
    /// non-negative integers; no partial recovery is attempted.
    pub fn parse(s: &str) -> Result<Self, DrizzError> {
        let malformed = || DrizzError::Parse(format!("malformed bounds string: {:?}", s));

        let rest = s.strip_prefix('[').ok_or_else(malformed)?;
        let (first, rest) = rest.split_once(']').ok_or_else(malformed)?;
        let rest = rest.strip_prefix('[').ok_or_else(malformed)?;
        let (second, tail) = rest.split_once(']').ok_or_else(malformed)?;
        if !tail.is_empty() {
            return Err(malformed());
        }

        let (x1, y1) = parse_pair(first).ok_or_else(malformed)?;
        let (x2, y2) = parse_pair(second).ok_or_else(malformed)?;

        Ok(Self { x1, y1, x2, y2 })
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}][{},{}]", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Parse one `x,y` pair of non-negative decimal integers.
fn parse_pair(s: &str) -> Option<(i32, i32)> {
    let (a, b) = s.split_once(',')?;
    Some((parse_coord(a)?, parse_coord(b)?))
}

fn parse_coord(s: &str) -> Option<i32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// One detected UI element, boundary-parsed into real types.
///
/// The wire format carries booleans as the literal strings
/// `"true"`/`"false"`; those are converted at ingestion and never leak
/// into this struct. The source `visible` flag is distinct from the
/// annotation tool's own inclusion state (see `VisibilitySet`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    pub bounds: Bounds,
    pub class_label: String,
    pub text: String,
    pub resource_id: String,
    pub content_desc: String,
    pub clickable: bool,
    pub enabled: bool,
    pub visible: bool,
    pub focused: bool,
}

impl Element {
    /// Semantic type derived from the class label. Computed on demand,
    /// never stored.
    pub fn element_type(&self) -> ElementType {
        classify::classify(&self.class_label)
    }

    /// Display color for the derived element type.
    pub fn color(&self) -> &'static str {
        self.element_type().color_hex()
    }

    /// Testing-priority score, 1-7.
    pub fn priority(&self) -> u8 {
        classify::priority(self.element_type(), self.clickable, &self.text)
    }

    /// Last path segment of the class label, for label callouts
    /// ("android.widget.Button" -> "Button").
    pub fn simple_class(&self) -> &str {
        self.class_label
            .rsplit('.')
            .next()
            .unwrap_or(&self.class_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_bounds() {
        let b = Bounds::parse("[0,0][50,20]").unwrap();
        assert_eq!(b, Bounds::new(0, 0, 50, 20));

        let b = Bounds::parse("[12,340][1080,1920]").unwrap();
        assert_eq!(b, Bounds::new(12, 340, 1080, 1920));
    }

    #[test]
    fn test_parse_serialize_roundtrip() {
        for s in ["[0,0][50,20]", "[1,2][3,4]", "[100,200][300,400]"] {
            let b = Bounds::parse(s).unwrap();
            assert_eq!(b.to_string(), s);
        }
    }

    #[test]
    fn test_parse_malformed_bounds() {
        let bad = [
            "",
            "[0,0][50,20",   // missing closing bracket
            "0,0][50,20]",   // missing opening bracket
            "[0,0]",         // wrong arity: one pair
            "[0,0][1,2][3,4]", // trailing pair
            "[0,0][50,20]x", // trailing junk
            "[a,0][50,20]",  // non-numeric
            "[0,0][50,2.5]", // non-integer
            "[-1,0][50,20]", // negative
            "[0,0,1][50,20]", // three coordinates in a pair
            "[0][50,20]",    // one coordinate in a pair
            "[ 0,0][50,20]", // stray whitespace
        ];
        for s in bad {
            assert!(Bounds::parse(s).is_err(), "expected failure for {:?}", s);
        }
    }

    #[test]
    fn test_inverted_bounds_pass_through() {
        // No normalization of inverted coordinates.
        let b = Bounds::parse("[50,20][10,5]").unwrap();
        assert_eq!(b, Bounds::new(50, 20, 10, 5));
        assert_eq!(b.width(), -40);
    }

    #[test]
    fn test_simple_class() {
        let mut el = sample_element();
        assert_eq!(el.simple_class(), "Button");
        el.class_label = "Plain".into();
        assert_eq!(el.simple_class(), "Plain");
        el.class_label = String::new();
        assert_eq!(el.simple_class(), "");
    }

    fn sample_element() -> Element {
        Element {
            id: "1".into(),
            bounds: Bounds::new(0, 0, 50, 20),
            class_label: "android.widget.Button".into(),
            text: String::new(),
            resource_id: String::new(),
            content_desc: String::new(),
            clickable: true,
            enabled: true,
            visible: true,
            focused: false,
        }
    }
}
