// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Coordinate scaling and hit-testing.
//!
//! One uniform scale factor maps rectangles between natural image space
//! and the on-screen canvas. The same scalar must feed both drawing and
//! hit-testing; a mismatch produces visibly wrong click targets.

use crate::models::element::{Bounds, Element};
use crate::models::selection::VisibilitySet;

/// Default viewport bounds the scaled screenshot must fit within.
pub const MAX_VIEWPORT_WIDTH: u32 = 800;
pub const MAX_VIEWPORT_HEIGHT: u32 = 600;

/// Uniform fit-to-viewport scale factor, never above 1.
///
/// Preserves aspect ratio; an image already inside the viewport keeps
/// scale 1.
pub fn fit_scale(width: u32, height: u32, max_width: u32, max_height: u32) -> f32 {
    if width == 0 || height == 0 {
        return 1.0;
    }
    let sx = max_width as f32 / width as f32;
    let sy = max_height as f32 / height as f32;
    sx.min(sy).min(1.0)
}

/// A rectangle mapped into surface coordinates, rounded to the nearest
/// integer pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl ScaledRect {
    /// Containment test, inclusive of all four edges.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

/// Transform a rectangle by the uniform scale factor.
pub fn scale_rect(bounds: &Bounds, scale: f32) -> ScaledRect {
    ScaledRect {
        x1: (bounds.x1 as f32 * scale).round() as i32,
        y1: (bounds.y1 as f32 * scale).round() as i32,
        x2: (bounds.x2 as f32 * scale).round() as i32,
        y2: (bounds.y2 as f32 * scale).round() as i32,
    }
}

/// Find the element under a surface point: linear scan over the element
/// array, first included element whose scaled rectangle contains the
/// point wins. Dumps run tens to low hundreds of elements, so no spatial
/// index is warranted.
pub fn hit_test<'a>(
    elements: &'a [Element],
    visible: &VisibilitySet,
    scale: f32,
    x: i32,
    y: i32,
) -> Option<&'a Element> {
    elements
        .iter()
        .filter(|e| visible.contains(&e.id))
        .find(|e| scale_rect(&e.bounds, scale).contains(x, y))
}
