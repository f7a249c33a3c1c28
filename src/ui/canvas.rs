// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation canvas for the screenshot and its bounding boxes.
//!
//! The canvas owns a three-state surface: nothing loaded, image decode
//! in flight, and ready with a texture plus the fit-to-viewport scale.
//! Every frame redraws the base image and the outlines of all elements
//! currently in the visibility set, in element-array order so later
//! elements paint on top. The hovered element alone gets a semi-opaque
//! fill, a thicker border, corner handles, and a label callout.

use crate::models::element::Element;
use crate::models::selection::VisibilitySet;
use crate::util::geometry::{self, scale_rect};

/// Surface lifecycle: `Uninitialized -> ImageLoading -> Ready`. A failed
/// decode stays in `ImageLoading`; the error is reported through the
/// status banner and never retried automatically.
pub enum CanvasState {
    Uninitialized,
    ImageLoading,
    Ready {
        texture: egui::TextureHandle,
        image_size: (u32, u32),
        scale: f32,
    },
}

impl CanvasState {
    pub fn is_ready(&self) -> bool {
        matches!(self, CanvasState::Ready { .. })
    }
}

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    /// Click toggled an element in or out of the visibility set.
    ToggleElement(String),
    /// Pointer moved; one-or-none element is hovered.
    Hover(Option<String>),
}

/// Display the canvas area and handle pointer interactions.
pub fn show(
    ui: &mut egui::Ui,
    state: &CanvasState,
    elements: &[Element],
    visible: &VisibilitySet,
    hovered: Option<&str>,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        match state {
            CanvasState::Ready {
                texture,
                image_size,
                scale,
            } => {
                let (img_width, img_height) = *image_size;
                let surface_size = egui::vec2(
                    (img_width as f32 * scale).round(),
                    (img_height as f32 * scale).round(),
                );

                let (surface_rect, response) =
                    ui.allocate_exact_size(surface_size, egui::Sense::click());

                // Base image, scaled to the surface.
                ui.painter().image(
                    texture.id(),
                    surface_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );

                // Hover and click share the scale but re-derive the hit
                // independently from current state.
                if let Some(pos) = response.hover_pos() {
                    let (sx, sy) = surface_point(pos, &surface_rect);
                    let hit = geometry::hit_test(elements, visible, *scale, sx, sy);
                    action = CanvasAction::Hover(hit.map(|e| e.id.clone()));
                }

                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        let (sx, sy) = surface_point(pos, &surface_rect);
                        if let Some(hit) = geometry::hit_test(elements, visible, *scale, sx, sy) {
                            action = CanvasAction::ToggleElement(hit.id.clone());
                        }
                    }
                }

                let painter = ui.painter();
                for element in elements {
                    if !visible.contains(&element.id) {
                        continue;
                    }
                    let is_hovered = hovered == Some(element.id.as_str());
                    draw_element(painter, element, &surface_rect, *scale, is_hovered);
                }
            }
            CanvasState::ImageLoading => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("Loading screenshot...")
                            .color(egui::Color32::WHITE),
                    );
                });
            }
            CanvasState::Uninitialized => {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.heading(
                            egui::RichText::new("DRIZZ")
                                .size(32.0)
                                .color(egui::Color32::from_gray(200)),
                        );
                        ui.label(
                            egui::RichText::new("Mobile UI Testing Annotation Tool")
                                .size(14.0)
                                .color(egui::Color32::from_gray(150)),
                        );
                        ui.add_space(20.0);
                        ui.label(
                            egui::RichText::new(
                                "Open a screenshot and an element dump to begin curating",
                            )
                            .color(egui::Color32::from_gray(180)),
                        );
                        ui.add_space(10.0);
                        ui.label(
                            egui::RichText::new("File → Open Screenshot...")
                                .weak()
                                .color(egui::Color32::from_gray(130)),
                        );
                    });
                });
            }
        }
    });

    // Surface state strip at the bottom.
    ui.separator();
    ui.horizontal(|ui| {
        if state.is_ready() {
            ui.label("Ready");
        } else {
            ui.label("No screenshot loaded");
        }
        ui.separator();
        let included = elements.iter().filter(|e| visible.contains(&e.id)).count();
        ui.label(format!("{} of {} elements shown", included, elements.len()));
    });

    action
}

/// Pointer position in integer surface coordinates.
fn surface_point(pos: egui::Pos2, surface_rect: &egui::Rect) -> (i32, i32) {
    (
        (pos.x - surface_rect.min.x).round() as i32,
        (pos.y - surface_rect.min.y).round() as i32,
    )
}

/// Draw one element's rectangle, with hover decoration when applicable.
fn draw_element(
    painter: &egui::Painter,
    element: &Element,
    surface_rect: &egui::Rect,
    scale: f32,
    is_hovered: bool,
) {
    let scaled = scale_rect(&element.bounds, scale);
    let rect = egui::Rect::from_min_max(
        surface_rect.min + egui::vec2(scaled.x1 as f32, scaled.y1 as f32),
        surface_rect.min + egui::vec2(scaled.x2 as f32, scaled.y2 as f32),
    );

    let color = color32(element.color());

    if is_hovered {
        painter.rect_filled(rect, 0.0, color.gamma_multiply(0.25));
        painter.rect_stroke(rect, 0.0, egui::Stroke::new(3.0, color));

        // Corner handles.
        for corner in [
            rect.left_top(),
            rect.right_top(),
            rect.left_bottom(),
            rect.right_bottom(),
        ] {
            painter.circle_filled(corner, 4.0, color);
            painter.circle_stroke(corner, 4.0, egui::Stroke::new(1.0, egui::Color32::BLACK));
        }

        draw_label_callout(painter, element, &rect, color);
    } else {
        painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, color));
    }
}

/// Label callout above the hovered rectangle: element id plus the
/// simplified class name.
fn draw_label_callout(
    painter: &egui::Painter,
    element: &Element,
    rect: &egui::Rect,
    color: egui::Color32,
) {
    let label = format!("{} {}", element.id, element.simple_class());
    let galley = painter.layout_no_wrap(
        label,
        egui::FontId::proportional(12.0),
        egui::Color32::WHITE,
    );

    let padding = egui::vec2(4.0, 2.0);
    let pos = egui::pos2(rect.min.x, rect.min.y - galley.size().y - padding.y * 2.0 - 2.0);
    let background = egui::Rect::from_min_size(pos, galley.size() + padding * 2.0);

    painter.rect_filled(background, 2.0, color.gamma_multiply(0.9));
    painter.galley(pos + padding, galley, egui::Color32::WHITE);
}

/// Convert a `#RRGGBB` palette entry to an egui color.
pub fn color32(hex: &str) -> egui::Color32 {
    let parse = |range| u8::from_str_radix(hex.get(range).unwrap_or("0"), 16).unwrap_or(0);
    if hex.len() == 7 && hex.starts_with('#') {
        egui::Color32::from_rgb(parse(1..3), parse(3..5), parse(5..7))
    } else {
        egui::Color32::GRAY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color32_parses_palette_entries() {
        assert_eq!(color32("#FF6B6B"), egui::Color32::from_rgb(0xFF, 0x6B, 0x6B));
        assert_eq!(color32("#95A5A6"), egui::Color32::from_rgb(0x95, 0xA5, 0xA6));
    }

    #[test]
    fn test_color32_falls_back_on_garbage() {
        assert_eq!(color32("red"), egui::Color32::GRAY);
        assert_eq!(color32(""), egui::Color32::GRAY);
    }

    #[test]
    fn test_canvas_state_readiness() {
        assert!(!CanvasState::Uninitialized.is_ready());
        assert!(!CanvasState::ImageLoading.is_ready());
    }
}
