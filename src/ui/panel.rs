// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Element checklist and legend panel.
//!
//! Right-hand panel showing the project identity, per-category counts,
//! the color legend, and a scrollable include/exclude checklist that
//! mirrors canvas clicks.

use crate::models::classify::{Category, ElementType};
use crate::models::project::Project;
use crate::models::selection::VisibilitySet;
use crate::ui::canvas::color32;
use std::collections::BTreeMap;

/// Result of panel interaction.
#[derive(Debug, PartialEq, Eq)]
pub enum PanelAction {
    None,
    Toggle(String),
    Hover(Option<String>),
}

/// Resolve one checklist row's response. On the click frame the row is
/// both changed and hovered; the toggle must win or the checkbox
/// reverts next frame.
fn row_action(id: &str, changed: bool, hovered: bool) -> PanelAction {
    if changed {
        PanelAction::Toggle(id.to_owned())
    } else if hovered {
        PanelAction::Hover(Some(id.to_owned()))
    } else {
        PanelAction::None
    }
}

const LEGEND: [ElementType; 7] = [
    ElementType::Button,
    ElementType::EditText,
    ElementType::TextView,
    ElementType::ImageView,
    ElementType::ViewGroup,
    ElementType::FrameLayout,
    ElementType::Other,
];

/// Display the panel; returns at most one action per frame.
pub fn show(
    ui: &mut egui::Ui,
    project: Option<&Project>,
    visible: &VisibilitySet,
    hovered: Option<&str>,
) -> PanelAction {
    let mut action = PanelAction::None;

    ui.heading("Elements");
    ui.separator();

    let Some(project) = project else {
        ui.label(egui::RichText::new("No element dump loaded").weak());
        return action;
    };

    ui.label(format!("Project: {}", project.short_id));
    ui.label(
        egui::RichText::new(&project.id[..16.min(project.id.len())])
            .monospace()
            .weak(),
    );
    ui.separator();

    // Per-category statistics.
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for element in &project.elements {
        *counts
            .entry(element.element_type().category().name())
            .or_default() += 1;
    }
    ui.label(format!(
        "{} of {} included",
        visible.len(),
        project.elements.len()
    ));
    for category in [
        Category::Interactive,
        Category::Input,
        Category::Content,
        Category::Media,
        Category::Layout,
        Category::Other,
    ] {
        if let Some(count) = counts.get(category.name()) {
            ui.label(format!("  {}: {}", category.name(), count));
        }
    }
    ui.separator();

    // Color legend.
    ui.collapsing("Legend", |ui| {
        for element_type in LEGEND {
            ui.horizontal(|ui| {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter()
                    .rect_filled(rect, 2.0, color32(element_type.color_hex()));
                ui.label(element_type.name());
            });
        }
    });
    ui.separator();

    // Checklist, in element-array (priority) order.
    egui::ScrollArea::vertical().show(ui, |ui| {
        for element in &project.elements {
            let mut included = visible.contains(&element.id);
            let label = if element.text.is_empty() {
                format!("{} {}", element.id, element.simple_class())
            } else {
                format!("{} {} \"{}\"", element.id, element.simple_class(), element.text)
            };

            let is_hovered = hovered == Some(element.id.as_str());
            let text = if is_hovered {
                egui::RichText::new(label).strong()
            } else {
                egui::RichText::new(label)
            };

            let response = ui.checkbox(&mut included, text);
            match row_action(&element.id, response.changed(), response.hovered()) {
                PanelAction::None => {}
                row => action = row,
            }
        }
    });

    action
}
