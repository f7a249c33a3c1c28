// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with selection and export controls.

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    SelectAll,
    DeselectAll,
    ExportJson,
    SaveRemote,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, has_project: bool, included: usize, total: usize) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui
            .add_enabled(has_project, egui::Button::new("Select All"))
            .clicked()
        {
            action = ToolbarAction::SelectAll;
        }
        if ui
            .add_enabled(has_project, egui::Button::new("Deselect All"))
            .clicked()
        {
            action = ToolbarAction::DeselectAll;
        }

        ui.separator();

        if ui
            .add_enabled(has_project, egui::Button::new("Export JSON..."))
            .clicked()
        {
            action = ToolbarAction::ExportJson;
        }
        if ui
            .add_enabled(has_project, egui::Button::new("Save to Server"))
            .clicked()
        {
            action = ToolbarAction::SaveRemote;
        }

        ui.separator();

        if has_project {
            ui.label(format!("{}/{} elements included", included, total));
        } else {
            ui.label(egui::RichText::new("No project loaded").italics().weak());
        }
    });

    action
}
