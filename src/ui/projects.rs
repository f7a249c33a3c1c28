// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project browser window.
//!
//! Lists projects known to the backend (short id, filename, creation
//! time, annotated flag) and lets the user pull the saved selection for
//! the currently loaded project back into the visibility set.

use crate::models::project::ProjectSummary;

/// Result of browser interaction.
pub enum ProjectsAction {
    None,
    Refresh,
    LoadSaved(String),
}

/// Display the project browser window.
pub fn show(
    ctx: &egui::Context,
    open: &mut bool,
    projects: &[ProjectSummary],
    loading: bool,
    current_project_id: Option<&str>,
) -> ProjectsAction {
    let mut action = ProjectsAction::None;

    egui::Window::new("Projects")
        .open(open)
        .default_width(480.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Refresh").clicked() {
                    action = ProjectsAction::Refresh;
                }
                if loading {
                    ui.spinner();
                }
            });
            ui.separator();

            if projects.is_empty() && !loading {
                ui.label(egui::RichText::new("No projects on the server yet").weak());
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("projects_grid")
                    .num_columns(5)
                    .striped(true)
                    .show(ui, |ui| {
                        ui.strong("Short ID");
                        ui.strong("Filename");
                        ui.strong("Created");
                        ui.strong("Annotated");
                        ui.strong("");
                        ui.end_row();

                        for project in projects {
                            let is_current = current_project_id == Some(project.id.as_str());
                            ui.monospace(&project.short_id);
                            ui.label(project.filename.as_deref().unwrap_or("-"));
                            ui.label(&project.created_at);
                            ui.label(if project.has_annotations { "yes" } else { "-" });
                            if ui
                                .add_enabled(is_current, egui::Button::new("Load saved"))
                                .clicked()
                            {
                                action = ProjectsAction::LoadSaved(project.id.clone());
                            }
                            ui.end_row();
                        }
                    });
            });
        });

    action
}
