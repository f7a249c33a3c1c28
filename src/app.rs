// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! One owned state container holds the canvas surface, the current
//! project snapshot, the visibility set, and the hovered id; they are
//! mutated only through explicit actions on the UI thread, and every
//! effective mutation schedules exactly one repaint. Image decode and
//! all network calls run on background threads reporting back over
//! channels polled in `update()`; in-flight requests are never
//! cancelled, so a superseded request's response silently wins last.

use crate::error::DrizzError;
use crate::identity;
use crate::io::dump;
use crate::io::export::{self, AnnotationPayload};
use crate::io::screenshot::{self, LoadedScreenshot};
use crate::models::element::Element;
use crate::models::project::{Project, ProjectSummary};
use crate::models::selection::VisibilitySet;
use crate::net::client::{ApiClient, SaveResponse, SavedAnnotations};
use crate::ui::canvas::{self, CanvasState};
use crate::ui::{panel, projects, toolbar};
use crate::util::geometry;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{Duration, Instant};

/// How long a status banner stays up. Clearing is cosmetic only.
const STATUS_TTL: Duration = Duration::from_secs(4);

/// Transient status banner for upload/save outcomes.
struct StatusBanner {
    text: String,
    is_error: bool,
    shown_at: Instant,
}

/// Screenshot metadata kept between image upload and dump upload.
struct ScreenshotInfo {
    filename: String,
    encoded: String,
    width: u32,
    height: u32,
}

/// Outcome of a background network request.
enum NetOutcome {
    Saved(Result<SaveResponse, DrizzError>),
    ProjectList(Result<Vec<ProjectSummary>, DrizzError>),
    SavedSelection(Result<SavedAnnotations, DrizzError>),
}

/// Main application state.
pub struct DrizzApp {
    /// Canvas surface lifecycle and texture.
    canvas: CanvasState,

    /// Screenshot from the last successful image upload.
    screenshot: Option<ScreenshotInfo>,

    /// Current project snapshot (screenshot + ingested elements).
    project: Option<Project>,

    /// Elements currently included in the next export.
    visibility: VisibilitySet,

    /// Currently hovered element id, one-or-none.
    hovered: Option<String>,

    /// Receiver for background screenshot decoding.
    image_loader: Option<Receiver<Result<LoadedScreenshot, DrizzError>>>,

    /// Channel shared by all network worker threads.
    net_tx: Sender<NetOutcome>,
    net_rx: Receiver<NetOutcome>,

    /// Project browser state.
    projects: Vec<ProjectSummary>,
    projects_open: bool,
    projects_loading: bool,

    status: Option<StatusBanner>,
}

impl Default for DrizzApp {
    fn default() -> Self {
        Self::new()
    }
}

impl DrizzApp {
    pub fn new() -> Self {
        let (net_tx, net_rx) = channel();
        Self {
            canvas: CanvasState::Uninitialized,
            screenshot: None,
            project: None,
            visibility: VisibilitySet::default(),
            hovered: None,
            image_loader: None,
            net_tx,
            net_rx,
            projects: Vec::new(),
            projects_open: false,
            projects_loading: false,
            status: None,
        }
    }

    fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        let text = text.into();
        if is_error {
            log::error!("{}", text);
        } else {
            log::info!("{}", text);
        }
        self.status = Some(StatusBanner {
            text,
            is_error,
            shown_at: Instant::now(),
        });
    }

    /// Start asynchronous screenshot loading. Validation happens here,
    /// before any decode work is spawned.
    fn open_screenshot(&mut self, path: std::path::PathBuf) {
        if let Err(e) = screenshot::validate_upload(&path) {
            self.set_status(e.to_string(), true);
            return;
        }

        self.canvas = CanvasState::ImageLoading;
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);

        std::thread::spawn(move || {
            let _ = sender.send(screenshot::load_screenshot(&path));
        });
    }

    /// Ingest an element dump and create a new project. Parse failures
    /// leave any existing project untouched.
    fn open_dump(&mut self, path: std::path::PathBuf, ctx: &egui::Context) {
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                self.set_status(format!("Cannot read {}: {}", path.display(), e), true);
                return;
            }
        };

        let (dump_value, elements) = match dump::parse_dump(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.set_status(e.to_string(), true);
                return;
            }
        };

        let (image_payload, filename, width, height) = match &self.screenshot {
            Some(s) => (s.encoded.clone(), s.filename.clone(), s.width, s.height),
            None => (
                String::new(),
                path.file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("dump")
                    .to_string(),
                0,
                0,
            ),
        };

        let id = identity::generate(&image_payload, &dump_value);
        let total = elements.len();
        let short_id = id.short_id.clone();

        self.visibility = VisibilitySet::all(&elements);
        self.hovered = None;
        self.project = Some(Project {
            id: id.id,
            short_id: id.short_id,
            filename,
            image_payload,
            width,
            height,
            elements,
        });
        self.set_status(
            format!("Project {} created with {} elements", short_id, total),
            false,
        );
        ctx.request_repaint();
    }

    /// Persist the current selection snapshot. Explicit no-op without a
    /// project; never retried; never rolls back local state.
    fn save_remote(&mut self) {
        let Some(project) = &self.project else {
            self.set_status("No project loaded; save skipped", false);
            return;
        };
        let payload = export::build_payload(project, &self.visibility);
        let project_id = project.id.clone();
        let sender = self.net_tx.clone();

        std::thread::spawn(move || {
            let client = ApiClient::from_env();
            let _ = sender.send(NetOutcome::Saved(
                client.save_annotations(&project_id, &payload),
            ));
        });
    }

    /// Export the selection snapshot to a local file, independent of
    /// remote persistence.
    fn export_local(&mut self, path: std::path::PathBuf) {
        let Some(project) = &self.project else {
            self.set_status("No project loaded; export skipped", false);
            return;
        };
        let payload = export::build_payload(project, &self.visibility);
        match export::export_json(&payload, &path) {
            Ok(()) => self.set_status(
                format!(
                    "Exported {} annotations to {}",
                    payload.metadata.total_elements,
                    path.display()
                ),
                false,
            ),
            Err(e) => self.set_status(format!("Failed to export annotations: {}", e), true),
        }
    }

    fn refresh_projects(&mut self) {
        self.projects_loading = true;
        let sender = self.net_tx.clone();
        std::thread::spawn(move || {
            let client = ApiClient::from_env();
            let _ = sender.send(NetOutcome::ProjectList(client.list_projects()));
        });
    }

    fn fetch_saved_selection(&mut self, project_id: String) {
        let sender = self.net_tx.clone();
        std::thread::spawn(move || {
            let client = ApiClient::from_env();
            let _ = sender.send(NetOutcome::SavedSelection(
                client.get_saved_annotations(&project_id),
            ));
        });
    }

    /// Apply a fetched saved selection to the visibility set.
    fn apply_saved_selection(&mut self, payload: AnnotationPayload) {
        let ids: Vec<String> = payload.annotations.iter().map(|a| a.id.clone()).collect();
        let count = ids.len();
        self.visibility.restore(ids);
        self.set_status(format!("Restored saved selection ({} elements)", count), false);
    }

    fn on_screenshot_loaded(&mut self, loaded: LoadedScreenshot, ctx: &egui::Context) {
        let size = [loaded.width as usize, loaded.height as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
        let texture = ctx.load_texture("screenshot", color_image, egui::TextureOptions::LINEAR);

        let scale = geometry::fit_scale(
            loaded.width,
            loaded.height,
            geometry::MAX_VIEWPORT_WIDTH,
            geometry::MAX_VIEWPORT_HEIGHT,
        );
        self.canvas = CanvasState::Ready {
            texture,
            image_size: (loaded.width, loaded.height),
            scale,
        };
        self.set_status(
            format!(
                "Screenshot {} loaded ({}x{}, scale {:.2})",
                loaded.filename, loaded.width, loaded.height, scale
            ),
            false,
        );
        self.screenshot = Some(ScreenshotInfo {
            filename: loaded.filename,
            encoded: loaded.encoded,
            width: loaded.width,
            height: loaded.height,
        });
    }

    fn poll_workers(&mut self, ctx: &egui::Context) {
        if let Some(receiver) = &self.image_loader {
            if let Ok(result) = receiver.try_recv() {
                self.image_loader = None;
                match result {
                    Ok(loaded) => self.on_screenshot_loaded(loaded, ctx),
                    // Decode failure: surface the error, stay non-Ready,
                    // no automatic retry.
                    Err(e) => self.set_status(e.to_string(), true),
                }
            }
        }

        while let Ok(outcome) = self.net_rx.try_recv() {
            match outcome {
                NetOutcome::Saved(Ok(response)) => {
                    let text = if response.message.is_empty() {
                        format!("Annotations saved as {}", response.annotation_short_id)
                    } else {
                        response.message
                    };
                    self.set_status(text, false);
                }
                NetOutcome::Saved(Err(e)) => self.set_status(e.to_string(), true),
                NetOutcome::ProjectList(Ok(list)) => {
                    self.projects_loading = false;
                    self.projects = list;
                }
                NetOutcome::ProjectList(Err(e)) => {
                    self.projects_loading = false;
                    self.set_status(e.to_string(), true);
                }
                NetOutcome::SavedSelection(Ok(body)) => {
                    if body.success {
                        match body.annotations {
                            Some(payload) => self.apply_saved_selection(payload),
                            None => self.set_status("Saved selection was empty", false),
                        }
                    } else {
                        let text = if body.message.is_empty() {
                            "No saved annotations found".to_string()
                        } else {
                            body.message
                        };
                        self.set_status(text, false);
                    }
                }
                NetOutcome::SavedSelection(Err(e)) => self.set_status(e.to_string(), true),
            }
        }
    }

    fn show_menu(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Screenshot...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["png", "jpg", "jpeg", "webp", "bmp"])
                            .pick_file()
                        {
                            self.open_screenshot(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Open Element Dump...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("JSON", &["json"])
                            .pick_file()
                        {
                            self.open_dump(path, ctx);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Export Annotations...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("JSON", &["json"])
                            .set_file_name("annotations.json")
                            .save_file()
                        {
                            self.export_local(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Project", |ui| {
                    if ui.button("Save to Server").clicked() {
                        self.save_remote();
                        ui.close_menu();
                    }
                    let has_project = self.project.is_some();
                    if ui
                        .add_enabled(has_project, egui::Button::new("Load Saved Selection"))
                        .clicked()
                    {
                        if let Some(project) = &self.project {
                            let id = project.id.clone();
                            self.fetch_saved_selection(id);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Browse Projects...").clicked() {
                        self.projects_open = true;
                        self.refresh_projects();
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn show_status(&mut self, ctx: &egui::Context) {
        let expired = self
            .status
            .as_ref()
            .is_some_and(|b| b.shown_at.elapsed() > STATUS_TTL);
        if expired {
            self.status = None;
        } else if self.status.is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
        if let Some(banner) = &self.status {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                let color = if banner.is_error {
                    egui::Color32::from_rgb(0xE7, 0x4C, 0x3C)
                } else {
                    egui::Color32::from_rgb(0x2E, 0xCC, 0x71)
                };
                ui.label(egui::RichText::new(&banner.text).color(color));
            });
        }
    }
}

/// Store the hover observed this frame, one-or-none. Returns true when
/// the stored id changed and a repaint is needed.
fn reconcile_hover(hovered: &mut Option<String>, observed: Option<String>) -> bool {
    if *hovered != observed {
        *hovered = observed;
        true
    } else {
        false
    }
}

impl eframe::App for DrizzApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_workers(ctx);

        if self.image_loader.is_some() {
            ctx.request_repaint();
        }

        self.show_menu(ctx);
        self.show_status(ctx);

        // Toolbar
        let (included, total) = (
            self.visibility.len(),
            self.project.as_ref().map(|p| p.elements.len()).unwrap_or(0),
        );
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, self.project.is_some(), included, total)
            })
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::SelectAll => {
                if let Some(project) = &self.project {
                    self.visibility.select_all(&project.elements);
                    ctx.request_repaint();
                }
            }
            toolbar::ToolbarAction::DeselectAll => {
                self.visibility.deselect_all();
                ctx.request_repaint();
            }
            toolbar::ToolbarAction::ExportJson => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("JSON", &["json"])
                    .set_file_name("annotations.json")
                    .save_file()
                {
                    self.export_local(path);
                }
            }
            toolbar::ToolbarAction::SaveRemote => self.save_remote(),
            toolbar::ToolbarAction::None => {}
        }

        // Hover is re-derived every frame; when neither the canvas nor
        // a checklist row reports one, it clears.
        let mut frame_hover: Option<String> = None;

        // Element checklist panel (right side)
        let panel_action = egui::SidePanel::right("elements")
            .default_width(280.0)
            .show(ctx, |ui| {
                panel::show(
                    ui,
                    self.project.as_ref(),
                    &self.visibility,
                    self.hovered.as_deref(),
                )
            })
            .inner;

        match panel_action {
            panel::PanelAction::Toggle(id) => {
                self.visibility.toggle(&id);
                ctx.request_repaint();
            }
            panel::PanelAction::Hover(id) => frame_hover = id,
            panel::PanelAction::None => {}
        }

        // Main canvas (center)
        let empty: &[Element] = &[];
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let elements = self
                    .project
                    .as_ref()
                    .map(|p| p.elements.as_slice())
                    .unwrap_or(empty);
                canvas::show(
                    ui,
                    &self.canvas,
                    elements,
                    &self.visibility,
                    self.hovered.as_deref(),
                )
            })
            .inner;

        match canvas_action {
            canvas::CanvasAction::ToggleElement(id) => {
                let included = self.visibility.toggle(&id);
                log::info!(
                    "Toggled element {} ({})",
                    id,
                    if included { "included" } else { "excluded" }
                );
                ctx.request_repaint();
            }
            canvas::CanvasAction::Hover(id) => frame_hover = id,
            canvas::CanvasAction::None => {}
        }

        if reconcile_hover(&mut self.hovered, frame_hover) {
            ctx.request_repaint();
        }

        // Project browser window
        let mut projects_open = self.projects_open;
        let projects_action = projects::show(
            ctx,
            &mut projects_open,
            &self.projects,
            self.projects_loading,
            self.project.as_ref().map(|p| p.id.as_str()),
        );
        self.projects_open = projects_open;

        match projects_action {
            projects::ProjectsAction::Refresh => self.refresh_projects(),
            projects::ProjectsAction::LoadSaved(id) => self.fetch_saved_selection(id),
            projects::ProjectsAction::None => {}
        }
    }
}
