// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! DRIZZ - Mobile UI Testing Annotation Tool
//!
//! A desktop application for curating mobile UI element annotations:
//! load a screenshot and a UI-automation dump, include/exclude elements
//! on an interactive canvas, and export or persist the selection under
//! a deterministic project identifier.

mod app;
mod error;
mod identity;
mod io;
mod models;
mod net;
mod ui;
mod util;

use anyhow::Result;
use app::DrizzApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Drizz - Mobile UI Testing Annotation Tool"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Drizz",
        options,
        Box::new(|_cc| Ok(Box::new(DrizzApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
