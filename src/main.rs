// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! YOLO Labeler - speed labeling for team submissions
//!
//! A desktop tool for stepping through a folder of images, drawing bounding
//! boxes, saving them as YOLO label files, and exporting a renamed
//! submission tree.

mod app;
mod config;
mod error;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::LabelerApp;
use config::{LabelerConfig, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = LabelerConfig::load_or_default(&config_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([640.0, 480.0])
            .with_title("YOLO Speed Labeler - Team Edition"),
        ..Default::default()
    };

    eframe::run_native(
        "YOLO Labeler",
        options,
        Box::new(|_cc| Ok(Box::new(LabelerApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
