// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! The app is a thin shell: it owns the labeling [`Session`], forwards menu,
//! shortcut, button and pointer input to it, and renders its status. Image
//! pixels for display are decoded on a background thread.

use crate::config::LabelerConfig;
use crate::error::LabelerError;
use crate::io::{labels, media};
use crate::models::label::LabelRecord;
use crate::models::session::{Navigation, Session};
use crate::ui::{canvas, team_prompt, toolbar};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

/// Main application state.
pub struct LabelerApp {
    config: LabelerConfig,

    /// Text typed into the startup team prompt
    team_input: String,

    /// Created once the team number is known
    session: Option<Session>,

    /// Texture of the active image
    image_texture: Option<egui::TextureHandle>,

    /// Receiver for background image decoding
    image_loader: Option<Receiver<Result<media::LoadedImage, String>>>,

    /// Labels already on disk for the active image
    saved_labels: Vec<LabelRecord>,

    /// Status line shown above the canvas
    status: String,
}

impl LabelerApp {
    pub fn new(config: LabelerConfig) -> Self {
        let session = config
            .team_id
            .clone()
            .map(|team| start_session(team, &config));
        Self {
            config,
            team_input: String::new(),
            session,
            image_texture: None,
            image_loader: None,
            saved_labels: Vec::new(),
            status: "Open a Directory to Start".to_string(),
        }
    }

    /// Pick a folder and load its first image.
    fn open_directory(&mut self, ctx: &egui::Context) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(folder) = rfd::FileDialog::new()
            .set_title("Select Image Folder")
            .pick_folder()
        else {
            return;
        };

        match session.open_directory(&folder) {
            Ok(count) => {
                log::info!("Found {} images", count);
                self.show_current_image(ctx);
            }
            Err(LabelerError::EmptyDirectory { .. }) => {
                self.status = "No images found in that folder!".to_string();
            }
            Err(e) => {
                log::error!("Failed to open directory: {}", e);
                self.status = e.to_string();
            }
        }
    }

    fn next_image(&mut self, ctx: &egui::Context) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.advance() {
            Ok(Navigation::Moved(_)) => self.show_current_image(ctx),
            Ok(Navigation::AtEnd) => {
                self.status =
                    "Finished! That was the last image. Export now with Ctrl+E.".to_string();
            }
            Ok(_) => {}
            Err(e) => self.report_save_error(e),
        }
    }

    fn prev_image(&mut self, ctx: &egui::Context) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.retreat() {
            Ok(Navigation::Moved(_)) => self.show_current_image(ctx),
            Ok(_) => {}
            Err(e) => self.report_save_error(e),
        }
    }

    fn save_labels(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        match session.save_current() {
            Ok(Some(path)) => {
                self.status = format!("Saved {}", display_name(&path));
                self.reload_saved_labels();
            }
            Ok(None) => {}
            Err(e) => self.report_save_error(e),
        }
    }

    /// Pick a destination and copy every labeled pair into it.
    fn export_submission(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if session.total_count() == 0 {
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Warning)
                .set_title("Error")
                .set_description("No images loaded!")
                .show();
            return;
        }
        let Some(output_dir) = rfd::FileDialog::new()
            .set_title("Select Folder to Save Submission")
            .pick_folder()
        else {
            return;
        };

        match session.export(&output_dir) {
            Ok(report) => {
                let mut description = format!(
                    "Success! Exported {} labeled pairs.\n\nLocation: {}\nFormat: team{}_imageN",
                    report.exported,
                    report.destination.display(),
                    session.team_id()
                );
                if !report.failed.is_empty() {
                    description.push_str(&format!("\n\n{} pairs failed to copy.", report.failed.len()));
                }
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Info)
                    .set_title("Export Complete")
                    .set_description(description)
                    .show();
                self.status = format!("Exported {} labeled pairs", report.exported);
            }
            Err(e) => {
                log::error!("Export failed: {}", e);
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Error)
                    .set_title("Export Failed")
                    .set_description(e.to_string())
                    .show();
            }
        }
    }

    fn report_save_error(&mut self, e: LabelerError) {
        log::error!("Error saving: {}", e);
        self.status = format!("Error saving: {}", e);
    }

    /// Refresh status, title, overlay and texture after the active image changed.
    fn show_current_image(&mut self, ctx: &egui::Context) {
        self.image_texture = None;
        self.image_loader = None;
        self.reload_saved_labels();

        let Some(session) = self.session.as_ref() else {
            return;
        };
        let Some(path) = session.current_path().map(PathBuf::from) else {
            return;
        };

        if let Some(line) = session.status_line() {
            self.status = line;
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
            "YOLO Labeler - {}",
            display_name(&path)
        )));

        if let Some(failure) = session.load_failure() {
            self.status = format!("{} ({})", self.status, failure);
            return;
        }

        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        std::thread::spawn(move || {
            let result = media::load_image(&path).map_err(|e| e.to_string());
            let _ = sender.send(result);
        });
    }

    fn reload_saved_labels(&mut self) {
        self.saved_labels.clear();
        let Some(path) = self.session.as_ref().and_then(|s| s.current_path()) else {
            return;
        };
        match labels::read_labels(&labels::label_path_for(path)) {
            Ok(store) => self.saved_labels = store.records().to_vec(),
            Err(LabelerError::MissingLabelFile { .. }) => {}
            Err(e) => log::warn!("Could not read existing labels: {}", e),
        }
    }

    fn poll_image_loader(&mut self, ctx: &egui::Context) {
        let Some(ref receiver) = self.image_loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            ctx.request_repaint();
            return;
        };
        self.image_loader = None;

        match result {
            Ok(loaded) => {
                let size = [loaded.width as usize, loaded.height as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
                self.image_texture = Some(ctx.load_texture(
                    "current_image",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
            }
            Err(e) => {
                log::error!("Failed to load image: {}", e);
                self.status = format!("Failed to load image: {}", e);
                if let Some(session) = self.session.as_mut() {
                    session.mark_decode_failed(e);
                }
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let open = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
        let save = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
        let export = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::E);

        if ctx.input_mut(|i| i.consume_shortcut(&open)) {
            self.open_directory(ctx);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&save)) {
            self.save_labels();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&export)) {
            self.export_submission();
        }

        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::D) && i.modifiers.is_none()) {
            self.next_image(ctx);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::A) && i.modifiers.is_none()) {
            self.prev_image(ctx);
        }
    }
}

impl eframe::App for LabelerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.session.is_none() {
            if let Some(team) = team_prompt::show(ctx, &mut self.team_input) {
                log::info!("Team set to {}", team);
                self.session = Some(start_session(team, &self.config));
            }
            return;
        }

        self.poll_image_loader(ctx);
        self.handle_shortcuts(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Directory (Ctrl+O)").clicked() {
                        ui.close_menu();
                        self.open_directory(ctx);
                    }
                    if ui.button("Save Label (Ctrl+S)").clicked() {
                        ui.close_menu();
                        self.save_labels();
                    }
                    if ui.button("Export for Submission (Ctrl+E)").clicked() {
                        ui.close_menu();
                        self.export_submission();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(self.status.as_str());
            });
        });

        let has_images = self.session.as_ref().is_some_and(|s| s.total_count() > 0);
        let nav_action = egui::TopBottomPanel::bottom("navigation")
            .show(ctx, |ui| toolbar::show(ui, has_images))
            .inner;
        match nav_action {
            toolbar::NavAction::Prev => self.prev_image(ctx),
            toolbar::NavAction::Next => self.next_image(ctx),
            toolbar::NavAction::None => {}
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };
        let loading = self.image_loader.is_some().then_some("Loading image...");
        let message = loading.or(session.load_failure());

        let actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let surface = session.surface();
                canvas::show(
                    ui,
                    &canvas::CanvasView {
                        texture: self.image_texture.as_ref(),
                        extent: surface.extent(),
                        labels: surface.store().records(),
                        saved_labels: &self.saved_labels,
                        live_rect: surface.tool().live_rect(),
                        drawing: surface.tool().is_drawing(),
                        message,
                    },
                )
            })
            .inner;

        let surface = session.surface_mut();
        for action in actions {
            match action {
                canvas::CanvasAction::Press(point) => surface.press(point),
                canvas::CanvasAction::Drag(point) => surface.drag(point),
                canvas::CanvasAction::Release => {
                    surface.release();
                }
            }
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(session) = self.session.as_ref() {
            if let Err(e) = session.save_current() {
                log::error!("Error saving on exit: {}", e);
            }
        }
    }
}

/// Session for `team`, using the default extensions if the config lists none.
fn start_session(team: String, config: &LabelerConfig) -> Session {
    if config.image_extensions.is_empty() {
        log::warn!("Config lists no image extensions, using defaults");
        Session::new(team)
    } else {
        Session::with_extensions(team, config.image_extensions.clone())
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder_with(names: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            image::RgbImage::new(4, 4)
                .save_with_format(dir.path().join(name), image::ImageFormat::Png)
                .unwrap();
        }
        dir
    }

    #[test]
    fn test_empty_extension_list_falls_back_to_defaults() {
        let dir = folder_with(&["a.png", "b.jpg"]);
        let config = LabelerConfig {
            image_extensions: Vec::new(),
            ..Default::default()
        };

        let mut session = start_session("3".to_string(), &config);
        assert_eq!(session.team_id(), "3");
        assert_eq!(session.open_directory(dir.path()).unwrap(), 2);
    }

    #[test]
    fn test_configured_extensions_are_used() {
        let dir = folder_with(&["a.png", "b.jpg"]);
        let config = LabelerConfig {
            image_extensions: vec!["jpg".to_string()],
            ..Default::default()
        };

        let mut session = start_session("3".to_string(), &config);
        assert_eq!(session.open_directory(dir.path()).unwrap(), 1);
        assert_eq!(session.current_display_name().as_deref(), Some("b.jpg"));
    }
}
