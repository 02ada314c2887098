// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and box annotation.
//!
//! This module fits the active image into the available space, turns pointer
//! input into press/drag/release events in image pixel coordinates, and
//! paints the labels on top of the image.

use crate::models::label::{ImageExtent, LabelRecord, PixelPoint, PixelRect};
use crate::util::geometry;

/// Pointer gesture events produced by the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    Press(PixelPoint),
    Drag(PixelPoint),
    Release,
}

/// What the canvas needs to paint one frame.
pub struct CanvasView<'a> {
    pub texture: Option<&'a egui::TextureHandle>,
    pub extent: ImageExtent,
    /// Boxes drawn since the image was opened.
    pub labels: &'a [LabelRecord],
    /// Boxes read from the label file on disk.
    pub saved_labels: &'a [LabelRecord],
    pub live_rect: Option<PixelRect>,
    pub drawing: bool,
    pub message: Option<&'a str>,
}

const BOX_COLOR: egui::Color32 = egui::Color32::RED;
const SAVED_COLOR: egui::Color32 = egui::Color32::from_rgb(90, 200, 250);

/// Primary-button state of one frame, with the pointer in image pixels.
#[derive(Debug, Clone, Copy, Default)]
struct PointerFrame {
    /// Pressed over the image this frame.
    pressed: bool,
    down: bool,
    released: bool,
    pos: Option<PixelPoint>,
}

/// Turn one frame of pointer state into gesture events.
///
/// Press and release can both land in a single frame (taps, queued input),
/// so each is handled on its own.
fn pointer_actions(frame: &PointerFrame, drawing: bool) -> Vec<CanvasAction> {
    let mut actions = Vec::new();
    let Some(pos) = frame.pos else {
        if drawing && frame.released {
            actions.push(CanvasAction::Release);
        }
        return actions;
    };

    let mut active = drawing;
    // Released the old box, then pressed again: the button is still down.
    if active && frame.released && frame.pressed && frame.down {
        actions.push(CanvasAction::Drag(pos));
        actions.push(CanvasAction::Release);
        active = false;
    }
    if frame.pressed {
        actions.push(CanvasAction::Press(pos));
        active = true;
    }
    if active && (frame.down || frame.released) {
        actions.push(CanvasAction::Drag(pos));
    }
    if active && frame.released && !frame.down {
        actions.push(CanvasAction::Release);
    }
    actions
}

/// Display the canvas and return the pointer events of this frame.
pub fn show(ui: &mut egui::Ui, view: &CanvasView<'_>) -> Vec<CanvasAction> {
    let mut actions = Vec::new();
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let Some(texture) = view.texture else {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new(view.message.unwrap_or("Open a Directory to Start"))
                        .size(16.0)
                        .color(egui::Color32::from_gray(200)),
                );
            });
            return;
        };

        let [tex_width, tex_height] = texture.size();
        let (img_width, img_height) = (tex_width as f32, tex_height as f32);

        // Fit the image in the view, keeping aspect ratio
        let available = ui.available_size();
        let scale = (available.x / img_width).min(available.y / img_height);
        let display_size = egui::vec2(img_width * scale, img_height * scale);
        let offset = (available - display_size) / 2.0;
        let image_rect = egui::Rect::from_min_size(ui.min_rect().min + offset, display_size);

        ui.painter().image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let response = ui.allocate_rect(image_rect, egui::Sense::click_and_drag());
        let to_pixels = |pos: egui::Pos2| {
            PixelPoint::new(
                ((pos.x - image_rect.min.x) / scale) as f64,
                ((pos.y - image_rect.min.y) / scale) as f64,
            )
        };

        let frame = ui.input(|i| PointerFrame {
            pressed: i.pointer.primary_pressed() && response.hovered(),
            down: i.pointer.primary_down(),
            released: i.pointer.primary_released(),
            pos: i.pointer.interact_pos().map(to_pixels),
        });
        actions = pointer_actions(&frame, view.drawing);

        let to_screen = |rect: PixelRect| {
            egui::Rect::from_min_size(
                image_rect.min + egui::vec2(rect.x as f32 * scale, rect.y as f32 * scale),
                egui::vec2(rect.width as f32 * scale, rect.height as f32 * scale),
            )
        };

        let painter = ui.painter_at(ui.max_rect());
        if view.extent.is_loaded() {
            for record in view.saved_labels {
                let rect = to_screen(geometry::denormalize(record, view.extent));
                painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, SAVED_COLOR));
            }
            for record in view.labels {
                let rect = to_screen(geometry::denormalize(record, view.extent));
                painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, BOX_COLOR));
            }
        }
        if let Some(live) = view.live_rect {
            painter.rect_stroke(to_screen(live), 0.0, egui::Stroke::new(2.0, BOX_COLOR));
        }
    });

    ui.separator();
    ui.horizontal(|ui| {
        ui.label(format!("Boxes: {}", view.labels.len()));
        if !view.saved_labels.is_empty() {
            ui.separator();
            ui.label(
                egui::RichText::new(format!("On disk: {}", view.saved_labels.len()))
                    .color(SAVED_COLOR),
            );
        }
        if view.texture.is_some() && !view.extent.is_loaded() {
            ui.separator();
            ui.label(egui::RichText::new("Image not loaded, drawing disabled").weak());
        }
    });

    actions
}
