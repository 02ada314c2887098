// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Navigation bar.
//!
//! Prev/Next buttons below the canvas, mirroring the `A`/`D` shortcuts.

/// Button pressed this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    None,
    Prev,
    Next,
}

/// Display the Prev/Next buttons.
pub fn show(ui: &mut egui::Ui, has_images: bool) -> NavAction {
    let mut action = NavAction::None;
    ui.columns(2, |columns| {
        columns[0].vertical_centered_justified(|ui| {
            if ui.add_enabled(has_images, egui::Button::new("<< Prev (A)")).clicked() {
                action = NavAction::Prev;
            }
        });
        columns[1].vertical_centered_justified(|ui| {
            if ui.add_enabled(has_images, egui::Button::new("Next (D) >>")).clicked() {
                action = NavAction::Next;
            }
        });
    });
    action
}
