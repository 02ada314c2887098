// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Startup prompt for the team number.

use crate::config::{team_or_unknown, UNKNOWN_TEAM};

/// Show the prompt. Returns the team identifier once confirmed or cancelled.
pub fn show(ctx: &egui::Context, input: &mut String) -> Option<String> {
    let mut result = None;
    egui::Window::new("Team Configuration")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label("Enter your Team Number:");
            let edit = ui.text_edit_singleline(input);
            edit.request_focus();
            let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.horizontal(|ui| {
                if ui.button("OK").clicked() || submitted {
                    result = Some(team_or_unknown(input));
                }
                if ui.button("Cancel").clicked() {
                    result = Some(UNKNOWN_TEAM.to_string());
                }
            });
        });
    result
}
