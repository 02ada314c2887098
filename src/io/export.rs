// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Submission export.
//!
//! Copies every labeled image/label pair into
//! `<root>/Team<id>_Submission/{images,labels}/` under the name
//! `team<id>_image<i>`, where `i` is the position in the session's image
//! list. Unlabeled images are skipped without renumbering the rest.

use super::labels::label_path_for;
use crate::error::{LabelerError, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Outcome of an export run.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Submission folder that received the files.
    pub destination: PathBuf,
    /// Number of pairs copied completely.
    pub exported: usize,
    /// Indices skipped because no label file existed.
    pub skipped: Vec<usize>,
    /// Indices whose copy failed, with the error message.
    pub failed: Vec<(usize, String)>,
}

/// Name of the submission folder for a team.
pub fn submission_dir(destination_root: &Path, team_id: &str) -> PathBuf {
    destination_root.join(format!("Team{}_Submission", team_id))
}

/// Base file name (no extension) for the image at `index`.
pub fn export_base_name(team_id: &str, index: usize) -> String {
    format!("team{}_image{}", team_id, index)
}

/// Copy labeled pairs into the submission tree.
///
/// Only failing to create the destination folders aborts the run; a failed
/// copy is logged and recorded, and the remaining entries are still exported.
pub fn export_submission(
    image_list: &[PathBuf],
    team_id: &str,
    destination_root: &Path,
) -> Result<ExportReport> {
    let submission = submission_dir(destination_root, team_id);
    let image_dir = submission.join("images");
    let label_dir = submission.join("labels");
    for dir in [&image_dir, &label_dir] {
        std::fs::create_dir_all(dir).map_err(|e| LabelerError::io(dir, e))?;
    }

    let mut report = ExportReport {
        destination: submission,
        ..Default::default()
    };

    for (index, src_image) in image_list.iter().enumerate() {
        let src_label = label_path_for(src_image);
        if !src_label.exists() {
            log::info!("Skipping index {}: no label file found", index);
            report.skipped.push(index);
            continue;
        }

        let base_name = export_base_name(team_id, index);
        let dst_image = match src_image.extension() {
            Some(ext) => image_dir.join(format!("{}.{}", base_name, ext.to_string_lossy())),
            None => image_dir.join(&base_name),
        };
        let dst_label = label_dir.join(format!("{}.txt", base_name));

        let copied = copy_with_metadata(src_image, &dst_image)
            .and_then(|_| copy_with_metadata(&src_label, &dst_label));
        match copied {
            Ok(()) => report.exported += 1,
            Err(e) => {
                log::error!("Error exporting {}: {}", base_name, e);
                report.failed.push((index, e.to_string()));
            }
        }
    }

    log::info!(
        "Exported {} labeled pairs to {}",
        report.exported,
        report.destination.display()
    );
    Ok(report)
}

/// Copy contents and permissions, then carry over the modification time.
fn copy_with_metadata(src: &Path, dst: &Path) -> Result<()> {
    std::fs::copy(src, dst).map_err(|e| LabelerError::io(src, e))?;

    let modified = std::fs::metadata(src).and_then(|meta| meta.modified());
    if let Ok(modified) = modified {
        let times = std::fs::FileTimes::new().set_modified(modified);
        if let Err(e) = File::options().write(true).open(dst).and_then(|f| f.set_times(times)) {
            log::debug!("Could not preserve timestamps on {}: {}", dst.display(), e);
        }
    }
    Ok(())
}
