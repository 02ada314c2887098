// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Label file persistence.
//!
//! Labels live beside their image with the same base name and a `.txt`
//! extension. Writes overwrite; nothing is merged.

use crate::error::{LabelerError, Result};
use crate::models::label_store::LabelStore;
use std::path::{Path, PathBuf};

/// Sibling label path for an image (`photo.jpg` -> `photo.txt`).
pub fn label_path_for(image: &Path) -> PathBuf {
    image.with_extension("txt")
}

/// Write the store to `path`, replacing any existing file.
pub fn write_labels(path: &Path, store: &LabelStore) -> Result<()> {
    std::fs::write(path, store.to_text()).map_err(|e| LabelerError::io(path, e))
}

/// Read a label file written by [`write_labels`] or another YOLO tool.
pub fn read_labels(path: &Path) -> Result<LabelStore> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LabelerError::MissingLabelFile {
                path: path.to_path_buf(),
            }
        } else {
            LabelerError::io(path, e)
        }
    })?;
    LabelStore::parse(&text)
}
