// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the labeling core.
//!
//! None of these are fatal: every caller degrades the failed operation to a
//! no-op and reports it through the log or the status line.

use std::path::PathBuf;
use thiserror::Error;

/// Failures produced by geometry, label persistence, navigation and export.
#[derive(Debug, Error)]
pub enum LabelerError {
    /// A geometry operation was attempted against a zero image extent.
    #[error("No image loaded")]
    NoImageLoaded,

    /// Directory scan matched no image files.
    #[error("No images found in {}", .path.display())]
    EmptyDirectory { path: PathBuf },

    /// An image has no sibling label file.
    #[error("No label file found at {}", .path.display())]
    MissingLabelFile { path: PathBuf },

    /// File system operation failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File could not be read as an image.
    #[error("Failed to decode image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A label line did not have the `<class> <cx> <cy> <w> <h>` shape.
    #[error("Malformed label on line {line}: {content:?}")]
    MalformedLabel { line: usize, content: String },

    /// Export was requested before any directory was opened.
    #[error("No images loaded!")]
    NothingToExport,

    #[error("Image index {index} out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl LabelerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LabelerError>;
