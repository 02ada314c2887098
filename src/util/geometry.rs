// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module converts pixel rectangles into resolution-independent YOLO
//! label records and back. No clamping is applied in either direction.

use crate::error::{LabelerError, Result};
use crate::models::label::{ImageExtent, LabelRecord, PixelRect, DEFAULT_CLASS_ID};

/// Convert a pixel rectangle into a normalized label record.
///
/// Refuses with [`LabelerError::NoImageLoaded`] when the extent is zero.
/// Boxes reaching outside the image or with zero size are returned as-is.
pub fn normalize(rect: &PixelRect, extent: ImageExtent) -> Result<LabelRecord> {
    if !extent.is_loaded() {
        return Err(LabelerError::NoImageLoaded);
    }

    let width = extent.width as f64;
    let height = extent.height as f64;
    let center = rect.center();

    Ok(LabelRecord {
        class_id: DEFAULT_CLASS_ID,
        center_x: center.x / width,
        center_y: center.y / height,
        width: rect.width / width,
        height: rect.height / height,
    })
}

/// Convert a label record back to a pixel rectangle for the given extent.
pub fn denormalize(record: &LabelRecord, extent: ImageExtent) -> PixelRect {
    let width = record.width * extent.width as f64;
    let height = record.height * extent.height as f64;
    PixelRect {
        x: record.center_x * extent.width as f64 - width / 2.0,
        y: record.center_y * extent.height as f64 - height / 2.0,
        width,
        height,
    }
}
