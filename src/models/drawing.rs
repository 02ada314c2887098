// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Box drawing state machine.
//!
//! Pointer gestures arrive as press/drag/release events in image pixel
//! space. A completed gesture is normalized against the active image extent
//! and appended to the label store.

use super::label::{ImageExtent, LabelRecord, PixelPoint, PixelRect};
use super::label_store::LabelStore;
use crate::error::LabelerError;
use crate::util::geometry;

/// Gesture phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Drawing { anchor: PixelPoint, rect: PixelRect },
}

/// Tracks the single live rectangle of an in-progress gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxTool {
    state: GestureState,
}

impl Default for BoxTool {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxTool {
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, GestureState::Drawing { .. })
    }

    /// Fix the anchor and start a zero-size rectangle.
    ///
    /// A press while already drawing restarts the gesture from the new point;
    /// this happens when a release was lost outside the window.
    pub fn press(&mut self, point: PixelPoint) {
        if self.is_drawing() {
            log::debug!("Press while drawing, restarting gesture at ({:.1}, {:.1})", point.x, point.y);
        }
        self.state = GestureState::Drawing {
            anchor: point,
            rect: PixelRect::at(point),
        };
    }

    /// Replace the live rectangle with the box spanning anchor and pointer.
    pub fn drag(&mut self, point: PixelPoint) {
        if let GestureState::Drawing { anchor, rect } = &mut self.state {
            *rect = PixelRect::from_corners(*anchor, point);
        }
    }

    /// Finish the gesture, returning the final rectangle if one was live.
    pub fn release(&mut self) -> Option<PixelRect> {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Drawing { rect, .. } => Some(rect),
            GestureState::Idle => None,
        }
    }

    pub fn live_rect(&self) -> Option<PixelRect> {
        match self.state {
            GestureState::Drawing { rect, .. } => Some(rect),
            GestureState::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }
}

/// Everything tied to the image currently being annotated.
#[derive(Debug, Default)]
pub struct AnnotationSurface {
    extent: ImageExtent,
    store: LabelStore,
    tool: BoxTool,
}

impl AnnotationSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop labels and any live gesture, and set the extent of the new image.
    ///
    /// Pass the zero extent when the image failed to decode.
    pub fn reset(&mut self, extent: ImageExtent) {
        self.extent = extent;
        self.store.clear();
        self.tool.cancel();
    }

    pub fn extent(&self) -> ImageExtent {
        self.extent
    }

    pub fn set_extent(&mut self, extent: ImageExtent) {
        self.extent = extent;
    }

    pub fn store(&self) -> &LabelStore {
        &self.store
    }

    pub fn tool(&self) -> &BoxTool {
        &self.tool
    }

    pub fn press(&mut self, point: PixelPoint) {
        log::debug!("Pointer pressed at ({:.1}, {:.1})", point.x, point.y);
        self.tool.press(point);
    }

    pub fn drag(&mut self, point: PixelPoint) {
        self.tool.drag(point);
    }

    /// Complete the gesture and append its label.
    ///
    /// Returns the appended record, or `None` when no gesture was live or no
    /// image is loaded.
    pub fn release(&mut self) -> Option<LabelRecord> {
        let rect = self.tool.release()?;
        match geometry::normalize(&rect, self.extent) {
            Ok(record) => {
                self.store.append(record);
                log::info!("Captured: {} ({} boxes)", record, self.store.len());
                Some(record)
            }
            Err(LabelerError::NoImageLoaded) => {
                log::warn!("Ignoring box: no image loaded");
                None
            }
            Err(e) => {
                log::error!("Failed to normalize box: {}", e);
                None
            }
        }
    }
}
