// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Labeling session state.
//!
//! A session owns the sorted image list, the current position in it, and the
//! annotation surface of the active image. Every transition between images
//! first flushes the surface's labels to disk.

use super::drawing::AnnotationSurface;
use super::label::ImageExtent;
use crate::error::{LabelerError, Result};
use crate::io::{export, labels, media};
use std::path::{Path, PathBuf};

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Moved to the image at this index.
    Moved(usize),
    /// Already on the last image.
    AtEnd,
    /// Already on the first image.
    AtStart,
    /// No directory has been opened.
    NoImages,
}

/// Image list, position, and the active image's labels.
#[derive(Debug)]
pub struct Session {
    team_id: String,
    extensions: Vec<String>,
    image_list: Vec<PathBuf>,
    current_index: usize,
    surface: AnnotationSurface,
    load_failure: Option<String>,
}

impl Session {
    /// Create an empty session for a team using the default extensions.
    pub fn new(team_id: impl Into<String>) -> Self {
        let extensions = media::DEFAULT_IMAGE_EXTENSIONS
            .iter()
            .map(|ext| ext.to_string())
            .collect();
        Self::with_extensions(team_id, extensions)
    }

    pub fn with_extensions(team_id: impl Into<String>, extensions: Vec<String>) -> Self {
        Self {
            team_id: team_id.into(),
            extensions,
            image_list: Vec::new(),
            current_index: 0,
            surface: AnnotationSurface::new(),
            load_failure: None,
        }
    }

    pub fn team_id(&self) -> &str {
        &self.team_id
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_count(&self) -> usize {
        self.image_list.len()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.image_list.get(self.current_index).map(PathBuf::as_path)
    }

    /// File name of the active image.
    pub fn current_display_name(&self) -> Option<String> {
        self.current_path()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().to_string())
    }

    /// `Image <n> of <total>: <name>` for the active image.
    pub fn status_line(&self) -> Option<String> {
        self.current_display_name().map(|name| {
            format!(
                "Image {} of {}: {}",
                self.current_index() + 1,
                self.total_count(),
                name
            )
        })
    }

    /// Why the active image could not be read, if it could not.
    pub fn load_failure(&self) -> Option<&str> {
        self.load_failure.as_deref()
    }

    pub fn surface(&self) -> &AnnotationSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut AnnotationSurface {
        &mut self.surface
    }

    /// Scan `dir` for images and load the first one.
    ///
    /// Labels of the image being left are saved first. When the directory
    /// holds no images the session is left as it was.
    pub fn open_directory(&mut self, dir: &Path) -> Result<usize> {
        let images = media::list_images(dir, &self.extensions)?;
        if images.is_empty() {
            log::warn!("No images found in {}", dir.display());
            return Err(LabelerError::EmptyDirectory {
                path: dir.to_path_buf(),
            });
        }

        self.save_current()?;

        log::info!("Opened {} with {} images", dir.display(), images.len());
        self.image_list = images;
        self.jump(0)?;
        Ok(self.image_list.len())
    }

    /// Make the image at `index` active without saving.
    pub fn jump(&mut self, index: usize) -> Result<()> {
        if index >= self.image_list.len() {
            return Err(LabelerError::IndexOutOfRange {
                index,
                len: self.image_list.len(),
            });
        }
        self.current_index = index;
        self.load_current();
        Ok(())
    }

    /// Save, then move to the next image.
    ///
    /// A failed save is returned and the session does not move.
    pub fn advance(&mut self) -> Result<Navigation> {
        self.save_current()?;

        if self.image_list.is_empty() {
            return Ok(Navigation::NoImages);
        }
        if self.current_index + 1 >= self.image_list.len() {
            log::info!("Reached the last image");
            return Ok(Navigation::AtEnd);
        }
        self.jump(self.current_index + 1)?;
        Ok(Navigation::Moved(self.current_index))
    }

    /// Save, then move to the previous image.
    pub fn retreat(&mut self) -> Result<Navigation> {
        self.save_current()?;

        if self.image_list.is_empty() {
            return Ok(Navigation::NoImages);
        }
        if self.current_index == 0 {
            return Ok(Navigation::AtStart);
        }
        self.jump(self.current_index - 1)?;
        Ok(Navigation::Moved(self.current_index))
    }

    /// Write the active labels beside the image.
    ///
    /// An empty store writes nothing, so an existing file is neither replaced
    /// nor deleted. Returns the written path.
    pub fn save_current(&self) -> Result<Option<PathBuf>> {
        let Some(image) = self.current_path() else {
            return Ok(None);
        };
        let store = self.surface.store();
        if store.is_empty() {
            return Ok(None);
        }

        let path = labels::label_path_for(image);
        labels::write_labels(&path, store)?;
        log::info!("Auto-saved: {}", path.display());
        Ok(Some(path))
    }

    /// Save the active labels, then export every labeled pair.
    pub fn export(&self, destination_root: &Path) -> Result<export::ExportReport> {
        if self.image_list.is_empty() {
            return Err(LabelerError::NothingToExport);
        }
        self.save_current()?;
        export::export_submission(&self.image_list, &self.team_id, destination_root)
    }

    /// Reset the surface for the image at `current_index`.
    ///
    /// An unreadable image leaves the zero extent in place so drawing on it
    /// is inert.
    fn load_current(&mut self) {
        let Some(path) = self.current_path().map(Path::to_path_buf) else {
            return;
        };
        match media::read_extent(&path) {
            Ok(extent) => {
                log::info!(
                    "Loaded {} ({}x{})",
                    path.display(),
                    extent.width,
                    extent.height
                );
                self.surface.reset(extent);
                self.load_failure = None;
            }
            Err(e) => {
                log::error!("{}", e);
                self.surface.reset(ImageExtent::default());
                self.load_failure = Some(e.to_string());
            }
        }
    }

    /// Drop the active extent after a late decode failure.
    pub fn mark_decode_failed(&mut self, message: String) {
        self.surface.set_extent(ImageExtent::default());
        self.load_failure = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::label::PixelPoint;
    use tempfile::TempDir;

    fn image_dir(names: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            image::RgbImage::new(100, 200)
                .save_with_format(dir.path().join(name), image::ImageFormat::Png)
                .unwrap();
        }
        dir
    }

    fn draw_box(session: &mut Session) {
        let surface = session.surface_mut();
        surface.press(PixelPoint::new(10.0, 20.0));
        surface.drag(PixelPoint::new(30.0, 60.0));
        surface.release();
    }

    #[test]
    fn test_open_directory_loads_first_image() {
        let dir = image_dir(&["b.png", "a.png"]);
        let mut session = Session::new("5");

        assert_eq!(session.open_directory(dir.path()).unwrap(), 2);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.current_display_name().as_deref(), Some("a.png"));
        assert_eq!(session.surface().extent(), ImageExtent::new(100, 200));
        assert_eq!(session.status_line().as_deref(), Some("Image 1 of 2: a.png"));
    }

    #[test]
    fn test_empty_directory_leaves_session_untouched() {
        let images = image_dir(&["a.png"]);
        let empty = tempfile::tempdir().unwrap();
        std::fs::write(empty.path().join("readme.txt"), "no images").unwrap();

        let mut session = Session::new("5");
        session.open_directory(images.path()).unwrap();

        let err = session.open_directory(empty.path()).unwrap_err();
        assert!(matches!(err, LabelerError::EmptyDirectory { .. }));
        assert_eq!(session.total_count(), 1);
        assert_eq!(session.current_display_name().as_deref(), Some("a.png"));
    }

    #[test]
    fn test_navigation_boundaries() {
        let dir = image_dir(&["a.png", "b.png"]);
        let mut session = Session::new("5");
        session.open_directory(dir.path()).unwrap();

        assert_eq!(session.retreat().unwrap(), Navigation::AtStart);
        assert_eq!(session.current_index(), 0);

        assert_eq!(session.advance().unwrap(), Navigation::Moved(1));
        assert_eq!(session.advance().unwrap(), Navigation::AtEnd);
        assert_eq!(session.current_index(), 1);

        assert_eq!(session.retreat().unwrap(), Navigation::Moved(0));
    }

    #[test]
    fn test_navigation_without_directory() {
        let mut session = Session::new("5");
        assert_eq!(session.advance().unwrap(), Navigation::NoImages);
        assert_eq!(session.retreat().unwrap(), Navigation::NoImages);
        assert_eq!(session.save_current().unwrap(), None);
    }

    #[test]
    fn test_advance_saves_and_resets() {
        let dir = image_dir(&["a.png", "b.png"]);
        let mut session = Session::new("5");
        session.open_directory(dir.path()).unwrap();
        draw_box(&mut session);

        session.advance().unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("a.txt")).unwrap(),
            "0 0.200000 0.200000 0.200000 0.200000\n"
        );
        assert!(session.surface().store().is_empty());
    }

    #[test]
    fn test_retreat_at_start_still_saves() {
        let dir = image_dir(&["a.png"]);
        let mut session = Session::new("5");
        session.open_directory(dir.path()).unwrap();
        draw_box(&mut session);

        assert_eq!(session.retreat().unwrap(), Navigation::AtStart);
        assert!(dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_empty_store_never_touches_label_file() {
        let dir = image_dir(&["a.png", "b.png"]);
        std::fs::write(dir.path().join("b.txt"), "curated\n").unwrap();

        let mut session = Session::new("5");
        session.open_directory(dir.path()).unwrap();
        session.advance().unwrap();
        session.retreat().unwrap();

        assert!(!dir.path().join("a.txt").exists());
        assert_eq!(std::fs::read_to_string(dir.path().join("b.txt")).unwrap(), "curated\n");
    }

    #[test]
    fn test_save_is_idempotent() {
        let dir = image_dir(&["a.png"]);
        let mut session = Session::new("5");
        session.open_directory(dir.path()).unwrap();
        draw_box(&mut session);

        let path = session.save_current().unwrap().unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        session.save_current().unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.lines().count(), 1);
    }

    #[test]
    fn test_revisit_overwrites_previous_labels() {
        let dir = image_dir(&["a.png", "b.png"]);
        let mut session = Session::new("5");
        session.open_directory(dir.path()).unwrap();
        draw_box(&mut session);
        draw_box(&mut session);
        session.advance().unwrap();
        session.retreat().unwrap();

        draw_box(&mut session);
        session.save_current().unwrap();
        let text = std::fs::read_to_string(dir.path().join("a.txt")).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_corrupt_image_is_inert() {
        let dir = image_dir(&["a.png"]);
        std::fs::write(dir.path().join("b.png"), b"garbage").unwrap();

        let mut session = Session::new("5");
        session.open_directory(dir.path()).unwrap();
        assert_eq!(session.advance().unwrap(), Navigation::Moved(1));
        assert!(session.load_failure().is_some());
        assert!(!session.surface().extent().is_loaded());

        draw_box(&mut session);
        assert!(session.surface().store().is_empty());
        assert_eq!(session.save_current().unwrap(), None);

        session.retreat().unwrap();
        assert!(session.load_failure().is_none());
    }

    #[test]
    fn test_jump_out_of_range() {
        let dir = image_dir(&["a.png"]);
        let mut session = Session::new("5");
        session.open_directory(dir.path()).unwrap();
        assert!(matches!(
            session.jump(3),
            Err(LabelerError::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_export_includes_unsaved_labels() {
        let dir = image_dir(&["a.png", "b.png", "c.png"]);
        let out = tempfile::tempdir().unwrap();
        let mut session = Session::new("5");
        session.open_directory(dir.path()).unwrap();
        draw_box(&mut session);
        session.advance().unwrap();
        session.advance().unwrap();
        draw_box(&mut session);

        let report = session.export(out.path()).unwrap();
        assert_eq!(report.exported, 2);
        assert_eq!(report.skipped, vec![1]);
        let submission = out.path().join("Team5_Submission");
        assert!(submission.join("images/team5_image0.png").exists());
        assert!(submission.join("labels/team5_image2.txt").exists());
    }

    #[test]
    fn test_export_without_images() {
        let out = tempfile::tempdir().unwrap();
        let session = Session::new("5");
        assert!(matches!(
            session.export(out.path()),
            Err(LabelerError::NothingToExport)
        ));
    }

    #[test]
    fn test_custom_extension_list() {
        let dir = image_dir(&["a.png"]);
        std::fs::copy(dir.path().join("a.png"), dir.path().join("b.webp")).unwrap();
        let mut session = Session::with_extensions("5", vec!["webp".to_string()]);
        assert_eq!(session.open_directory(dir.path()).unwrap(), 1);
        assert_eq!(session.current_display_name().as_deref(), Some("b.webp"));
    }
}
