// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file discovery and loading.
//!
//! This module finds image files in a directory, reads their pixel
//! dimensions, and decodes them into RGBA buffers for display in egui.

use crate::error::{LabelerError, Result};
use crate::models::label::ImageExtent;
use std::path::{Path, PathBuf};

/// Extensions accepted when scanning a directory.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp"];

/// Decoded image ready to be uploaded as a texture.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Case-insensitive extension check against the allow-list.
pub fn has_image_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// List image files directly inside `dir`, sorted by full path.
pub fn list_images(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| LabelerError::io(dir, e))?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LabelerError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && has_image_extension(&path, extensions) {
            images.push(path);
        }
    }

    images.sort();
    Ok(images)
}

/// Read pixel dimensions without decoding the whole image.
pub fn read_extent(path: &Path) -> Result<ImageExtent> {
    let reader = image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| LabelerError::io(path, e))?;
    let (width, height) = reader.into_dimensions().map_err(|e| LabelerError::Decode {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(ImageExtent::new(width, height))
}

/// Decode an image into RGBA8 pixels.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path).map_err(|e| LabelerError::Decode {
        path: path.to_path_buf(),
        source: e,
    })?;
    let rgba = img.to_rgba8();
    Ok(LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_extensions() -> Vec<String> {
        DEFAULT_IMAGE_EXTENSIONS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extension_match_ignores_case() {
        let exts = default_extensions();
        assert!(has_image_extension(Path::new("a/B.JPG"), &exts));
        assert!(has_image_extension(Path::new("c.Png"), &exts));
        assert!(!has_image_extension(Path::new("c.txt"), &exts));
        assert!(!has_image_extension(Path::new("noext"), &exts));
    }

    #[test]
    fn test_list_images_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.JPG", "notes.txt", "c.bmp"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("folder.png")).unwrap();

        let images = list_images(dir.path(), &default_extensions()).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.png", "c.bmp"]);
    }

    #[test]
    fn test_read_extent_of_real_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.png");
        image::RgbImage::new(100, 200).save(&path).unwrap();

        assert_eq!(read_extent(&path).unwrap(), ImageExtent::new(100, 200));
        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.pixels.len(), 100 * 200 * 4);
    }

    #[test]
    fn test_read_extent_of_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(read_extent(&path).is_err());
        assert!(matches!(load_image(&path), Err(LabelerError::Decode { .. })));
    }
}
