// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for images, label files, and submission export.

pub mod export;
pub mod labels;
pub mod media;
