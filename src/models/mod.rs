// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Labeling data model: labels, the drawing state machine, and the session.

pub mod drawing;
pub mod label;
pub mod label_store;
pub mod session;
