// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-image label collection.
//!
//! The store is append-only: records are added one per finished gesture and
//! only ever dropped all at once when the active image changes.

use super::label::LabelRecord;
use crate::error::{LabelerError, Result};

/// Ordered label records for exactly one image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelStore {
    records: Vec<LabelRecord>,
}

impl LabelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record at the end.
    pub fn append(&mut self, record: LabelRecord) {
        self.records.push(record);
    }

    /// Drop all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[LabelRecord] {
        &self.records
    }

    /// One text line per record, in insertion order.
    pub fn serialize(&self) -> Vec<String> {
        self.records.iter().map(ToString::to_string).collect()
    }

    /// Full label file contents, each line newline-terminated.
    pub fn to_text(&self) -> String {
        self.serialize()
            .into_iter()
            .map(|line| line + "\n")
            .collect()
    }

    /// Parse label file contents. Blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut store = Self::new();
        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let record = parse_record(trimmed).ok_or_else(|| LabelerError::MalformedLabel {
                line: idx + 1,
                content: trimmed.to_string(),
            })?;
            store.append(record);
        }
        Ok(store)
    }
}

fn parse_record(line: &str) -> Option<LabelRecord> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [class_id, cx, cy, w, h] = tokens.as_slice() else {
        return None;
    };
    Some(LabelRecord {
        class_id: class_id.parse().ok()?,
        center_x: cx.parse().ok()?,
        center_y: cy.parse().ok()?,
        width: w.parse().ok()?,
        height: h.parse().ok()?,
    })
}
