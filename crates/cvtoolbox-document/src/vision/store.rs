// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Insertion-ordered store of operation results.

use cvtoolbox_core::{FeatureRecord, ResultKey};

use super::buffer::ImageBuffer;

/// Output of one operation: an image or a feature record.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultValue {
    Image(ImageBuffer),
    Features(FeatureRecord),
}

/// Results keyed by operation name, kept in first-insertion order.
///
/// Storing under an existing key replaces the value but keeps the key's
/// original position. Nothing is ever removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultStore {
    entries: Vec<(ResultKey, ResultValue)>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ResultKey, value: ResultValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: ResultKey) -> Option<&ResultValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    /// The image stored under `key`, if any.
    pub fn image(&self, key: ResultKey) -> Option<&ImageBuffer> {
        match self.get(key) {
            Some(ResultValue::Image(buffer)) => Some(buffer),
            _ => None,
        }
    }

    /// The SIFT feature record, if detection has run.
    pub fn features(&self) -> Option<&FeatureRecord> {
        match self.get(ResultKey::SiftFeatures) {
            Some(ResultValue::Features(record)) => Some(record),
            _ => None,
        }
    }

    pub fn contains(&self, key: ResultKey) -> bool {
        self.get(key).is_some()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = ResultKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResultKey, &ResultValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
