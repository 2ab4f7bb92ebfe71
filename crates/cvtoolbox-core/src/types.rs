// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the CV Toolbox.

use serde::{Deserialize, Serialize};

use crate::error::ToolboxError;

/// Name under which an operation stores its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKey {
    Gray,
    GaussianBlur,
    Canny,
    SiftImage,
    SiftFeatures,
}

impl ResultKey {
    /// Image keys in the order they appear in the report.
    pub const REPORT_ORDER: [ResultKey; 4] = [
        ResultKey::Gray,
        ResultKey::GaussianBlur,
        ResultKey::Canny,
        ResultKey::SiftImage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::GaussianBlur => "gaussian_blur",
            Self::Canny => "canny",
            Self::SiftImage => "sift_image",
            Self::SiftFeatures => "sift_features",
        }
    }

    /// File name of the PNG written for this key, e.g. `canny.png`.
    pub fn png_file_name(&self) -> String {
        format!("{}.png", self.as_str())
    }
}

impl std::fmt::Display for ResultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File name of the exported feature record.
pub const FEATURES_FILE_NAME: &str = "features.json";

/// Position, scale and orientation of one detected keypoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyPointRecord {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Orientation in degrees.
    pub angle: f32,
}

/// Keypoints and their descriptor vectors, as written to `features.json`.
///
/// `keypoints`, `descriptors` and `num_keypoints` always agree in length;
/// both construction and deserialization reject records that do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FeatureRecordRepr")]
pub struct FeatureRecord {
    num_keypoints: usize,
    keypoints: Vec<KeyPointRecord>,
    descriptors: Vec<Vec<f32>>,
}

#[derive(Deserialize)]
struct FeatureRecordRepr {
    num_keypoints: usize,
    keypoints: Vec<KeyPointRecord>,
    descriptors: Vec<Vec<f32>>,
}

impl TryFrom<FeatureRecordRepr> for FeatureRecord {
    type Error = ToolboxError;

    fn try_from(repr: FeatureRecordRepr) -> Result<Self, Self::Error> {
        let record = Self::new(repr.keypoints, repr.descriptors)?;
        if record.num_keypoints != repr.num_keypoints {
            return Err(ToolboxError::FeatureRecord(format!(
                "num_keypoints is {} but {} keypoints are listed",
                repr.num_keypoints, record.num_keypoints
            )));
        }
        Ok(record)
    }
}

impl FeatureRecord {
    /// Build a record, checking that there is exactly one descriptor per
    /// keypoint and that all descriptors share one length.
    pub fn new(
        keypoints: Vec<KeyPointRecord>,
        descriptors: Vec<Vec<f32>>,
    ) -> Result<Self, ToolboxError> {
        if keypoints.len() != descriptors.len() {
            return Err(ToolboxError::FeatureRecord(format!(
                "{} keypoints but {} descriptors",
                keypoints.len(),
                descriptors.len()
            )));
        }
        if let Some(first) = descriptors.first() {
            if let Some(odd) = descriptors.iter().find(|d| d.len() != first.len()) {
                return Err(ToolboxError::FeatureRecord(format!(
                    "descriptor lengths differ ({} vs {})",
                    first.len(),
                    odd.len()
                )));
            }
        }
        Ok(Self {
            num_keypoints: keypoints.len(),
            keypoints,
            descriptors,
        })
    }

    /// A record with no keypoints.
    pub fn empty() -> Self {
        Self {
            num_keypoints: 0,
            keypoints: Vec::new(),
            descriptors: Vec::new(),
        }
    }

    pub fn num_keypoints(&self) -> usize {
        self.num_keypoints
    }

    pub fn keypoints(&self) -> &[KeyPointRecord] {
        &self.keypoints
    }

    pub fn descriptors(&self) -> &[Vec<f32>] {
        &self.descriptors
    }

    pub fn is_empty(&self) -> bool {
        self.num_keypoints == 0
    }
}

/// Standard paper sizes for the PDF report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}
