// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline configuration. The binary runs with the defaults; there are no
// flags or config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default Gaussian blur kernel size (5x5).
pub const DEFAULT_BLUR_KERNEL_SIZE: u32 = 5;
/// Default Canny hysteresis thresholds (low, high).
pub const DEFAULT_CANNY_THRESHOLDS: (f32, f32) = (100.0, 200.0);

/// Fixed settings for one toolbox run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolboxConfig {
    /// Image to process.
    pub input_path: PathBuf,
    /// Directory receiving the PNG, JSON and PDF outputs.
    pub output_dir: PathBuf,
    /// File name of the PDF report inside `output_dir`.
    pub report_file: String,
    /// Gaussian blur kernel width/height in pixels (odd).
    pub blur_kernel_size: u32,
    /// Canny lower hysteresis threshold.
    pub canny_low: f32,
    /// Canny upper hysteresis threshold.
    pub canny_high: f32,
    /// Page size of the PDF report.
    pub paper_size: crate::PaperSize,
    /// Heading printed at the top of the report.
    pub report_title: String,
}

impl ToolboxConfig {
    /// Full path of the PDF report.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file)
    }
}

impl Default for ToolboxConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/000000000139.jpg"),
            output_dir: PathBuf::from("outputs"),
            report_file: "report.pdf".into(),
            blur_kernel_size: DEFAULT_BLUR_KERNEL_SIZE,
            canny_low: DEFAULT_CANNY_THRESHOLDS.0,
            canny_high: DEFAULT_CANNY_THRESHOLDS.1,
            paper_size: crate::PaperSize::A4,
            report_title: "CV Toolbox Report".into(),
        }
    }
}
