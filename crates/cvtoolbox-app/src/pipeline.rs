// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The fixed pipeline: load, grayscale, blur, Canny, SIFT, export, report.

use std::path::PathBuf;

use cvtoolbox_core::ToolboxConfig;
use cvtoolbox_core::error::Result;
use cvtoolbox_document::{PdfWriter, ResultAggregator};
use tracing::{info, instrument};

/// Files written by one run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub images: Vec<PathBuf>,
    pub features: Option<PathBuf>,
    pub report: PathBuf,
    pub num_keypoints: usize,
}

impl RunSummary {
    /// Completion messages, one per written file.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .images
            .iter()
            .map(|path| format!("Saved image: {}", path.display()))
            .collect();
        if let Some(path) = &self.features {
            lines.push(format!("Saved JSON: {}", path.display()));
        }
        lines.push(format!("Saved PDF report: {}", self.report.display()));
        lines
    }
}

#[instrument(skip_all, fields(input = %config.input_path.display()))]
pub fn run(config: &ToolboxConfig) -> Result<RunSummary> {
    let mut toolbox = ResultAggregator::load(&config.input_path)?;

    toolbox.to_gray();
    toolbox.blur(config.blur_kernel_size)?;
    toolbox.edges(config.canny_low, config.canny_high);
    toolbox.detect_features()?;

    let manifest = toolbox.export_results(&config.output_dir)?;

    let mut writer = PdfWriter::new(config.paper_size);
    writer.set_title(config.report_title.clone());
    let report_path = config.report_path();
    toolbox.generate_report(&manifest, &writer, &report_path)?;

    let summary = RunSummary {
        images: manifest.images().iter().map(|img| img.path.clone()).collect(),
        features: manifest.features().map(|f| f.path.clone()),
        report: report_path,
        num_keypoints: manifest.features().map_or(0, |f| f.num_keypoints),
    };
    info!(
        images = summary.images.len(),
        keypoints = summary.num_keypoints,
        "Pipeline complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvtoolbox_core::error::ToolboxError;
    use image::{Rgb, RgbImage};

    fn config_in(dir: &std::path::Path) -> ToolboxConfig {
        ToolboxConfig {
            input_path: dir.join("input.png"),
            output_dir: dir.join("outputs"),
            ..ToolboxConfig::default()
        }
    }

    #[test]
    fn full_run_writes_every_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let mut img = RgbImage::from_pixel(96, 72, Rgb([25, 30, 35]));
        for y in 20..50 {
            for x in 30..70 {
                img.put_pixel(x, y, Rgb([230, 220, 210]));
            }
        }
        let config = config_in(tmp.path());
        img.save(&config.input_path).unwrap();

        let summary = run(&config).unwrap();

        let out = &config.output_dir;
        for name in [
            "gray.png",
            "gaussian_blur.png",
            "canny.png",
            "sift_image.png",
            "features.json",
            "report.pdf",
        ] {
            assert!(out.join(name).is_file(), "{name} missing");
        }
        assert_eq!(summary.images.len(), 4);
        assert_eq!(summary.report, out.join("report.pdf"));
        assert_eq!(
            summary.lines().last().map(String::as_str),
            Some(format!("Saved PDF report: {}", out.join("report.pdf").display()).as_str())
        );
    }

    #[test]
    fn missing_input_fails_without_output() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path());

        let err = run(&config).unwrap_err();
        assert!(matches!(err, ToolboxError::ImageNotFound { .. }));
        assert!(!config.output_dir.exists());
    }
}
