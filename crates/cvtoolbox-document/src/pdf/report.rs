// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report content — which images go into the PDF, in what order, with what
// labels, plus the summary lines.

use cvtoolbox_core::error::ToolboxError;
use cvtoolbox_core::ResultKey;
use image::RgbImage;
use tracing::{debug, instrument};

use crate::export::ExportManifest;

/// One labelled image in the report.
#[derive(Debug, Clone)]
pub struct ReportSection {
    pub key: ResultKey,
    pub label: String,
    pub image: RgbImage,
}

/// Everything the PDF writer lays out: a title, image sections and summary
/// text.
#[derive(Debug, Clone)]
pub struct Report {
    title: String,
    sections: Vec<ReportSection>,
    summary: Vec<String>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
            summary: Vec::new(),
        }
    }

    /// Build the report from exported artifacts.
    ///
    /// Sections follow the fixed order gray, gaussian_blur, canny,
    /// sift_image; a key is skipped when its PNG is not in the manifest or
    /// no longer exists on disk. A keypoint count line is added when the
    /// manifest carries a feature file.
    #[instrument(skip(manifest), fields(dir = %manifest.directory().display()))]
    pub fn from_manifest(title: &str, manifest: &ExportManifest) -> Result<Self, ToolboxError> {
        let mut report = Self::new(title);

        for key in ResultKey::REPORT_ORDER {
            let Some(path) = manifest.image_path(key) else {
                continue;
            };
            if !path.is_file() {
                debug!(key = %key, "PNG missing on disk, section skipped");
                continue;
            }
            let image = image::open(path)
                .map_err(|err| {
                    ToolboxError::ImageError(format!(
                        "failed to read {} for report: {}",
                        path.display(),
                        err
                    ))
                })?
                .to_rgb8();
            report.push_section(key, image);
        }

        if let Some(features) = manifest.features() {
            report.push_summary(format!("Number of Keypoints: {}", features.num_keypoints));
        }

        debug!(
            sections = report.sections.len(),
            summary_lines = report.summary.len(),
            "Report assembled"
        );
        Ok(report)
    }

    /// Append a section labelled `Result: <key>`.
    pub fn push_section(&mut self, key: ResultKey, image: RgbImage) {
        self.sections.push(ReportSection {
            key,
            label: format!("Result: {key}"),
            image,
        });
    }

    pub fn push_summary(&mut self, line: impl Into<String>) {
        self.summary.push(line.into());
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn summary(&self) -> &[String] {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::export_results;
    use crate::vision::buffer::ImageBuffer;
    use crate::vision::store::{ResultStore, ResultValue};
    use cvtoolbox_core::FeatureRecord;
    use image::{GrayImage, Luma, Rgb};

    fn full_store() -> ResultStore {
        let gray = || ImageBuffer::Gray(GrayImage::from_pixel(40, 30, Luma([80])));
        let color = || ImageBuffer::Color(RgbImage::from_pixel(40, 30, Rgb([80, 20, 10])));
        let mut store = ResultStore::new();
        // Deliberately not in report order.
        store.insert(ResultKey::SiftImage, ResultValue::Image(color()));
        store.insert(ResultKey::Canny, ResultValue::Image(gray()));
        store.insert(ResultKey::Gray, ResultValue::Image(gray()));
        store.insert(ResultKey::GaussianBlur, ResultValue::Image(color()));
        store.insert(
            ResultKey::SiftFeatures,
            ResultValue::Features(FeatureRecord::empty()),
        );
        store
    }

    #[test]
    fn sections_follow_fixed_order() {
        let tmp = tempfile::tempdir().unwrap();
        export_results(&full_store(), tmp.path()).unwrap();
        let manifest = ExportManifest::scan(tmp.path()).unwrap();

        let report = Report::from_manifest("CV Toolbox Report", &manifest).unwrap();
        let labels: Vec<_> = report.sections().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Result: gray",
                "Result: gaussian_blur",
                "Result: canny",
                "Result: sift_image"
            ]
        );
        assert_eq!(report.summary(), ["Number of Keypoints: 0"]);
        assert_eq!(report.title(), "CV Toolbox Report");
    }

    #[test]
    fn missing_png_is_omitted() {
        let tmp = tempfile::tempdir().unwrap();
        let manifest = export_results(&full_store(), tmp.path()).unwrap();
        std::fs::remove_file(tmp.path().join("canny.png")).unwrap();

        let report = Report::from_manifest("CV Toolbox Report", &manifest).unwrap();
        let keys: Vec<_> = report.sections().iter().map(|s| s.key).collect();
        assert_eq!(
            keys,
            vec![ResultKey::Gray, ResultKey::GaussianBlur, ResultKey::SiftImage]
        );
    }

    #[test]
    fn no_features_means_no_summary() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = ResultStore::new();
        store.insert(
            ResultKey::Gray,
            ResultValue::Image(ImageBuffer::Gray(GrayImage::new(4, 4))),
        );
        let manifest = export_results(&store, tmp.path()).unwrap();

        let report = Report::from_manifest("t", &manifest).unwrap();
        assert_eq!(report.sections().len(), 1);
        assert!(report.summary().is_empty());
    }
}
