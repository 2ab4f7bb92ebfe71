// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Result aggregator — holds one decoded image, runs the vision operations on
// it and accumulates their outputs for export and reporting.

use std::path::Path;

use cvtoolbox_core::error::ToolboxError;
use cvtoolbox_core::ResultKey;
use image::{DynamicImage, GrayImage, RgbImage};
use tracing::{debug, info, instrument};

use super::buffer::ImageBuffer;
use super::features;
use super::ops;
use super::store::{ResultStore, ResultValue};
use crate::export::{self, ExportManifest};
use crate::pdf::report::Report;
use crate::pdf::writer::PdfWriter;

/// Runs grayscale, blur, edge and feature operations on a single image.
///
/// The source image is never modified. Grayscale is computed at most once,
/// on the first call to [`ResultAggregator::to_gray`] or to an operation that
/// needs it, and reused afterwards.
///
/// ```ignore
/// let mut toolbox = ResultAggregator::load("data/photo.jpg")?;
/// toolbox.blur(5)?;
/// toolbox.edges(100.0, 200.0);
/// toolbox.detect_features()?;
/// let manifest = toolbox.export_results("outputs")?;
/// toolbox.generate_report(&manifest, &PdfWriter::a4(), "outputs/report.pdf")?;
/// ```
pub struct ResultAggregator {
    image: RgbImage,
    gray: Option<GrayImage>,
    results: ResultStore,
}

impl ResultAggregator {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ToolboxError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|err| ToolboxError::ImageNotFound {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self::from_dynamic(img))
    }

    /// Wrap an already-decoded image. Any alpha channel is dropped.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            image: image.to_rgb8(),
            gray: None,
            results: ResultStore::new(),
        }
    }

    // -- Accessors ------------------------------------------------------------

    /// The source image, as loaded.
    pub fn source(&self) -> &RgbImage {
        &self.image
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    pub fn into_results(self) -> ResultStore {
        self.results
    }

    // -- Operations -----------------------------------------------------------

    /// Grayscale version of the source, stored under `gray`.
    ///
    /// Computed on the first call only; later calls return the cached image.
    pub fn to_gray(&mut self) -> &GrayImage {
        let Self {
            image,
            gray,
            results,
        } = self;
        gray.get_or_insert_with(|| {
            let computed = ops::grayscale(image);
            results.insert(
                ResultKey::Gray,
                ResultValue::Image(ImageBuffer::Gray(computed.clone())),
            );
            computed
        })
    }

    /// Gaussian-blur the colour source, stored under `gaussian_blur`.
    ///
    /// See [`ops::gaussian_blur`] for how even kernel sizes behave.
    pub fn blur(&mut self, kernel_size: u32) -> Result<(), ToolboxError> {
        let blurred = ops::gaussian_blur(&self.image, kernel_size)?;
        self.results.insert(
            ResultKey::GaussianBlur,
            ResultValue::Image(ImageBuffer::Color(blurred)),
        );
        Ok(())
    }

    /// Canny edges of the grayscale image, stored under `canny`.
    pub fn edges(&mut self, low: f32, high: f32) {
        let edges = ops::canny_edges(self.to_gray(), low, high);
        self.results
            .insert(ResultKey::Canny, ResultValue::Image(ImageBuffer::Gray(edges)));
    }

    /// SIFT keypoints of the grayscale image.
    ///
    /// Stores the annotated image under `sift_image` and the feature record
    /// under `sift_features`. Finding no keypoints is not an error.
    pub fn detect_features(&mut self) -> Result<(), ToolboxError> {
        let gray = self.to_gray();
        let record = features::detect_and_describe(gray)?;
        let annotated = features::draw_rich_keypoints(gray, record.keypoints());
        debug!(keypoints = record.num_keypoints(), "Storing SIFT results");

        self.results.insert(
            ResultKey::SiftImage,
            ResultValue::Image(ImageBuffer::Color(annotated)),
        );
        self.results
            .insert(ResultKey::SiftFeatures, ResultValue::Features(record));
        Ok(())
    }

    // -- Output ---------------------------------------------------------------

    /// Write every stored image and the feature record into `directory`.
    pub fn export_results(
        &self,
        directory: impl AsRef<Path>,
    ) -> Result<ExportManifest, ToolboxError> {
        export::export_results(&self.results, directory)
    }

    /// Render the images listed in `manifest` into a PDF at `output_path`.
    pub fn generate_report(
        &self,
        manifest: &ExportManifest,
        writer: &PdfWriter,
        output_path: impl AsRef<Path>,
    ) -> Result<(), ToolboxError> {
        let report = Report::from_manifest(writer.title(), manifest)?;
        writer.write_report_to_file(&report, output_path)
    }
}
