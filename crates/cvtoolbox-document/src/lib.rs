// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// cvtoolbox-document — image operations, result export and PDF reporting for
// the CV Toolbox.
//
// Provides the result aggregator (grayscale, Gaussian blur, Canny edges, SIFT
// features), PNG/JSON export of its results, and a PDF report built from the
// exported images.

pub mod export;
pub mod pdf;
pub mod vision;

// Re-export the primary structs so callers can use `cvtoolbox_document::ResultAggregator` etc.
pub use export::{ExportManifest, export_results};
pub use pdf::report::Report;
pub use pdf::writer::PdfWriter;
pub use vision::aggregator::ResultAggregator;
pub use vision::buffer::ImageBuffer;
pub use vision::store::{ResultStore, ResultValue};
