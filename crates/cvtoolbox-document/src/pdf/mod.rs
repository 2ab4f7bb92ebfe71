// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — report content and rendering.

pub mod report;
pub mod writer;

pub use report::{Report, ReportSection};
pub use writer::PdfWriter;
