// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the CV Toolbox.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all toolbox operations.
#[derive(Debug, Error)]
pub enum ToolboxError {
    // -- Input --
    #[error("image not found at {}: {reason}", path.display())]
    ImageNotFound { path: PathBuf, reason: String },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    // -- Processing / output --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("feature record is inconsistent: {0}")]
    FeatureRecord(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Storage --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ToolboxError>;
