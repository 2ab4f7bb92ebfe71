// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages printed by the command-line tool when a run
// fails.

use crate::error::ToolboxError;

/// A plain-English error with an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary.
    pub message: String,
    /// What the user should try next.
    pub suggestion: String,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.message, self.suggestion)
    }
}

/// Convert a `ToolboxError` into a `HumanError`.
pub fn humanize_error(err: &ToolboxError) -> HumanError {
    match err {
        ToolboxError::ImageNotFound { path, reason } => HumanError {
            message: format!("Image not found at {}.", path.display()),
            suggestion: format!(
                "Check that the file exists and is a readable JPEG or PNG. ({reason})"
            ),
        },

        ToolboxError::InvalidParameter(detail) => HumanError {
            message: "A processing parameter is out of range.".into(),
            suggestion: format!("Use a positive, odd blur kernel size. ({detail})"),
        },

        ToolboxError::ImageError(detail) => HumanError {
            message: "An image could not be processed or saved.".into(),
            suggestion: format!("Check the output directory is writable. ({detail})"),
        },

        ToolboxError::FeatureRecord(detail) => HumanError {
            message: "The keypoint data is inconsistent.".into(),
            suggestion: format!(
                "Delete features.json and run the pipeline again to regenerate it. ({detail})"
            ),
        },

        ToolboxError::PdfError(detail) => HumanError {
            message: "The PDF report could not be created.".into(),
            suggestion: format!("Run the export step first so the images exist. ({detail})"),
        },

        ToolboxError::Io(io_err) => humanize_io_error(io_err),

        ToolboxError::Serialization(detail) => HumanError {
            message: "Feature data could not be read or written as JSON.".into(),
            suggestion: format!("Check that features.json is not corrupted. ({detail})"),
        },
    }
}

fn humanize_io_error(err: &std::io::Error) -> HumanError {
    match err.kind() {
        std::io::ErrorKind::PermissionDenied => HumanError {
            message: "Permission denied while writing results.".into(),
            suggestion: "Choose an output directory you are allowed to write to.".into(),
        },
        std::io::ErrorKind::NotFound => HumanError {
            message: "A file or directory is missing.".into(),
            suggestion: format!("Check the input and output paths. ({err})"),
        },
        _ => HumanError {
            message: "A file operation failed.".into(),
            suggestion: format!("Check free disk space and try again. ({err})"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_image_names_the_path() {
        let err = ToolboxError::ImageNotFound {
            path: PathBuf::from("data/missing.jpg"),
            reason: "No such file or directory".into(),
        };
        let human = humanize_error(&err);
        assert!(human.message.contains("data/missing.jpg"));
        assert!(human.suggestion.contains("No such file"));
    }

    #[test]
    fn permission_denied_gets_specific_advice() {
        let err = ToolboxError::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        let human = humanize_error(&err);
        assert!(human.message.starts_with("Permission denied"));
    }

    #[test]
    fn display_joins_message_and_suggestion() {
        let human = humanize_error(&ToolboxError::InvalidParameter("kernel size 0".into()));
        let text = human.to_string();
        assert!(text.contains("out of range"));
        assert!(text.contains("kernel size 0"));
    }
}
