// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Result export — PNG per stored image, `features.json` for the SIFT record,
// and a manifest of what was written for the report step to consume.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use cvtoolbox_core::error::ToolboxError;
use cvtoolbox_core::{FEATURES_FILE_NAME, FeatureRecord, ResultKey};
use tracing::{debug, info, instrument};

use crate::vision::store::{ResultStore, ResultValue};

/// One PNG written by the export step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub key: ResultKey,
    pub path: PathBuf,
}

/// The JSON feature file written by the export step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFeatures {
    pub path: PathBuf,
    pub num_keypoints: usize,
}

/// Artifacts present in an output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportManifest {
    directory: PathBuf,
    images: Vec<ExportedImage>,
    features: Option<ExportedFeatures>,
}

impl ExportManifest {
    fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            images: Vec::new(),
            features: None,
        }
    }

    /// Rebuild a manifest from a directory written by an earlier export.
    ///
    /// Picks up `<key>.png` for each report key that exists and parses
    /// `features.json` when present.
    #[instrument(skip_all, fields(dir = %directory.as_ref().display()))]
    pub fn scan(directory: impl AsRef<Path>) -> Result<Self, ToolboxError> {
        let directory = directory.as_ref();
        let mut manifest = Self::new(directory.to_path_buf());

        for key in ResultKey::REPORT_ORDER {
            let path = directory.join(key.png_file_name());
            if path.is_file() {
                manifest.images.push(ExportedImage { key, path });
            }
        }

        let features_path = directory.join(FEATURES_FILE_NAME);
        if features_path.is_file() {
            let reader = BufReader::new(File::open(&features_path)?);
            let record: FeatureRecord = serde_json::from_reader(reader)?;
            manifest.features = Some(ExportedFeatures {
                path: features_path,
                num_keypoints: record.num_keypoints(),
            });
        }

        debug!(
            images = manifest.images.len(),
            has_features = manifest.features.is_some(),
            "Scanned output directory"
        );
        Ok(manifest)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Written PNGs, in the order they were exported.
    pub fn images(&self) -> &[ExportedImage] {
        &self.images
    }

    pub fn image_path(&self, key: ResultKey) -> Option<&Path> {
        self.images
            .iter()
            .find(|img| img.key == key)
            .map(|img| img.path.as_path())
    }

    pub fn features(&self) -> Option<&ExportedFeatures> {
        self.features.as_ref()
    }

    /// Number of files the manifest refers to.
    pub fn file_count(&self) -> usize {
        self.images.len() + usize::from(self.features.is_some())
    }
}

/// Write every image in `store` as `<key>.png` and the feature record, if
/// any, as pretty-printed `features.json`. Creates `directory` if needed.
///
/// Writes are not atomic; a failure part-way leaves earlier files in place.
#[instrument(skip(store, directory), fields(dir = %directory.as_ref().display(), entries = store.len()))]
pub fn export_results(
    store: &ResultStore,
    directory: impl AsRef<Path>,
) -> Result<ExportManifest, ToolboxError> {
    let directory = directory.as_ref();
    std::fs::create_dir_all(directory)?;

    let mut manifest = ExportManifest::new(directory.to_path_buf());
    let mut record: Option<&FeatureRecord> = None;

    for (key, value) in store.iter() {
        match value {
            ResultValue::Image(buffer) => {
                let path = directory.join(key.png_file_name());
                buffer.save_png(&path)?;
                info!(
                    key = %key,
                    channels = buffer.channels(),
                    path = %path.display(),
                    "Saved image"
                );
                manifest.images.push(ExportedImage { key, path });
            }
            ResultValue::Features(features) => record = Some(features),
        }
    }

    if let Some(record) = record {
        let path = directory.join(FEATURES_FILE_NAME);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, record)?;
        writer.flush()?;
        info!(
            keypoints = record.num_keypoints(),
            path = %path.display(),
            "Saved JSON"
        );
        manifest.features = Some(ExportedFeatures {
            path,
            num_keypoints: record.num_keypoints(),
        });
    }

    Ok(manifest)
}
