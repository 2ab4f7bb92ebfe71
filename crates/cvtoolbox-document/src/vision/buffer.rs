// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel buffers produced by the vision operations.

use std::path::Path;

use cvtoolbox_core::error::ToolboxError;
use image::{GrayImage, ImageFormat, RgbImage};

/// A single-channel or three-channel 8-bit image.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageBuffer {
    /// height x width, one channel (grayscale, edge maps).
    Gray(GrayImage),
    /// height x width x 3, RGB order (blur, annotated keypoints).
    Color(RgbImage),
}

impl ImageBuffer {
    pub fn width(&self) -> u32 {
        match self {
            Self::Gray(img) => img.width(),
            Self::Color(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Gray(img) => img.height(),
            Self::Color(img) => img.height(),
        }
    }

    /// Number of channels per pixel.
    pub fn channels(&self) -> u8 {
        match self {
            Self::Gray(_) => 1,
            Self::Color(_) => 3,
        }
    }

    /// Write the buffer as a PNG file.
    ///
    /// Colour buffers are already RGB, which is what the PNG encoder expects,
    /// so they are written without any channel reordering.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), ToolboxError> {
        let path = path.as_ref();
        let written = match self {
            Self::Gray(img) => img.save_with_format(path, ImageFormat::Png),
            Self::Color(img) => img.save_with_format(path, ImageFormat::Png),
        };
        written.map_err(|err| {
            ToolboxError::ImageError(format!(
                "failed to save image to {}: {}",
                path.display(),
                err
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Luma, Rgb};

    #[test]
    fn channel_counts() {
        let gray = ImageBuffer::Gray(GrayImage::from_pixel(4, 3, Luma([7])));
        let color = ImageBuffer::Color(RgbImage::from_pixel(4, 3, Rgb([1, 2, 3])));
        assert_eq!(gray.channels(), 1);
        assert_eq!(color.channels(), 3);
        assert_eq!((color.width(), color.height()), (4, 3));
    }

    #[test]
    fn colour_png_keeps_channel_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("color.png");
        let buffer = ImageBuffer::Color(RgbImage::from_pixel(2, 2, Rgb([200, 10, 30])));
        buffer.save_png(&path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(reloaded.get_pixel(1, 1), &Rgb([200, 10, 30]));
    }

    #[test]
    fn gray_png_stays_single_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        ImageBuffer::Gray(GrayImage::from_pixel(3, 3, Luma([90])))
            .save_png(&path)
            .unwrap();

        let reloaded = image::open(&path).unwrap();
        assert!(matches!(reloaded, DynamicImage::ImageLuma8(_)));
    }
}
