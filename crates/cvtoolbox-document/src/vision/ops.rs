// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image operations — grayscale conversion, Gaussian blur and Canny edge
// detection. Each one is a thin call into the `image` and `imageproc` crates.

use cvtoolbox_core::error::ToolboxError;
use image::{GrayImage, RgbImage};
use imageproc::edges::canny;
use imageproc::filter::separable_filter_equal;
use tracing::{debug, info, instrument};

/// Convert an RGB image to single-channel luma.
///
/// Uses the `image` crate's Rec. 709 weights (0.2126, 0.7152, 0.0722), not
/// the Rec. 601 weights (0.299, 0.587, 0.114) of OpenCV's `BGR2GRAY`, so
/// gray values and the Canny and SIFT results built on them differ slightly
/// from an OpenCV run.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn grayscale(image: &RgbImage) -> GrayImage {
    info!("Converting to grayscale");
    image::imageops::grayscale(image)
}

/// 1-D Gaussian weights for a `size`-tap kernel, summing to one.
///
/// Sizes 1, 3, 5 and 7 use the fixed binomial tables; larger sizes derive
/// sigma from the size as `0.3 * ((size - 1) * 0.5 - 1) + 0.8`.
pub fn gaussian_kernel(size: u32) -> Vec<f32> {
    match size {
        1 => vec![1.0],
        3 => vec![0.25, 0.5, 0.25],
        5 => vec![0.0625, 0.25, 0.375, 0.25, 0.0625],
        7 => vec![
            0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
        ],
        _ => {
            let sigma = 0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
            let scale = -0.5 / (sigma * sigma);
            let centre = (size as f64 - 1.0) * 0.5;
            let weights: Vec<f64> = (0..size)
                .map(|i| {
                    let x = i as f64 - centre;
                    (scale * x * x).exp()
                })
                .collect();
            let sum: f64 = weights.iter().sum();
            weights.into_iter().map(|w| (w / sum) as f32).collect()
        }
    }
}

/// Smooth an RGB image with a `kernel_size` x `kernel_size` Gaussian.
///
/// The kernel size should be odd. Parity is not checked: an even size still
/// produces a normalised kernel, but the filter anchors it at `size / 2`, so
/// the output is shifted by half a pixel towards the top-left. A size of zero
/// has no kernel and is rejected.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn gaussian_blur(image: &RgbImage, kernel_size: u32) -> Result<RgbImage, ToolboxError> {
    if kernel_size == 0 {
        return Err(ToolboxError::InvalidParameter(
            "blur kernel size must be at least 1".into(),
        ));
    }
    info!(kernel_size, "Applying Gaussian blur");
    let kernel = gaussian_kernel(kernel_size);
    let blurred = separable_filter_equal(image, &kernel);
    debug!("Blur complete");
    Ok(blurred)
}

/// Canny edge map of a grayscale image; edge pixels are 255, the rest 0.
#[instrument(skip(gray), fields(width = gray.width(), height = gray.height()))]
pub fn canny_edges(gray: &GrayImage, low: f32, high: f32) -> GrayImage {
    info!(low, high, "Detecting Canny edges");
    let edges = canny(gray, low, high);
    debug!(
        edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count(),
        "Edge detection complete"
    );
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    fn assert_normalised(kernel: &[f32]) {
        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "kernel sums to {sum}");
    }

    #[test]
    fn small_kernels_use_binomial_tables() {
        assert_eq!(gaussian_kernel(5), vec![0.0625, 0.25, 0.375, 0.25, 0.0625]);
        for size in [1, 3, 5, 7] {
            let kernel = gaussian_kernel(size);
            assert_eq!(kernel.len(), size as usize);
            assert_normalised(&kernel);
        }
    }

    #[test]
    fn large_kernel_is_symmetric_and_peaked() {
        let kernel = gaussian_kernel(9);
        assert_eq!(kernel.len(), 9);
        assert_normalised(&kernel);
        for i in 0..4 {
            assert!((kernel[i] - kernel[8 - i]).abs() < 1e-6);
            assert!(kernel[i] < kernel[i + 1]);
        }
    }

    #[test]
    fn even_kernel_is_still_normalised() {
        let kernel = gaussian_kernel(4);
        assert_eq!(kernel.len(), 4);
        assert_normalised(&kernel);
    }

    #[test]
    fn blur_of_flat_image_is_unchanged() {
        let flat = RgbImage::from_pixel(16, 16, Rgb([120, 60, 30]));
        let blurred = gaussian_blur(&flat, 5).unwrap();
        assert_eq!(blurred.dimensions(), (16, 16));
        assert_eq!(blurred.get_pixel(8, 8), &Rgb([120, 60, 30]));
    }

    #[test]
    fn blur_softens_a_step() {
        let mut img = RgbImage::from_pixel(20, 20, Rgb([0, 0, 0]));
        for y in 0..20 {
            for x in 10..20 {
                img.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        let blurred = gaussian_blur(&img, 5).unwrap();
        let edge = blurred.get_pixel(10, 10).0[0];
        assert!(edge > 0 && edge < 255, "step pixel was {edge}");
    }

    #[test]
    fn zero_kernel_is_rejected() {
        let img = RgbImage::new(4, 4);
        assert!(matches!(
            gaussian_blur(&img, 0),
            Err(ToolboxError::InvalidParameter(_))
        ));
    }

    #[test]
    fn canny_finds_square_outline() {
        let mut img = GrayImage::from_pixel(64, 64, Luma([0]));
        for y in 16..48 {
            for x in 16..48 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        let edges = canny_edges(&img, 100.0, 200.0);
        assert_eq!(edges.dimensions(), (64, 64));
        assert!(edges.pixels().any(|p| p.0[0] == 255));
        assert_eq!(edges.get_pixel(32, 32).0[0], 0);
        assert_eq!(edges.get_pixel(2, 2).0[0], 0);
    }

    #[test]
    fn grayscale_uses_rec709_weights() {
        // Rec. 709 puts 0.7152 on green: 255 * 0.7152 = 182. Rec. 601 would give about 150.
        let green = grayscale(&RgbImage::from_pixel(1, 1, Rgb([0, 255, 0])));
        assert_eq!(green.get_pixel(0, 0).0[0], 182);
        let red = grayscale(&RgbImage::from_pixel(1, 1, Rgb([255, 0, 0])));
        assert_eq!(red.get_pixel(0, 0).0[0], 54);
    }

    #[test]
    fn grayscale_is_single_channel_luma() {
        let img = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
        let gray = grayscale(&img);
        assert_eq!(gray.dimensions(), (3, 2));
        assert_eq!(gray.get_pixel(0, 0).0[0], 255);
    }
}
