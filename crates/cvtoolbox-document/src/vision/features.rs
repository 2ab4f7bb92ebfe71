// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SIFT keypoints and descriptors via the `sift-features` crate, plus the
// annotated preview image drawn with `imageproc`.

use cvtoolbox_core::error::ToolboxError;
use cvtoolbox_core::{FeatureRecord, KeyPointRecord};
use image::buffer::ConvertBuffer;
use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};
use sift_features::SiftResult;
use tracing::{debug, info, instrument};

/// Colours cycled across keypoints in the annotated image.
const KEYPOINT_COLOURS: [Rgb<u8>; 6] = [
    Rgb([255, 64, 64]),
    Rgb([64, 220, 64]),
    Rgb([64, 128, 255]),
    Rgb([255, 200, 0]),
    Rgb([220, 64, 220]),
    Rgb([0, 210, 210]),
];

/// Detect SIFT keypoints and compute one 128-element descriptor for each.
///
/// An image without any stable extrema yields an empty record.
#[instrument(skip(gray), fields(width = gray.width(), height = gray.height()))]
pub fn detect_and_describe(gray: &GrayImage) -> Result<FeatureRecord, ToolboxError> {
    let SiftResult {
        keypoints,
        descriptors,
    } = sift_features::sift(gray, None);

    let records: Vec<KeyPointRecord> = keypoints
        .iter()
        .map(|kp| KeyPointRecord {
            x: kp.x,
            y: kp.y,
            size: kp.size,
            angle: kp.angle,
        })
        .collect();
    let vectors: Vec<Vec<f32>> = descriptors
        .outer_iter()
        .map(|row| row.iter().map(|&v| f32::from(v)).collect())
        .collect();

    let record = FeatureRecord::new(records, vectors)?;
    info!(keypoints = record.num_keypoints(), "SIFT detection complete");
    Ok(record)
}

/// Draw keypoints over a colour copy of `gray`: a circle of radius `size / 2`
/// and a line from the centre along the keypoint orientation.
#[instrument(skip_all, fields(keypoints = keypoints.len()))]
pub fn draw_rich_keypoints(gray: &GrayImage, keypoints: &[KeyPointRecord]) -> RgbImage {
    let mut canvas: RgbImage = gray.convert();

    for (idx, kp) in keypoints.iter().enumerate() {
        let colour = KEYPOINT_COLOURS[idx % KEYPOINT_COLOURS.len()];
        let radius = (kp.size / 2.0).max(1.0);
        let centre = (kp.x.round() as i32, kp.y.round() as i32);
        draw_hollow_circle_mut(&mut canvas, centre, radius.round() as i32, colour);

        let theta = kp.angle.to_radians();
        let tip = (kp.x + radius * theta.cos(), kp.y + radius * theta.sin());
        draw_line_segment_mut(&mut canvas, (kp.x, kp.y), tip, colour);
    }

    debug!("Keypoints drawn");
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// Dark background with a few bright blobs, enough structure for SIFT.
    fn blob_image() -> GrayImage {
        let mut img = GrayImage::from_pixel(128, 128, Luma([20]));
        for (cx, cy, r) in [(32i32, 32i32, 6i32), (90, 40, 9), (60, 95, 5), (100, 100, 7)] {
            for y in (cy - r)..=(cy + r) {
                for x in (cx - r)..=(cx + r) {
                    if (x - cx).pow(2) + (y - cy).pow(2) <= r * r {
                        img.put_pixel(x as u32, y as u32, Luma([230]));
                    }
                }
            }
        }
        img
    }

    #[test]
    fn record_lengths_agree() {
        let record = detect_and_describe(&blob_image()).unwrap();
        assert!(record.num_keypoints() > 0);
        assert_eq!(record.keypoints().len(), record.num_keypoints());
        assert_eq!(record.descriptors().len(), record.num_keypoints());
        assert!(record.descriptors().iter().all(|d| d.len() == 128));
    }

    #[test]
    fn flat_image_has_no_keypoints() {
        let flat = GrayImage::from_pixel(64, 64, Luma([128]));
        let record = detect_and_describe(&flat).unwrap();
        assert_eq!(record.num_keypoints(), 0);
        assert!(record.keypoints().is_empty());
        assert!(record.descriptors().is_empty());
    }

    #[test]
    fn drawing_marks_keypoints_in_colour() {
        let gray = GrayImage::from_pixel(40, 40, Luma([0]));
        let keypoints = [KeyPointRecord {
            x: 20.0,
            y: 20.0,
            size: 16.0,
            angle: 0.0,
        }];
        let annotated = draw_rich_keypoints(&gray, &keypoints);
        assert_eq!(annotated.dimensions(), (40, 40));
        // Orientation line runs right from the centre at angle 0.
        assert_eq!(annotated.get_pixel(24, 20), &KEYPOINT_COLOURS[0]);
        // Circle passes through (centre.x + radius, centre.y).
        assert_eq!(annotated.get_pixel(28, 20), &KEYPOINT_COLOURS[0]);
        assert_eq!(annotated.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn drawing_without_keypoints_is_plain_copy() {
        let gray = GrayImage::from_pixel(8, 8, Luma([77]));
        let annotated = draw_rich_keypoints(&gray, &[]);
        assert!(annotated.pixels().all(|p| *p == Rgb([77, 77, 77])));
    }
}
