//! Page classification and descriptor assembly.

use std::cmp::Ordering;

use super::model::{Dimensions, LayoutDescriptor, LayoutType, MarkerCandidate, TextRegion};
use crate::raster::RasterImage;

/// A page with more text regions than this is classified as [`LayoutType::Front`].
pub const FRONT_REGION_THRESHOLD: usize = 5;

/// Rounds `width / height` to two decimal places.
///
/// See [`round_hundredths`] for the rounding rule.
pub fn aspect_ratio(width: u32, height: u32) -> f64 {
    round_hundredths(width as f64 / height as f64)
}

/// Rounds to two decimal places using the exact binary value of `value`,
/// with exact halves going to the even neighbour.
///
/// `1.125` (exactly representable) becomes `1.12`, while `2.675`, stored as
/// `2.67499999...`, becomes `2.67`.
pub fn round_hundredths(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }

    let bits = value.abs().to_bits();
    let biased_exp = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exp) = if biased_exp == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased_exp - 1075)
    };

    // |value| == mantissa * 2^exp exactly.
    if exp >= 0 {
        return value;
    }
    let shift = (-exp) as u32;
    // 100 * mantissa < 2^60, so anything shifted further is below one half.
    if shift > 64 {
        return 0.0f64.copysign(value);
    }

    let scaled = mantissa as u128 * 100;
    let whole = scaled >> shift;
    let rem = scaled & ((1u128 << shift) - 1);
    let half = 1u128 << (shift - 1);
    let rounded = match rem.cmp(&half) {
        Ordering::Greater => whole + 1,
        Ordering::Equal => whole + (whole & 1),
        Ordering::Less => whole,
    };

    (rounded as f64 / 100.0).copysign(value)
}

/// Chooses the layout tag from the number of detected text regions.
pub fn layout_type_for(region_count: usize) -> LayoutType {
    if region_count > FRONT_REGION_THRESHOLD {
        LayoutType::Front
    } else {
        LayoutType::Back
    }
}

/// Assembles the final descriptor for one image.
pub fn classify(
    raster: &RasterImage,
    text_regions: Vec<TextRegion>,
    marker: Option<MarkerCandidate>,
) -> LayoutDescriptor {
    let (width, height) = (raster.width(), raster.height());
    let layout_type = layout_type_for(text_regions.len());

    tracing::debug!(
        regions = text_regions.len(),
        marker = marker.is_some(),
        layout = %layout_type,
        "classified layout"
    );

    LayoutDescriptor {
        dimensions: Dimensions {
            width,
            height,
            aspect_ratio: aspect_ratio(width, height),
        },
        text_regions,
        marker,
        layout_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_aspect_ratio_rounding() {
        assert_eq!(aspect_ratio(1013, 638), 1.59);
        assert_eq!(aspect_ratio(640, 480), 1.33);
        assert_eq!(aspect_ratio(480, 640), 0.75);
        assert_eq!(aspect_ratio(100, 100), 1.0);
    }

    #[test]
    fn test_aspect_ratio_halves_round_to_even() {
        assert_eq!(aspect_ratio(1080, 960), 1.12);
        assert_eq!(aspect_ratio(500, 800), 0.62);
        assert_eq!(aspect_ratio(1300, 800), 1.62);
        assert_eq!(aspect_ratio(3, 8), 0.38);
        assert_eq!(aspect_ratio(1, 8), 0.12);
    }

    #[test]
    fn test_round_hundredths_uses_binary_value() {
        // 1.005 and 2.675 are stored slightly below the half.
        assert_eq!(aspect_ratio(201, 200), 1.0);
        assert_eq!(round_hundredths(2.675), 2.67);
        assert_eq!(round_hundredths(0.125), 0.12);
        assert_eq!(round_hundredths(0.135), 0.14);
        assert_eq!(round_hundredths(-1.125), -1.12);
        assert_eq!(round_hundredths(1e-30), 0.0);
        assert_eq!(round_hundredths(4096.0), 4096.0);
    }

    #[test]
    fn test_aspect_ratio_close_to_exact() {
        for (w, h) in [(1013u32, 638u32), (1920, 1080), (850, 1100), (333, 777)] {
            let exact = w as f64 / h as f64;
            assert!((aspect_ratio(w, h) - exact).abs() <= 0.005 + 1e-12);
        }
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(layout_type_for(0), LayoutType::Back);
        assert_eq!(layout_type_for(5), LayoutType::Back);
        assert_eq!(layout_type_for(6), LayoutType::Front);
    }

    #[test]
    fn test_classify_assembles_descriptor() {
        let raster =
            RasterImage::from_rgb(RgbImage::from_pixel(200, 100, Rgb([255, 255, 255]))).unwrap();
        let regions: Vec<TextRegion> = (0..6).map(|i| TextRegion::new(0, i * 15, 60, 12)).collect();
        let marker = Some(MarkerCandidate {
            x: 100,
            y: 50,
            size: 100,
        });

        let descriptor = classify(&raster, regions.clone(), marker);

        assert_eq!(descriptor.dimensions.width, 200);
        assert_eq!(descriptor.dimensions.height, 100);
        assert_eq!(descriptor.dimensions.aspect_ratio, 2.0);
        assert_eq!(descriptor.text_regions, regions);
        assert_eq!(descriptor.marker, marker);
        assert_eq!(descriptor.layout_type, LayoutType::Front);
    }
}
