use layoutscan::analysis::{analyze_raster, AnalyzeOptions};
use layoutscan::layout::{aspect_ratio, LayoutType, FRONT_REGION_THRESHOLD};
use layoutscan::RasterImage;
use proptest::prelude::*;

mod proptest_helpers;

fn check_descriptor_invariants(
    width: u32,
    height: u32,
    d: &layoutscan::LayoutDescriptor,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(d.dimensions.width, width);
    prop_assert_eq!(d.dimensions.height, height);
    prop_assert_eq!(d.dimensions.aspect_ratio, aspect_ratio(width, height));

    for r in &d.text_regions {
        prop_assert!(r.height > 10 && r.width > 50, "undersized region {:?}", r);
        prop_assert!(r.fits_within(width, height), "region {:?} outside {}x{}", r, width, height);
    }
    for pair in d.text_regions.windows(2) {
        prop_assert!(
            (pair[0].y, pair[0].x) <= (pair[1].y, pair[1].x),
            "regions out of order: {:?} then {:?}",
            pair[0],
            pair[1]
        );
    }

    let expected = if d.text_regions.len() > FRONT_REGION_THRESHOLD {
        LayoutType::Front
    } else {
        LayoutType::Back
    };
    prop_assert_eq!(d.layout_type, expected);

    if let Some(m) = d.marker {
        prop_assert!(m.x >= 50 && m.x + 50 <= width, "marker {:?} in {}x{}", m, width, height);
        prop_assert!(m.y >= 50 && m.y + 50 <= height, "marker {:?} in {}x{}", m, width, height);
    }
    Ok(())
}

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn descriptor_invariants_hold_for_synthetic_pages(page in proptest_helpers::arb_page()) {
        let raster = RasterImage::from_rgb(page.render()).expect("non-empty page");
        let d = analyze_raster(&raster, &AnalyzeOptions::default());
        check_descriptor_invariants(page.width, page.height, &d)?;
    }

    #[test]
    fn descriptor_invariants_hold_for_noise(img in proptest_helpers::arb_noise_page()) {
        let (width, height) = img.dimensions();
        let raster = RasterImage::from_rgb(img).expect("non-empty page");
        let d = analyze_raster(&raster, &AnalyzeOptions::default());
        check_descriptor_invariants(width, height, &d)?;
    }

    #[test]
    fn analysis_is_repeatable(page in proptest_helpers::arb_page()) {
        let raster = RasterImage::from_rgb(page.render()).expect("non-empty page");
        let first = analyze_raster(&raster, &AnalyzeOptions::default());
        let second = analyze_raster(&raster, &AnalyzeOptions::default());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn uniform_pages_are_empty_backs(width in 1u32..=200, height in 1u32..=200, level in any::<u8>()) {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([level, level, level]));
        let raster = RasterImage::from_rgb(img).expect("non-empty page");
        let d = analyze_raster(&raster, &AnalyzeOptions::default());

        prop_assert!(d.text_regions.is_empty());
        prop_assert!(d.marker.is_none());
        prop_assert_eq!(d.layout_type, LayoutType::Back);
    }

    #[test]
    fn aspect_ratio_is_within_a_hundredth(width in 1u32..=10_000, height in 1u32..=10_000) {
        let ratio = aspect_ratio(width, height);
        prop_assert!((ratio - width as f64 / height as f64).abs() < 0.01);
    }
}
