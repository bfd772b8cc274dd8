//! Fuzz target for image decoding and analysis.
//!
//! This fuzzer feeds arbitrary byte sequences to the decoder and runs the
//! full pipeline on anything that decodes, checking for panics, crashes,
//! or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use layoutscan::analysis::{analyze_raster, AnalyzeOptions};
use layoutscan::RasterImage;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(raster) = RasterImage::from_bytes(data) else {
        return;
    };

    // Keep iterations fast on decoders that accept huge declared sizes.
    if raster.width() as u64 * raster.height() as u64 > 4_000_000 {
        return;
    }

    let descriptor = analyze_raster(&raster, &AnalyzeOptions::default());
    for region in &descriptor.text_regions {
        assert!(region.fits_within(raster.width(), raster.height()));
    }
});
