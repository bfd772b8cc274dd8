#![allow(dead_code)]

use image::{Rgb, RgbImage};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(16);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 256;
    config
}

/// A synthetic page: size, background level, and dark rectangles on it.
#[derive(Clone, Debug)]
pub struct SyntheticPage {
    pub width: u32,
    pub height: u32,
    pub background: u8,
    pub rects: Vec<(u32, u32, u32, u32, u8)>,
}

impl SyntheticPage {
    pub fn render(&self) -> RgbImage {
        let mut img = RgbImage::from_pixel(
            self.width,
            self.height,
            Rgb([self.background, self.background, self.background]),
        );
        for &(x0, y0, w, h, level) in &self.rects {
            for y in y0..(y0 + h).min(self.height) {
                for x in x0..(x0 + w).min(self.width) {
                    img.put_pixel(x, y, Rgb([level, level, level]));
                }
            }
        }
        img
    }
}

/// Pages up to 240x180 with up to 12 rectangles of arbitrary gray levels.
pub fn arb_page() -> BoxedStrategy<SyntheticPage> {
    (40u32..=240, 30u32..=180, any::<u8>())
        .prop_flat_map(|(width, height, background)| {
            let rect = (
                0..width,
                0..height,
                1u32..=width,
                1u32..=height / 2 + 1,
                any::<u8>(),
            );
            proptest::collection::vec(rect, 0..=12).prop_map(move |rects| SyntheticPage {
                width,
                height,
                background,
                rects,
            })
        })
        .boxed()
}

/// Pure-noise pages, to exercise the detectors on texture with no structure.
pub fn arb_noise_page() -> BoxedStrategy<RgbImage> {
    (16u32..=96, 16u32..=96)
        .prop_flat_map(|(width, height)| {
            proptest::collection::vec(any::<u8>(), (width * height) as usize).prop_map(
                move |levels| {
                    RgbImage::from_fn(width, height, |x, y| {
                        let v = levels[(y * width + x) as usize];
                        Rgb([v, v, v])
                    })
                },
            )
        })
        .boxed()
}
