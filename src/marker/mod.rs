//! Marker candidate detection.
//!
//! Looks for a busy, high-contrast square area away from the page edges,
//! the way a printed QR or barcode block looks to a corner detector. This
//! flags a location only; nothing is decoded.
//!
//! Corners are visited in detector order (strongest first) and the first
//! one whose surrounding window is busy enough wins, even if a later corner
//! has a busier window.

mod corners;

pub use corners::{good_features, Corner, CornerParams};

use image::GrayImage;

use crate::layout::MarkerCandidate;
use crate::raster::RasterImage;

/// Tunables for marker detection.
#[derive(Clone, Debug)]
pub struct MarkerOptions {
    /// Maximum number of corners requested from the detector.
    pub max_corners: usize,
    /// Minimum corner response relative to the strongest one.
    pub quality_level: f64,
    /// Minimum pixel distance between corners.
    pub min_distance: f64,
    /// Corners closer than this to any edge are ignored.
    pub border_margin: u32,
    /// Side of the square window scored around each corner.
    pub window_size: u32,
    /// Window standard deviation must exceed this.
    pub min_std_dev: f64,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            max_corners: 100,
            quality_level: 0.01,
            min_distance: 10.0,
            border_margin: 50,
            window_size: 100,
            min_std_dev: 30.0,
        }
    }
}

impl MarkerOptions {
    fn corner_params(&self) -> CornerParams {
        CornerParams {
            max_corners: self.max_corners,
            quality_level: self.quality_level,
            min_distance: self.min_distance,
        }
    }

    /// Returns true if `(x, y)` keeps the required distance from every edge.
    #[inline]
    pub fn inside_margin(&self, x: u32, y: u32, width: u32, height: u32) -> bool {
        let m = self.border_margin as i64;
        let (x, y) = (x as i64, y as i64);
        x >= m && y >= m && x <= width as i64 - m && y <= height as i64 - m
    }
}

/// Proposes at most one marker candidate.
pub fn detect_marker_candidate(
    raster: &RasterImage,
    opts: &MarkerOptions,
) -> Option<MarkerCandidate> {
    let luma = raster.luma();
    let (width, height) = luma.dimensions();
    let corners = good_features(luma, &opts.corner_params());

    let found = corners
        .iter()
        .filter(|c| opts.inside_margin(c.x, c.y, width, height))
        .find(|c| window_std_dev(luma, c.x, c.y, opts.window_size) > opts.min_std_dev)
        .map(|c| MarkerCandidate {
            x: c.x,
            y: c.y,
            size: opts.window_size,
        });

    tracing::debug!(
        corners = corners.len(),
        found = found.is_some(),
        "marker candidate search"
    );

    found
}

/// Population standard deviation of a `size × size` window centred on
/// `(cx, cy)`, clipped to the image.
///
/// The window spans `[c - size/2, c + size - size/2)` on each axis.
pub fn window_std_dev(luma: &GrayImage, cx: u32, cy: u32, size: u32) -> f64 {
    let (width, height) = luma.dimensions();
    let half = size / 2;
    let x0 = cx.saturating_sub(half);
    let y0 = cy.saturating_sub(half);
    let x1 = cx.saturating_add(size - half).min(width);
    let y1 = cy.saturating_add(size - half).min(height);
    if x0 >= x1 || y0 >= y1 {
        return 0.0;
    }

    let mut n: u64 = 0;
    let mut sum: u64 = 0;
    let mut sum_sq: u64 = 0;
    for y in y0..y1 {
        for x in x0..x1 {
            let v = luma.get_pixel(x, y).0[0] as u64;
            n += 1;
            sum += v;
            sum_sq += v * v;
        }
    }

    // n^2 * variance, exact in integers.
    let scaled = (n * sum_sq).saturating_sub(sum * sum);
    (scaled as f64).sqrt() / n as f64
}
