//! Text region extraction.
//!
//! Printed text lines produce many short edge fragments side by side. A
//! wide, flat dilation merges the fragments of one line into a single blob
//! while leaving neighbouring lines apart, and the bounding boxes of the
//! resulting blobs are the text regions.
//!
//! Pipeline: Canny edges → rectangular dilation → external components →
//! size filter → reading-order sort.

mod canny;
mod components;
mod morph;

pub use canny::canny;
pub use components::{external_components, ComponentBox};
pub use morph::{dilate, RectKernel};

use crate::layout::TextRegion;
use crate::raster::RasterImage;

/// Tunables for text region extraction.
#[derive(Clone, Debug)]
pub struct RegionOptions {
    /// Lower hysteresis threshold of the edge detector.
    pub canny_low: f32,
    /// Upper hysteresis threshold of the edge detector.
    pub canny_high: f32,
    /// Width of the dilation rectangle.
    pub kernel_width: u32,
    /// Height of the dilation rectangle.
    pub kernel_height: u32,
    /// Number of dilation passes.
    pub dilate_iterations: u32,
    /// Boxes must be strictly wider than this.
    pub min_width: u32,
    /// Boxes must be strictly taller than this.
    pub min_height: u32,
}

impl Default for RegionOptions {
    fn default() -> Self {
        Self {
            canny_low: 50.0,
            canny_high: 150.0,
            kernel_width: 30,
            kernel_height: 3,
            dilate_iterations: 1,
            min_width: 50,
            min_height: 10,
        }
    }
}

impl RegionOptions {
    /// Returns true if a box of this size passes the minimum-size filter.
    #[inline]
    pub fn accepts(&self, width: u32, height: u32) -> bool {
        height > self.min_height && width > self.min_width
    }
}

/// Finds boxes likely to contain printed text, in reading order.
///
/// Never fails: a featureless image simply yields no regions.
pub fn extract_text_regions(raster: &RasterImage, opts: &RegionOptions) -> Vec<TextRegion> {
    let edges = canny(raster.luma(), opts.canny_low, opts.canny_high);
    let kernel = RectKernel::new(opts.kernel_width, opts.kernel_height);
    let merged = dilate(&edges, kernel, opts.dilate_iterations);
    let components = external_components(&merged);
    let candidates = components.len();

    let mut regions: Vec<TextRegion> = components
        .into_iter()
        .filter(|c| opts.accepts(c.width, c.height))
        .map(|c| TextRegion::new(c.x, c.y, c.width, c.height))
        .collect();

    regions.sort_by(TextRegion::reading_order);

    tracing::debug!(
        components = candidates,
        regions = regions.len(),
        "extracted text regions"
    );

    regions
}
