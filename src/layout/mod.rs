//! Layout descriptor model and classification.
//!
//! The descriptor is the single output of an analysis: image dimensions,
//! text regions in reading order, an optional marker candidate and a coarse
//! front/back tag.
//!
//! # Example
//!
//! ```
//! use layoutscan::layout::{LayoutType, TextRegion, layout_type_for};
//!
//! let region = TextRegion::new(12, 40, 180, 22);
//! assert_eq!(region.area, 3960);
//! assert_eq!(layout_type_for(6), LayoutType::Front);
//! ```

mod classify;
mod model;

pub use classify::{
    aspect_ratio, classify, layout_type_for, round_hundredths, FRONT_REGION_THRESHOLD,
};
pub use model::{Dimensions, LayoutDescriptor, LayoutType, MarkerCandidate, TextRegion};
