//! Layout descriptor types.
//!
//! These are the values the pipeline hands to callers: text region boxes,
//! the optional marker candidate and the page classification, bundled into a
//! [`LayoutDescriptor`]. All of them are plain data and serialize with serde.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An axis-aligned box likely to contain a line or block of printed text.
///
/// Coordinates are in pixels with the origin at the top-left corner, and
/// `(x, y)` is the top-left pixel of the box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// `width * height`, stored so serialized output carries it.
    pub area: u64,
}

impl TextRegion {
    /// Creates a region and computes its area.
    #[inline]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            area: width as u64 * height as u64,
        }
    }

    /// Returns the exclusive right edge.
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Returns true if the region lies fully inside a `width x height` image.
    #[inline]
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width && self.bottom() <= height
    }

    /// Reading order: top-to-bottom, then left-to-right.
    #[inline]
    pub fn reading_order(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then_with(|| self.x.cmp(&other.x))
    }
}

impl fmt::Display for TextRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {}x{} area {}",
            self.x, self.y, self.width, self.height, self.area
        )
    }
}

/// A square region that looks like a dense printed code block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerCandidate {
    /// Centre column of the candidate window.
    pub x: u32,
    /// Centre row of the candidate window.
    pub y: u32,
    /// Side length of the square window, in pixels.
    pub size: u32,
}

/// Coarse page classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    /// Information-dense side with many text blocks.
    Front,
    /// Sparse side.
    Back,
}

impl LayoutType {
    /// Returns the lowercase tag used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutType::Front => "front",
            LayoutType::Back => "back",
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image geometry reported alongside the layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
    /// `width / height` rounded to two decimal places.
    pub aspect_ratio: f64,
}

/// The complete result of analysing one image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutDescriptor {
    pub dimensions: Dimensions,

    /// Text regions in reading order.
    pub text_regions: Vec<TextRegion>,

    /// Marker candidate, serialized as `null` when absent.
    pub marker: Option<MarkerCandidate>,

    pub layout_type: LayoutType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_area() {
        let region = TextRegion::new(10, 20, 120, 15);
        assert_eq!(region.area, 1800);
        assert_eq!(region.right(), 130);
        assert_eq!(region.bottom(), 35);
    }

    #[test]
    fn test_region_area_does_not_overflow() {
        let region = TextRegion::new(0, 0, 100_000, 100_000);
        assert_eq!(region.area, 10_000_000_000);
    }

    #[test]
    fn test_reading_order() {
        let mut regions = vec![
            TextRegion::new(300, 40, 60, 12),
            TextRegion::new(10, 90, 60, 12),
            TextRegion::new(20, 40, 60, 12),
        ];
        regions.sort_by(TextRegion::reading_order);

        let origins: Vec<(u32, u32)> = regions.iter().map(|r| (r.x, r.y)).collect();
        assert_eq!(origins, vec![(20, 40), (300, 40), (10, 90)]);
    }

    #[test]
    fn test_layout_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&LayoutType::Front).unwrap(),
            "\"front\""
        );
        assert_eq!(serde_json::to_string(&LayoutType::Back).unwrap(), "\"back\"");
    }

    #[test]
    fn test_absent_marker_serializes_null() {
        let descriptor = LayoutDescriptor {
            dimensions: Dimensions {
                width: 10,
                height: 10,
                aspect_ratio: 1.0,
            },
            text_regions: vec![],
            marker: None,
            layout_type: LayoutType::Back,
        };
        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(json.contains("\"marker\":null"));
        assert!(json.contains("\"text_regions\":[]"));
    }
}
