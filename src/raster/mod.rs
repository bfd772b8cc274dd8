//! Raster loading.
//!
//! A [`RasterImage`] owns two views of the same picture: the decoded RGB
//! buffer and a single-channel luminance buffer derived from it once at
//! construction time. Every later stage reads the luminance buffer only.
//!
//! Decoding honours the EXIF Orientation tag, so a phone photo taken in
//! portrait comes out upright with its width and height as displayed.
//!
//! Luminance uses the ITU-R BT.601 weights (`0.299 R + 0.587 G + 0.114 B`)
//! in 14-bit fixed point, so results do not depend on the decoder's own
//! grayscale conversion.

use std::io::{BufRead, Cursor, Seek};
use std::path::Path;

use image::{
    DynamicImage, GrayImage, ImageDecoder, ImageReader, ImageResult, Luma, RgbImage,
};

use crate::error::LayoutscanError;

const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_ROUND: u32 = 1 << (LUMA_SHIFT - 1);

/// An immutable decoded image with its luminance derivative.
#[derive(Clone, Debug)]
pub struct RasterImage {
    color: RgbImage,
    luma: GrayImage,
}

impl RasterImage {
    /// Builds a raster from an RGB buffer, deriving the luminance channel.
    ///
    /// # Errors
    /// Returns [`LayoutscanError::EmptyImage`] if either dimension is zero.
    pub fn from_rgb(color: RgbImage) -> Result<Self, LayoutscanError> {
        let (width, height) = color.dimensions();
        if width == 0 || height == 0 {
            return Err(LayoutscanError::EmptyImage { width, height });
        }

        let luma = luminance(&color);
        Ok(Self { color, luma })
    }

    /// Builds a raster from any decoded image, converting it to 8-bit RGB first.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self, LayoutscanError> {
        Self::from_rgb(image.into_rgb8())
    }

    /// Decodes an encoded image held in memory.
    ///
    /// The format is guessed from the leading bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LayoutscanError> {
        let image = decode_oriented(ImageReader::new(Cursor::new(bytes)))
            .map_err(LayoutscanError::ImageDecode)?;
        Self::from_dynamic(image)
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.color.width()
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.color.height()
    }

    /// Returns the RGB buffer.
    #[inline]
    pub fn color(&self) -> &RgbImage {
        &self.color
    }

    /// Returns the luminance buffer.
    #[inline]
    pub fn luma(&self) -> &GrayImage {
        &self.luma
    }
}

/// Loads an image file from disk.
///
/// # Errors
/// Returns [`LayoutscanError::ImageLoad`] if the path does not exist or does
/// not decode as an image, and [`LayoutscanError::EmptyImage`] if it decodes
/// to zero pixels.
pub fn load(path: &Path) -> Result<RasterImage, LayoutscanError> {
    let decoded = ImageReader::open(path)
        .map_err(image::ImageError::IoError)
        .and_then(decode_oriented)
        .map_err(|source| LayoutscanError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;
    let raster = RasterImage::from_dynamic(decoded)?;

    tracing::debug!(
        path = %path.display(),
        width = raster.width(),
        height = raster.height(),
        "decoded raster"
    );

    Ok(raster)
}

/// Decodes an image and applies its EXIF orientation.
///
/// Content sniffing takes precedence over the file extension.
fn decode_oriented<R: BufRead + Seek>(reader: ImageReader<R>) -> ImageResult<DynamicImage> {
    let mut decoder = reader.with_guessed_format()?.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// Converts one RGB triple to luminance.
#[inline]
pub fn luma_of(r: u8, g: u8, b: u8) -> u8 {
    let y = (LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32 + LUMA_ROUND) >> LUMA_SHIFT;
    y.min(255) as u8
}

fn luminance(color: &RgbImage) -> GrayImage {
    let (width, height) = color.dimensions();
    let mut luma = GrayImage::new(width, height);
    for (dst, src) in luma.pixels_mut().zip(color.pixels()) {
        let [r, g, b] = src.0;
        *dst = Luma([luma_of(r, g, b)]);
    }
    luma
}
