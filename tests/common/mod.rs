#![allow(dead_code)]

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};

pub const PAPER: Rgb<u8> = Rgb([242, 240, 236]);
pub const INK: Rgb<u8> = Rgb([18, 18, 24]);

/// A uniform light page.
pub fn blank_page(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, PAPER)
}

/// A light page with dark filled rectangles `(x, y, width, height)`.
pub fn page_with_bars(width: u32, height: u32, bars: &[(u32, u32, u32, u32)]) -> RgbImage {
    let mut img = blank_page(width, height);
    for &(x0, y0, w, h) in bars {
        for y in y0..(y0 + h).min(height) {
            for x in x0..(x0 + w).min(width) {
                img.put_pixel(x, y, INK);
            }
        }
    }
    img
}

/// `count` bars of 200x20 stacked 60px apart, like lines of print.
pub fn stacked_bars(count: u32) -> RgbImage {
    let bars: Vec<(u32, u32, u32, u32)> = (0..count).map(|i| (100, 40 + i * 60, 200, 20)).collect();
    page_with_bars(400, 80 + count * 60, &bars)
}

/// Writes an image, creating parent directories. The format follows the extension.
pub fn write_image(path: &Path, img: &RgbImage) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    img.save(path).expect("write image file");
}

/// A minimal uncompressed 24-bit BMP filled with one gray level.
pub fn bmp_bytes(width: u32, height: u32, gray: u8) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    for _ in 0..height {
        let row_start = bytes.len();
        bytes.resize(row_start + (width * 3) as usize, gray);
        bytes.resize(row_start + row_stride as usize, 0);
    }
    bytes
}
