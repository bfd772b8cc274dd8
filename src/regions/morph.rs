//! Binary dilation with a rectangular structuring element.
//!
//! A rectangle is separable, so the dilation runs as a horizontal pass
//! followed by a vertical pass. Each pass slides a running count of
//! foreground pixels, making the cost independent of the kernel size.

use image::GrayImage;

/// A `width × height` rectangle anchored at its centre.
///
/// For even sizes the anchor sits right/below of the middle, so a 30-wide
/// kernel reaches 15 pixels left and 14 pixels right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectKernel {
    pub width: u32,
    pub height: u32,
}

impl RectKernel {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixels covered before and after the anchor along one axis.
    #[inline]
    fn reach(size: u32) -> (usize, usize) {
        if size == 0 {
            return (0, 0);
        }
        let before = (size / 2) as usize;
        let after = (size - 1) as usize - before;
        (before, after)
    }
}

/// Dilates a binary map (non-zero is foreground) `iterations` times.
///
/// The result is binary with foreground set to 255.
pub fn dilate(src: &GrayImage, kernel: RectKernel, iterations: u32) -> GrayImage {
    let width = src.width() as usize;
    let height = src.height() as usize;
    let mut current: Vec<u8> = src.as_raw().iter().map(|&v| if v > 0 { 255 } else { 0 }).collect();

    if width > 0 && height > 0 {
        let mut scratch = vec![0u8; width * height];
        for _ in 0..iterations {
            dilate_rows(&current, &mut scratch, width, height, RectKernel::reach(kernel.width));
            dilate_cols(&scratch, &mut current, width, height, RectKernel::reach(kernel.height));
        }
    }

    let mut out = GrayImage::new(src.width(), src.height());
    let dst: &mut [u8] = &mut out;
    dst.copy_from_slice(&current);
    out
}

// Output pixel x is foreground if any input in [x - before, x + after] is.
fn dilate_rows(input: &[u8], output: &mut [u8], w: usize, h: usize, (before, after): (usize, usize)) {
    for y in 0..h {
        let row = &input[y * w..(y + 1) * w];
        let out = &mut output[y * w..(y + 1) * w];
        let mut count = row[..=after.min(w - 1)].iter().filter(|&&v| v > 0).count();

        for x in 0..w {
            out[x] = if count > 0 { 255 } else { 0 };

            let enter = x + after + 1;
            if enter < w && row[enter] > 0 {
                count += 1;
            }
            if x >= before && row[x - before] > 0 {
                count -= 1;
            }
        }
    }
}

fn dilate_cols(input: &[u8], output: &mut [u8], w: usize, h: usize, (before, after): (usize, usize)) {
    for x in 0..w {
        let mut count = (0..=after.min(h - 1))
            .filter(|&y| input[y * w + x] > 0)
            .count();

        for y in 0..h {
            output[y * w + x] = if count > 0 { 255 } else { 0 };

            let enter = y + after + 1;
            if enter < h && input[enter * w + x] > 0 {
                count += 1;
            }
            if y >= before && input[(y - before) * w + x] > 0 {
                count -= 1;
            }
        }
    }
}
