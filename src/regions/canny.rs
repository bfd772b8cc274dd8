//! Canny edge detection on the luminance buffer.
//!
//! - 3×3 Sobel derivatives with replicated borders.
//! - L1 magnitude `|gx| + |gy|`.
//! - Non-maximum suppression in four directions, split at 22.5° and 67.5°.
//! - Double-threshold hysteresis with 8-connected edge tracing.
//!
//! No smoothing is applied beforehand; the input is used as decoded.

use image::GrayImage;

use crate::gradient::{sobel, BorderMode};

/// `tan(22.5°)` in Q15 fixed point.
const TAN_22_5_Q15: i64 = 13573;
const Q15_SHIFT: u32 = 15;

const NOT_EDGE: u8 = 0;
const CANDIDATE: u8 = 1;
const STRONG: u8 = 2;

/// Runs Canny edge detection and returns a binary map (edges are 255).
///
/// Pixels with magnitude above `high` seed edges; pixels above `low` are
/// kept only when 8-connected to a seed.
pub fn canny(luma: &GrayImage, low: f32, high: f32) -> GrayImage {
    let grad = sobel(luma, BorderMode::Replicate);
    let (width, height) = (grad.width, grad.height);
    let mut edges = GrayImage::new(luma.width(), luma.height());
    if width == 0 || height == 0 {
        return edges;
    }

    let low = low.max(0.0).floor() as i32;
    let high = (high.max(0.0).floor() as i32).max(low);

    let mag: Vec<i32> = (0..width * height).map(|i| grad.magnitude(i)).collect();
    let mag_at = |x: isize, y: isize| -> i32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0
        } else {
            mag[y as usize * width + x as usize]
        }
    };

    let mut state = vec![NOT_EDGE; width * height];
    let mut stack: Vec<usize> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let m = mag[idx];
            if m <= low {
                continue;
            }

            let (sx, sy) = (grad.gx[idx], grad.gy[idx]);
            let ax = sx.unsigned_abs() as i64;
            let ay = (sy.unsigned_abs() as i64) << Q15_SHIFT;
            let tan22 = ax * TAN_22_5_Q15;
            let (xi, yi) = (x as isize, y as isize);

            let is_max = if ay < tan22 {
                m > mag_at(xi - 1, yi) && m >= mag_at(xi + 1, yi)
            } else {
                let tan67 = tan22 + (ax << (Q15_SHIFT + 1));
                if ay > tan67 {
                    m > mag_at(xi, yi - 1) && m >= mag_at(xi, yi + 1)
                } else {
                    let s: isize = if (sx ^ sy) < 0 { -1 } else { 1 };
                    m > mag_at(xi - s, yi - 1) && m > mag_at(xi + s, yi + 1)
                }
            };

            if !is_max {
                continue;
            }

            if m > high {
                state[idx] = STRONG;
                stack.push(idx);
            } else {
                state[idx] = CANDIDATE;
            }
        }
    }

    // Hysteresis: grow strong edges through 8-connected candidates.
    while let Some(idx) = stack.pop() {
        let (x, y) = ((idx % width) as isize, (idx / width) as isize);
        for dy in -1..=1isize {
            for dx in -1..=1isize {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let n = ny as usize * width + nx as usize;
                if state[n] == CANDIDATE {
                    state[n] = STRONG;
                    stack.push(n);
                }
            }
        }
    }

    let out: &mut [u8] = &mut edges;
    for (dst, &s) in out.iter_mut().zip(state.iter()) {
        if s == STRONG {
            *dst = 255;
        }
    }

    edges
}
