//! Minimum-eigenvalue ("good features to track") corner detection.
//!
//! The response at each pixel is the smaller eigenvalue of the gradient
//! structure tensor summed over a 3×3 block. Derivatives and block sums
//! mirror the image at its edges without repeating the edge pixel. Strong,
//! well-separated local maxima of that response are returned strongest first.

use image::GrayImage;

use crate::gradient::{sobel, BorderMode, Gradients};

/// Scale applied to 3×3 Sobel derivatives of 8-bit data summed over a 3×3 block.
const DERIV_SCALE: f64 = 1.0 / (4.0 * 3.0 * 255.0);

/// A detected corner with its response.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corner {
    pub x: u32,
    pub y: u32,
    pub response: f64,
}

/// Corner selection parameters.
#[derive(Clone, Copy, Debug)]
pub struct CornerParams {
    /// Maximum number of corners returned.
    pub max_corners: usize,
    /// Minimum response as a fraction of the strongest response.
    pub quality_level: f64,
    /// Minimum Euclidean distance between returned corners.
    pub min_distance: f64,
}

/// Returns up to `max_corners` corners, strongest first.
///
/// Equal responses put the later raster position (larger `y`, then larger
/// `x`) first, so the output is fully deterministic.
pub fn good_features(luma: &GrayImage, params: &CornerParams) -> Vec<Corner> {
    let width = luma.width() as usize;
    let height = luma.height() as usize;
    if width < 3 || height < 3 || params.max_corners == 0 {
        return Vec::new();
    }

    let response = min_eigen_response(&sobel(luma, BorderMode::Reflect101));
    let max_response = response.iter().copied().fold(0.0f64, f64::max);
    if max_response <= 0.0 {
        return Vec::new();
    }
    let threshold = max_response * params.quality_level;
    let at = |x: usize, y: usize| {
        let v = response[y * width + x];
        if v > threshold {
            v
        } else {
            0.0
        }
    };

    let mut candidates: Vec<Corner> = Vec::new();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let v = at(x, y);
            if v == 0.0 {
                continue;
            }
            let is_peak = (y - 1..=y + 1)
                .all(|ny| (x - 1..=x + 1).all(|nx| at(nx, ny) <= v));
            if is_peak {
                candidates.push(Corner {
                    x: x as u32,
                    y: y as u32,
                    response: v,
                });
            }
        }
    }

    candidates.sort_by(|a, b| {
        b.response
            .total_cmp(&a.response)
            .then_with(|| (b.y, b.x).cmp(&(a.y, a.x)))
    });

    let min_dist_sq = params.min_distance * params.min_distance;
    let mut accepted: Vec<Corner> = Vec::with_capacity(params.max_corners);
    for candidate in candidates {
        let far_enough = accepted.iter().all(|c| {
            let dx = c.x as f64 - candidate.x as f64;
            let dy = c.y as f64 - candidate.y as f64;
            dx * dx + dy * dy >= min_dist_sq
        });
        if far_enough {
            accepted.push(candidate);
            if accepted.len() == params.max_corners {
                break;
            }
        }
    }

    accepted
}

/// Computes the minimum-eigenvalue response for every pixel.
///
/// Tensor entries are summed as exact integers and scaled once, so
/// mirror-symmetric neighbourhoods get bit-identical responses.
fn min_eigen_response(grad: &Gradients) -> Vec<f64> {
    let (width, height) = (grad.width, grad.height);
    let n = width * height;

    let mut xx = vec![0i64; n];
    let mut xy = vec![0i64; n];
    let mut yy = vec![0i64; n];
    for i in 0..n {
        let dx = grad.gx[i] as i64;
        let dy = grad.gy[i] as i64;
        xx[i] = dx * dx;
        xy[i] = dx * dy;
        yy[i] = dy * dy;
    }

    let scale = DERIV_SCALE * DERIV_SCALE;
    let mut response = vec![0.0f64; n];
    for y in 0..height {
        for x in 0..width {
            let (mut a, mut b, mut c) = (0i64, 0i64, 0i64);
            for oy in -1..=1isize {
                let ny = BorderMode::Reflect101.index(y as isize + oy, height);
                for ox in -1..=1isize {
                    let nx = BorderMode::Reflect101.index(x as isize + ox, width);
                    let idx = ny * width + nx;
                    a += xx[idx];
                    b += xy[idx];
                    c += yy[idx];
                }
            }
            let (a, b, c) = (a as f64, b as f64, c as f64);
            let diff = a - c;
            response[y * width + x] =
                0.5 * scale * ((a + c) - (diff * diff + 4.0 * b * b).sqrt());
        }
    }

    response
}
