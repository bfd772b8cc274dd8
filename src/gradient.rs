//! 3×3 Sobel derivatives shared by the edge and corner detectors.
//!
//! The two detectors extrapolate the image differently past its edges: edge
//! detection replicates the border pixel, corner detection mirrors without
//! repeating it. [`BorderMode`] selects which.

use image::GrayImage;

/// How pixel indices outside the image are mapped back inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BorderMode {
    /// `aaa|abcd|ddd`
    Replicate,
    /// `dcb|abcd|cba`
    Reflect101,
}

impl BorderMode {
    /// Maps a possibly out-of-range index into `0..len`.
    #[inline]
    pub(crate) fn index(self, i: isize, len: usize) -> usize {
        let last = len as isize - 1;
        if last <= 0 {
            return 0;
        }
        let mapped = match self {
            BorderMode::Replicate => i,
            BorderMode::Reflect101 if i < 0 => -i,
            BorderMode::Reflect101 if i > last => 2 * last - i,
            BorderMode::Reflect101 => i,
        };
        mapped.clamp(0, last) as usize
    }
}

/// Per-pixel Sobel derivatives.
pub(crate) struct Gradients {
    pub width: usize,
    pub height: usize,
    pub gx: Vec<i32>,
    pub gy: Vec<i32>,
}

impl Gradients {
    /// L1 magnitude `|gx| + |gy|`.
    #[inline]
    pub(crate) fn magnitude(&self, idx: usize) -> i32 {
        self.gx[idx].abs() + self.gy[idx].abs()
    }
}

/// Computes unscaled 3×3 Sobel derivatives.
pub(crate) fn sobel(luma: &GrayImage, border: BorderMode) -> Gradients {
    let width = luma.width() as usize;
    let height = luma.height() as usize;
    let src = luma.as_raw();
    let mut gx = vec![0i32; width * height];
    let mut gy = vec![0i32; width * height];

    if width == 0 || height == 0 {
        return Gradients {
            width,
            height,
            gx,
            gy,
        };
    }

    let px = |x: usize, y: usize| src[y * width + x] as i32;

    for y in 0..height {
        let yi = y as isize;
        let ys = [
            border.index(yi - 1, height),
            y,
            border.index(yi + 1, height),
        ];
        for x in 0..width {
            let xi = x as isize;
            let xs = [
                border.index(xi - 1, width),
                x,
                border.index(xi + 1, width),
            ];

            let dx = (px(xs[2], ys[0]) + 2 * px(xs[2], ys[1]) + px(xs[2], ys[2]))
                - (px(xs[0], ys[0]) + 2 * px(xs[0], ys[1]) + px(xs[0], ys[2]));
            let dy = (px(xs[0], ys[2]) + 2 * px(xs[1], ys[2]) + px(xs[2], ys[2]))
                - (px(xs[0], ys[0]) + 2 * px(xs[1], ys[0]) + px(xs[2], ys[0]));

            let idx = y * width + x;
            gx[idx] = dx;
            gy[idx] = dy;
        }
    }

    Gradients {
        width,
        height,
        gx,
        gy,
    }
}
