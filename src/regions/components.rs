//! External connected components of a binary map.
//!
//! Foreground is 8-connected and background 4-connected. A component counts
//! as *external* when the background it sits in is connected to the image
//! frame; components lying inside a hole of another component are skipped.
//! The first pixel of a component in raster order always has background (or
//! the frame) on its left, and that background is the region enclosing the
//! component, so one lookup decides it.

use image::GrayImage;

/// Bounding box and pixel count of one component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComponentBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub pixels: u32,
}

/// Finds external 8-connected components (non-zero pixels are foreground).
///
/// Components are returned in raster order of their first pixel.
pub fn external_components(binary: &GrayImage) -> Vec<ComponentBox> {
    let width = binary.width() as usize;
    let height = binary.height() as usize;
    let fg: Vec<bool> = binary.as_raw().iter().map(|&v| v > 0).collect();

    let outside = frame_connected_background(&fg, width, height);
    let mut visited = vec![false; width * height];
    let mut stack: Vec<usize> = Vec::new();
    let mut components = Vec::new();

    for start in 0..width * height {
        if !fg[start] || visited[start] {
            continue;
        }

        let sx = start % width;
        let external = sx == 0 || outside[start - 1];

        let (mut min_x, mut min_y) = (sx, start / width);
        let (mut max_x, mut max_y) = (min_x, min_y);
        let mut pixels = 0u32;

        visited[start] = true;
        stack.push(start);
        while let Some(idx) = stack.pop() {
            let (x, y) = (idx % width, idx / width);
            pixels += 1;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);

            for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                    let n = ny * width + nx;
                    if fg[n] && !visited[n] {
                        visited[n] = true;
                        stack.push(n);
                    }
                }
            }
        }

        if external {
            components.push(ComponentBox {
                x: min_x as u32,
                y: min_y as u32,
                width: (max_x - min_x + 1) as u32,
                height: (max_y - min_y + 1) as u32,
                pixels,
            });
        }
    }

    components
}

/// Marks background pixels 4-connected to the image frame.
fn frame_connected_background(fg: &[bool], width: usize, height: usize) -> Vec<bool> {
    let mut outside = vec![false; width * height];
    if width == 0 || height == 0 {
        return outside;
    }

    let mut stack: Vec<usize> = Vec::new();
    let seed = |idx: usize, outside: &mut [bool], stack: &mut Vec<usize>| {
        if !fg[idx] && !outside[idx] {
            outside[idx] = true;
            stack.push(idx);
        }
    };

    for x in 0..width {
        seed(x, &mut outside, &mut stack);
        seed((height - 1) * width + x, &mut outside, &mut stack);
    }
    for y in 0..height {
        seed(y * width, &mut outside, &mut stack);
        seed(y * width + width - 1, &mut outside, &mut stack);
    }

    while let Some(idx) = stack.pop() {
        let (x, y) = (idx % width, idx / width);
        if x > 0 {
            seed(idx - 1, &mut outside, &mut stack);
        }
        if x + 1 < width {
            seed(idx + 1, &mut outside, &mut stack);
        }
        if y > 0 {
            seed(idx - width, &mut outside, &mut stack);
        }
        if y + 1 < height {
            seed(idx + width, &mut outside, &mut stack);
        }
    }

    outside
}
