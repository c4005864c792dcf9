//! Rasterizes scenes onto an RGB canvas.
//!
//! Segments are clipped to the canvas (plus a margin for the brush), then
//! stepped with Bresenham's algorithm, stamping a filled disc as wide as
//! the bolt's intensity at every step.

use bolt_core::scene::{Frame, Scene};
use image::{Rgb, RgbImage};

/// Draws every bolt of `scene` onto `canvas`, main bolt first.
pub fn draw_scene(canvas: &mut RgbImage, scene: &Scene, color: Rgb<u8>) {
    for bolt in scene.bolts() {
        for quad in bolt.quadruples() {
            draw_segment(canvas, quad, bolt.intensity(), color);
        }
    }
}

/// Returns a copy of `background` with `scene` drawn over it.
pub fn render_scene(background: &RgbImage, scene: &Scene, color: Rgb<u8>) -> RgbImage {
    let mut canvas = background.clone();
    draw_scene(&mut canvas, scene, color);
    canvas
}

/// One image per frame: flashes carry their strike, blanks are the plain background.
pub fn render_frames(background: &RgbImage, frames: &[Frame], color: Rgb<u8>) -> Vec<RgbImage> {
    frames
        .iter()
        .map(|frame| match frame.scene() {
            Some(scene) => render_scene(background, scene, color),
            None => background.clone(),
        })
        .collect()
}

/// Draws the segment `(x0, y0, x1, y1)` as a line `width` pixels wide.
pub fn draw_segment(
    canvas: &mut RgbImage,
    segment: (f64, f64, f64, f64),
    width: u32,
    color: Rgb<u8>,
) {
    let width = width.max(1);
    let margin = width as f64;
    let Some((x0, y0, x1, y1)) = clip_segment(
        segment,
        -margin,
        -margin,
        canvas.width() as f64 - 1.0 + margin,
        canvas.height() as f64 - 1.0 + margin,
    ) else {
        return;
    };

    let (mut x, mut y) = (x0.round() as i64, y0.round() as i64);
    let (x1, y1) = (x1.round() as i64, y1.round() as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        stamp(canvas, x, y, width, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Fills a disc `width` pixels across centred on `(cx, cy)`, skipping
/// pixels outside the canvas. Even widths are centred half a pixel down
/// and right.
fn stamp(canvas: &mut RgbImage, cx: i64, cy: i64, width: u32, color: Rgb<u8>) {
    let lo = -((width as i64 - 1) / 2);
    let hi = width as i64 / 2;
    let centre = (lo + hi) as f64 / 2.0;
    let r2 = (width as f64 / 2.0).powi(2);
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);

    for dy in lo..=hi {
        let y = cy + dy;
        if !(0..h).contains(&y) {
            continue;
        }
        let fy = dy as f64 - centre;
        for dx in lo..=hi {
            let x = cx + dx;
            let fx = dx as f64 - centre;
            if (0..w).contains(&x) && fx * fx + fy * fy <= r2 {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Liang-Barsky clipping of a segment against an axis-aligned rectangle.
///
/// Returns `None` when the segment misses the rectangle or has a
/// non-finite coordinate.
fn clip_segment(
    (x0, y0, x1, y1): (f64, f64, f64, f64),
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
) -> Option<(f64, f64, f64, f64)> {
    if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
        return None;
    }

    let (dx, dy) = (x1 - x0, y1 - y0);
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    for (p, q) in [
        (-dx, x0 - xmin),
        (dx, xmax - x0),
        (-dy, y0 - ymin),
        (dy, ymax - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((x0 + t0 * dx, y0 + t0 * dy, x0 + t1 * dx, y0 + t1 * dy))
}
