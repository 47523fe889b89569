/// Triangle fill with depth testing, and integer line drawing
use nalgebra::{Vector2, Vector3};

use crate::color::Color;
use crate::framebuffer::{Canvas, DepthBuffer};

/// Triangles whose doubled screen area is below this draw nothing.
const DEGENERATE_AREA: f32 = 1e-2;

/// Barycentric coordinates of `p` relative to triangle `abc` in 2D.
///
/// Returns `None` for a (nearly) zero-area triangle. The weights are
/// ordered to match `a`, `b`, `c`.
pub fn barycentric(
    a: Vector2<f32>,
    b: Vector2<f32>,
    c: Vector2<f32>,
    p: Vector2<f32>,
) -> Option<Vector3<f32>> {
    let u = Vector3::new(c.x - a.x, b.x - a.x, a.x - p.x)
        .cross(&Vector3::new(c.y - a.y, b.y - a.y, a.y - p.y));
    if u.z.abs() < DEGENERATE_AREA {
        return None;
    }
    Some(Vector3::new(1.0 - (u.x + u.y) / u.z, u.y / u.z, u.x / u.z))
}

/// Fill a screen-space triangle with a flat color.
///
/// Each point carries x,y in pixels and z in viewport depth. A pixel is
/// drawn when all barycentric weights are non-negative (edges included)
/// and its interpolated depth beats the depth buffer. Returns the number
/// of pixels written.
pub fn triangle<C: Canvas>(
    pts: &[Vector3<f32>; 3],
    depth: &mut DepthBuffer,
    canvas: &mut C,
    color: Color,
) -> usize {
    if pts.iter().any(|p| !p.iter().all(|c| c.is_finite())) {
        return 0;
    }
    let width = canvas.width().min(depth.width()) as i32;
    let height = canvas.height().min(depth.height()) as i32;
    if width == 0 || height == 0 {
        return 0;
    }

    // Bounding box, clipped to the screen
    let min_x = pts.iter().map(|p| p.x).fold(f32::INFINITY, f32::min).floor() as i32;
    let max_x = pts.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;
    let min_y = pts.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor() as i32;
    let max_y = pts.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;

    let min_x = min_x.max(0);
    let max_x = max_x.min(width - 1);
    let min_y = min_y.max(0);
    let max_y = max_y.min(height - 1);

    let (a, b, c) = (pts[0].xy(), pts[1].xy(), pts[2].xy());
    let z = Vector3::new(pts[0].z, pts[1].z, pts[2].z);
    let mut written = 0;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let Some(bc) = barycentric(a, b, c, Vector2::new(x as f32, y as f32)) else {
                continue;
            };
            if bc.x < 0.0 || bc.y < 0.0 || bc.z < 0.0 {
                continue;
            }
            if depth.test_and_set(x as usize, y as usize, z.dot(&bc)) {
                canvas.set(x, y, color);
                written += 1;
            }
        }
    }

    written
}

/// Draw a one pixel wide line between two integer points.
///
/// Integer Bresenham with doubled error terms. The pixel set does not
/// depend on the order of the endpoints. Arithmetic runs in i64 so any
/// pair of i32 endpoints is valid, and the major axis is clipped to the
/// canvas before stepping.
pub fn line<C: Canvas>(x0: i32, y0: i32, x1: i32, y1: i32, canvas: &mut C, color: Color) {
    let (mut x0, mut y0, mut x1, mut y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
    let steep = (x0 - x1).abs() < (y0 - y1).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let extent = if steep { canvas.height() } else { canvas.width() };
    let last = i64::try_from(extent).unwrap_or(i64::MAX).saturating_sub(1);
    let (start, end) = (x0.max(0), x1.min(last));
    if start > end {
        return;
    }

    let dx = x1 - x0;
    let derror2 = (y1 - y0).abs() * 2;
    let step = if y1 > y0 { 1 } else { -1 };

    // Error state after the first `start - x0` steps; error2 stays in (-dx, dx]
    let skipped = (start - x0) as i128 * derror2 as i128;
    let steps = if dx == 0 {
        0
    } else {
        -(-(skipped - dx as i128)).div_euclid(2 * dx as i128)
    };
    let mut error2 = (skipped - steps * 2 * dx as i128) as i64;
    let mut y = y0 + step * steps as i64;

    for x in start..=end {
        if steep {
            canvas.set(y as i32, x as i32, color);
        } else {
            canvas.set(x as i32, y as i32, color);
        }
        error2 += derror2;
        if error2 > dx {
            y += step;
            error2 -= dx * 2;
        }
    }
}
