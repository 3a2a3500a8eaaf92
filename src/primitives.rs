// Geometric primitives: lines, polygons, rectangles and circles.
// Fills go through `Framebuffer::fill_span` so they cost O(bytes) per row.

use crate::framebuffer::Framebuffer;
use crate::types::{Color, Point};

/// Bresenham line, both endpoints included, all octants.
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);
    loop {
        fb.set_pixel(x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Closed outline through `points`; two points draw one segment, fewer draw nothing.
pub fn draw_polygon(fb: &mut Framebuffer, points: &[Point], color: Color) {
    if points.len() < 2 {
        return;
    }
    let n = points.len();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        draw_line(fb, a.x, a.y, b.x, b.y, color);
    }
}

/// X crossings of every non-horizontal edge with scanline `y`, sorted.
///
/// An edge (normalised so y0 < y1) counts when `y0 <= y < y1`. The half-open
/// test keeps shared vertices from being counted twice, and as a consequence
/// the polygon's bottom-most row is never filled.
pub(crate) fn scanline_crossings(points: &[Point], y: i32, out: &mut Vec<i32>) {
    out.clear();
    let n = points.len();
    for i in 0..n {
        let (mut a, mut b) = (points[i], points[(i + 1) % n]);
        if a.y == b.y {
            continue;
        }
        if a.y > b.y {
            std::mem::swap(&mut a, &mut b);
        }
        if a.y <= y && y < b.y {
            // i64 so far off-panel vertices cannot overflow; floor division
            // keeps negative slopes stable
            let (dy, run, rise) = (
                y as i64 - a.y as i64,
                b.x as i64 - a.x as i64,
                b.y as i64 - a.y as i64,
            );
            let x = a.x as i64 + (dy * run).div_euclid(rise);
            out.push(x.clamp(i32::MIN as i64, i32::MAX as i64) as i32);
        }
    }
    out.sort_unstable();
}

/// Clipped `[min_y, max_y]` rows a polygon can touch, `None` if off-panel.
pub(crate) fn scanline_rows(points: &[Point], height: i32) -> Option<(i32, i32)> {
    let min_y = points.iter().map(|p| p.y).min()?.max(0);
    let max_y = points.iter().map(|p| p.y).max()?.min(height - 1);
    (min_y <= max_y).then_some((min_y, max_y))
}

/// Rows `[y, y + h)` clipped to the panel; `None` when nothing is left.
pub(crate) fn clip_rows(y: i32, h: i32, height: i32) -> Option<std::ops::Range<i32>> {
    if h <= 0 {
        return None;
    }
    let rows = y.max(0)..y.saturating_add(h).min(height);
    (!rows.is_empty()).then_some(rows)
}

/// Scanline fill, even-odd rule. Needs at least 3 points.
pub fn fill_polygon(fb: &mut Framebuffer, points: &[Point], color: Color) {
    if points.len() < 3 {
        return;
    }
    let Some((min_y, max_y)) = scanline_rows(points, fb.height()) else {
        return;
    };
    let mut crossings = Vec::with_capacity(points.len());
    for y in min_y..=max_y {
        scanline_crossings(points, y, &mut crossings);
        for pair in crossings.chunks_exact(2) {
            fb.fill_span(y, pair[0], pair[1].saturating_add(1), color);
        }
    }
}

pub fn fill_rect(fb: &mut Framebuffer, x: i32, y: i32, w: i32, h: i32, color: Color) {
    let Some(rows) = clip_rows(y, h, fb.height()) else {
        return;
    };
    if w <= 0 {
        return;
    }
    let x_end = x.saturating_add(w);
    for row in rows {
        fb.fill_span(row, x, x_end, color);
    }
}

/// Midpoint circle outline. Radius 0 plots the centre, negative radius is a no-op.
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, r: i32, color: Color) {
    if r < 0 {
        return;
    }
    if r == 0 {
        fb.set_pixel(cx, cy, color);
        return;
    }
    let (mut x, mut y, mut d) = (r, 0, 1 - r);
    while x >= y {
        for (px, py) in [
            (cx + x, cy + y),
            (cx - x, cy + y),
            (cx + x, cy - y),
            (cx - x, cy - y),
            (cx + y, cy + x),
            (cx - y, cy + x),
            (cx + y, cy - x),
            (cx - y, cy - x),
        ] {
            fb.set_pixel(px, py, color);
        }
        y += 1;
        if d <= 0 {
            d += 2 * y + 1;
        } else {
            x -= 1;
            d += 2 * y - 2 * x + 1;
        }
    }
}

/// Midpoint circle filled with four spans per step.
pub fn fill_circle(fb: &mut Framebuffer, cx: i32, cy: i32, r: i32, color: Color) {
    if r < 0 {
        return;
    }
    if r == 0 {
        fb.set_pixel(cx, cy, color);
        return;
    }
    let (mut x, mut y, mut d) = (r, 0, 1 - r);
    while x >= y {
        fb.fill_span(cy + y, cx - x, cx + x + 1, color);
        fb.fill_span(cy - y, cx - x, cx + x + 1, color);
        fb.fill_span(cy + x, cx - y, cx + y + 1, color);
        fb.fill_span(cy - x, cx - y, cx + y + 1, color);
        y += 1;
        if d <= 0 {
            d += 2 * y + 1;
        } else {
            x -= 1;
            d += 2 * y - 2 * x + 1;
        }
    }
}
