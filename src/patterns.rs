// Ordered (Bayer 4x4) dithering for pseudo-grey fills on a 1-bit panel.
// Patterns tile from the panel origin, never from the shape, so two dithered
// shapes that share an edge line up without seams.

use crate::framebuffer::Framebuffer;
use crate::primitives::{clip_rows, scanline_crossings, scanline_rows};
use crate::types::Point;

/// 4x4 Bayer threshold matrix, each of 0..=15 exactly once.
pub const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Fill density levels, darkest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    SolidBlack,
    Dense,
    Medium,
    Sparse,
    SolidWhite,
}

impl Pattern {
    pub const ALL: [Pattern; 5] = [
        Pattern::SolidBlack,
        Pattern::Dense,
        Pattern::Medium,
        Pattern::Sparse,
        Pattern::SolidWhite,
    ];

    /// A cell is inked when its Bayer value is below this threshold.
    pub const fn threshold(self) -> u8 {
        match self {
            Pattern::SolidBlack => 16,
            Pattern::Dense => 12,
            Pattern::Medium => 8,
            Pattern::Sparse => 4,
            Pattern::SolidWhite => 0,
        }
    }
}

/// Should the pixel at panel coordinates (x, y) be inked for `level`?
#[inline]
pub fn pattern_test(level: Pattern, x: i32, y: i32) -> bool {
    BAYER_4X4[(y & 3) as usize][(x & 3) as usize] < level.threshold()
}

/// Scanline polygon fill (same edge rules as `fill_polygon`) that only inks
/// pixels passing `pattern_test`. Paper pixels inside the shape are left alone.
pub fn fill_polygon_pattern(fb: &mut Framebuffer, points: &[Point], level: Pattern) {
    if points.len() < 3 || level == Pattern::SolidWhite {
        return;
    }
    let Some((min_y, max_y)) = scanline_rows(points, fb.height()) else {
        return;
    };
    let mut crossings = Vec::with_capacity(points.len());
    for y in min_y..=max_y {
        scanline_crossings(points, y, &mut crossings);
        for pair in crossings.chunks_exact(2) {
            pattern_span(fb, y, pair[0], pair[1].saturating_add(1), level);
        }
    }
}

pub fn fill_rect_pattern(fb: &mut Framebuffer, x: i32, y: i32, w: i32, h: i32, level: Pattern) {
    if w <= 0 || level == Pattern::SolidWhite {
        return;
    }
    let Some(rows) = clip_rows(y, h, fb.height()) else {
        return;
    };
    let x_end = x.saturating_add(w);
    for row in rows {
        pattern_span(fb, row, x, x_end, level);
    }
}

/// Dithered disc, same span walk as `fill_circle`.
pub fn fill_circle_pattern(fb: &mut Framebuffer, cx: i32, cy: i32, r: i32, level: Pattern) {
    if r < 0 || level == Pattern::SolidWhite {
        return;
    }
    if r == 0 {
        pattern_span(fb, cy, cx, cx + 1, level);
        return;
    }
    let (mut x, mut y, mut d) = (r, 0, 1 - r);
    while x >= y {
        pattern_span(fb, cy + y, cx - x, cx + x + 1, level);
        pattern_span(fb, cy - y, cx - x, cx + x + 1, level);
        pattern_span(fb, cy + x, cx - y, cx + y + 1, level);
        pattern_span(fb, cy - x, cx - y, cx + y + 1, level);
        y += 1;
        if d <= 0 {
            d += 2 * y + 1;
        } else {
            x -= 1;
            d += 2 * y - 2 * x + 1;
        }
    }
}

// Ink [x_start, x_end) on row y where the pattern allows it.
fn pattern_span(fb: &mut Framebuffer, y: i32, x_start: i32, x_end: i32, level: Pattern) {
    if level == Pattern::SolidBlack {
        fb.fill_span(y, x_start, x_end, true);
        return;
    }
    let x_start = x_start.max(0);
    let x_end = x_end.min(fb.width());
    for x in x_start..x_end {
        if pattern_test(level, x, y) {
            fb.set_pixel(x, y, true);
        }
    }
}
