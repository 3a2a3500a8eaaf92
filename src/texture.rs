// Texture balls: tiny 1-bit bitmaps stamped along a path as an ink brush.
// Tables are compile-time constants; a stamp never mutates its texture.

use crate::framebuffer::Framebuffer;
use crate::types::round_half_even;

/// Immutable boolean bitmap, row-major, `true` = ink, `false` = transparent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Texture<'a> {
    width: usize,
    height: usize,
    pixels: &'a [bool],
}

impl<'a> Texture<'a> {
    /// `None` when `pixels` does not hold exactly `width * height` cells.
    pub const fn new(width: usize, height: usize, pixels: &'a [bool]) -> Option<Self> {
        if pixels.len() != width * height {
            return None;
        }
        Some(Self { width, height, pixels })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[y * self.width + x]
    }

    pub fn ink_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    /// Stamp centred on (cx, cy), each cell rotated about the bitmap centre by
    /// the angle whose cosine/sine are given. Only inks; transparent cells are skipped.
    /// A non-finite centre or rotation draws nothing.
    pub fn stamp(&self, fb: &mut Framebuffer, cx: f64, cy: f64, cos_t: f64, sin_t: f64) {
        if ![cx, cy, cos_t, sin_t].iter().all(|v| v.is_finite()) {
            return;
        }
        let half_w = self.width as f64 / 2.0;
        let half_h = self.height as f64 / 2.0;
        for ty in 0..self.height {
            for tx in 0..self.width {
                if !self.pixels[ty * self.width + tx] {
                    continue;
                }
                // sample at the cell centre
                let dx = tx as f64 - half_w + 0.5;
                let dy = ty as f64 - half_h + 0.5;
                let rx = dx * cos_t - dy * sin_t;
                let ry = dx * sin_t + dy * cos_t;
                let (px, py) = (cx + rx, cy + ry);
                // finite inputs can still sum to infinity
                if px.is_finite() && py.is_finite() {
                    fb.set_pixel(round_half_even(px), round_half_even(py), true);
                }
            }
        }
    }
}

// '#' = ink, anything else = transparent.
const fn parse_rows<const N: usize>(rows: &[u8]) -> [bool; N] {
    let mut out = [false; N];
    let mut i = 0;
    let mut j = 0;
    while i < rows.len() && j < N {
        match rows[i] {
            b'#' => {
                out[j] = true;
                j += 1;
            }
            b'.' => j += 1,
            _ => {}
        }
        i += 1;
    }
    out
}

const HEAVY_PIXELS: [bool; 64] = parse_rows(
    b"..####..
      .######.
      ###.####
      #####.##
      ##.#####
      ####.###
      .######.
      ..####..",
);

const FINE_PIXELS: [bool; 36] = parse_rows(
    b".####.
      ######
      ##..##
      ##..##
      ######
      .####.",
);

/// Default 8x8 scribble ball: irregular holes give strokes a hand-drawn grain.
pub const DEFAULT_BALL_8X8: Texture<'static> = Texture { width: 8, height: 8, pixels: &HEAVY_PIXELS };

/// Tighter 6x6 ring for thin outlines.
pub const FINE_BRUSH_6X6: Texture<'static> = Texture { width: 6, height: 6, pixels: &FINE_PIXELS };

/// Named brush tips.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Brush {
    #[default]
    Heavy,
    Fine,
}

impl Brush {
    pub const fn texture(self) -> Texture<'static> {
        match self {
            Brush::Heavy => DEFAULT_BALL_8X8,
            Brush::Fine => FINE_BRUSH_6X6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_parse() {
        assert_eq!(DEFAULT_BALL_8X8.width(), 8);
        assert_eq!(DEFAULT_BALL_8X8.ink_count(), 48);
        assert!(!DEFAULT_BALL_8X8.get(0, 0));
        assert!(DEFAULT_BALL_8X8.get(2, 0));
        assert!(!DEFAULT_BALL_8X8.get(3, 2));
        assert_eq!(FINE_BRUSH_6X6.ink_count(), 28);
        assert_eq!(Brush::default().texture(), DEFAULT_BALL_8X8);
    }

    #[test]
    fn new_checks_length() {
        static CELLS: [bool; 4] = [true, false, false, true];
        assert!(Texture::new(2, 2, &CELLS).is_some());
        assert!(Texture::new(3, 2, &CELLS).is_none());
        assert!(!Texture::new(2, 2, &CELLS).unwrap().get(5, 0));
    }

    #[test]
    fn unrotated_stamp_copies_bitmap() {
        let mut fb = Framebuffer::new();
        // half-pixel centre puts every cell on an exact integer
        DEFAULT_BALL_8X8.stamp(&mut fb, 100.5, 100.5, 1.0, 0.0);
        for ty in 0..8 {
            for tx in 0..8 {
                let x = 97 + tx as i32;
                let y = 97 + ty as i32;
                assert_eq!(fb.get_pixel(x, y), DEFAULT_BALL_8X8.get(tx, ty), "cell ({tx},{ty})");
            }
        }
        assert_eq!(fb.count_ink(), 48);
    }

    #[test]
    fn quarter_turn_transposes() {
        let mut fb = Framebuffer::new();
        FINE_BRUSH_6X6.stamp(&mut fb, 50.5, 50.5, 0.0, 1.0);
        assert_eq!(fb.count_ink(), FINE_BRUSH_6X6.ink_count());
    }

    #[test]
    fn stamp_clips_at_edges() {
        let mut fb = Framebuffer::new();
        DEFAULT_BALL_8X8.stamp(&mut fb, 0.0, 0.0, 1.0, 0.0);
        assert!(fb.count_ink() > 0);
        assert!(fb.count_ink() < 48);
    }

    #[test]
    fn non_finite_stamp_is_dropped() {
        let mut fb = Framebuffer::new();
        DEFAULT_BALL_8X8.stamp(&mut fb, f64::NAN, 10.0, 1.0, 0.0);
        DEFAULT_BALL_8X8.stamp(&mut fb, 10.0, f64::INFINITY, 1.0, 0.0);
        DEFAULT_BALL_8X8.stamp(&mut fb, 10.0, 10.0, f64::NAN, 0.0);
        DEFAULT_BALL_8X8.stamp(&mut fb, f64::MAX, 10.0, 1.0, 0.0);
        assert_eq!(fb.count_ink(), 0);
    }
}
