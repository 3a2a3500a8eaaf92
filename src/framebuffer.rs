// Packed 1-bit framebuffer for a 400x300 reflective panel.
// Layout is the wire format the display driver expects:
// row-major, MSB-first (bit 7 = leftmost pixel of each byte), 1 = ink, 0 = paper.

use crate::types::Color;

pub const WIDTH: i32 = 400;
pub const HEIGHT: i32 = 300;
pub const BYTES_PER_ROW: usize = (WIDTH as usize).div_ceil(8);
pub const BUFFER_SIZE: usize = BYTES_PER_ROW * HEIGHT as usize;

/// The one mutable pixel store every drawing call writes into.
/// Length is fixed at construction; nothing ever resizes it.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    buffer: Vec<u8>,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &WIDTH)
            .field("height", &HEIGHT)
            .field("ink_pixels", &self.count_ink())
            .finish()
    }
}

impl Framebuffer {
    pub const WIDTH: i32 = WIDTH;
    pub const HEIGHT: i32 = HEIGHT;
    pub const BYTES_PER_ROW: usize = BYTES_PER_ROW;

    /// All paper (white).
    pub fn new() -> Self {
        Self { buffer: vec![0u8; BUFFER_SIZE] }
    }

    #[inline]
    fn in_bounds(x: i32, y: i32) -> bool {
        (0..WIDTH).contains(&x) && (0..HEIGHT).contains(&y)
    }

    #[inline]
    fn index(x: i32, y: i32) -> (usize, u8) {
        let byte = y as usize * BYTES_PER_ROW + (x as usize >> 3);
        let bit = 0x80u8 >> (x & 7);
        (byte, bit)
    }

    /// Out-of-bounds writes are silently clipped.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if !Self::in_bounds(x, y) {
            return;
        }
        let (byte, bit) = Self::index(x, y);
        if color {
            self.buffer[byte] |= bit;
        } else {
            self.buffer[byte] &= !bit;
        }
    }

    /// `false` (paper) outside the panel.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> bool {
        if !Self::in_bounds(x, y) {
            return false;
        }
        let (byte, bit) = Self::index(x, y);
        self.buffer[byte] & bit != 0
    }

    pub fn clear(&mut self, color: Color) {
        self.buffer.fill(if color { 0xFF } else { 0x00 });
    }

    /// Fill `[x_start, x_end)` on row `y` using whole-byte writes where possible.
    /// Produces exactly the same bits as calling `set_pixel` for every x in the range.
    pub fn fill_span(&mut self, y: i32, x_start: i32, x_end: i32, color: Color) {
        if !(0..HEIGHT).contains(&y) {
            return;
        }
        let x_start = x_start.max(0);
        let x_end = x_end.min(WIDTH);
        if x_start >= x_end {
            return;
        }

        let row = y as usize * BYTES_PER_ROW;
        let start_byte = (x_start >> 3) as usize;
        let end_byte = ((x_end - 1) >> 3) as usize;
        let start_bit = (x_start & 7) as u32;
        let end_bit = ((x_end - 1) & 7) as u32;

        // Leading mask covers bits start_bit..=7 (counting from the left),
        // trailing mask covers bits 0..=end_bit.
        let lead = 0xFFu8 >> start_bit;
        let trail = 0xFFu8 << (7 - end_bit);

        if start_byte == end_byte {
            self.apply_mask(row + start_byte, lead & trail, color);
            return;
        }

        self.apply_mask(row + start_byte, lead, color);
        self.apply_mask(row + end_byte, trail, color);

        let fill = if color { 0xFF } else { 0x00 };
        self.buffer[row + start_byte + 1..row + end_byte].fill(fill);
    }

    #[inline]
    fn apply_mask(&mut self, idx: usize, mask: u8, color: Color) {
        if color {
            self.buffer[idx] |= mask;
        } else {
            self.buffer[idx] &= !mask;
        }
    }

    /// Raw packed bytes, the only view external consumers get.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// One packed row; `None` past the bottom edge.
    pub fn row(&self, y: i32) -> Option<&[u8]> {
        if !(0..HEIGHT).contains(&y) {
            return None;
        }
        let start = y as usize * BYTES_PER_ROW;
        Some(&self.buffer[start..start + BYTES_PER_ROW])
    }

    pub fn width(&self) -> i32 {
        WIDTH
    }

    pub fn height(&self) -> i32 {
        HEIGHT
    }

    /// Number of ink pixels on the panel.
    pub fn count_ink(&self) -> usize {
        self.buffer.iter().map(|b| b.count_ones() as usize).sum()
    }
}
