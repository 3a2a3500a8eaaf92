// Stroke-based vector font.
//
// Every glyph is a set of polylines in a 0-100 unit square, scaled into the
// destination box at draw time. The look is angular: straight segments with
// 15-unit corner cuts, bold enough for a 1-bit panel at any size.
//
// Layout contract: `get_string_width` is the authoritative measurement and
// uses the same per-character advance as `render_string`.

use crate::framebuffer::Framebuffer;
use crate::primitives::draw_line;
use crate::types::{BLACK, Color, round_half_even};

/// One connected polyline, points in 0-100 units.
pub type Stroke = &'static [(i32, i32)];

/// Look up the strokes for `c`; `None` for characters the font does not cover.
pub fn glyph(c: char) -> Option<&'static [Stroke]> {
    let strokes: &'static [Stroke] = match c {
        '0' => &[&[(20, 10), (80, 10), (95, 25), (95, 75), (80, 90), (20, 90), (5, 75), (5, 25), (20, 10)]],
        '1' => &[&[(30, 20), (50, 10), (50, 90)], &[(30, 90), (70, 90)]],
        '2' => &[&[(10, 25), (25, 10), (75, 10), (90, 25), (90, 40), (10, 75), (10, 90), (90, 90)]],
        '3' => &[
            &[(10, 10), (80, 10), (90, 20), (90, 40), (75, 50)],
            &[(45, 50), (75, 50)],
            &[(75, 50), (90, 60), (90, 80), (80, 90), (10, 90)],
        ],
        '4' => &[&[(70, 10), (70, 90)], &[(10, 60), (90, 60)], &[(10, 60), (70, 10)]],
        '5' => &[&[(85, 10), (15, 10), (10, 15), (10, 45), (20, 50), (75, 50), (90, 60), (90, 80), (75, 90), (10, 90)]],
        '6' => &[&[(80, 10), (25, 10), (10, 25), (10, 75), (25, 90), (75, 90), (90, 75), (90, 55), (75, 45), (10, 45)]],
        '7' => &[&[(10, 10), (90, 10), (90, 20), (45, 90)], &[(30, 50), (70, 50)]],
        '8' => &[
            &[(25, 10), (75, 10), (90, 20), (90, 40), (75, 50), (25, 50), (10, 40), (10, 20), (25, 10)],
            &[(25, 50), (75, 50), (90, 60), (90, 80), (75, 90), (25, 90), (10, 80), (10, 60), (25, 50)],
        ],
        '9' => &[&[(90, 55), (25, 55), (10, 45), (10, 25), (25, 10), (75, 10), (90, 25), (90, 75), (75, 90), (20, 90)]],

        // two small diamonds
        ':' => &[
            &[(50, 25), (58, 33), (50, 41), (42, 33), (50, 25)],
            &[(50, 59), (58, 67), (50, 75), (42, 67), (50, 59)],
        ],
        '-' => &[&[(15, 50), (85, 50)]],
        '.' => &[&[(50, 80), (58, 85), (50, 90), (42, 85), (50, 80)]],
        '/' => &[&[(85, 10), (15, 90)]],
        '°' => &[&[(30, 10), (70, 10), (85, 25), (85, 40), (70, 55), (30, 55), (15, 40), (15, 25), (30, 10)]],
        '%' => &[
            &[(85, 10), (15, 90)],
            &[(15, 10), (35, 10), (40, 15), (40, 30), (35, 35), (15, 35), (10, 30), (10, 15), (15, 10)],
            &[(65, 65), (85, 65), (90, 70), (90, 85), (85, 90), (65, 90), (60, 85), (60, 70), (65, 65)],
        ],

        'A' => &[&[(5, 90), (5, 75), (20, 10), (80, 10), (95, 75), (95, 90)], &[(20, 60), (80, 60)]],
        'B' => &[
            &[(10, 10), (10, 90), (75, 90), (90, 75), (90, 55), (75, 45)],
            &[(10, 45), (75, 45), (90, 35), (90, 20), (75, 10), (10, 10)],
        ],
        'C' => &[&[(90, 25), (75, 10), (25, 10), (10, 25), (10, 75), (25, 90), (75, 90), (90, 75)]],
        'D' => &[&[(10, 10), (10, 90), (70, 90), (90, 70), (90, 30), (70, 10), (10, 10)]],
        'E' => &[&[(90, 10), (10, 10), (10, 90), (90, 90)], &[(10, 50), (70, 50)]],
        'F' => &[&[(90, 10), (10, 10), (10, 90)], &[(10, 50), (70, 50)]],
        'G' => &[&[(90, 25), (75, 10), (25, 10), (10, 25), (10, 75), (25, 90), (75, 90), (90, 75), (90, 50), (50, 50)]],
        'H' => &[&[(10, 10), (10, 90)], &[(90, 10), (90, 90)], &[(10, 50), (90, 50)]],
        'I' => &[&[(30, 10), (70, 10)], &[(50, 10), (50, 90)], &[(30, 90), (70, 90)]],
        'J' => &[&[(30, 10), (90, 10)], &[(70, 10), (70, 75), (55, 90), (25, 90), (10, 75)]],
        'K' => &[&[(10, 10), (10, 90)], &[(90, 10), (10, 50), (90, 90)]],
        'L' => &[&[(10, 10), (10, 90), (90, 90)]],
        'M' => &[&[(5, 90), (5, 20), (15, 10), (50, 45), (85, 10), (95, 20), (95, 90)]],
        'N' => &[&[(10, 90), (10, 20), (20, 10), (90, 80), (90, 10)]],
        'O' => &[&[(20, 10), (80, 10), (95, 25), (95, 75), (80, 90), (20, 90), (5, 75), (5, 25), (20, 10)]],
        'P' => &[&[(10, 90), (10, 10), (75, 10), (90, 25), (90, 40), (75, 55), (10, 55)]],
        'Q' => &[
            &[(20, 10), (80, 10), (95, 25), (95, 75), (80, 90), (20, 90), (5, 75), (5, 25), (20, 10)],
            &[(60, 65), (95, 95)],
        ],
        'R' => &[&[(10, 90), (10, 10), (75, 10), (90, 25), (90, 40), (75, 55), (10, 55)], &[(55, 55), (90, 90)]],
        'S' => &[&[
            (90, 25), (75, 10), (25, 10), (10, 25), (10, 40), (25, 50),
            (75, 50), (90, 60), (90, 75), (75, 90), (25, 90), (10, 75),
        ]],
        'T' => &[&[(10, 10), (90, 10)], &[(50, 10), (50, 90)]],
        'U' => &[&[(10, 10), (10, 75), (25, 90), (75, 90), (90, 75), (90, 10)]],
        'V' => &[&[(5, 10), (50, 90), (95, 10)]],
        'W' => &[&[(5, 10), (20, 90), (50, 55), (80, 90), (95, 10)]],
        'X' => &[&[(10, 10), (90, 90)], &[(90, 10), (10, 90)]],
        'Y' => &[&[(10, 10), (50, 50), (90, 10)], &[(50, 50), (50, 90)]],
        'Z' => &[&[(10, 10), (90, 10), (10, 90), (90, 90)]],
        _ => return None,
    };
    Some(strokes)
}

/// Horizontal box width for `c` given the nominal `char_width`.
/// Punctuation is narrowed; letters, digits, `%` and unknown characters take the full width.
pub fn char_advance(c: char, char_width: i32) -> i32 {
    match c {
        ':' | '/' | ' ' => char_width / 2,
        '.' | '°' => char_width / 3,
        '-' => char_width * 2 / 3,
        _ => char_width,
    }
}

/// Text drawing parameters with the defaults the clock faces use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    pub char_width: i32,
    pub char_height: i32,
    /// Gap between characters on a line.
    pub spacing: i32,
    pub stroke_width: i32,
    pub color: Color,
    /// Gap between lines in `render_multiline`.
    pub line_spacing: i32,
}

impl TextStyle {
    pub const fn new(char_width: i32, char_height: i32) -> Self {
        Self {
            char_width,
            char_height,
            spacing: 4,
            stroke_width: 2,
            color: BLACK,
            line_spacing: 8,
        }
    }

    pub const fn spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    pub const fn stroke_width(mut self, stroke_width: i32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub const fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub const fn line_spacing(mut self, line_spacing: i32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    /// Rendered width of `text` in this style.
    pub fn measure(&self, text: &str) -> i32 {
        get_string_width(text, self.char_width, self.spacing)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Line with a stroke width, built from `stroke_width` parallel Bresenham lines
/// offset along the unit normal and spread over `[-(w-1)/2, (w-1)/2]`.
/// A zero-length segment becomes a `w x w` block.
pub fn draw_thick_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, stroke_width: i32, color: Color) {
    if stroke_width <= 1 {
        draw_line(fb, x0, y0, x1, y1, color);
        return;
    }

    let dx = (x1 - x0) as f64;
    let dy = (y1 - y0) as f64;
    let length = (dx * dx + dy * dy).sqrt();

    if length < 0.001 {
        let lo = -(stroke_width / 2);
        for oy in lo..lo + stroke_width {
            fb.fill_span(y0 + oy, x0 + lo, x0 + lo + stroke_width, color);
        }
        return;
    }

    let (nx, ny) = (-dy / length, dx / length);
    let half = (stroke_width - 1) as f64 / 2.0;
    for i in 0..stroke_width {
        let offset = i as f64 - half;
        let ox = round_half_even(nx * offset);
        let oy = round_half_even(ny * offset);
        draw_line(fb, x0 + ox, y0 + oy, x1 + ox, y1 + oy, color);
    }
}

/// Draw `c` scaled into the box at (x, y) of size w x h. Unknown characters draw nothing.
#[allow(clippy::too_many_arguments)]
pub fn render_glyph(fb: &mut Framebuffer, c: char, x: i32, y: i32, w: i32, h: i32, stroke_width: i32, color: Color) {
    let Some(strokes) = glyph(c) else {
        return;
    };
    let scale = |(px, py): (i32, i32)| (x + px * w / 100, y + py * h / 100);

    for stroke in strokes {
        for seg in stroke.windows(2) {
            let (ax, ay) = scale(seg[0]);
            let (bx, by) = scale(seg[1]);
            draw_thick_line(fb, ax, ay, bx, by, stroke_width, color);
        }
    }
}

/// Left-aligned string starting at (x, y).
pub fn render_string(fb: &mut Framebuffer, text: &str, x: i32, y: i32, style: &TextStyle) {
    let mut cursor = x;
    for c in text.chars() {
        let width = char_advance(c, style.char_width);
        if glyph(c).is_some() {
            render_glyph(fb, c, cursor, y, width, style.char_height, style.stroke_width, style.color);
            cursor += width + style.spacing;
        } else if c == ' ' {
            cursor += width + style.spacing;
        } else {
            // keep the layout stable even for characters we cannot draw
            cursor += style.char_width + style.spacing;
        }
    }
}

/// Total width of `text`: per-character advances plus `spacing` between
/// characters (none after the last).
pub fn get_string_width(text: &str, char_width: i32, spacing: i32) -> i32 {
    let count = text.chars().count() as i32;
    if count == 0 {
        return 0;
    }
    let width: i32 = text.chars().map(|c| char_advance(c, char_width)).sum();
    width + spacing * (count - 1)
}

pub fn render_string_centered(fb: &mut Framebuffer, text: &str, center_x: i32, y: i32, style: &TextStyle) {
    let x = center_x - style.measure(text) / 2;
    render_string(fb, text, x, y, style);
}

pub fn render_string_right(fb: &mut Framebuffer, text: &str, right_x: i32, y: i32, style: &TextStyle) {
    let x = right_x - style.measure(text);
    render_string(fb, text, x, y, style);
}

/// Stack `lines` downward by `char_height + line_spacing`, each aligned on its own
/// against `x` (left edge, centre or right edge depending on `align`).
pub fn render_multiline(fb: &mut Framebuffer, lines: &[&str], x: i32, y: i32, style: &TextStyle, align: Align) {
    let mut line_y = y;
    for line in lines {
        match align {
            Align::Left => render_string(fb, line, x, line_y, style),
            Align::Center => render_string_centered(fb, line, x, line_y, style),
            Align::Right => render_string_right(fb, line, x, line_y, style),
        }
        line_y += style.char_height + style.line_spacing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ink_columns(fb: &Framebuffer) -> Option<(i32, i32)> {
        let cols: Vec<i32> = (0..fb.width())
            .filter(|&x| (0..fb.height()).any(|y| fb.get_pixel(x, y)))
            .collect();
        Some((*cols.first()?, *cols.last()?))
    }

    #[test]
    fn table_covers_the_character_set() {
        for c in ('0'..='9').chain('A'..='Z').chain([':', '-', '.', '/', '°', '%']) {
            let strokes = glyph(c).unwrap_or_else(|| panic!("missing glyph {c:?}"));
            assert!(!strokes.is_empty());
            for stroke in strokes {
                assert!(stroke.len() >= 2);
                assert!(stroke.iter().all(|&(x, y)| (0..=100).contains(&x) && (0..=100).contains(&y)));
            }
        }
        assert!(glyph('@').is_none());
        assert!(glyph(' ').is_none());
        assert!(glyph('a').is_none());
    }

    #[test]
    fn advance_ratios() {
        assert_eq!(char_advance('A', 30), 30);
        assert_eq!(char_advance('0', 30), 30);
        assert_eq!(char_advance(':', 30), 15);
        assert_eq!(char_advance('.', 30), 10);
        assert_eq!(char_advance('-', 30), 20);
        assert_eq!(char_advance('/', 30), 15);
        assert_eq!(char_advance('°', 30), 10);
        assert_eq!(char_advance('%', 30), 30);
        assert_eq!(char_advance(' ', 30), 15);
        assert_eq!(char_advance('@', 30), 30);
    }

    #[test]
    fn string_widths() {
        assert_eq!(get_string_width("", 30, 4), 0);
        assert_eq!(get_string_width("5", 30, 0), 30);
        assert_eq!(get_string_width("12", 30, 4), 64);
        assert_eq!(get_string_width("12:34", 30, 4), 151);
        assert_eq!(get_string_width("1 2", 30, 4), 83);
        assert_eq!(get_string_width("25°C", 30, 4), 112);
        assert_eq!(get_string_width("ABC", 30, 4), 98);
        assert_eq!(TextStyle::new(30, 50).measure("12:34"), 151);
    }

    #[test]
    fn thick_line_widths() {
        let mut fb = Framebuffer::new();
        draw_thick_line(&mut fb, 10, 10, 20, 10, 1, true);
        assert!((10..=20).all(|x| fb.get_pixel(x, 10)));
        assert_eq!(fb.count_ink(), 11);

        let mut fb = Framebuffer::new();
        draw_thick_line(&mut fb, 10, 50, 30, 50, 3, true);
        for y in 49..=51 {
            assert!((10..=30).all(|x| fb.get_pixel(x, y)), "row {y}");
        }
        assert_eq!(fb.count_ink(), 21 * 3);

        let mut fb = Framebuffer::new();
        draw_thick_line(&mut fb, 50, 10, 50, 30, 3, true);
        for x in 49..=51 {
            assert!((10..=30).all(|y| fb.get_pixel(x, y)), "column {x}");
        }
    }

    #[test]
    fn zero_length_thick_line_is_a_block() {
        let mut fb = Framebuffer::new();
        draw_thick_line(&mut fb, 50, 50, 50, 50, 3, true);
        assert_eq!(fb.count_ink(), 9);
        assert!(fb.get_pixel(49, 49) && fb.get_pixel(51, 51));

        let mut fb = Framebuffer::new();
        draw_thick_line(&mut fb, 50, 50, 50, 50, 4, true);
        assert_eq!(fb.count_ink(), 16);
        assert!(fb.get_pixel(48, 48) && fb.get_pixel(51, 51));
    }

    #[test]
    fn unknown_glyph_draws_nothing() {
        let mut fb = Framebuffer::new();
        render_glyph(&mut fb, '@', 10, 10, 50, 80, 2, true);
        assert_eq!(fb.count_ink(), 0);
    }

    #[test]
    fn glyph_stays_in_its_box() {
        let mut fb = Framebuffer::new();
        render_glyph(&mut fb, '8', 100, 100, 40, 60, 1, true);
        assert!(fb.count_ink() > 0);
        for y in 0..300 {
            for x in 0..400 {
                if fb.get_pixel(x, y) {
                    assert!((100..=140).contains(&x) && (100..=160).contains(&y));
                }
            }
        }
    }

    #[test]
    fn wider_strokes_use_more_ink() {
        let mut thin = Framebuffer::new();
        let mut thick = Framebuffer::new();
        render_glyph(&mut thin, '0', 10, 10, 50, 80, 1, true);
        render_glyph(&mut thick, '0', 10, 10, 50, 80, 3, true);
        assert!(thick.count_ink() > thin.count_ink());
    }

    #[test]
    fn unknown_characters_still_advance() {
        let style = TextStyle::new(30, 50).stroke_width(1);
        let mut a = Framebuffer::new();
        let mut b = Framebuffer::new();
        render_string(&mut a, "1@1", 10, 10, &style);
        render_string(&mut b, "1", 10, 10, &style);
        render_string(&mut b, "1", 10 + 2 * (30 + 4), 10, &style);
        assert_eq!(a, b);
    }

    #[test]
    fn spacing_and_spaces_push_text_right() {
        let mut a = Framebuffer::new();
        let mut b = Framebuffer::new();
        render_string(&mut a, "12", 10, 10, &TextStyle::new(30, 50).spacing(2));
        render_string(&mut b, "12", 10, 10, &TextStyle::new(30, 50).spacing(20));
        assert!(ink_columns(&b).unwrap().1 > ink_columns(&a).unwrap().1);

        let mut c = Framebuffer::new();
        render_string(&mut c, "1 2", 10, 10, &TextStyle::new(30, 50).spacing(2));
        assert!(ink_columns(&c).unwrap().1 > ink_columns(&a).unwrap().1);
    }

    #[test]
    fn string_white_on_black() {
        let mut fb = Framebuffer::new();
        fb.clear(true);
        render_string(&mut fb, "7", 10, 10, &TextStyle::new(30, 50).color(false));
        assert!(fb.count_ink() < 400 * 300);
    }

    #[test]
    fn centred_text_is_centred() {
        let mut fb = Framebuffer::new();
        let style = TextStyle::new(30, 50);
        render_string_centered(&mut fb, "1234", 200, 100, &style);
        let (lo, hi) = ink_columns(&fb).unwrap();
        assert!(((lo + hi) / 2 - 200).abs() <= 5);
    }

    #[test]
    fn right_aligned_text_ends_at_edge() {
        let mut fb = Framebuffer::new();
        let style = TextStyle::new(30, 50).stroke_width(1);
        render_string_right(&mut fb, "88", 300, 100, &style);
        let (_, hi) = ink_columns(&fb).unwrap();
        assert!(hi <= 300);
        assert!(hi >= 290);
    }

    #[test]
    fn multiline_stacks_lines() {
        let style = TextStyle::new(20, 30).line_spacing(10);
        let mut fb = Framebuffer::new();
        render_multiline(&mut fb, &["1", "1"], 50, 20, &style, Align::Left);

        let mut expected = Framebuffer::new();
        render_string(&mut expected, "1", 50, 20, &style);
        render_string(&mut expected, "1", 50, 60, &style);
        assert_eq!(fb, expected);

        let mut centred = Framebuffer::new();
        render_multiline(&mut centred, &["12", "1"], 200, 20, &style, Align::Center);
        let mut expected = Framebuffer::new();
        render_string_centered(&mut expected, "12", 200, 20, &style);
        render_string_centered(&mut expected, "1", 200, 60, &style);
        assert_eq!(centred, expected);
    }
}
