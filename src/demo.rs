// The simulator's showcase scenes. Pure orchestration over the library API:
// every scene clears the panel and redraws from scratch.

use std::f64::consts::TAU;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use rlcd_render::animation::{AnimationState, WiggleParams, breathing_scale};
use rlcd_render::bezier::{draw_bezier_curve, stroke_bezier_brush, stroke_bezier_texture_ball};
use rlcd_render::patterns::{fill_circle_pattern, fill_polygon_pattern, fill_rect_pattern};
use rlcd_render::primitives::{draw_polygon, fill_polygon};
use rlcd_render::shapes::{generate_hex, polygon_to_bezier_loop};
use rlcd_render::texture::DEFAULT_BALL_8X8;
use rlcd_render::vector_font::{render_string, render_string_centered};
use rlcd_render::{BLACK, Brush, Framebuffer, HEIGHT, Pattern, Point, PointF, TextStyle, WIDTH};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Dither levels in organic hexagons
    #[default]
    Patterns,
    /// Texture-ball bezier strokes
    Bezier,
    /// The digit set at several sizes
    Numerals,
    /// A clock face built from everything else
    Clock,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Patterns, Mode::Bezier, Mode::Numerals, Mode::Clock];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Patterns => "PATTERNS",
            Mode::Bezier => "BEZIER",
            Mode::Numerals => "NUMERALS",
            Mode::Clock => "CLOCK",
        }
    }

    fn index(self) -> usize {
        Mode::ALL.iter().position(|&m| m == self).unwrap_or(0)
    }
}

/// Wall-clock time of day (UTC) as plain numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub day: u32,
}

impl ClockTime {
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self::from_unix(secs)
    }

    pub fn from_unix(secs: u64) -> Self {
        let days = (secs / 86_400) as i64;
        let rem = secs % 86_400;
        Self {
            hour: (rem / 3600) as u32,
            minute: (rem / 60 % 60) as u32,
            second: (rem % 60) as u32,
            day: day_of_month(days),
        }
    }
}

// Civil-from-days, proleptic Gregorian.
fn day_of_month(days_since_epoch: i64) -> u32 {
    let z = days_since_epoch + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    (doy - (153 * mp + 2) / 5 + 1) as u32
}

pub struct Demo {
    mode: Mode,
    animate: bool,
    animation: AnimationState,
}

impl Demo {
    pub fn new(mode: Mode, animate: bool) -> Self {
        Self {
            mode,
            animate,
            animation: AnimationState::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn next_mode(&mut self) {
        self.mode = Mode::ALL[(self.mode.index() + 1) % Mode::ALL.len()];
    }

    /// Ignores indices past the last mode.
    pub fn set_mode(&mut self, index: usize) {
        if let Some(&mode) = Mode::ALL.get(index) {
            self.mode = mode;
        }
    }

    pub fn draw(&self, fb: &mut Framebuffer, now: ClockTime) {
        fb.clear(false);
        match self.mode {
            Mode::Patterns => self.patterns(fb),
            Mode::Bezier => self.bezier(fb),
            Mode::Numerals => numerals(fb, now),
            Mode::Clock => self.clock(fb, now),
        }
        let label = format!("{} {}", self.mode.index() + 1, self.mode.name());
        render_string(fb, &label, 6, HEIGHT - 14, &TextStyle::new(8, 10).spacing(2).stroke_width(1));
    }

    fn elapsed(&self) -> f64 {
        if self.animate { self.animation.elapsed() } else { 0.0 }
    }

    fn breathe(&self, base: f64, min: f64, max: f64, period: f64) -> f64 {
        if self.animate {
            base * breathing_scale(self.elapsed(), min, max, period)
        } else {
            base
        }
    }

    fn patterns(&self, fb: &mut Framebuffer) {
        render_string_centered(fb, "PATTERNS", WIDTH / 2, 14, &TextStyle::new(18, 24));

        let radius = self.breathe(34.0, 0.95, 1.05, 4.0);
        let (start_x, end_x) = (44, WIDTH - 44);
        let step = (end_x - start_x) / (Pattern::ALL.len() as i32 - 1);
        let digit = TextStyle::new(14, 18);

        for (i, level) in Pattern::ALL.into_iter().enumerate() {
            let cx = start_x + i as i32 * step;
            let cy = 110;
            let hex = to_points(&generate_hex(6, cx as f64, cy as f64, radius, 0.08, i as u32 + 1));
            draw_polygon(fb, &hex, BLACK);
            fill_polygon_pattern(fb, &hex, level);
            render_string_centered(fb, &i.to_string(), cx, cy + 48, &digit);

            fill_rect_pattern(fb, cx - 30, 200, 60, 24, level);
            fill_circle_pattern(fb, cx, 252, 14, level);
        }
    }

    fn bezier(&self, fb: &mut Framebuffer) {
        let s_curve = [
            PointF::new(50.0, 70.0),
            PointF::new(130.0, 30.0),
            PointF::new(200.0, 110.0),
            PointF::new(280.0, 50.0),
            PointF::new(350.0, 90.0),
        ];
        let s_curve = if self.animate {
            let params = WiggleParams {
                amplitude: 3.0,
                ..WiggleParams::default()
            };
            self.animation.wiggle_points(&s_curve, &params)
        } else {
            s_curve.to_vec()
        };
        stroke_bezier_texture_ball(fb, &s_curve, 0.6, &DEFAULT_BALL_8X8, 3.0);

        let frame = rounded_rect(80.0, 130.0, 200.0, 90.0, 25.0);
        stroke_bezier_texture_ball(fb, &frame, 0.7, &DEFAULT_BALL_8X8, 2.5);

        let wave: Vec<PointF> = (0..8)
            .map(|i| PointF::new(30.0 + i as f64 * 50.0, 255.0 + (i as f64 * 0.8).sin() * 18.0))
            .collect();
        stroke_bezier_brush(fb, &wave, Brush::Fine, 0.8, 2.0);

        let spiral: Vec<PointF> = (0..16)
            .map(|i| {
                let angle = i as f64 * 0.4;
                let r = 8.0 + i as f64 * 2.2;
                PointF::new(40.0 + r * angle.cos(), 175.0 + r * angle.sin())
            })
            .collect();
        draw_bezier_curve(fb, &spiral, 0.5, BLACK, 1.0);

        let seed = (self.elapsed() * 2.0) as u32;
        let blob = polygon_to_bezier_loop(&generate_hex(12, 340.0, 175.0, 38.0, 0.25, seed));
        stroke_bezier_texture_ball(fb, &blob, 0.6, &DEFAULT_BALL_8X8, 2.0);
    }

    fn clock(&self, fb: &mut Framebuffer, now: ClockTime) {
        let frame = rounded_rect(60.0, 70.0, 280.0, 100.0, 20.0);
        stroke_bezier_texture_ball(fb, &frame, 0.65, &DEFAULT_BALL_8X8, 2.5);

        let big = TextStyle::new(48, 65).spacing(8).stroke_width(3);
        let time = format!("{:02}:{:02}", now.hour, now.minute);
        let mut pos = PointF::new(200.0, 90.0);
        if self.animate {
            let t = self.elapsed();
            pos.x += 2.0 * (t * 0.5 * TAU).sin();
            pos.y += 2.0 * (t * 0.5 * TAU).cos();
        }
        let pos = pos.to_point();
        render_string_centered(fb, &time, pos.x, pos.y, &big);

        let side_radius = self.breathe(28.0, 0.92, 1.08, 5.0);
        for (cx, level) in [(35.0, Pattern::Dense), (365.0, Pattern::Medium)] {
            let hex = to_points(&generate_hex(6, cx, 120.0, side_radius, 0.0, 0));
            draw_polygon(fb, &hex, BLACK);
            fill_polygon_pattern(fb, &hex, level);
        }

        let info = rounded_rect(100.0, 195.0, 200.0, 55.0, 12.0);
        stroke_bezier_texture_ball(fb, &info, 0.6, &DEFAULT_BALL_8X8, 3.0);
        let small = TextStyle::new(24, 35).spacing(3);
        render_string(fb, &format!(":{:02}", now.second), 140, 205, &small);
        render_string(fb, &format!("{:02}", now.day), 220, 205, &small);

        let corner_radius = self.breathe(18.0, 0.9, 1.1, 3.0);
        for cx in [25.0, 375.0] {
            let hex = to_points(&generate_hex(6, cx, 25.0, corner_radius, 0.0, 0));
            draw_polygon(fb, &hex, BLACK);
            fill_polygon_pattern(fb, &hex, Pattern::Sparse);
        }

        for flourish in [
            [PointF::new(10.0, 280.0), PointF::new(30.0, 260.0), PointF::new(60.0, 275.0)],
            [PointF::new(340.0, 275.0), PointF::new(370.0, 260.0), PointF::new(390.0, 280.0)],
        ] {
            stroke_bezier_brush(fb, &flourish, Brush::Heavy, 0.7, 2.0);
        }
        for cx in [25.0, 375.0] {
            fill_polygon(fb, &to_points(&generate_hex(6, cx, 265.0, 12.0, 0.0, 0)), BLACK);
        }
    }
}

fn numerals(fb: &mut Framebuffer, now: ClockTime) {
    render_string(fb, "0123456789", 10, 14, &TextStyle::new(35, 50).stroke_width(3));
    render_string(fb, "0123456789", 20, 76, &TextStyle::new(28, 40));

    let time = format!("{:02}:{:02}", now.hour, now.minute);
    render_string_centered(fb, &time, WIDTH / 2, 126, &TextStyle::new(40, 55).spacing(6).stroke_width(3));

    let small = TextStyle::new(24, 32).spacing(3);
    render_string(fb, "12:34:56", 20, 196, &small);
    render_string(fb, "-98.6°", 230, 196, &small);
    render_string(fb, "50%", 20, 240, &TextStyle::new(18, 24).spacing(2).stroke_width(1));
    render_string(fb, "0123456789", 120, 240, &TextStyle::new(18, 24).spacing(2).stroke_width(1));
}

fn to_points(points: &[PointF]) -> Vec<Point> {
    points.iter().map(|p| p.to_point()).collect()
}

// Corner-cut rectangle path, closed, for the stroker to round off.
fn rounded_rect(x: f64, y: f64, w: f64, h: f64, corner: f64) -> Vec<PointF> {
    vec![
        PointF::new(x + corner, y),
        PointF::new(x + w - corner, y),
        PointF::new(x + w, y + corner),
        PointF::new(x + w, y + h - corner),
        PointF::new(x + w - corner, y + h),
        PointF::new(x + corner, y + h),
        PointF::new(x, y + h - corner),
        PointF::new(x, y + corner),
        PointF::new(x + corner, y),
    ]
}
