// Bezier curves and texture-ball strokes.
//
// A path is a list of through-points; handles come from `auto_tangent`
// (Catmull-Rom style) on every call, nothing is cached. Strokes stamp a small
// bitmap along each cubic segment, rotated to the local tangent, which gives
// the uneven hand-inked look.

use crate::framebuffer::Framebuffer;
use crate::primitives::draw_line;
use crate::texture::{Brush, Texture};
use crate::types::{Color, Point, PointF};

pub const DEFAULT_SMOOTHNESS: f64 = 0.5;
pub const DEFAULT_SPACING: f64 = 2.0;
pub const DEFAULT_TOLERANCE: f64 = 1.0;

/// Binary splits deeper than this emit the endpoint as-is.
const MAX_SUBDIVISION_DEPTH: u32 = 16;

/// Segments shorter than this (in pixels) are not stamped.
const MIN_STROKE_SEGMENT: f64 = 0.1;

/// Offsets from a through-point to its incoming and outgoing control points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TangentHandles {
    pub handle_in: PointF,
    pub handle_out: PointF,
}

/// Handles for a smooth curve through `points`.
///
/// The tangent at each point runs from its previous to its next neighbour
/// (endpoints use their one neighbour). Handle length is
/// `smoothness * neighbour_distance * 0.5`; coincident neighbours give zero handles.
pub fn auto_tangent(points: &[PointF], smoothness: f64) -> Vec<TangentHandles> {
    let n = points.len();
    if n < 2 {
        return vec![TangentHandles::default(); n];
    }

    (0..n)
        .map(|i| {
            let prev = points[i.saturating_sub(1)];
            let curr = points[i];
            let next = points[(i + 1).min(n - 1)];

            let dir = next - prev;
            let len = dir.length();
            if len < 1e-10 {
                return TangentHandles::default();
            }
            let tangent = dir * (1.0 / len);

            // at the ends prev or next is the point itself, so that side's distance is 0
            let in_len = smoothness * (curr - prev).length() * 0.5;
            let out_len = smoothness * (next - curr).length() * 0.5;
            TangentHandles {
                handle_in: tangent * -in_len,
                handle_out: tangent * out_len,
            }
        })
        .collect()
}

#[inline]
fn lerp(a: PointF, b: PointF, t: f64) -> PointF {
    PointF::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
}

/// De Casteljau evaluation; exact at t = 0 and t = 1.
pub fn cubic_bezier(p0: PointF, p1: PointF, p2: PointF, p3: PointF, t: f64) -> PointF {
    let q0 = lerp(p0, p1, t);
    let q1 = lerp(p1, p2, t);
    let q2 = lerp(p2, p3, t);
    let r0 = lerp(q0, q1, t);
    let r1 = lerp(q1, q2, t);
    lerp(r0, r1, t)
}

/// Tangent vector: quadratic bezier over `3 * (P[i+1] - P[i])`.
pub fn cubic_bezier_derivative(p0: PointF, p1: PointF, p2: PointF, p3: PointF, t: f64) -> PointF {
    let d0 = (p1 - p0) * 3.0;
    let d1 = (p2 - p1) * 3.0;
    let d2 = (p3 - p2) * 3.0;
    lerp(lerp(d0, d1, t), lerp(d1, d2, t), t)
}

/// Largest perpendicular distance of the control points from the chord `p0-p1`.
/// A (near) zero-length chord measures straight-line distance from `p0` instead.
pub fn bezier_flatness(p0: PointF, c0: PointF, c1: PointF, p1: PointF) -> f64 {
    let chord = p1 - p0;
    let len_sq = chord.x * chord.x + chord.y * chord.y;
    if len_sq < 1e-10 {
        return (c0 - p0).length().max((c1 - p0).length());
    }
    let len = len_sq.sqrt();
    let cross = |c: PointF| ((c.x - p0.x) * chord.y - (c.y - p0.y) * chord.x).abs() / len;
    cross(c0).max(cross(c1))
}

/// Adaptive polyline for one cubic: split at t = 0.5 until each piece is
/// within `tolerance` of its chord. Both endpoints included, in parameter order.
pub fn subdivide_bezier(p0: PointF, c0: PointF, c1: PointF, p1: PointF, tolerance: f64) -> Vec<Point> {
    let mut out = vec![p0.to_point()];
    subdivide_into(p0, c0, c1, p1, tolerance, 0, &mut out);
    out
}

fn subdivide_into(
    p0: PointF,
    c0: PointF,
    c1: PointF,
    p1: PointF,
    tolerance: f64,
    depth: u32,
    out: &mut Vec<Point>,
) {
    if depth >= MAX_SUBDIVISION_DEPTH || bezier_flatness(p0, c0, c1, p1) <= tolerance {
        out.push(p1.to_point());
        return;
    }
    let q0 = lerp(p0, c0, 0.5);
    let q1 = lerp(c0, c1, 0.5);
    let q2 = lerp(c1, p1, 0.5);
    let r0 = lerp(q0, q1, 0.5);
    let r1 = lerp(q1, q2, 0.5);
    let mid = lerp(r0, r1, 0.5);
    subdivide_into(p0, q0, r0, mid, tolerance, depth + 1, out);
    subdivide_into(mid, r1, q2, p1, tolerance, depth + 1, out);
}

/// Cubic control points for every consecutive pair of through-points.
fn segments(points: &[PointF], smoothness: f64) -> Vec<[PointF; 4]> {
    let handles = auto_tangent(points, smoothness);
    points
        .windows(2)
        .zip(handles.windows(2))
        .map(|(p, h)| [p[0], p[0] + h[0].handle_out, p[1] + h[1].handle_in, p[1]])
        .collect()
}

fn polyline_length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| PointF::from(w[1]) - PointF::from(w[0]))
        .map(PointF::length)
        .sum()
}

/// Stamp `texture` along the smooth curve through `points`.
///
/// Each segment's length is estimated from its subdivided polyline, then the
/// segment is walked in `max(1, round(length / spacing))` *uniform parameter*
/// steps. On curves with uneven speed the stamps bunch up and spread out; that
/// unevenness is the intended look. Later segments skip their first step so the
/// shared through-point is stamped once.
pub fn stroke_bezier_texture_ball(
    fb: &mut Framebuffer,
    points: &[PointF],
    smoothness: f64,
    texture: &Texture<'_>,
    spacing: f64,
) {
    match points {
        [] => return,
        [only] => {
            texture.stamp(fb, only.x, only.y, 1.0, 0.0);
            return;
        }
        _ => {}
    }
    if !spacing.is_finite() || spacing <= 0.0 {
        return;
    }

    for (i, [p0, p1, p2, p3]) in segments(points, smoothness).into_iter().enumerate() {
        let arc_length = polyline_length(&subdivide_bezier(p0, p1, p2, p3, spacing));
        if arc_length < MIN_STROKE_SEGMENT {
            continue;
        }
        let steps = (arc_length / spacing).round_ties_even().max(1.0) as u32;

        let first = if i > 0 { 1 } else { 0 };
        for step in first..=steps {
            let t = step as f64 / steps as f64;
            let pos = cubic_bezier(p0, p1, p2, p3, t);
            let tangent = cubic_bezier_derivative(p0, p1, p2, p3, t);
            let len = tangent.length();
            let (cos_t, sin_t) = if len < 1e-10 {
                (1.0, 0.0)
            } else {
                (tangent.x / len, tangent.y / len)
            };
            texture.stamp(fb, pos.x, pos.y, cos_t, sin_t);
        }
    }
}

/// Texture-ball stroke with one of the built-in brush tips.
pub fn stroke_bezier_brush(fb: &mut Framebuffer, points: &[PointF], brush: Brush, smoothness: f64, spacing: f64) {
    stroke_bezier_texture_ball(fb, points, smoothness, &brush.texture(), spacing);
}

/// Thin curve: subdivide each segment and join the pieces with Bresenham lines.
pub fn draw_bezier_curve(fb: &mut Framebuffer, points: &[PointF], smoothness: f64, color: Color, tolerance: f64) {
    match points {
        [] => return,
        [only] => {
            let p = only.to_point();
            fb.set_pixel(p.x, p.y, color);
            return;
        }
        _ => {}
    }
    for [p0, p1, p2, p3] in segments(points, smoothness) {
        let poly = subdivide_bezier(p0, p1, p2, p3, tolerance);
        for w in poly.windows(2) {
            draw_line(fb, w[0].x, w[0].y, w[1].x, w[1].y, color);
        }
    }
}
