//! Time-driven animation helpers.
//!
//! Everything here is a pure function of its inputs (time is passed in as
//! seconds), so frames are reproducible. [`AnimationState`] is a thin wrapper
//! that tracks a start instant for callers driven by the wall clock.
//!
//! Functions that produce coordinates round to whole pixels (ties to even) so
//! shapes do not shimmer between frames.

use std::f64::consts::{PI, TAU};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::types::{Point, PointF};

/// Easing curve signature accepted by [`transition_points`].
pub type Easing = fn(f64) -> f64;

/// `a + t * (b - a)`, not clamped.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Cubic smoothstep, `3t² - 2t³`.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    3.0 * t * t - 2.0 * t * t * t
}

pub fn ease_in_out_sine(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    (1.0 - (t * PI).cos()) / 2.0
}

/// Quadratic ease in.
pub fn ease_in(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease out.
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * (2.0 - t)
}

/// Bounce that settles at 1.
pub fn ease_out_bounce(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;

    let t = t.clamp(0.0, 1.0);
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

/// Sine oscillation between `min_scale` and `max_scale` with a full cycle every
/// `period` seconds. A zero period pins the result to `min_scale`.
pub fn breathing_scale(t: f64, min_scale: f64, max_scale: f64, period: f64) -> f64 {
    if period == 0.0 {
        return min_scale;
    }
    let normalized = ((t / period * TAU).sin() + 1.0) / 2.0;
    min_scale + normalized * (max_scale - min_scale)
}

/// Sine oscillation in `[-amplitude, amplitude]`. Zero period yields 0.
pub fn breathing_offset(t: f64, amplitude: f64, period: f64) -> f64 {
    if period == 0.0 {
        return 0.0;
    }
    amplitude * (t / period * TAU).sin()
}

/// Deterministic per-vertex jitter.
///
/// Vertex `i` is displaced by `amplitude * sin(ωt + φx)` horizontally and
/// `amplitude * cos(ωt + φy)` vertically, where the phases mix `seed` and `i`
/// through fixed irrational-ish constants so neighbouring vertices never move
/// in lockstep. Results are rounded to whole pixels.
pub fn wiggle_points(points: &[PointF], amplitude: f64, frequency: f64, t: f64, seed: u32) -> Vec<PointF> {
    let omega_t = t * frequency * TAU;
    let seed = seed as f64;
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let i = i as f64;
            let phase_x = seed * 1.618 + i * 2.399;
            let phase_y = seed * 2.718 + i * 3.141;
            let dx = amplitude * (omega_t + phase_x).sin();
            let dy = amplitude * (omega_t + phase_y).cos();
            PointF::new((p.x + dx).round_ties_even(), (p.y + dy).round_ties_even())
        })
        .collect()
}

/// [`wiggle_points`] for integer geometry.
pub fn wiggle_int_points(points: &[Point], amplitude: f64, frequency: f64, t: f64, seed: u32) -> Vec<Point> {
    let float_points: Vec<PointF> = points.iter().copied().map(PointF::from).collect();
    wiggle_points(&float_points, amplitude, frequency, t, seed)
        .into_iter()
        .map(PointF::to_point)
        .collect()
}

/// Morph between two outlines with the same vertex count.
///
/// `easing`, when given, reshapes `t` before the per-coordinate lerp. Output
/// coordinates are rounded to whole pixels.
pub fn transition_points(a: &[PointF], b: &[PointF], t: f64, easing: Option<Easing>) -> Result<Vec<PointF>> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let t = easing.map_or(t, |ease| ease(t));
    Ok(a.iter()
        .zip(b)
        .map(|(pa, pb)| {
            PointF::new(
                lerp(pa.x, pb.x, t).round_ties_even(),
                lerp(pa.y, pb.y, t).round_ties_even(),
            )
        })
        .collect())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreathingParams {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Seconds per full cycle.
    pub period: f64,
    pub amplitude: f64,
}

impl Default for BreathingParams {
    fn default() -> Self {
        Self {
            min_scale: 0.95,
            max_scale: 1.05,
            period: 3.0,
            amplitude: 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WiggleParams {
    pub amplitude: f64,
    pub frequency: f64,
    pub seed: u32,
}

impl Default for WiggleParams {
    fn default() -> Self {
        Self {
            amplitude: 1.5,
            frequency: 1.0,
            seed: 0,
        }
    }
}

/// Start instant plus the pure helpers above evaluated at the elapsed time.
#[derive(Clone, Copy, Debug)]
pub struct AnimationState {
    start: Instant,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationState {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }

    pub fn with_start(start: Instant) -> Self {
        Self { start }
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    /// Seconds since start.
    pub fn elapsed(&self) -> f64 {
        self.elapsed_at(Instant::now())
    }

    /// Seconds between start and `now`; 0 if `now` precedes the start.
    pub fn elapsed_at(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.start).as_secs_f64()
    }

    pub fn reset(&mut self) {
        self.start = Instant::now();
    }

    /// Linear progress through a `duration`-second animation that begins
    /// `delay` seconds after start, clamped to `[0, 1]`.
    pub fn progress(&self, duration: f64, delay: f64) -> f64 {
        progress_at(self.elapsed(), duration, delay)
    }

    pub fn is_complete(&self, duration: f64, delay: f64) -> bool {
        self.progress(duration, delay) >= 1.0
    }

    pub fn breathing_scale(&self, params: &BreathingParams) -> f64 {
        breathing_scale(self.elapsed(), params.min_scale, params.max_scale, params.period)
    }

    pub fn breathing_offset(&self, params: &BreathingParams) -> f64 {
        breathing_offset(self.elapsed(), params.amplitude, params.period)
    }

    pub fn wiggle_points(&self, points: &[PointF], params: &WiggleParams) -> Vec<PointF> {
        wiggle_points(points, params.amplitude, params.frequency, self.elapsed(), params.seed)
    }
}

fn progress_at(elapsed: f64, duration: f64, delay: f64) -> f64 {
    let t = elapsed - delay;
    if t <= 0.0 {
        return 0.0;
    }
    if duration <= 0.0 || t >= duration {
        return 1.0;
    }
    t / duration
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn pts(v: &[(f64, f64)]) -> Vec<PointF> {
        v.iter().copied().map(PointF::from).collect()
    }

    #[test]
    fn lerp_endpoints_and_extrapolation() {
        assert_eq!(lerp(3.0, 7.0, 0.0), 3.0);
        assert_eq!(lerp(3.0, 7.0, 1.0), 7.0);
        assert_eq!(lerp(3.0, 7.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 1.5), 15.0);
        assert_eq!(lerp(0.0, 10.0, -0.5), -5.0);
    }

    #[test]
    fn easing_fixed_points() {
        for ease in [ease_in_out, ease_in_out_sine, ease_in, ease_out, ease_out_bounce] {
            assert!(ease(0.0).abs() < 1e-12);
            assert!((ease(1.0) - 1.0).abs() < 1e-12);
            // clamped outside the unit interval
            assert_eq!(ease(-3.0), ease(0.0));
            assert_eq!(ease(4.0), ease(1.0));
        }
        assert_eq!(ease_in_out(0.5), 0.5);
        assert!((ease_in_out_sine(0.5) - 0.5).abs() < 1e-12);
        assert_eq!(ease_in(0.5), 0.25);
        assert_eq!(ease_out(0.5), 0.75);
    }

    #[test]
    fn ease_in_out_is_monotonic() {
        let samples: Vec<f64> = (0..=100).map(|i| ease_in_out(i as f64 / 100.0)).collect();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn bounce_stays_in_range() {
        for i in 0..=200 {
            let v = ease_out_bounce(i as f64 / 200.0);
            assert!((0.0..=1.0 + 1e-9).contains(&v), "{v}");
        }
    }

    #[test]
    fn breathing_scale_range() {
        assert!((breathing_scale(0.0, 0.95, 1.05, 3.0) - 1.0).abs() < 1e-12);
        assert!((breathing_scale(0.75, 0.95, 1.05, 3.0) - 1.05).abs() < 1e-12);
        assert!((breathing_scale(2.25, 0.95, 1.05, 3.0) - 0.95).abs() < 1e-12);
        for i in 0..100 {
            let s = breathing_scale(i as f64 * 0.07, 0.9, 1.1, 2.0);
            assert!((0.9 - 1e-12..=1.1 + 1e-12).contains(&s));
        }
    }

    #[test]
    fn zero_period_fallbacks() {
        assert_eq!(breathing_scale(1.3, 0.9, 1.1, 0.0), 0.9);
        assert_eq!(breathing_offset(1.3, 2.0, 0.0), 0.0);
    }

    #[test]
    fn breathing_offset_range() {
        assert_eq!(breathing_offset(0.0, 2.0, 3.0), 0.0);
        assert!((breathing_offset(0.75, 2.0, 3.0) - 2.0).abs() < 1e-12);
        assert!((breathing_offset(2.25, 2.0, 3.0) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn wiggle_is_deterministic_and_bounded() {
        let shape = pts(&[(10.0, 10.0), (50.0, 12.0), (30.0, 40.0), (5.0, 30.0)]);
        let a = wiggle_points(&shape, 3.0, 1.2, 0.37, 7);
        let b = wiggle_points(&shape, 3.0, 1.2, 0.37, 7);
        assert_eq!(a, b);
        for (orig, moved) in shape.iter().zip(&a) {
            assert_eq!(moved.x.fract(), 0.0);
            assert_eq!(moved.y.fract(), 0.0);
            assert!((moved.x - orig.x).abs() <= 3.0);
            assert!((moved.y - orig.y).abs() <= 3.0);
        }
        assert_ne!(a, wiggle_points(&shape, 3.0, 1.2, 0.37, 8));
    }

    #[test]
    fn wiggle_first_vertex_at_time_zero() {
        // i = 0, seed = 0: dx = 2 sin 0 = 0, dy = 2 cos 0 = 2
        let out = wiggle_points(&pts(&[(10.0, 10.0)]), 2.0, 1.0, 0.0, 0);
        assert_eq!(out, pts(&[(10.0, 12.0)]));
    }

    #[test]
    fn wiggle_rounds_ties_to_even() {
        // dx = 0, dy = 0.5 * cos 0 = 0.5 lands exactly on a tie
        let out = wiggle_points(&pts(&[(3.0, 2.0), (0.0, 0.0)]), 0.5, 1.0, 0.0, 0);
        assert_eq!(out[0], PointF::new(3.0, 2.0));
    }

    #[test]
    fn wiggle_int_matches_float_version() {
        let ints = [Point::new(100, 100), Point::new(120, 90), Point::new(80, 140)];
        let floats: Vec<PointF> = ints.iter().copied().map(PointF::from).collect();
        let a = wiggle_int_points(&ints, 2.0, 0.5, 1.25, 3);
        let b = wiggle_points(&floats, 2.0, 0.5, 1.25, 3);
        for (p, q) in a.iter().zip(&b) {
            assert_eq!(p.x as f64, q.x);
            assert_eq!(p.y as f64, q.y);
        }
    }

    #[test]
    fn transition_rejects_mismatched_lengths() {
        let a = pts(&[(0.0, 0.0), (1.0, 1.0)]);
        let b = pts(&[(0.0, 0.0)]);
        match transition_points(&a, &b, 0.5, None) {
            Err(Error::LengthMismatch { left, right }) => assert_eq!((left, right), (2, 1)),
            other => panic!("expected length mismatch, got {other:?}"),
        }
    }

    #[test]
    fn transition_endpoints() {
        let a = pts(&[(0.0, 0.0), (10.0, 20.0), (-4.0, 8.0)]);
        let b = pts(&[(100.0, 50.0), (30.0, -20.0), (4.0, 8.0)]);
        assert_eq!(transition_points(&a, &b, 0.0, None).unwrap(), a);
        assert_eq!(transition_points(&a, &b, 1.0, None).unwrap(), b);
        assert_eq!(transition_points(&a, &b, 1.0, Some(ease_in_out)).unwrap(), b);

        let mid = transition_points(&a, &b, 0.5, None).unwrap();
        assert_eq!(mid, pts(&[(50.0, 25.0), (20.0, 0.0), (0.0, 8.0)]));
    }

    #[test]
    fn transition_applies_easing() {
        let a = pts(&[(0.0, 0.0)]);
        let b = pts(&[(100.0, 0.0)]);
        let eased = transition_points(&a, &b, 0.25, Some(ease_in)).unwrap();
        assert_eq!(eased[0].x, 6.0);
        let linear = transition_points(&a, &b, 0.25, None).unwrap();
        assert_eq!(linear[0].x, 25.0);
    }

    #[test]
    fn transition_of_empty_lists() {
        assert!(transition_points(&[], &[], 0.3, None).unwrap().is_empty());
    }

    #[test]
    fn state_elapsed_and_progress() {
        let start = Instant::now();
        let state = AnimationState::with_start(start);
        assert_eq!(state.start(), start);
        assert_eq!(state.elapsed_at(start + Duration::from_millis(1500)), 1.5);
        assert!(state.elapsed() >= 0.0);

        assert_eq!(progress_at(0.5, 2.0, 1.0), 0.0);
        assert_eq!(progress_at(2.0, 2.0, 1.0), 0.5);
        assert_eq!(progress_at(3.5, 2.0, 1.0), 1.0);
        assert_eq!(progress_at(0.5, 0.0, 0.0), 1.0);
    }

    #[test]
    fn state_wrappers_use_elapsed_time() {
        let state = AnimationState::with_start(Instant::now() - Duration::from_secs(10));
        assert!(state.is_complete(2.0, 1.0));
        assert!(!state.is_complete(60.0, 0.0));

        let params = BreathingParams::default();
        let s = state.breathing_scale(&params);
        assert!((params.min_scale..=params.max_scale).contains(&s));
        assert!(state.breathing_offset(&params).abs() <= params.amplitude);

        let wiggle = WiggleParams::default();
        let moved = state.wiggle_points(&pts(&[(20.0, 20.0)]), &wiggle);
        assert!((moved[0].x - 20.0).abs() <= 2.0);
    }

    #[test]
    fn reset_moves_start_forward() {
        let mut state = AnimationState::with_start(Instant::now() - Duration::from_secs(5));
        assert!(state.elapsed() >= 5.0);
        state.reset();
        assert!(state.elapsed() < 5.0);
    }
}
