// Organic outlines for the texture-ball stroker: lumpy regular polygons whose
// wobble comes from a cheap integer hash, so the same seed always yields the
// same shape.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::types::PointF;

/// Deterministic noise in `[-1, 1)` for a vertex index and seed.
pub fn hash_noise(index: i32, seed: u32) -> f64 {
    let mut h = seed;
    h ^= (index as u32).wrapping_mul(374_761_393);
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    h ^= h >> 16;
    (h & 0xFFFF) as f64 / 32768.0 - 1.0
}

/// `count` vertices around (cx, cy), first one straight up, then clockwise on
/// screen. Each radius is scaled by `1 + noise * lumpiness`.
pub fn generate_hex(count: usize, cx: f64, cy: f64, radius: f64, lumpiness: f64, seed: u32) -> Vec<PointF> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64 - FRAC_PI_2;
            let r = radius * (1.0 + hash_noise(i as i32, seed) * lumpiness);
            PointF::new(cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect()
}

/// Close an outline for stroking: the first point is repeated at the end.
pub fn polygon_to_bezier_loop(points: &[PointF]) -> Vec<PointF> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(points.len() + 1);
    out.extend_from_slice(points);
    out.push(first);
    out
}
