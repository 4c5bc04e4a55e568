//! Circle geometry used by the packer and the placement phase.
//!
//! All angles are radians. The chord/angle conversions use the exact
//! `asin` relation rather than a small-angle estimate; callers decide
//! what an out-of-domain argument means by passing a fallback.

use glam::Vec2;
use std::f32::consts::TAU;

/// Fallback for [`advance_on_circle`] meaning "does not fit on this ring".
pub const NO_FIT: f32 = TAU;

/// Central angle subtended by a chord of length `chord` on a circle of
/// radius `radius`.
///
/// Computed as `2 * asin(chord / (2 * radius))`. When the chord is longer
/// than the diameter (or the radius is zero) the relation has no solution
/// and `fallback` is returned instead. The packer passes [`NO_FIT`] so an
/// impossible chord reads as an overflowing ring.
#[inline]
pub fn advance_on_circle(radius: f32, chord: f32, fallback: f32) -> f32 {
    let alpha = chord / (2.0 * radius);
    if !(-1.0..=1.0).contains(&alpha) {
        return fallback;
    }
    2.0 * alpha.asin()
}

/// Angle between a ring's reference line and the near edge of a follower
/// of radius `half_chord` sitting on that reference line.
///
/// Computed as `asin(half_chord / radius)`, returning `fallback` when the
/// follower is wider than the ring.
#[inline]
pub fn edge_angle(radius: f32, half_chord: f32, fallback: f32) -> f32 {
    let alpha = half_chord / radius;
    if !(-1.0..=1.0).contains(&alpha) {
        return fallback;
    }
    alpha.asin()
}

/// Point at distance `radius` and angle `angle` from the origin.
#[inline]
pub fn polar_to_cartesian(radius: f32, angle: f32) -> Vec2 {
    Vec2::from_angle(angle) * radius
}

/// Wraps an angle into `[0, 2π)`.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}
