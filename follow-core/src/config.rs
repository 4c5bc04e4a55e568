//! Packing parameters and strategy selectors.

use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// Degrees of ring rotation per update for each unit of `rotation_speed`.
pub const SPEED_SCALE: f32 = 1.0 / 8.0;

/// Smallest sector an arc layout may use, in radians.
pub const MIN_SECTOR: f32 = 0.03;

/// Smallest allowed gap between two rings.
pub const MIN_RING_GAP: f32 = 1.0;

/// Where the followers of a ring may sit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    /// Full circle around the leader; rings spin and counter-rotate.
    #[default]
    Orbit,
    /// A bounded sector behind the leader.
    Arc,
}

/// How leftover angle on a ring is spread between followers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distribution {
    /// Slack is split evenly between every gap.
    #[default]
    Uniform,
    /// Followers keep their minimum gap; the slack is placed once.
    Proportional,
}

/// Which ring-builder runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackingMode {
    /// `asin`-based angles, recomputed whenever the ring radius grows.
    #[default]
    Exact,
    /// Linear `chord / radius` angles. Cheaper, but underestimates the
    /// angle each follower needs, so neighbours may overlap slightly.
    Approximate,
}

/// Everything that shapes the ring layout.
///
/// Values are clamped by [`PackingParameters::normalized`] before use, so
/// hosts can write raw user input straight into the fields.
///
/// # Builder Pattern
/// ```
/// use follow_core::config::{Layout, PackingParameters};
///
/// let params = PackingParameters::new()
///     .with_layout(Layout::Arc)
///     .with_arc_half_angle_deg(45.0)
///     .with_spacing(4.0)
///     .with_ring_gap(8.0);
/// assert!((params.max_angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackingParameters {
    /// Extra distance kept between neighbouring followers on a ring.
    pub follower_spacing: f32,
    /// Minimum distance between the outer edge of a ring and the inner
    /// edge of the next one (and between the leader and ring 0).
    pub ring_gap: f32,
    /// Total angular budget of an arc ring, in radians. Orbit ignores it.
    pub max_angle: f32,
    /// Ring spin, in degrees per update before [`SPEED_SCALE`].
    pub rotation_speed: f32,
    /// Extra rotation applied to the arc sector, in radians.
    pub arc_rotation: f32,
    pub layout: Layout,
    pub distribution: Distribution,
    pub packing: PackingMode,
    /// Push a lone arc follower outward until it fits inside the sector.
    pub strong: bool,
}

impl PackingParameters {
    /// Parameters used by the demos: spacing 16, gap 24, a half-circle arc.
    pub fn new() -> Self {
        Self {
            follower_spacing: 16.0,
            ring_gap: 24.0,
            max_angle: PI,
            rotation_speed: 1.0,
            arc_rotation: 0.0,
            layout: Layout::Orbit,
            distribution: Distribution::Uniform,
            packing: PackingMode::Exact,
            strong: false,
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.follower_spacing = spacing;
        self
    }

    pub fn with_ring_gap(mut self, gap: f32) -> Self {
        self.ring_gap = gap;
        self
    }

    /// Sets the total sector, in radians.
    pub fn with_max_angle(mut self, max_angle: f32) -> Self {
        self.max_angle = max_angle;
        self
    }

    /// Sets the sector from the angle on each side of the leader's back.
    ///
    /// The total arc is twice this angle: `90.0` gives a half circle.
    pub fn with_arc_half_angle_deg(mut self, degrees: f32) -> Self {
        self.max_angle = (2.0 * degrees).to_radians();
        self
    }

    pub fn with_rotation_speed(mut self, speed: f32) -> Self {
        self.rotation_speed = speed;
        self
    }

    pub fn with_arc_rotation(mut self, radians: f32) -> Self {
        self.arc_rotation = radians;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    pub fn with_packing(mut self, packing: PackingMode) -> Self {
        self.packing = packing;
        self
    }

    pub fn with_strong(mut self, strong: bool) -> Self {
        self.strong = strong;
        self
    }

    /// Angle on each side of the leader's back, in degrees.
    pub fn arc_half_angle_deg(&self) -> f32 {
        self.max_angle.to_degrees() / 2.0
    }

    /// Angular budget of one ring for the current layout.
    pub fn budget(&self) -> f32 {
        match self.layout {
            Layout::Orbit => TAU,
            Layout::Arc => self.max_angle,
        }
    }

    /// Radians a ring turns in one update, before the parity sign.
    pub fn rotation_step(&self) -> f32 {
        (self.rotation_speed * SPEED_SCALE).to_radians()
    }

    /// Returns a copy with every field clamped into its valid range.
    ///
    /// NaN collapses onto the lower bound of the field, except for the
    /// speed and arc rotation which fall back to zero.
    pub fn normalized(&self) -> Self {
        let max_speed = 180.0 / SPEED_SCALE;
        Self {
            follower_spacing: self.follower_spacing.max(0.0),
            ring_gap: self.ring_gap.max(MIN_RING_GAP),
            max_angle: self.max_angle.max(MIN_SECTOR).min(TAU),
            rotation_speed: if self.rotation_speed.is_nan() {
                0.0
            } else {
                self.rotation_speed.clamp(-max_speed, max_speed)
            },
            arc_rotation: if self.arc_rotation.is_finite() {
                self.arc_rotation
            } else {
                0.0
            },
            ..*self
        }
    }
}

impl Default for PackingParameters {
    fn default() -> Self {
        Self::new()
    }
}
