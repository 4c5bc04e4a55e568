use crate::geometry::wrap_angle;

/// One concentric band of followers around the leader.
///
/// A ring owns a contiguous run of the follower sequence, starting at
/// `start`. `offsets[k]` is the angle of follower `start + k` relative to
/// the ring's own `rotation`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    /// Distance from the leader to the centre of every follower on the ring.
    pub radius: f32,
    /// Current rotation in radians, kept in `[0, 2π)`.
    pub rotation: f32,
    pub offsets: Vec<f32>,
    /// Largest follower size on this ring.
    pub biggest: f32,
    /// Index of the ring's first follower in the follower sequence.
    pub start: usize,
}

impl Ring {
    pub fn new(radius: f32, biggest: f32, start: usize, offsets: Vec<f32>) -> Self {
        Self {
            radius,
            rotation: 0.0,
            offsets,
            biggest,
            start,
        }
    }

    /// Number of followers on the ring.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Follower indices held by this ring.
    pub fn members(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.offsets.len()
    }

    /// Turns the ring by `delta` radians.
    pub fn rotate(&mut self, delta: f32) {
        self.rotation = wrap_angle(self.rotation + delta);
    }

    /// Distance from the leader to the outer edge of the ring.
    pub fn outer_edge(&self) -> f32 {
        self.radius + self.biggest
    }
}
