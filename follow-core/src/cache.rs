//! Change detection for the ring layout.
//!
//! Packing is O(n) and only depends on a handful of inputs, so the engine
//! keeps the last packed snapshot of those inputs and re-packs only when a
//! fresh snapshot differs from it.

use crate::config::{Distribution, Layout, PackingMode, PackingParameters};
use crate::follower::FollowerSet;

/// Where the engine is in its pack cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PackState {
    /// Never packed.
    #[default]
    Idle,
    /// Something that shapes the rings changed since the last pack.
    Dirty,
    /// Rings match the current followers and parameters.
    Packed,
}

/// The values the ring layout is derived from.
///
/// Ring rotation speed and arc orientation are absent since they
/// move rings around without changing their shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackingInputs {
    pub follower_spacing: f32,
    pub ring_gap: f32,
    pub max_angle: f32,
    pub total_size: f32,
    pub count: usize,
    pub leader_size: f32,
    pub layout: Layout,
    pub distribution: Distribution,
    pub packing: PackingMode,
    pub strong: bool,
}

impl PackingInputs {
    /// Snapshot of the current inputs. `params` should already be normalized.
    pub fn capture(params: &PackingParameters, followers: &FollowerSet, leader_size: f32) -> Self {
        Self {
            follower_spacing: params.follower_spacing,
            ring_gap: params.ring_gap,
            max_angle: params.max_angle,
            total_size: followers.total_size(),
            count: followers.len(),
            leader_size,
            layout: params.layout,
            distribution: params.distribution,
            packing: params.packing,
            strong: params.strong,
        }
    }
}

/// Last packed inputs plus the pack state machine.
#[derive(Debug, Default)]
pub struct PackingCache {
    last: Option<PackingInputs>,
    state: PackState,
}

impl PackingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PackState {
        self.state
    }

    /// Forces the next check to report a re-pack.
    ///
    /// Used for mutations a snapshot cannot see, such as two followers
    /// swapping sizes without changing the total.
    pub fn invalidate(&mut self) {
        if self.state == PackState::Packed {
            self.state = PackState::Dirty;
        }
    }

    /// Compares `inputs` with the last snapshot; returns `true` when the
    /// rings must be rebuilt.
    ///
    /// A changed snapshot is stored immediately, so calling this twice in
    /// a row without [`PackingCache::mark_packed`] still reports `true`
    /// through the `Dirty` state.
    pub fn check(&mut self, inputs: &PackingInputs) -> bool {
        if self.last.as_ref() != Some(inputs) {
            tracing::trace!(?inputs, "packing inputs changed");
            self.last = Some(*inputs);
            self.state = PackState::Dirty;
        }
        self.state != PackState::Packed
    }

    pub fn mark_packed(&mut self) {
        self.state = PackState::Packed;
    }
}
