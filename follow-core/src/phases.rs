//! Per-frame phases of the follower engine.
//!
//! The typical update looks like:
//! 1. [`pack_phase`]: rebuild the rings if the cache reports that a
//!    packing input changed.
//! 2. [`rotation_phase`]: spin orbit rings, or aim arc rings behind the
//!    leader.
//! 3. [`placement_phase`]: write every follower's world position from
//!    its ring radius, ring rotation and offset.

use crate::{
    cache::{PackingCache, PackingInputs},
    config::{Layout, PackingParameters},
    follower::{FollowerSet, Leader},
    geometry::{polar_to_cartesian, wrap_angle},
    packing,
    ring::Ring,
};
use std::f32::consts::PI;

/// Rebuilds `rings` when the packing inputs changed since the last pack.
///
/// Ring rotations survive a re-pack by index, so orbiting rings do not
/// jump back to angle zero when a follower is added.
///
/// ### Returns
/// `true` if the rings were rebuilt.
///
/// ### Panics
/// Panics if the packer drops or duplicates followers. That is a bug in
/// the packer, not bad input.
pub fn pack_phase(
    followers: &FollowerSet,
    leader: &Leader,
    params: &PackingParameters,
    cache: &mut PackingCache,
    rings: &mut Vec<Ring>,
) -> bool {
    let params = params.normalized();
    let inputs = PackingInputs::capture(&params, followers, leader.size);
    if !cache.check(&inputs) {
        return false;
    }

    let mut packed = packing::pack(&followers.sizes(), leader.size, &params);

    assert!(
        followers.is_empty() || !packed.is_empty(),
        "packer produced no rings for {} followers",
        followers.len()
    );
    let placed: usize = packed.iter().map(Ring::len).sum();
    assert_eq!(placed, followers.len(), "packer lost followers");

    for (ring, old) in packed.iter_mut().zip(rings.iter()) {
        ring.rotation = old.rotation;
    }
    *rings = packed;
    cache.mark_packed();

    tracing::debug!(
        followers = followers.len(),
        rings = rings.len(),
        outer_radius = rings.last().map_or(0.0, Ring::outer_edge),
        "repacked follower rings"
    );
    true
}

/// Advances ring rotations for one update.
///
/// Orbit rings turn by `rotation_step` each update, even rings clockwise
/// and odd rings counter-clockwise. Arc rings are not spun; their sector
/// is centred on the direction opposite the leader's heading.
pub fn rotation_phase(rings: &mut [Ring], leader: &Leader, params: &PackingParameters) {
    let params = params.normalized();
    match params.layout {
        Layout::Orbit => {
            let step = params.rotation_step();
            for (i, ring) in rings.iter_mut().enumerate() {
                ring.rotate(if i % 2 == 1 { step } else { -step });
            }
        }
        Layout::Arc => {
            let start =
                wrap_angle(leader.rotation + PI + params.arc_rotation - params.max_angle / 2.0);
            for ring in rings.iter_mut() {
                ring.rotation = start;
            }
        }
    }
}

/// Writes follower positions from the rings, in follower order.
pub fn placement_phase(rings: &[Ring], followers: &mut FollowerSet, leader: &Leader) {
    for ring in rings {
        for (follower, offset) in followers.followers[ring.members()]
            .iter_mut()
            .zip(&ring.offsets)
        {
            follower.pos = leader.pos + polar_to_cartesian(ring.radius, ring.rotation + offset);
        }
    }
}
