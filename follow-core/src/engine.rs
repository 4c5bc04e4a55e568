//! The follower engine: one leader, its followers and their rings.

use crate::{
    cache::{PackState, PackingCache},
    config::PackingParameters,
    error::{Result, check_size},
    follower::{Follower, FollowerSet, Leader},
    phases,
    ring::Ring,
    types::FollowerId,
};
use glam::Vec2;

/// Places followers in rings around a moving leader.
///
/// [`FollowEngine`] glues together:
/// - The follower registry and the leader.
/// - The current rings and the cache that decides when to rebuild them.
/// - The per-frame phases from [`crate::phases`].
///
/// The engine is single-threaded and assumes exclusive access; wrap it in
/// a mutex to share it.
#[derive(Debug)]
pub struct FollowEngine {
    leader: Leader,
    followers: FollowerSet,
    rings: Vec<Ring>,
    params: PackingParameters,
    cache: PackingCache,
}

impl FollowEngine {
    /// Creates an engine with no followers.
    ///
    /// ### Errors
    /// [`crate::FollowError::InvalidSize`] if `leader_size` is not positive.
    pub fn new(leader_pos: Vec2, leader_size: f32, params: PackingParameters) -> Result<Self> {
        Ok(Self {
            leader: Leader::new(leader_pos, leader_size)?,
            followers: FollowerSet::new(),
            rings: Vec::new(),
            params: params.normalized(),
            cache: PackingCache::new(),
        })
    }

    /// Appends a follower of radius `size`; it starts on the leader.
    pub fn add_follower(&mut self, size: f32) -> Result<FollowerId> {
        let id = self.followers.push(self.leader.pos, size)?;
        self.cache.invalidate();
        Ok(id)
    }

    /// Removes a follower. Unknown handles are ignored.
    pub fn remove_follower(&mut self, id: FollowerId) -> Option<Follower> {
        let removed = self.followers.remove(id)?;
        self.cache.invalidate();
        Some(removed)
    }

    /// Removes the follower at position `index` in insertion order.
    pub fn pop_follower(&mut self, index: usize) -> Option<Follower> {
        let removed = self.followers.remove_at(index)?;
        self.cache.invalidate();
        Some(removed)
    }

    pub fn resize_follower(&mut self, id: FollowerId, size: f32) -> Result<()> {
        self.followers.resize(id, size)?;
        self.cache.invalidate();
        Ok(())
    }

    pub fn set_leader_size(&mut self, size: f32) -> Result<()> {
        self.leader.size = check_size(size)?;
        self.cache.invalidate();
        Ok(())
    }

    /// Replaces the parameters. Out-of-range values are clamped.
    pub fn set_parameters(&mut self, params: PackingParameters) {
        self.params = params.normalized();
        self.cache.invalidate();
    }

    pub fn params(&self) -> &PackingParameters {
        &self.params
    }

    /// Direct access to the parameters.
    ///
    /// Changes are picked up by the change-detection cache on the next
    /// update and clamped there.
    pub fn params_mut(&mut self) -> &mut PackingParameters {
        &mut self.params
    }

    /// Moves the leader and places every follower.
    ///
    /// ### Returns
    /// The leader position and the follower positions in insertion order.
    pub fn update(&mut self, leader_pos: Vec2) -> (Vec2, Vec<Vec2>) {
        let rotation = self.leader.rotation;
        self.update_with_rotation(leader_pos, rotation)
    }

    /// Like [`FollowEngine::update`], also setting the leader's heading.
    /// Arc rings sit behind that heading. A non-finite heading is ignored
    /// and the previous one kept.
    pub fn update_with_rotation(&mut self, leader_pos: Vec2, rotation: f32) -> (Vec2, Vec<Vec2>) {
        self.leader.pos = leader_pos;
        if rotation.is_finite() {
            self.leader.rotation = rotation;
        }

        self.repack();
        phases::rotation_phase(&mut self.rings, &self.leader, &self.params);
        phases::placement_phase(&self.rings, &mut self.followers, &self.leader);

        let positions = self.followers.followers.iter().map(|f| f.pos).collect();
        (self.leader.pos, positions)
    }

    /// Rebuilds the rings now if anything that shapes them changed.
    ///
    /// ### Returns
    /// `true` if the rings were rebuilt.
    pub fn repack(&mut self) -> bool {
        self.params = self.params.normalized();
        phases::pack_phase(
            &self.followers,
            &self.leader,
            &self.params,
            &mut self.cache,
            &mut self.rings,
        )
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    pub fn followers(&self) -> &[Follower] {
        &self.followers.followers
    }

    pub fn follower(&self, id: FollowerId) -> Option<&Follower> {
        self.followers.get(id)
    }

    pub fn leader(&self) -> &Leader {
        &self.leader
    }

    pub fn state(&self) -> PackState {
        self.cache.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layout;
    use crate::error::FollowError;

    fn engine() -> FollowEngine {
        let params = PackingParameters::new().with_spacing(5.0).with_ring_gap(10.0);
        FollowEngine::new(Vec2::ZERO, 5.0, params).unwrap()
    }

    #[test]
    fn new_rejects_bad_leader_size() {
        let err = FollowEngine::new(Vec2::ZERO, -1.0, PackingParameters::new()).unwrap_err();
        assert_eq!(err, FollowError::InvalidSize { size: -1.0 });
    }

    #[test]
    fn state_machine_follows_mutations() {
        let mut e = engine();
        assert_eq!(e.state(), PackState::Idle);

        e.update(Vec2::ZERO);
        assert_eq!(e.state(), PackState::Packed);

        e.add_follower(3.0).unwrap();
        assert_eq!(e.state(), PackState::Dirty);
        e.update(Vec2::new(1.0, 0.0));
        assert_eq!(e.state(), PackState::Packed);

        // Moving the leader alone never re-packs.
        assert!(!e.repack());
        e.update(Vec2::new(2.0, 0.0));
        assert_eq!(e.state(), PackState::Packed);
    }

    #[test]
    fn update_returns_positions_in_insertion_order() {
        let mut e = engine();
        let ids: Vec<_> = (0..3).map(|_| e.add_follower(2.0).unwrap()).collect();
        let (leader, positions) = e.update(Vec2::new(10.0, 10.0));
        assert_eq!(leader, Vec2::new(10.0, 10.0));
        assert_eq!(positions.len(), 3);
        for (id, pos) in ids.iter().zip(&positions) {
            assert_eq!(e.follower(*id).unwrap().pos, *pos);
            let r = e.rings()[0].radius;
            assert!((pos.distance(leader) - r).abs() < 1e-3);
        }
    }

    #[test]
    fn resize_errors_on_unknown_handle() {
        let mut e = engine();
        assert_eq!(
            e.resize_follower(3, 1.0),
            Err(FollowError::UnknownFollower { id: 3 })
        );
    }

    #[test]
    fn params_mut_changes_are_caught_by_cache() {
        let mut e = engine();
        for _ in 0..6 {
            e.add_follower(10.0).unwrap();
        }
        e.update(Vec2::ZERO);
        let before = e.rings()[0].radius;

        e.params_mut().ring_gap = 40.0;
        assert_eq!(e.state(), PackState::Packed);
        e.update(Vec2::ZERO);
        assert!(e.rings()[0].radius > before);
    }

    #[test]
    fn params_mut_values_are_clamped_on_update() {
        let mut e = engine();
        e.add_follower(1.0).unwrap();
        e.params_mut().ring_gap = -5.0;
        e.params_mut().follower_spacing = -1.0;
        e.update(Vec2::ZERO);
        assert_eq!(e.params().ring_gap, 1.0);
        assert_eq!(e.params().follower_spacing, 0.0);
    }

    #[test]
    fn leader_size_pushes_rings_out() {
        let mut e = engine();
        e.add_follower(4.0).unwrap();
        e.update(Vec2::ZERO);
        assert!((e.rings()[0].radius - 19.0).abs() < 1e-4);
        e.set_leader_size(15.0).unwrap();
        e.update(Vec2::ZERO);
        assert!((e.rings()[0].radius - 29.0).abs() < 1e-4);
        assert!(e.set_leader_size(0.0).is_err());
    }

    #[test]
    fn arc_followers_trail_behind_heading() {
        let params = PackingParameters::new()
            .with_layout(Layout::Arc)
            .with_arc_half_angle_deg(30.0);
        let mut e = FollowEngine::new(Vec2::ZERO, 5.0, params).unwrap();
        e.add_follower(3.0).unwrap();
        let (_, positions) = e.update_with_rotation(Vec2::ZERO, 0.0);
        // Heading +x: the lone follower is on the -x axis.
        assert!(positions[0].x < 0.0);
        assert!(positions[0].y.abs() < 1e-3);

        let (_, positions) = e.update_with_rotation(Vec2::ZERO, std::f32::consts::FRAC_PI_2);
        assert!(positions[0].y < 0.0);
        assert!(positions[0].x.abs() < 1e-3);
    }

    #[test]
    fn invalid_sizes_never_reach_the_rings() {
        let mut e = engine();
        let id = e.add_follower(4.0).unwrap();
        e.update(Vec2::ZERO);

        for bad in [f32::NAN, f32::INFINITY, 0.0, -2.0] {
            assert!(matches!(
                e.resize_follower(id, bad),
                Err(FollowError::InvalidSize { .. })
            ));
            assert!(matches!(
                e.add_follower(bad),
                Err(FollowError::InvalidSize { .. })
            ));
        }
        assert_eq!(e.follower(id).unwrap().size, 4.0);
        assert_eq!(e.followers().len(), 1);

        // Rejected edits leave the cache settled.
        assert_eq!(e.state(), PackState::Packed);
        assert!(!e.repack());
        e.update(Vec2::ZERO);
        assert!(!e.repack());
    }

    #[test]
    fn non_finite_heading_keeps_previous_one() {
        let params = PackingParameters::new()
            .with_layout(Layout::Arc)
            .with_arc_half_angle_deg(30.0);
        let mut e = FollowEngine::new(Vec2::ZERO, 5.0, params).unwrap();
        e.add_follower(3.0).unwrap();
        let (_, before) = e.update_with_rotation(Vec2::ZERO, 0.5);

        let (_, after) = e.update_with_rotation(Vec2::ZERO, f32::NAN);
        assert!(after[0].is_finite());
        assert!((after[0] - before[0]).length() < 1e-4);
        assert_eq!(e.leader().rotation, 0.5);
    }

    #[test]
    fn pop_and_remove_are_noops_when_missing() {
        let mut e = engine();
        assert!(e.pop_follower(0).is_none());
        assert!(e.remove_follower(5).is_none());
        let id = e.add_follower(2.0).unwrap();
        assert_eq!(e.pop_follower(0).unwrap().id, id);
        assert!(e.followers().is_empty());
    }
}
