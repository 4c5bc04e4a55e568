use crate::error::{FollowError, Result, check_size};
use crate::types::FollowerId;
use glam::Vec2;

/// A circle placed around the leader.
#[derive(Clone, Debug, PartialEq)]
pub struct Follower {
    pub id: FollowerId,
    pub pos: Vec2,
    /// Radius of the follower circle.
    pub size: f32,
}

/// The anchor every follower is placed around.
#[derive(Clone, Debug, PartialEq)]
pub struct Leader {
    pub pos: Vec2,
    pub size: f32,
    /// Heading in radians; the arc sector sits behind it.
    pub rotation: f32,
}

impl Leader {
    pub fn new(pos: Vec2, size: f32) -> Result<Self> {
        Ok(Self {
            pos,
            size: check_size(size)?,
            rotation: 0.0,
        })
    }
}

/// Followers in insertion order.
///
/// The order is the sequence the packer consumes, so removal shifts the
/// tail down instead of swapping.
#[derive(Debug, Default)]
pub struct FollowerSet {
    pub followers: Vec<Follower>,
    next_id: FollowerId,
}

impl FollowerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a follower at `pos` and returns its handle.
    pub fn push(&mut self, pos: Vec2, size: f32) -> Result<FollowerId> {
        let size = check_size(size)?;
        let id = self.next_id;
        self.next_id += 1;
        self.followers.push(Follower { id, pos, size });
        Ok(id)
    }

    pub fn index_of(&self, id: FollowerId) -> Option<usize> {
        self.followers.iter().position(|f| f.id == id)
    }

    pub fn get(&self, id: FollowerId) -> Option<&Follower> {
        self.followers.iter().find(|f| f.id == id)
    }

    fn get_mut(&mut self, id: FollowerId) -> Option<&mut Follower> {
        self.followers.iter_mut().find(|f| f.id == id)
    }

    /// Removes the follower with handle `id`, keeping the order of the rest.
    ///
    /// Unknown handles are ignored.
    pub fn remove(&mut self, id: FollowerId) -> Option<Follower> {
        let index = self.index_of(id)?;
        Some(self.followers.remove(index))
    }

    /// Removes the follower at position `index`; `None` when out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<Follower> {
        if index < self.followers.len() {
            Some(self.followers.remove(index))
        } else {
            None
        }
    }

    pub fn resize(&mut self, id: FollowerId, size: f32) -> Result<()> {
        let size = check_size(size)?;
        let follower = self
            .get_mut(id)
            .ok_or(FollowError::UnknownFollower { id })?;
        follower.size = size;
        Ok(())
    }

    pub fn sizes(&self) -> Vec<f32> {
        self.followers.iter().map(|f| f.size).collect()
    }

    pub fn total_size(&self) -> f32 {
        self.followers.iter().map(|f| f.size).sum()
    }

    pub fn len(&self) -> usize {
        self.followers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.followers.is_empty()
    }
}
