/// Stable handle for a follower in a [`crate::follower::FollowerSet`].
///
/// Handles are handed out in increasing order and never reused, so a
/// handle stays valid across the removal of other followers.
pub type FollowerId = u64;
