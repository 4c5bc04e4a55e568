use crate::types::FollowerId;

/// Errors returned by the follower engine.
///
/// Geometry never fails: out-of-domain trig falls back to fixed values
/// and bad parameters are clamped. Only bad sizes and stale handles are
/// reported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FollowError {
    /// Sizes must be finite and strictly positive.
    #[error("size must be finite and positive, got {size}")]
    InvalidSize { size: f32 },
    /// The handle does not name a follower in the set.
    #[error("no follower with id {id}")]
    UnknownFollower { id: FollowerId },
}

pub type Result<T> = std::result::Result<T, FollowError>;

/// Checks that `size` can be used as a circle radius.
pub(crate) fn check_size(size: f32) -> Result<f32> {
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(FollowError::InvalidSize { size })
    }
}
