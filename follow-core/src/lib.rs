//! Ring placement of follower circles around a moving leader.
//!
//! Followers orbit the leader on concentric rings (or sit in an arc behind
//! it) without overlapping. The ring layout is only rebuilt when something
//! that shapes it changes; every other frame just moves the rings.
//!
//! Main components:
//! - [`geometry`]: chord/angle conversions and polar coordinates.
//! - [`ring`]: a single band of followers.
//! - [`follower`]: the leader and the ordered follower registry.
//! - [`packing`]: the ring builder.
//! - [`cache`]: change detection and the pack state machine.
//! - [`phases`]: per-frame pack, rotation and placement phases.
//! - [`engine`]: [`engine::FollowEngine`], the API hosts drive each frame.
//! - [`config`]: packing parameters and strategy selectors.
//! - [`error`]: error type for bad sizes and stale handles.
//! - [`types`]: shared type aliases and IDs.

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod follower;
pub mod geometry;
pub mod packing;
pub mod phases;
pub mod ring;
pub mod types;

pub use config::{Distribution, Layout, PackingMode, PackingParameters};
pub use engine::FollowEngine;
pub use error::FollowError;
