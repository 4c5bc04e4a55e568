use follow_core::config::MIN_RING_GAP;
use follow_core::{Distribution, FollowEngine, Layout, PackingMode, PackingParameters};
use glam::Vec2;

#[test]
fn partial_json_falls_back_to_defaults() {
    let params: PackingParameters =
        serde_json::from_str(r#"{ "ring_gap": 4.0, "layout": "Arc", "strong": true }"#).unwrap();
    let defaults = PackingParameters::new();

    assert_eq!(params.ring_gap, 4.0);
    assert_eq!(params.layout, Layout::Arc);
    assert!(params.strong);
    assert_eq!(params.follower_spacing, defaults.follower_spacing);
    assert_eq!(params.max_angle, defaults.max_angle);
    assert_eq!(params.distribution, Distribution::Uniform);
    assert_eq!(params.packing, PackingMode::Exact);
}

#[test]
fn out_of_range_config_is_clamped_by_engine() {
    let params: PackingParameters =
        serde_json::from_str(r#"{ "ring_gap": -3.0, "follower_spacing": -8.0 }"#).unwrap();
    let engine = FollowEngine::new(Vec2::ZERO, 5.0, params).unwrap();

    assert_eq!(engine.params().ring_gap, MIN_RING_GAP);
    assert_eq!(engine.params().follower_spacing, 0.0);
}

#[test]
fn unknown_layout_is_rejected() {
    let err = serde_json::from_str::<PackingParameters>(r#"{ "layout": "Spiral" }"#);
    assert!(err.is_err());
}
