use follow_core::{FollowEngine, Layout, PackingParameters};
use glam::Vec2;

fn members(engine: &FollowEngine) -> Vec<Vec<usize>> {
    engine.rings().iter().map(|r| r.members().collect()).collect()
}

#[test]
fn three_small_followers_share_one_orbit_ring() {
    let params = PackingParameters::new().with_spacing(5.0).with_ring_gap(10.0);
    let leader_size = 5.0;
    let mut engine = FollowEngine::new(Vec2::ZERO, leader_size, params).unwrap();
    for _ in 0..3 {
        engine.add_follower(10.0).unwrap();
    }
    let (_, positions) = engine.update(Vec2::ZERO);

    assert_eq!(engine.ring_count(), 1);
    let ring = &engine.rings()[0];
    assert!((ring.radius - (10.0 + leader_size + 10.0)).abs() < 1e-4);
    assert_eq!(positions.len(), 3);
    for p in &positions {
        assert!((p.length() - ring.radius).abs() < 1e-3);
    }
}

#[test]
fn twenty_followers_with_tight_gap_need_several_rings() {
    let params = PackingParameters::new().with_spacing(5.0).with_ring_gap(1.0);
    let mut engine = FollowEngine::new(Vec2::ZERO, 5.0, params).unwrap();
    for _ in 0..20 {
        engine.add_follower(10.0).unwrap();
    }
    engine.update(Vec2::ZERO);

    assert!(engine.ring_count() > 1);
    let total: usize = engine.rings().iter().map(|r| r.len()).sum();
    assert_eq!(total, 20);

    for ring in engine.rings() {
        if ring.len() < 2 {
            continue;
        }
        let span = ring.offsets.last().unwrap() - ring.offsets[0];
        assert!(span <= std::f32::consts::TAU + 1e-4);
    }
}

#[test]
fn arc_overflow_defers_newest_follower_to_second_ring() {
    // 90° on each side: a half-circle sector.
    let params = PackingParameters::new()
        .with_layout(Layout::Arc)
        .with_arc_half_angle_deg(90.0)
        .with_spacing(5.0)
        .with_ring_gap(10.0);
    let mut engine = FollowEngine::new(Vec2::ZERO, 5.0, params).unwrap();

    let mut previous = Vec::new();
    let mut added = 0;
    while engine.ring_count() < 2 {
        engine.add_follower(10.0).unwrap();
        added += 1;
        engine.update(Vec2::ZERO);
        if engine.ring_count() == 1 {
            previous = members(&engine);
        }
        assert!(added < 50, "sector never overflowed");
    }

    let rings = members(&engine);
    assert_eq!(rings[0], previous[0], "first ring must keep its prefix");
    assert_eq!(rings[1], vec![added - 1]);
}

#[test]
fn removing_a_middle_follower_repacks_without_empty_rings() {
    let params = PackingParameters::new()
        .with_layout(Layout::Arc)
        .with_arc_half_angle_deg(90.0)
        .with_spacing(5.0)
        .with_ring_gap(10.0);
    let mut engine = FollowEngine::new(Vec2::ZERO, 5.0, params).unwrap();
    let ids: Vec<_> = (0..4).map(|_| engine.add_follower(10.0).unwrap()).collect();
    engine.update(Vec2::ZERO);
    assert_eq!(members(&engine), vec![vec![0, 1, 2], vec![3]]);

    let removed = engine.remove_follower(ids[1]).unwrap();
    assert_eq!(removed.id, ids[1]);
    let (_, positions) = engine.update(Vec2::ZERO);

    assert_eq!(positions.len(), 3);
    assert_eq!(members(&engine), vec![vec![0, 1, 2]]);
    assert!(engine.rings().iter().all(|r| !r.is_empty()));
    let order: Vec<_> = engine.followers().iter().map(|f| f.id).collect();
    assert_eq!(order, vec![ids[0], ids[2], ids[3]]);
}

#[test]
fn orbit_rings_keep_turning_while_layout_stays() {
    let params = PackingParameters::new()
        .with_spacing(5.0)
        .with_ring_gap(1.0)
        .with_rotation_speed(16.0);
    let mut engine = FollowEngine::new(Vec2::ZERO, 5.0, params).unwrap();
    for _ in 0..12 {
        engine.add_follower(6.0).unwrap();
    }
    let (_, first) = engine.update(Vec2::ZERO);
    let radii: Vec<f32> = engine.rings().iter().map(|r| r.radius).collect();
    let (_, second) = engine.update(Vec2::ZERO);

    assert_ne!(first, second);
    let after: Vec<f32> = engine.rings().iter().map(|r| r.radius).collect();
    assert_eq!(radii, after);
    // Each follower stays on its ring.
    for (a, b) in first.iter().zip(&second) {
        assert!((a.length() - b.length()).abs() < 1e-3);
    }
}

#[test]
fn followers_move_with_the_leader() {
    let params = PackingParameters::new().with_rotation_speed(0.0);
    let mut engine = FollowEngine::new(Vec2::ZERO, 5.0, params).unwrap();
    for _ in 0..5 {
        engine.add_follower(4.0).unwrap();
    }
    let (_, at_origin) = engine.update(Vec2::ZERO);
    let shift = Vec2::new(30.0, -12.0);
    let (leader, moved) = engine.update(shift);

    assert_eq!(leader, shift);
    for (a, b) in at_origin.iter().zip(&moved) {
        assert!((*b - *a - shift).length() < 1e-3);
    }
}
