//! Player/opponent contact

use horizon_racer::simulation::{
    find_collision, is_hit, player_rect, CollisionStrategy, DriveInput, Opponent, OpponentId,
    RoadProjector, ScreenRect, ScriptedRandom, SimConfig, SimEvent, SimWorld, Track, TrackSegment,
    Viewport, COLLISION_COOLDOWN, COLLISION_DAMPING, LANE_COUNT, SHAKE_DURATION, SHAKE_STRENGTH,
    VIEW_DISTANCE,
};

const DT: f32 = 1.0 / 60.0;
const STRATEGIES: [CollisionStrategy; 2] = [
    CollisionStrategy::ProjectedRect,
    CollisionStrategy::LaneDistance,
];

fn projector() -> RoadProjector {
    RoadProjector::new(Viewport::default(), VIEW_DISTANCE, LANE_COUNT).unwrap()
}

fn opponent(lane: usize, depth: f32) -> Opponent {
    Opponent {
        id: OpponentId(0),
        lane,
        depth,
        speed: 60.0,
        livery: 1,
    }
}

fn racing_world(strategy: CollisionStrategy) -> SimWorld {
    let config = SimConfig {
        opponent_count: 0,
        item_spawn_gap: 1.0e9,
        collision_strategy: strategy,
        ..SimConfig::default()
    };
    let track = Track::new(vec![TrackSegment::new(1000.0, 0.0)]).unwrap();
    let mut world = SimWorld::new(config, track, Box::new(ScriptedRandom::constant(0.5))).unwrap();
    world.skip_countdown();
    world
}

#[test]
fn test_same_lane_hits() {
    let projector = projector();
    for strategy in STRATEGIES {
        for depth in [1.0, 50.0, 100.0, 189.0] {
            assert!(
                is_hit(&opponent(1, depth), &projector, 0.0, 0.0, strategy),
                "{:?} missed at depth {}",
                strategy,
                depth
            );
        }
    }
}

#[test]
fn test_neighbouring_lane_misses() {
    let projector = projector();
    for strategy in STRATEGIES {
        assert!(!is_hit(&opponent(0, 100.0), &projector, 0.0, 0.0, strategy));
        assert!(!is_hit(&opponent(2, 100.0), &projector, 0.0, 0.0, strategy));
    }
}

#[test]
fn test_strategies_agree_at_lane_center() {
    let projector = projector();
    for strategy in STRATEGIES {
        assert!(is_hit(&opponent(0, 100.0), &projector, 0.0, -0.6, strategy));
        assert!(is_hit(&opponent(2, 100.0), &projector, 0.0, 0.6, strategy));
    }
}

#[test]
fn test_only_near_window_counts() {
    let projector = projector();
    for strategy in STRATEGIES {
        for depth in [-10.0, 0.0, 190.0, 400.0, 3000.0] {
            assert!(
                !is_hit(&opponent(1, depth), &projector, 0.0, 0.0, strategy),
                "{:?} hit at depth {}",
                strategy,
                depth
            );
        }
    }
}

#[test]
fn test_first_match_wins() {
    let projector = projector();
    let opponents = vec![opponent(0, 100.0), opponent(1, 150.0), opponent(1, 100.0)];

    assert_eq!(
        find_collision(&opponents, &projector, 0.0, 0.0, CollisionStrategy::ProjectedRect),
        Some(1)
    );
    assert_eq!(
        find_collision(&opponents[..1], &projector, 0.0, 0.0, CollisionStrategy::ProjectedRect),
        None
    );
}

#[test]
fn test_collision_damps_speed_and_starts_cooldown() {
    for strategy in STRATEGIES {
        let mut world = racing_world(strategy);
        world.player.speed = 200.0;
        world.opponents = vec![opponent(1, 100.0)];

        world.advance(DT, DriveInput::default());

        let expected = (200.0 - world.config.decel * DT) * COLLISION_DAMPING;
        assert!((world.speed() - expected).abs() < 0.01, "speed {}", world.speed());
        assert_eq!(world.effects().collision_cooldown, COLLISION_COOLDOWN);
        assert_eq!(world.effects().shake_time, SHAKE_DURATION);
        assert_eq!(world.effects().shake_intensity, SHAKE_STRENGTH);
        assert_eq!(world.stats.collisions, 1);
        assert!(world
            .events()
            .iter()
            .any(|e| matches!(e, SimEvent::Collision { opponent: id, .. } if *id == OpponentId(0))));

        for _ in 0..10 {
            world.advance(DT, DriveInput::default());
        }
        assert_eq!(world.stats.collisions, 1, "cooldown should suppress repeat hits");
    }
}

#[test]
fn test_no_collisions_before_race_starts() {
    let config = SimConfig {
        opponent_count: 0,
        item_spawn_gap: 1.0e9,
        ..SimConfig::default()
    };
    let mut world = SimWorld::new(
        config,
        Track::default_circuit(),
        Box::new(ScriptedRandom::constant(0.5)),
    )
    .unwrap();
    world.opponents = vec![opponent(1, 100.0)];

    world.advance(DT, DriveInput::default());
    assert_eq!(world.stats.collisions, 0);
}

#[test]
fn test_player_rect_follows_lateral() {
    let viewport = Viewport::default();
    let centered = player_rect(viewport, 0.0);
    let (cx, _) = centered.center();
    assert!((cx - 640.0).abs() < 1e-3);
    assert!((centered.y + centered.h - (720.0 - 30.0)).abs() < 1e-3);

    let right = player_rect(viewport, 1.0);
    assert!((right.x - centered.x - 1280.0 * 0.08).abs() < 1e-3);
}

#[test]
fn test_screen_rect_overlap() {
    let a = ScreenRect::new(0.0, 0.0, 10.0, 10.0);
    let b = ScreenRect::new(5.0, 5.0, 10.0, 10.0);
    let touching = ScreenRect::new(10.0, 0.0, 10.0, 10.0);

    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
    assert!(!a.overlaps(&touching));

    let small = a.shrunk(0.5);
    assert_eq!(small.center(), a.center());
    assert_eq!(small.w, 5.0);
    assert!(!small.overlaps(&ScreenRect::new(8.0, 8.0, 5.0, 5.0)));
}
