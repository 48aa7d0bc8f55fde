//! Player physics driven through `SimWorld::advance`

use horizon_racer::simulation::{
    DriveInput, RaceState, ScriptedRandom, SimConfig, SimWorld, SteerPose, Track, TrackSegment,
    ACCEL, MAX_SPEED, OFFROAD_SPEED_CAP,
};

const DT: f32 = 1.0 / 60.0;

/// No traffic and no pickups, so only the car itself matters
fn quiet_config() -> SimConfig {
    SimConfig {
        opponent_count: 0,
        item_spawn_gap: 1.0e9,
        ..SimConfig::default()
    }
}

fn track_with_curve(curvature: f32) -> Track {
    Track::new(vec![TrackSegment::new(1000.0, curvature)]).unwrap()
}

fn racing_world(curvature: f32) -> SimWorld {
    let mut world = SimWorld::new(
        quiet_config(),
        track_with_curve(curvature),
        Box::new(ScriptedRandom::constant(0.5)),
    )
    .unwrap();
    world.skip_countdown();
    world
}

fn throttle() -> DriveInput {
    DriveInput {
        accelerate: true,
        ..Default::default()
    }
}

#[test]
fn test_full_throttle_reaches_top_speed() {
    let mut world = racing_world(0.0);

    for _ in 0..300 {
        world.advance(DT, throttle());
    }

    assert_eq!(world.speed(), MAX_SPEED.min(ACCEL * 5.0));
    assert_eq!(world.race_state(), RaceState::Racing);
    assert!(world.distance() > 0.0);
}

#[test]
fn test_acceleration_rate() {
    let config = SimConfig {
        max_speed: 1000.0,
        ..quiet_config()
    };
    let mut world = SimWorld::new(
        config,
        track_with_curve(0.0),
        Box::new(ScriptedRandom::constant(0.5)),
    )
    .unwrap();
    world.skip_countdown();

    for _ in 0..60 {
        world.advance(DT, throttle());
    }
    assert!((world.speed() - ACCEL).abs() < 0.01, "speed {}", world.speed());
}

#[test]
fn test_braking_and_coasting_stop_at_zero() {
    let mut world = racing_world(0.0);
    world.player.speed = 100.0;

    let brake = DriveInput {
        brake: true,
        ..Default::default()
    };
    for _ in 0..60 {
        world.advance(DT, brake);
    }
    assert_eq!(world.speed(), 0.0);

    world.player.speed = 40.0;
    for _ in 0..60 {
        world.advance(DT, DriveInput::default());
    }
    assert_eq!(world.speed(), 0.0);
}

#[test]
fn test_distance_follows_speed() {
    let mut world = racing_world(0.0);
    world.player.speed = MAX_SPEED;

    world.advance(DT, throttle());
    let expected = MAX_SPEED * DT * world.config.distance_scale;
    assert!((world.distance() - expected).abs() < 1e-3);
}

#[test]
fn test_speed_and_lateral_stay_in_bounds() {
    let mut world = SimWorld::new_with_seed(11).unwrap();
    let deltas = [DT, 0.033, 0.001, 0.02, 0.0];

    for frame in 0..4000 {
        let input = DriveInput {
            accelerate: frame % 7 != 0,
            brake: frame % 13 == 0,
            steer_left: (frame / 90) % 3 == 0,
            steer_right: (frame / 50) % 4 == 1,
        };
        world.advance(deltas[frame % deltas.len()], input);

        assert!(
            world.speed() >= 0.0 && world.speed() <= world.config.max_speed,
            "speed {} out of range at frame {}",
            world.speed(),
            frame
        );
        assert!(
            (-1.0..=1.0).contains(&world.lateral_position()),
            "lateral {} out of range at frame {}",
            world.lateral_position(),
            frame
        );
    }
}

#[test]
fn test_steering_moves_car_across_road() {
    let mut world = racing_world(0.0);
    let right = DriveInput {
        steer_right: true,
        ..Default::default()
    };

    for _ in 0..30 {
        world.advance(DT, right);
    }
    assert!((world.lateral_position() - 0.45).abs() < 1e-3);

    let both = DriveInput {
        steer_left: true,
        steer_right: true,
        ..Default::default()
    };
    let before = world.lateral_position();
    world.advance(DT, both);
    assert_eq!(world.lateral_position(), before, "opposite keys cancel out");
}

#[test]
fn test_curve_pushes_car_outward_harder_at_speed() {
    let mut fast = racing_world(1.0);
    fast.player.speed = MAX_SPEED;
    let mut slow = racing_world(1.0);

    let brake = DriveInput {
        brake: true,
        ..Default::default()
    };
    for _ in 0..30 {
        fast.advance(DT, throttle());
        slow.advance(DT, brake);
    }

    assert!(fast.player.curve_smoothed > 0.0);
    assert!(slow.lateral_position() < 0.0, "assist drifts even when stopped");
    assert!(
        fast.lateral_position() < slow.lateral_position(),
        "fast {} should be pushed further than slow {}",
        fast.lateral_position(),
        slow.lateral_position()
    );
}

#[test]
fn test_curve_smoothing_approaches_target() {
    let mut world = racing_world(-0.8);
    world.advance(DT, DriveInput::default());
    let first = world.player.curve_smoothed;
    assert!(first < 0.0 && first > -0.8);

    for _ in 0..600 {
        world.advance(DT, DriveInput::default());
    }
    assert!((world.player.curve_smoothed + 0.8).abs() < 0.01);
}

#[test]
fn test_input_is_ignored_during_countdown() {
    let mut world = SimWorld::new(
        quiet_config(),
        track_with_curve(0.0),
        Box::new(ScriptedRandom::constant(0.5)),
    )
    .unwrap();
    let input = DriveInput {
        accelerate: true,
        steer_right: true,
        ..Default::default()
    };

    for _ in 0..60 {
        world.advance(DT, input);
    }
    assert_eq!(world.race_state(), RaceState::Countdown);
    assert_eq!(world.speed(), 0.0);
    assert_eq!(world.distance(), 0.0);
    assert_eq!(world.lateral_position(), 0.0);
    // The sprite still leans so the player sees the key register
    assert_eq!(world.steer_pose(), SteerPose::Right);
}

#[test]
fn test_steer_pose_holds_after_tap() {
    let mut world = racing_world(0.0);
    let left = DriveInput {
        steer_left: true,
        ..Default::default()
    };

    world.advance(DT, left);
    assert_eq!(world.steer_pose(), SteerPose::Left);

    world.advance(0.05, DriveInput::default());
    assert_eq!(world.steer_pose(), SteerPose::Left, "pose should outlive a short tap");

    world.advance(0.1, DriveInput::default());
    assert_eq!(world.steer_pose(), SteerPose::Neutral);
}

#[test]
fn test_off_road_drags_speed_down() {
    let mut world = racing_world(0.0);
    world.player.lateral = 0.95;
    world.player.speed = MAX_SPEED;

    world.advance(DT, throttle());
    assert!(world.speed() < MAX_SPEED);
    assert!(world.effects().dust_timer > 0.0);

    for _ in 0..240 {
        world.advance(DT, throttle());
    }
    assert!(
        (world.speed() - OFFROAD_SPEED_CAP).abs() < 1e-3,
        "speed {} should settle at the shoulder cap",
        world.speed()
    );
}

#[test]
fn test_off_road_does_not_raise_slow_speed() {
    let mut world = racing_world(0.0);
    world.player.lateral = -0.95;
    world.player.speed = 100.0;

    world.advance(DT, DriveInput::default());
    assert!(world.speed() < 100.0);
    assert!(world.effects().dust_timer > 0.0);
}

#[test]
fn test_invalid_tuning_is_rejected() {
    let cases: Vec<(&str, SimConfig)> = vec![
        ("negative smoothing", SimConfig { curve_smooth_rate: -1.0, ..SimConfig::default() }),
        ("nan smoothing", SimConfig { curve_smooth_rate: f32::NAN, ..SimConfig::default() }),
        ("negative turn speed", SimConfig { turn_speed: -0.9, ..SimConfig::default() }),
        ("infinite turn speed", SimConfig { turn_speed: f32::INFINITY, ..SimConfig::default() }),
        ("negative assist", SimConfig { curve_assist: -0.28, ..SimConfig::default() }),
        ("negative centrifugal", SimConfig { centrifugal: -0.35, ..SimConfig::default() }),
        ("nan centrifugal", SimConfig { centrifugal: f32::NAN, ..SimConfig::default() }),
        ("negative steer hold", SimConfig { steer_hold_time: -0.1, ..SimConfig::default() }),
        ("nan accel", SimConfig { accel: f32::NAN, ..SimConfig::default() }),
        ("infinite max speed", SimConfig { max_speed: f32::INFINITY, ..SimConfig::default() }),
        ("nan distance scale", SimConfig { distance_scale: f32::NAN, ..SimConfig::default() }),
        ("infinite time limit", SimConfig { race_time_limit: f32::INFINITY, ..SimConfig::default() }),
        ("nan countdown", SimConfig { countdown_duration: f32::NAN, ..SimConfig::default() }),
    ];

    assert!(SimConfig::default().validate().is_ok());
    for (label, config) in cases {
        assert!(config.validate().is_err(), "{} should be rejected", label);
        let world = SimWorld::new(
            config,
            track_with_curve(0.5),
            Box::new(ScriptedRandom::constant(0.5)),
        );
        assert!(world.is_err(), "{} should not build a world", label);
    }
}

#[test]
fn test_fast_smoothing_keeps_lateral_bounded() {
    let config = SimConfig {
        curve_smooth_rate: 500.0,
        ..quiet_config()
    };
    let mut world = SimWorld::new(
        config,
        track_with_curve(0.5),
        Box::new(ScriptedRandom::constant(0.5)),
    )
    .unwrap();
    world.skip_countdown();

    for _ in 0..6000 {
        world.advance(DT, DriveInput::default());
        assert!((-1.0..=1.0).contains(&world.lateral_position()));
        assert!(world.player.curve_smoothed.is_finite());
    }
    assert_eq!(world.player.curve_smoothed, 0.5);
}
