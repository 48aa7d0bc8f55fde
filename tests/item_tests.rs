//! Item spawning, pickup and effects

use horizon_racer::simulation::{
    advance_items, lane_position_normalized, DriveInput, Item, ItemId, ItemKind, RoadProjector,
    ScriptedRandom, SimConfig, SimEvent, SimWorld, Track, TrackSegment, Viewport, ITEM_COOLDOWN,
    ITEM_SPAWN_GAP, LANE_COUNT, SLOW_DURATION, SLOW_SPEED_CAP, VIEW_DISTANCE,
};

const DT: f32 = 1.0 / 60.0;

fn item(id: u32, depth: f32, lane: usize, kind: ItemKind) -> Item {
    Item {
        id: ItemId(id),
        depth,
        lane,
        kind,
        bob_phase: 0.0,
        bob_speed: 2.0,
        bob_amp: 12.0,
    }
}

fn racing_world(item_spawn_gap: f32) -> SimWorld {
    let config = SimConfig {
        opponent_count: 0,
        item_spawn_gap,
        ..SimConfig::default()
    };
    let track = Track::new(vec![TrackSegment::new(1000.0, 0.0)]).unwrap();
    let mut world = SimWorld::new(config, track, Box::new(ScriptedRandom::constant(0.5))).unwrap();
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
fn test_harmful_pickup_slows_car() {
    let mut world = racing_world(1.0e9);
    world.player.speed = 250.0;
    world.items = vec![item(0, 50.0, 1, ItemKind::Harmful)];

    world.advance(DT, throttle());

    assert!(world.items().is_empty(), "item should be consumed");
    assert!(world.speed() <= SLOW_SPEED_CAP);
    assert_eq!(world.effects().slow_timer, SLOW_DURATION);
    assert!(world.effects().overlay_timer > 0.0);
    assert!(world.effects().flash_timer > 0.0);
    assert!(world.effects().item_shake_time > 0.0);
    assert_eq!(world.effects().item_cooldown, ITEM_COOLDOWN);
    assert_eq!(world.stats.harmful_pickups, 1);
    assert!(world.events().contains(&SimEvent::ItemPicked {
        item: ItemId(0),
        kind: ItemKind::Harmful,
    }));
}

#[test]
fn test_slow_cap_holds_until_timer_expires() {
    let mut world = racing_world(1.0e9);
    world.player.speed = 250.0;
    world.items = vec![item(0, 50.0, 1, ItemKind::Harmful)];
    world.advance(DT, throttle());

    for _ in 0..90 {
        world.advance(DT, throttle());
        assert!(world.speed() <= SLOW_SPEED_CAP, "speed {}", world.speed());
    }

    for _ in 0..180 {
        world.advance(DT, throttle());
    }
    assert!(!world.effects().slow_active());
    assert!(world.speed() > SLOW_SPEED_CAP);
}

#[test]
fn test_beneficial_pickup_is_counted_only() {
    let mut world = racing_world(1.0e9);
    world.player.speed = 200.0;
    world.items = vec![item(4, 40.0, 1, ItemKind::Beneficial)];

    world.advance(DT, throttle());

    assert!(world.items().is_empty());
    assert_eq!(world.stats.beneficial_pickups, 1);
    assert!(!world.effects().slow_active());
    assert!(world.speed() > 200.0);
}

#[test]
fn test_item_in_other_lane_is_missed() {
    let mut world = racing_world(1.0e9);
    world.items = vec![item(0, 50.0, 0, ItemKind::Harmful)];

    world.advance(DT, DriveInput::default());

    assert_eq!(world.items().len(), 1);
    assert!(!world.effects().slow_active());
}

#[test]
fn test_item_outside_window_is_not_picked() {
    let mut world = racing_world(1.0e9);
    world.items = vec![
        item(0, 120.0, 1, ItemKind::Harmful),
        item(1, -20.0, 1, ItemKind::Harmful),
    ];

    world.advance(DT, DriveInput::default());
    assert_eq!(world.items().len(), 2);
}

#[test]
fn test_one_pickup_per_frame() {
    let mut world = racing_world(1.0e9);
    world.items = vec![
        item(0, 60.0, 1, ItemKind::Beneficial),
        item(1, 70.0, 1, ItemKind::Beneficial),
    ];

    world.advance(DT, DriveInput::default());
    assert_eq!(world.items().len(), 1);
    assert_eq!(world.items()[0].id, ItemId(0), "later entries are checked first");

    for _ in 0..10 {
        world.advance(DT, DriveInput::default());
    }
    assert_eq!(world.items().len(), 1, "cooldown blocks the second pickup");

    for _ in 0..30 {
        world.advance(DT, DriveInput::default());
    }
    assert!(world.items().is_empty());
    assert_eq!(world.stats.beneficial_pickups, 2);
}

#[test]
fn test_items_spawn_on_distance_gap() {
    let mut world = racing_world(ITEM_SPAWN_GAP);
    world.player.distance = 1500.0;

    world.advance(DT, DriveInput::default());
    assert_eq!(world.items().len(), 1);
    let depth = world.items()[0].depth;
    assert!(depth >= VIEW_DISTANCE * 0.9 && depth <= VIEW_DISTANCE * 0.9 + 500.0);
    assert_eq!(world.item_spawner.last_spawn_distance, 1500.0);

    world.advance(DT, DriveInput::default());
    assert_eq!(world.items().len(), 1);

    world.player.distance = 2899.0;
    world.advance(DT, DriveInput::default());
    assert_eq!(world.items().len(), 1);

    world.player.distance = 2900.0;
    world.advance(DT, DriveInput::default());
    assert_eq!(world.items().len(), 2);
    assert_ne!(world.items()[0].id, world.items()[1].id);
}

#[test]
fn test_no_items_spawn_during_countdown() {
    let config = SimConfig {
        opponent_count: 0,
        ..SimConfig::default()
    };
    let track = Track::new(vec![TrackSegment::new(1000.0, 0.0)]).unwrap();
    let mut world = SimWorld::new(config, track, Box::new(ScriptedRandom::constant(0.5))).unwrap();
    world.player.distance = 5000.0;

    world.advance(DT, DriveInput::default());
    assert!(world.items().is_empty());
}

#[test]
fn test_items_behind_camera_are_removed() {
    let mut items = vec![
        item(0, -190.0, 0, ItemKind::Harmful),
        item(1, 500.0, 2, ItemKind::Beneficial),
    ];

    advance_items(&mut items, 15.0, DT);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, ItemId(1));
    assert_eq!(items[0].depth, 485.0);
    assert!(items[0].bob_phase > 0.0);
}

#[test]
fn test_lane_positions_are_normalized() {
    let projector = RoadProjector::new(Viewport::default(), VIEW_DISTANCE, LANE_COUNT).unwrap();

    let left = lane_position_normalized(&projector, 50.0, 0, 0.0, 0.0, 0.35);
    let middle = lane_position_normalized(&projector, 50.0, 1, 0.0, 0.0, 0.35);
    let right = lane_position_normalized(&projector, 50.0, 2, 0.0, 0.0, 0.35);

    assert!((left + 0.6).abs() < 1e-3);
    assert!(middle.abs() < 1e-3);
    assert!((right - 0.6).abs() < 1e-3);

    for depth in [-100.0, 0.0, 2000.0, 5200.0] {
        for lane in 0..LANE_COUNT {
            let x = lane_position_normalized(&projector, depth, lane, 0.9, -0.7, 0.35);
            assert!((-1.0..=1.0).contains(&x));
        }
    }
}
