mod simulation;

#[cfg(feature = "ui")]
mod ui;

use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use log::info;

use simulation::{
    lane_position_normalized, CollisionStrategy, DriveInput, FrameLoop, ItemKind, ManualClock,
    SeededRandom, SimConfig, SimWorld, Track, FINISH_DISTANCE, RACE_TIME_LIMIT,
};

#[derive(Parser)]
#[command(name = "horizon_racer")]
#[command(about = "Pseudo-3D racing simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of frames to run in headless mode
    #[arg(long, default_value = "3600")]
    frames: u32,

    /// Host frame time in seconds (clamped before it reaches the simulation)
    #[arg(long, default_value = "0.016")]
    delta: f32,

    /// Seed for a reproducible race
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds allowed to reach the finish
    #[arg(long, default_value_t = RACE_TIME_LIMIT)]
    time_limit: f32,

    /// World distance of the finish line
    #[arg(long, default_value_t = FINISH_DISTANCE)]
    finish_distance: f32,

    /// Collision test to use
    #[arg(long, value_enum, default_value = "rect")]
    collision: CollisionArg,

    /// Start racing without the countdown
    #[arg(long)]
    no_countdown: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CollisionArg {
    /// Projected bounding box overlap
    Rect,
    /// Normalized lane distance
    Lane,
}

impl From<CollisionArg> for CollisionStrategy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Rect => CollisionStrategy::ProjectedRect,
            CollisionArg::Lane => CollisionStrategy::LaneDistance,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let world = build_world(&cli)?;

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(world);
        }
        #[cfg(not(feature = "ui"))]
        {
            drop(world);
            anyhow::bail!("UI feature is not enabled. Rebuild with --features ui");
        }
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
        run_headless(world, cli.frames, cli.delta);
    }
    Ok(())
}

/// Longest host frame the headless runner accepts
const MAX_HOST_DELTA: f32 = 1.0;

fn build_world(cli: &Cli) -> Result<SimWorld> {
    ensure!(
        cli.delta.is_finite() && cli.delta > 0.0 && cli.delta <= MAX_HOST_DELTA,
        "--delta must be in (0, {}] seconds, got {}",
        MAX_HOST_DELTA,
        cli.delta
    );
    let config = SimConfig {
        race_time_limit: cli.time_limit,
        finish_distance: cli.finish_distance,
        collision_strategy: cli.collision.into(),
        ..SimConfig::default()
    };
    let rng = match cli.seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_os(),
    };

    let mut world = SimWorld::new(config, Track::default_circuit(), Box::new(rng))?;
    if cli.no_countdown {
        world.skip_countdown();
    }
    Ok(world)
}

/// Run the race in headless mode with the autopilot at the wheel
fn run_headless(mut world: SimWorld, frames: u32, delta: f32) {
    println!("Running race simulation in headless mode...");
    println!("Frames: {}, Delta: {}s", frames, delta);

    // Print once per second of host time
    let frames_per_second = (1.0 / delta.max(0.001)).ceil() as u32;
    println!();

    println!("Initial state:");
    world.print_summary();
    world.draw_road();
    println!();

    let mut frame_loop = FrameLoop::new(ManualClock::new());
    let mut frame = 0;
    while frame < frames {
        frame_loop.clock_mut().advance_secs(delta);
        let input = autopilot(&world);
        frame_loop.tick(&mut world, input);
        frame += 1;

        if frame % frames_per_second == 0 {
            println!(
                "--- After frame {} ({:.1}s simulated time) ---",
                frame,
                frame_loop.simulated_secs()
            );
            world.print_summary();
            world.draw_road();
            println!();
        }

        if world.race_state().is_terminal() && world.speed() <= 0.0 {
            break;
        }
    }

    info!(
        "Race over: {} after {} frames, distance {:.0}, {} collisions",
        world.race_state().label(),
        frame_loop.ticks(),
        world.distance(),
        world.stats.collisions
    );

    println!("=== Final State ===");
    world.print_summary();
    world.draw_road();
}

/// Depth the autopilot looks ahead when picking a lane
const LOOKAHEAD_DEPTH: f32 = 900.0;
/// Lateral error the autopilot tolerates before steering
const STEER_DEADBAND: f32 = 0.04;

/// Simple driver: full throttle, stay in a lane free of cars and bad items
fn autopilot(world: &SimWorld) -> DriveInput {
    let lateral = world.lateral_position();
    let curve = world.player.curve_smoothed;
    let lane_count = world.config.lane_count;

    let lane_x = |lane: usize| {
        lane_position_normalized(&world.projector, 300.0, lane, curve, lateral, 0.35)
    };
    let blocked = |lane: usize| {
        let car_ahead = world
            .opponents()
            .iter()
            .any(|o| o.lane == lane && o.depth > 0.0 && o.depth < LOOKAHEAD_DEPTH);
        let hazard_ahead = world.items().iter().any(|item| {
            item.lane == lane
                && item.kind == ItemKind::Harmful
                && item.depth > 0.0
                && item.depth < LOOKAHEAD_DEPTH
        });
        car_ahead || hazard_ahead
    };

    let current = (0..lane_count)
        .min_by(|a, b| {
            let da = (lane_x(*a) - lateral).abs();
            let db = (lane_x(*b) - lateral).abs();
            da.total_cmp(&db)
        })
        .unwrap_or(0);

    let target = if blocked(current) {
        (0..lane_count)
            .filter(|lane| !blocked(*lane))
            .min_by_key(|lane| lane.abs_diff(current))
            .unwrap_or(current)
    } else {
        current
    };

    let error = lane_x(target) - lateral;
    DriveInput {
        accelerate: true,
        brake: false,
        steer_left: error < -STEER_DEADBAND,
        steer_right: error > STEER_DEADBAND,
    }
}

#[cfg(feature = "ui")]
fn run_with_ui(world: SimWorld) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    println!("Starting Horizon Racer UI...");
    println!();
    println!("Controls:");
    println!("  Up/Down     - Throttle / brake");
    println!("  Left/Right  - Steer");
    println!("  R           - Restart race");
    println!("  ESC         - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,horizon_racer=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Horizon Racer".into(),
                        resolution: (1280, 720).into(),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(ui::SimWorldResource(world))
        .add_plugins(ui::RacerUIPlugin)
        .run();
}
