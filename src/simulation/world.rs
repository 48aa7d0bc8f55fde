//! Main simulation world that ties everything together
//!
//! `SimWorld` owns every piece of mutable race state. Each frame goes
//! through `advance` in a fixed order: timers, steering intent, physics,
//! then (while racing) traffic, collisions, items and the finish check,
//! and finally the time-limit check.

use anyhow::{Context, Result};
use log::{debug, info, warn};

use super::collision::{find_collision, player_rect};
use super::config::{
    SimConfig, COLLISION_COOLDOWN, COLLISION_DAMPING, FINISH_FADE_DISTANCE, FLASH_DURATION,
    ITEM_COOLDOWN, ITEM_SHAKE_DURATION, OVERLAY_DURATION, SHAKE_DURATION, SHAKE_STRENGTH,
    SLOW_DURATION, SLOW_SPEED_CAP,
};
use super::effects::EffectTimers;
use super::items::{advance_items, find_pickup, Item, ItemSpawner};
use super::player::PlayerState;
use super::projection::{RoadGeometry, RoadProjector};
use super::race::{RaceLifecycle, RaceState, RaceTransition};
use super::random::{RandomSource, SeededRandom};
use super::track::Track;
use super::traffic::{initial_opponents, update_opponents, Opponent};
use super::types::{DriveInput, ItemKind, ScreenRect, SimEvent, SteerPose};

/// Running tallies for the HUD and the headless summary
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RaceStats {
    pub frames: u64,
    pub collisions: u32,
    pub beneficial_pickups: u32,
    pub harmful_pickups: u32,
    pub respawns: u32,
}

/// The main simulation world
pub struct SimWorld {
    pub config: SimConfig,
    pub track: Track,
    pub projector: RoadProjector,
    pub player: PlayerState,
    pub race: RaceLifecycle,
    pub effects: EffectTimers,

    /// AI cars, replaced in place when recycled
    pub opponents: Vec<Opponent>,

    /// Pickups on the road, order irrelevant
    pub items: Vec<Item>,
    pub item_spawner: ItemSpawner,
    pub stats: RaceStats,

    /// Events raised by the most recent `advance`
    events: Vec<SimEvent>,
    rng: Box<dyn RandomSource>,
}

impl SimWorld {
    /// Build a world, validating the configuration up front
    pub fn new(config: SimConfig, track: Track, mut rng: Box<dyn RandomSource>) -> Result<Self> {
        config.validate().context("Invalid simulation config")?;
        let projector = RoadProjector::new(config.viewport, config.view_distance, config.lane_count)
            .context("Invalid projection settings")?;

        let opponents = initial_opponents(&config, rng.as_mut());
        let race = RaceLifecycle::new(
            config.countdown_duration,
            config.race_time_limit,
            config.finish_distance,
        );

        Ok(Self {
            config,
            track,
            projector,
            player: PlayerState::new(),
            race,
            effects: EffectTimers::default(),
            opponents,
            items: Vec::new(),
            item_spawner: ItemSpawner::new(),
            stats: RaceStats::default(),
            events: Vec::new(),
            rng,
        })
    }

    /// Create a world on the default circuit with a seeded RNG for reproducible runs
    pub fn new_with_seed(seed: u64) -> Result<Self> {
        Self::new(
            SimConfig::default(),
            Track::default_circuit(),
            Box::new(SeededRandom::new(seed)),
        )
    }

    /// Advance the simulation by one frame
    pub fn advance(&mut self, delta_secs: f32, input: DriveInput) {
        let dt = if delta_secs.is_finite() && delta_secs >= 0.0 {
            delta_secs
        } else {
            warn!("Ignoring invalid frame delta {}", delta_secs);
            0.0
        };

        self.events.clear();
        self.stats.frames += 1;

        self.effects.tick(dt);
        if let Some(RaceTransition::Started) = self.race.tick_countdown(dt) {
            self.events.push(SimEvent::RaceStarted);
        }

        self.player
            .resolve_steering(&input, dt, self.config.steer_hold_time);

        let travelled = self.player.integrate(
            &input,
            dt,
            &self.track,
            &self.config,
            self.race.state,
            &mut self.effects,
        );
        self.race.accrue_outro(dt, travelled);

        if self.race.state == RaceState::Racing {
            self.race.accrue(dt);
            self.update_traffic(dt);
            self.update_items(dt);

            if let Some(RaceTransition::Finished) = self.race.check_finish(self.player.distance) {
                self.events.push(SimEvent::Finished {
                    elapsed: self.race.race_elapsed,
                });
            }
        }

        if let Some(RaceTransition::Failed) = self.race.check_time_limit() {
            self.events.push(SimEvent::Failed {
                distance: self.player.distance,
            });
        }
    }

    fn update_traffic(&mut self, delta_secs: f32) {
        let respawned = update_opponents(
            &mut self.opponents,
            self.player.speed,
            delta_secs,
            &self.config,
            self.rng.as_mut(),
        );
        self.stats.respawns += respawned.len() as u32;

        self.check_collisions();
    }

    fn check_collisions(&mut self) {
        if !self.effects.collision_ready() {
            return;
        }

        let hit = find_collision(
            &self.opponents,
            &self.projector,
            self.player.curve_smoothed,
            self.player.lateral,
            self.config.collision_strategy,
        );

        if let Some(slot) = hit {
            let opponent = self.opponents[slot].id;
            self.player.speed = (self.player.speed * COLLISION_DAMPING).max(0.0);
            self.effects.collision_cooldown = COLLISION_COOLDOWN;
            self.effects.shake_time = SHAKE_DURATION;
            self.effects.shake_intensity = SHAKE_STRENGTH;
            self.stats.collisions += 1;

            let rect = self.player_rect();
            debug!("Collision with opponent {:?}", opponent);
            self.events.push(SimEvent::Collision {
                opponent,
                spark_x: rect.x + rect.w * 0.5,
                spark_y: rect.y + rect.h * 0.2,
            });
        }
    }

    fn update_items(&mut self, delta_secs: f32) {
        let closing = self.player.speed * delta_secs * self.config.distance_scale;
        advance_items(&mut self.items, closing, delta_secs);
        self.item_spawner.spawn_if_needed(
            &mut self.items,
            self.player.distance,
            &self.config,
            self.rng.as_mut(),
        );
        self.check_pickup();
    }

    fn check_pickup(&mut self) {
        if !self.effects.pickup_ready() {
            return;
        }

        let picked = find_pickup(
            &self.items,
            &self.projector,
            self.player.curve_smoothed,
            self.player.lateral,
        );
        let Some(index) = picked else {
            return;
        };

        let item = self.items.remove(index);
        match item.kind {
            ItemKind::Harmful => {
                self.effects.slow_timer = SLOW_DURATION;
                self.effects.overlay_timer = OVERLAY_DURATION;
                self.effects.flash_timer = FLASH_DURATION;
                self.effects.item_shake_time = ITEM_SHAKE_DURATION;
                self.player.speed = self.player.speed.min(SLOW_SPEED_CAP);
                self.stats.harmful_pickups += 1;
            }
            ItemKind::Beneficial => {
                self.stats.beneficial_pickups += 1;
            }
        }
        self.effects.item_cooldown = ITEM_COOLDOWN;

        debug!("Picked up {:?} item {:?}", item.kind, item.id);
        self.events.push(SimEvent::ItemPicked {
            item: item.id,
            kind: item.kind,
        });
    }

    /// Reinitialize all race state and go back to the countdown
    pub fn reset(&mut self) {
        self.player = PlayerState::new();
        self.race = RaceLifecycle::new(
            self.config.countdown_duration,
            self.config.race_time_limit,
            self.config.finish_distance,
        );
        self.effects = EffectTimers::default();
        self.items.clear();
        self.item_spawner = ItemSpawner::new();
        self.stats = RaceStats::default();
        self.events.clear();
        self.opponents = initial_opponents(&self.config, self.rng.as_mut());
        info!("Race reset");
    }

    /// Start racing immediately
    pub fn skip_countdown(&mut self) {
        self.race.skip_countdown();
    }

    /// Road geometry at a depth for the current frame
    pub fn project_at(&self, depth: f32) -> RoadGeometry {
        self.projector
            .project(depth, self.player.curve_smoothed, self.player.lateral)
    }

    pub fn player_rect(&self) -> ScreenRect {
        player_rect(self.projector.viewport(), self.player.lateral)
    }

    pub fn speed(&self) -> f32 {
        self.player.speed
    }

    pub fn distance(&self) -> f32 {
        self.player.distance
    }

    pub fn lateral_position(&self) -> f32 {
        self.player.lateral
    }

    pub fn race_state(&self) -> RaceState {
        self.race.state
    }

    pub fn remaining_time(&self) -> f32 {
        self.race.remaining_time()
    }

    pub fn countdown_remaining(&self) -> f32 {
        self.race.countdown_remaining
    }

    pub fn steer_pose(&self) -> SteerPose {
        self.player.steer_pose
    }

    pub fn opponents(&self) -> &[Opponent] {
        &self.opponents
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn effects(&self) -> &EffectTimers {
        &self.effects
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn finish_line_depth(&self) -> f32 {
        self.race.finish_line_depth(self.player.distance)
    }

    pub fn finish_fade(&self) -> f32 {
        self.race.finish_fade(FINISH_FADE_DISTANCE)
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Race Summary ===");
        println!("{}", self.race.summary());
        println!(
            "Speed: {:.0} | Distance: {:.0}/{:.0} | Lateral: {:+.2} | Curve: {:+.2}",
            self.player.speed,
            self.player.distance,
            self.race.finish_distance,
            self.player.lateral,
            self.player.curve_smoothed
        );
        println!(
            "Segment: {}/{} | Curvature: {:+.2}",
            self.track.segment_index_at(self.player.distance) + 1,
            self.track.segments().len(),
            self.track.curvature_at(self.player.distance)
        );
        println!(
            "Collisions: {} | Pickups: {} good, {} bad | Respawns: {}",
            self.stats.collisions,
            self.stats.beneficial_pickups,
            self.stats.harmful_pickups,
            self.stats.respawns
        );
        if self.effects.slow_active() {
            println!("Slowed for {:.1}s", self.effects.slow_timer);
        }

        println!("--- Opponents ---");
        for opponent in &self.opponents {
            println!(
                "  Opponent {:?}: lane={}, depth={:.0}, speed={:.0}",
                opponent.id.0, opponent.lane, opponent.depth, opponent.speed
            );
        }

        if !self.items.is_empty() {
            println!("--- Items ---");
            for item in &self.items {
                println!(
                    "  Item {:?}: {:?}, lane={}, depth={:.0}",
                    item.id.0, item.kind, item.lane, item.depth
                );
            }
        }
    }

    /// Draw the projected road as ASCII art
    ///
    /// Legend: | road edge, : lane line, O opponent, + good item,
    /// x bad item, A player
    pub fn draw_road(&self) {
        const COLS: usize = 64;
        const ROWS: usize = 14;

        let viewport = self.projector.viewport();
        let horizon = viewport.horizon();
        let span = viewport.height - horizon;

        let column = |x: f32| -> Option<usize> {
            let col = (x / viewport.width * COLS as f32).floor();
            (col >= 0.0 && col < COLS as f32).then_some(col as usize)
        };
        let row_of = |depth_fraction: f32| -> Option<usize> {
            if depth_fraction <= 0.0 || depth_fraction > 1.0 {
                return None;
            }
            Some(((depth_fraction * ROWS as f32) as usize).min(ROWS - 1))
        };

        let mut grid = vec![vec![' '; COLS]; ROWS];

        for (row, line) in grid.iter_mut().enumerate() {
            let screen_row = horizon + (row as f32 + 0.5) / ROWS as f32 * span;
            let geometry = self.project_at(self.projector.depth_for_row(screen_row));

            for (col, cell) in line.iter_mut().enumerate() {
                let x = (col as f32 + 0.5) / COLS as f32 * viewport.width;
                if x >= geometry.road_left && x <= geometry.road_right {
                    *cell = '.';
                }
            }
            for lane in 1..self.config.lane_count {
                let x = geometry.lane_left + geometry.lane_width * lane as f32;
                if let Some(col) = column(x) {
                    line[col] = ':';
                }
            }
            for x in [geometry.road_left, geometry.road_right] {
                if let Some(col) = column(x) {
                    line[col] = '|';
                }
            }
        }

        for item in &self.items {
            let geometry = self.project_at(item.depth);
            if let (Some(row), Some(col)) = (
                row_of(geometry.depth_fraction),
                column(geometry.lane_center(item.lane)),
            ) {
                grid[row][col] = match item.kind {
                    ItemKind::Beneficial => '+',
                    ItemKind::Harmful => 'x',
                };
            }
        }

        for opponent in &self.opponents {
            let geometry = self.project_at(opponent.depth);
            if let (Some(row), Some(col)) = (
                row_of(geometry.depth_fraction),
                column(geometry.lane_center(opponent.lane)),
            ) {
                grid[row][col] = 'O';
            }
        }

        let (player_x, _) = self.player_rect().center();
        if let Some(col) = column(player_x) {
            grid[ROWS - 1][col] = 'A';
        }

        println!("+{}+", "-".repeat(COLS));
        for line in &grid {
            println!("|{}|", line.iter().collect::<String>());
        }
        println!("+{}+", "-".repeat(COLS));
    }
}
