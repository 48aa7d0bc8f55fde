//! Transient effect timers
//!
//! Plain countdowns. Some gate gameplay (collision and pickup cooldowns, the
//! slow debuff); the rest only tell the presentation layer what to show.

/// Countdown timers, all in seconds and never negative
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EffectTimers {
    pub collision_cooldown: f32,
    pub item_cooldown: f32,
    pub slow_timer: f32,
    pub shake_time: f32,
    pub shake_intensity: f32,
    pub overlay_timer: f32,
    pub flash_timer: f32,
    pub item_shake_time: f32,
    pub dust_timer: f32,
}

fn count_down(timer: &mut f32, delta_secs: f32) {
    if *timer > 0.0 {
        *timer = (*timer - delta_secs).max(0.0);
    }
}

impl EffectTimers {
    pub fn tick(&mut self, delta_secs: f32) {
        count_down(&mut self.collision_cooldown, delta_secs);
        count_down(&mut self.item_cooldown, delta_secs);
        count_down(&mut self.slow_timer, delta_secs);
        count_down(&mut self.shake_time, delta_secs);
        count_down(&mut self.overlay_timer, delta_secs);
        count_down(&mut self.flash_timer, delta_secs);
        count_down(&mut self.item_shake_time, delta_secs);
        count_down(&mut self.dust_timer, delta_secs);
    }

    pub fn slow_active(&self) -> bool {
        self.slow_timer > 0.0
    }

    pub fn collision_ready(&self) -> bool {
        self.collision_cooldown <= 0.0
    }

    pub fn pickup_ready(&self) -> bool {
        self.item_cooldown <= 0.0
    }
}
