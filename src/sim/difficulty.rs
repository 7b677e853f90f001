//! Time-based difficulty curves
//!
//! Pure functions of elapsed seconds. With default tuning every curve reaches
//! its cap or floor within two minutes.

use crate::consts::SIM_DT;
use crate::tuning::Tuning;

/// Player move speed: one step up every `move_speed_step_secs`, capped
pub fn move_speed(elapsed_secs: f32, tuning: &Tuning) -> i32 {
    let steps = (elapsed_secs.max(0.0) / tuning.move_speed_step_secs).floor() as i32;
    tuning
        .base_move_speed
        .saturating_add(steps)
        .min(tuning.max_move_speed)
}

/// Average seconds between spawn batches, shrinking toward a floor
pub fn spawn_interval(elapsed_secs: f32, tuning: &Tuning) -> f32 {
    (tuning.base_spawn_interval - tuning.spawn_interval_decay * elapsed_secs.max(0.0))
        .max(tuning.min_spawn_interval)
}

/// Chance that a single tick spawns traffic
pub fn spawn_probability(spawn_interval: f32) -> f64 {
    (f64::from(SIM_DT) / f64::from(spawn_interval)).min(1.0)
}

/// Global speed multiplier, growing toward a cap
pub fn game_speed(elapsed_secs: f32, tuning: &Tuning) -> f32 {
    (tuning.base_game_speed + tuning.game_speed_growth * elapsed_secs.max(0.0))
        .min(tuning.max_game_speed)
}

/// Points earned by an on-road player this tick
pub fn score_increment(game_speed: f32, tuning: &Tuning) -> u64 {
    (tuning.score_per_tick * game_speed).round() as u64
}
