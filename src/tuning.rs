//! Game balance tuning
//!
//! Every balance constant of the simulation lives here so a host can override
//! them from a JSON file. Missing fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("play area must be positive, got {width}x{height}")]
    PlayArea { width: i32, height: i32 },
    #[error("lane is {lane_width}px wide but a traffic car needs {car_width}px")]
    LaneTooNarrow { lane_width: i32, car_width: i32 },
    #[error("player car {width}x{height} does not fit the play area")]
    PlayerTooLarge { width: i32, height: i32 },
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player car ===
    /// Collision box width of a player car
    pub player_width: i32,
    /// Collision box height of a player car
    pub player_height: i32,
    /// Distance from a player's position to the top of its collision box,
    /// also the minimum y a player may reach
    pub player_top_margin: i32,
    /// Gap between the lowest allowed position and the start position
    pub player_start_offset: i32,

    // === Traffic ===
    pub traffic_width: i32,
    pub traffic_height: i32,
    /// Slowest traffic speed (pixels per tick at game speed 1.0)
    pub traffic_base_speed: f32,
    /// Random extra speed added on top of the base
    pub traffic_speed_band: f32,
    /// y coordinate new traffic appears at (above the visible area)
    pub traffic_spawn_y: i32,
    /// How far below the play area a car may travel before it is dropped
    pub traffic_despawn_margin: i32,
    /// Horizontal padding around existing traffic checked when spawning
    pub safety_margin: i32,

    // === Road ===
    /// Gap between a multiplayer lane and the screen edge or centerline
    pub lane_inset: i32,
    /// Road marking scroll per tick at game speed 1.0
    pub road_scroll_speed: f32,

    // === Difficulty ===
    pub base_move_speed: i32,
    pub max_move_speed: i32,
    /// Seconds between +1 move speed steps
    pub move_speed_step_secs: f32,
    /// Average seconds between spawn batches at the start of a match
    pub base_spawn_interval: f32,
    pub min_spawn_interval: f32,
    /// Spawn interval reduction per elapsed second
    pub spawn_interval_decay: f32,
    pub base_game_speed: f32,
    pub max_game_speed: f32,
    /// Game speed increase per elapsed second
    pub game_speed_growth: f32,

    // === Scoring ===
    /// Points per tick at game speed 1.0
    pub score_per_tick: f32,
    /// Points lost per off-road tick at game speed 1.0
    pub offroad_penalty: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_width: 50,
            player_height: 90,
            player_top_margin: 50,
            player_start_offset: 30,

            traffic_width: 50,
            traffic_height: 90,
            traffic_base_speed: 3.0,
            traffic_speed_band: 4.0,
            traffic_spawn_y: -100,
            traffic_despawn_margin: 100,
            safety_margin: 20,

            lane_inset: 10,
            road_scroll_speed: 5.0,

            base_move_speed: 5,
            max_move_speed: 10,
            move_speed_step_secs: 15.0,
            base_spawn_interval: 1.5,
            min_spawn_interval: 0.3,
            spawn_interval_decay: 0.01,
            base_game_speed: 1.0,
            max_game_speed: 2.0,
            game_speed_growth: 0.01,

            score_per_tick: 10.0,
            offroad_penalty: 20.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that these values produce a playable match on a `width` x `height` area
    pub fn validate(&self, width: i32, height: i32) -> Result<(), TuningError> {
        if width <= 0 || height <= 0 {
            return Err(TuningError::PlayArea { width, height });
        }
        if self.player_width <= 0
            || self.player_height <= 0
            || self.player_width > width
            || self.player_top_margin < 0
            || self.player_top_margin > height - self.player_height
        {
            return Err(TuningError::PlayerTooLarge {
                width: self.player_width,
                height: self.player_height,
            });
        }
        if self.traffic_width <= 0 || self.traffic_height <= 0 {
            return Err(invalid("traffic_width", "traffic cars need a positive size"));
        }

        // Narrowest lane either mode can produce
        let single_lane = width / 2;
        let split_lane = width / 2 - 2 * self.lane_inset;
        let lane_width = single_lane.min(split_lane);
        if lane_width < self.traffic_width {
            return Err(TuningError::LaneTooNarrow {
                lane_width,
                car_width: self.traffic_width,
            });
        }

        // Each multiplayer car must fit its own lane, or the two start overlapping
        if split_lane < self.player_width {
            return Err(TuningError::LaneTooNarrow {
                lane_width: split_lane,
                car_width: self.player_width,
            });
        }
        if self.player_start_offset < 0
            || self.player_start_offset > height - self.player_height - self.player_top_margin
        {
            return Err(invalid(
                "player_start_offset",
                "start position must lie inside the movement bounds",
            ));
        }

        if self.lane_inset < 0 {
            return Err(invalid("lane_inset", "must not be negative"));
        }
        if self.safety_margin < 0 {
            return Err(invalid("safety_margin", "must not be negative"));
        }
        if self.traffic_despawn_margin < 0 {
            return Err(invalid("traffic_despawn_margin", "must not be negative"));
        }
        if self.traffic_base_speed <= 0.0 {
            return Err(invalid("traffic_base_speed", "traffic must move forward"));
        }
        if self.traffic_speed_band <= 0.0 {
            return Err(invalid("traffic_speed_band", "speed band must not be empty"));
        }
        if self.base_move_speed <= 0 || self.max_move_speed < self.base_move_speed {
            return Err(invalid("max_move_speed", "must be at least base_move_speed"));
        }
        if self.move_speed_step_secs <= 0.0 {
            return Err(invalid("move_speed_step_secs", "must be positive"));
        }
        if self.min_spawn_interval <= 0.0 {
            return Err(invalid("min_spawn_interval", "traffic must never stop"));
        }
        if self.base_spawn_interval < self.min_spawn_interval {
            return Err(invalid("base_spawn_interval", "must be at least min_spawn_interval"));
        }
        if self.spawn_interval_decay < 0.0 {
            return Err(invalid("spawn_interval_decay", "difficulty must not ease over time"));
        }
        if self.game_speed_growth < 0.0 {
            return Err(invalid("game_speed_growth", "difficulty must not ease over time"));
        }
        if self.base_game_speed <= 0.0 || self.max_game_speed < self.base_game_speed {
            return Err(invalid("max_game_speed", "must be at least base_game_speed"));
        }
        if self.score_per_tick < 0.0 {
            return Err(invalid("score_per_tick", "must not be negative"));
        }
        if self.offroad_penalty < 0.0 {
            return Err(invalid("offroad_penalty", "must not be negative"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    TuningError::Invalid { field, reason }
}
