//! Lane Racer - simulation core for a top-down lane-dodging racing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, traffic, collisions, difficulty)
//! - `input`: Keyboard mapping into per-tick input snapshots
//! - `session`: Match lifecycle facade for the host UI (start, pause, game over)
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod session;
pub mod sim;
pub mod tuning;

pub use input::{HeldKeys, Key};
pub use session::{MatchResult, Session, Verdict};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;

    /// Placement attempts per lane-group per spawning tick
    pub const MAX_SPAWN_ATTEMPTS: u32 = 5;

    /// Road markings repeat every this many pixels
    pub const ROAD_SCROLL_PERIOD: i32 = 100;
    /// Number of dashed road segments drawn by the renderer
    pub const ROAD_SEGMENT_COUNT: u32 = 20;

    /// Default play area when the host does not supply one
    pub const DEFAULT_PLAY_WIDTH: i32 = 800;
    pub const DEFAULT_PLAY_HEIGHT: i32 = 600;
}
