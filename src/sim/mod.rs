//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected random source only
//! - Stable iteration order (Player1 before Player2, traffic in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod geometry;
pub mod movement;
pub mod random;
pub mod road;
pub mod state;
pub mod tick;
pub mod traffic;

pub use geometry::Rect;
pub use random::{RandomSource, SeededRandom, SequenceRandom};
pub use road::{Lane, RoadLayout, RoadState};
pub use state::{
    CarColor, Crash, PlayerId, PlayerState, SimulationState, SimulationStatus, TrafficCar,
};
pub use tick::{Direction, Directions, TickInput, update};
pub use traffic::SpawnOutcome;
