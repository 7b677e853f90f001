//! Player movement from held directions

use glam::IVec2;

use super::state::PlayerState;
use super::tick::{Direction, Directions};
use crate::tuning::Tuning;

/// Inclusive range a player's position is clamped to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveBounds {
    pub min: IVec2,
    pub max: IVec2,
}

impl MoveBounds {
    pub fn new(width: i32, height: i32, tuning: &Tuning) -> Self {
        let half_width = tuning.player_width / 2;
        Self {
            min: IVec2::new(half_width, tuning.player_top_margin),
            max: IVec2::new(width - half_width, height - tuning.player_height),
        }
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        pos.cmpge(self.min).all() && pos.cmple(self.max).all()
    }
}

/// Move one player by `speed` for each held direction, clamping after each step
pub fn move_player(player: &mut PlayerState, held: Directions, speed: i32, bounds: &MoveBounds) {
    for direction in held.iter() {
        let pos = &mut player.position;
        match direction {
            Direction::Up => pos.y = (pos.y - speed).clamp(bounds.min.y, bounds.max.y),
            Direction::Down => pos.y = (pos.y + speed).clamp(bounds.min.y, bounds.max.y),
            Direction::Left => pos.x = (pos.x - speed).clamp(bounds.min.x, bounds.max.x),
            Direction::Right => pos.x = (pos.x + speed).clamp(bounds.min.x, bounds.max.x),
        }
    }
}
