//! Collision detection
//!
//! Player cars are checked against every traffic car (Player1 first), then
//! against each other. The first hit ends the match.

use super::state::{Crash, PlayerState, SimulationState, TrafficCar};
use crate::tuning::Tuning;

/// First traffic car overlapping `player`, if any
pub fn player_traffic_hit<'a>(
    player: &PlayerState,
    traffic: &'a [TrafficCar],
    tuning: &Tuning,
) -> Option<&'a TrafficCar> {
    let bounds = player.bounds(tuning);
    traffic.iter().find(|car| bounds.intersects(&car.bounds))
}

/// Whether two players' cars overlap
pub fn players_collide(a: &PlayerState, b: &PlayerState, tuning: &Tuning) -> bool {
    a.bounds(tuning).intersects(&b.bounds(tuning))
}

/// Check the current state for a match-ending collision
pub fn detect(state: &SimulationState) -> Option<Crash> {
    for player in state.players() {
        if let Some(car) = player_traffic_hit(player, &state.traffic, &state.tuning) {
            log::debug!(
                "Player {} hit traffic at {:?}",
                player.id.number(),
                car.bounds.min
            );
            return Some(Crash::Player(player.id));
        }
    }

    if let Some(player2) = &state.player2 {
        if players_collide(&state.player1, player2, &state.tuning) {
            return Some(Crash::Mutual);
        }
    }

    None
}
