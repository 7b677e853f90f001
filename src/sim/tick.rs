//! Fixed timestep simulation tick
//!
//! Core game loop that advances the race deterministically: the result of a
//! tick depends only on the prior state, the input snapshot and the draws
//! taken from the random source.

use serde::{Deserialize, Serialize};

use super::collision;
use super::difficulty;
use super::movement::{MoveBounds, move_player};
use super::random::RandomSource;
use super::road::apply_off_road;
use super::state::{PlayerId, SimulationState, SimulationStatus};
use super::traffic;

/// One steering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Set of directions held by one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Directions {
    pub fn with(mut self, direction: Direction) -> Self {
        self.set(direction, true);
        self
    }

    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }

    /// Held directions in a fixed order
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.is_held(*d))
    }
}

impl From<Direction> for Directions {
    fn from(direction: Direction) -> Self {
        Directions::default().with(direction)
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub player1: Directions,
    /// Ignored in single-player
    pub player2: Directions,
}

impl TickInput {
    pub fn for_player(&self, id: PlayerId) -> Directions {
        match id {
            PlayerId::Player1 => self.player1,
            PlayerId::Player2 => self.player2,
        }
    }
}

/// Advance the simulation by one fixed timestep
///
/// Does nothing unless the match is racing. Stages run in a fixed order:
/// difficulty, movement, off-road check, road and traffic, collisions, then
/// score and clock.
pub fn update(state: &mut SimulationState, input: &TickInput, rng: &mut dyn RandomSource) {
    // Don't tick if paused or game over
    if state.status != SimulationStatus::Racing {
        return;
    }

    let elapsed = state.elapsed_secs();
    state.move_speed = difficulty::move_speed(elapsed, &state.tuning);
    state.spawn_interval = difficulty::spawn_interval(elapsed, &state.tuning);
    state.game_speed = difficulty::game_speed(elapsed, &state.tuning);

    // Players
    let bounds = MoveBounds::new(state.width, state.height, &state.tuning);
    let speed = state.move_speed;
    for player in state.players_mut() {
        let held = input.for_player(player.id);
        move_player(player, held, speed, &bounds);
    }

    apply_off_road(
        std::iter::once(&mut state.player1).chain(state.player2.as_mut()),
        &state.layout,
        state.game_speed,
        &state.tuning,
    );

    // Road and traffic
    state.road.scroll(state.game_speed, &state.tuning);
    traffic::advance(&mut state.traffic, state.game_speed, state.height, &state.tuning);
    traffic::spawn_tick(
        &mut state.traffic,
        state.layout.lanes(),
        state.spawn_interval,
        &state.tuning,
        rng,
    );

    if let Some(crash) = collision::detect(state) {
        log::info!(
            "Crash ({:?}) after {:.1}s, scores: {:?}",
            crash,
            state.elapsed_secs(),
            state.players().map(|p| p.score).collect::<Vec<_>>()
        );
        state.crash = Some(crash);
        state.status = SimulationStatus::GameOver;
        return;
    }

    // Score accrues only while on the road
    let gain = difficulty::score_increment(state.game_speed, &state.tuning);
    for player in state.players_mut() {
        if !player.off_road {
            player.score = player.score.saturating_add(gain);
        }
    }

    state.time_ticks += 1;
}
