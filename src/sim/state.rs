//! Game state and core simulation types
//!
//! Everything a renderer or HUD reads after a tick lives here.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::difficulty;
use super::geometry::Rect;
use super::movement::MoveBounds;
use super::road::{Lane, RoadLayout, RoadState};
use crate::tuning::{Tuning, TuningError};

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationStatus {
    /// Ticks advance the world
    Racing,
    /// Ticks are ignored until resumed
    Paused,
    /// Match ended (terminal)
    GameOver,
}

/// Identity of a local player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    Player1,
    Player2,
}

impl PlayerId {
    /// 1-based player number shown to users
    pub fn number(self) -> u8 {
        match self {
            PlayerId::Player1 => 1,
            PlayerId::Player2 => 2,
        }
    }

    /// Body color the renderer paints this player's car with
    pub fn color(self) -> CarColor {
        match self {
            PlayerId::Player1 => CarColor::Red,
            PlayerId::Player2 => CarColor::Blue,
        }
    }

    pub fn other(self) -> PlayerId {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }
}

/// Fixed car colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarColor {
    Red,
    Blue,
    Gray,
}

/// Who ended the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crash {
    /// A player hit traffic
    Player(PlayerId),
    /// Both players ran into each other
    Mutual,
}

impl Crash {
    /// Sentinel used by the mutual crash in [`Crash::number`]
    pub const MUTUAL_NUMBER: u8 = 0;

    /// Crashed player number: 1, 2, or [`Crash::MUTUAL_NUMBER`]
    pub fn number(self) -> u8 {
        match self {
            Crash::Player(id) => id.number(),
            Crash::Mutual => Self::MUTUAL_NUMBER,
        }
    }
}

/// A player's car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    /// Reference point: horizontal center, `player_top_margin` below the top of the car
    pub position: IVec2,
    pub score: u64,
    /// Outside this player's road band during the last tick
    pub off_road: bool,
}

impl PlayerState {
    pub fn new(id: PlayerId, position: IVec2) -> Self {
        Self {
            id,
            position,
            score: 0,
            off_road: false,
        }
    }

    pub fn color(&self) -> CarColor {
        self.id.color()
    }

    /// Collision rectangle around the player's position
    pub fn bounds(&self, tuning: &Tuning) -> Rect {
        Rect::new(
            self.position.x - tuning.player_width / 2,
            self.position.y - tuning.player_top_margin,
            tuning.player_width,
            tuning.player_height,
        )
    }
}

/// An oncoming traffic car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficCar {
    pub bounds: Rect,
    /// Forward speed in pixels per tick at game speed 1.0
    pub speed: f32,
}

impl TrafficCar {
    pub fn color(&self) -> CarColor {
        CarColor::Gray
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Play area width in pixels
    pub width: i32,
    /// Play area height in pixels
    pub height: i32,
    pub tuning: Tuning,
    pub multiplayer: bool,
    pub status: SimulationStatus,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pixels a player moves per tick per held direction
    pub move_speed: i32,
    /// Global multiplier on traffic advance and score accrual
    pub game_speed: f32,
    /// Average seconds between spawn batches
    pub spawn_interval: f32,
    pub layout: RoadLayout,
    pub road: RoadState,
    /// Active traffic (in spawn order)
    pub traffic: Vec<TrafficCar>,
    pub player1: PlayerState,
    /// Present only in multiplayer
    pub player2: Option<PlayerState>,
    /// Set when the match ended in a crash
    pub crash: Option<Crash>,
}

impl SimulationState {
    /// Create a single-player match on a `width` x `height` play area
    pub fn new(width: i32, height: i32, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate(width, height)?;

        let layout = RoadLayout::new(width, false, &tuning);
        let mut state = Self {
            width,
            height,
            player1: PlayerState::new(PlayerId::Player1, IVec2::ZERO),
            player2: None,
            multiplayer: false,
            status: SimulationStatus::Racing,
            time_ticks: 0,
            move_speed: tuning.base_move_speed,
            game_speed: tuning.base_game_speed,
            spawn_interval: tuning.base_spawn_interval,
            layout,
            road: RoadState::default(),
            traffic: Vec::new(),
            crash: None,
            tuning,
        };
        state.init(false);
        Ok(state)
    }

    /// Reset everything to a fresh match
    pub fn init(&mut self, multiplayer: bool) {
        self.multiplayer = multiplayer;
        self.layout = RoadLayout::new(self.width, multiplayer, &self.tuning);
        self.status = SimulationStatus::Racing;
        self.time_ticks = 0;
        self.move_speed = difficulty::move_speed(0.0, &self.tuning);
        self.game_speed = difficulty::game_speed(0.0, &self.tuning);
        self.spawn_interval = difficulty::spawn_interval(0.0, &self.tuning);
        self.road = RoadState::default();
        self.traffic.clear();
        self.crash = None;

        // Validated tunings already start inside the bounds; a tuning edited in
        // place on the state is clamped instead
        let bounds = MoveBounds::new(self.width, self.height, &self.tuning);
        let start_y = self.height - self.tuning.player_height - self.tuning.player_start_offset;
        let start = |x: i32| IVec2::new(x, start_y).clamp(bounds.min, bounds.max);
        match &self.layout {
            RoadLayout::Single(_) => {
                self.player1 = PlayerState::new(PlayerId::Player1, start(self.width / 2));
                self.player2 = None;
            }
            RoadLayout::Split([left, right]) => {
                self.player1 = PlayerState::new(PlayerId::Player1, start(left.center()));
                self.player2 = Some(PlayerState::new(PlayerId::Player2, start(right.center())));
            }
        }

        log::info!(
            "New {} match on {}x{}",
            if multiplayer { "multiplayer" } else { "single-player" },
            self.width,
            self.height
        );
    }

    pub fn is_multiplayer(&self) -> bool {
        self.multiplayer
    }

    /// Elapsed simulated time in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.time_ticks as f32 * crate::consts::SIM_DT
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        match id {
            PlayerId::Player1 => Some(&self.player1),
            PlayerId::Player2 => self.player2.as_ref(),
        }
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        match id {
            PlayerId::Player1 => Some(&mut self.player1),
            PlayerId::Player2 => self.player2.as_mut(),
        }
    }

    /// Present players in order (Player1 first)
    pub fn players(&self) -> impl Iterator<Item = &PlayerState> {
        std::iter::once(&self.player1).chain(self.player2.as_ref())
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut PlayerState> {
        std::iter::once(&mut self.player1).chain(self.player2.as_mut())
    }

    pub fn score(&self, id: PlayerId) -> Option<u64> {
        self.player(id).map(|p| p.score)
    }

    /// Lanes traffic may spawn in
    pub fn lanes(&self) -> &[Lane] {
        self.layout.lanes()
    }

    pub fn is_over(&self) -> bool {
        self.status == SimulationStatus::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SimulationState {
        SimulationState::new(800, 600, Tuning::default()).expect("valid tuning")
    }

    #[test]
    fn test_new_is_single_player() {
        let state = state();
        assert_eq!(state.status, SimulationStatus::Racing);
        assert!(!state.is_multiplayer());
        assert!(state.player2.is_none());
        assert_eq!(state.players().count(), 1);
        assert_eq!(state.player1.position, IVec2::new(400, 480));
        assert_eq!(state.score(PlayerId::Player2), None);
    }

    #[test]
    fn test_init_multiplayer_places_players_in_lanes() {
        let mut state = state();
        state.init(true);
        assert!(state.is_multiplayer());
        assert_eq!(state.lanes().len(), 2);

        let p1 = state.player(PlayerId::Player1).expect("player 1");
        let p2 = state.player(PlayerId::Player2).expect("player 2");
        assert!(p1.position.x < state.width / 2);
        assert!(p2.position.x > state.width / 2);
        assert_eq!(p1.color(), CarColor::Red);
        assert_eq!(p2.color(), CarColor::Blue);
    }

    #[test]
    fn test_start_positions_inside_move_bounds() {
        for multiplayer in [false, true] {
            let mut state = state();
            state.init(multiplayer);
            let bounds = MoveBounds::new(state.width, state.height, &state.tuning);
            for player in state.players() {
                assert!(bounds.contains(player.position), "{:?}", player.position);
            }
        }
    }

    #[test]
    fn test_edited_tuning_start_is_clamped() {
        let mut state = state();
        state.tuning.player_start_offset = -40;
        state.init(false);
        assert_eq!(state.player1.position, IVec2::new(400, 510));

        state.tuning.player_start_offset = 30;
        state.tuning.player_width = 500;
        state.init(true);
        let bounds = MoveBounds::new(state.width, state.height, &state.tuning);
        for player in state.players() {
            assert!(bounds.contains(player.position), "{:?}", player.position);
        }
    }

    #[test]
    fn test_init_resets_match() {
        let mut state = state();
        state.init(true);
        state.player1.score = 500;
        state.time_ticks = 1000;
        state.status = SimulationStatus::GameOver;
        state.crash = Some(Crash::Mutual);
        state.traffic.push(TrafficCar {
            bounds: Rect::new(300, 100, 50, 90),
            speed: 4.0,
        });

        state.init(false);
        assert_eq!(state.status, SimulationStatus::Racing);
        assert_eq!(state.player1.score, 0);
        assert_eq!(state.time_ticks, 0);
        assert!(state.traffic.is_empty());
        assert!(state.crash.is_none());
        assert!(state.player2.is_none());
        assert_eq!(state.lanes().len(), 1);
    }

    #[test]
    fn test_player_bounds() {
        let tuning = Tuning::default();
        let player = PlayerState::new(PlayerId::Player1, IVec2::new(400, 480));
        assert_eq!(player.bounds(&tuning), Rect::new(375, 430, 50, 90));
    }

    #[test]
    fn test_crash_numbers() {
        assert_eq!(Crash::Player(PlayerId::Player1).number(), 1);
        assert_eq!(Crash::Player(PlayerId::Player2).number(), 2);
        assert_eq!(Crash::Mutual.number(), Crash::MUTUAL_NUMBER);
        assert_eq!(PlayerId::Player1.other(), PlayerId::Player2);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = state();
        state.init(true);
        let json = serde_json::to_string(&state).expect("serializes");
        let back: SimulationState = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back.player2, state.player2);
        assert_eq!(back.layout, state.layout);
    }
}
