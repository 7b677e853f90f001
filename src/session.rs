//! Match lifecycle for the host UI
//!
//! A [`Session`] owns the simulation, the random source and the held keys.
//! The host drives it from its frame timer and key events, and is told once
//! when a match ends.

use serde::{Deserialize, Serialize};

use crate::input::{HeldKeys, Key};
use crate::sim::{
    Crash, PlayerId, RandomSource, SeededRandom, SimulationState, SimulationStatus, update,
};
use crate::tuning::{Tuning, TuningError};

/// How a finished match is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Single-player run; only the score matters
    Solo,
    /// The player that did not crash
    Winner(PlayerId),
    /// Players crashed into each other
    Draw,
}

/// Final numbers handed to the game-over screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub multiplayer: bool,
    pub player1_score: u64,
    pub player2_score: Option<u64>,
    pub crash: Option<Crash>,
    pub elapsed_secs: f32,
    pub verdict: Verdict,
}

impl MatchResult {
    pub fn from_state(state: &SimulationState) -> Self {
        let verdict = match (state.is_multiplayer(), state.crash) {
            (false, _) => Verdict::Solo,
            (true, Some(Crash::Player(crashed))) => Verdict::Winner(crashed.other()),
            (true, Some(Crash::Mutual) | None) => Verdict::Draw,
        };
        Self {
            multiplayer: state.is_multiplayer(),
            player1_score: state.player1.score,
            player2_score: state.score(PlayerId::Player2),
            crash: state.crash,
            elapsed_secs: state.elapsed_secs(),
            verdict,
        }
    }

    /// Crashed player number: 1, 2, or the mutual sentinel
    pub fn crashed_number(&self) -> Option<u8> {
        self.crash.map(Crash::number)
    }
}

type GameOverHook = Box<dyn FnMut(&MatchResult)>;

/// A running game: simulation plus the host-facing controls
pub struct Session<R: RandomSource = SeededRandom> {
    state: SimulationState,
    rng: R,
    held: HeldKeys,
    on_game_over: Option<GameOverHook>,
    /// Set once the current match's game over has been reported
    reported: bool,
}

impl Session<SeededRandom> {
    /// Session with a seeded PCG random source
    pub fn seeded(width: i32, height: i32, tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        Self::new(width, height, tuning, SeededRandom::new(seed))
    }
}

impl<R: RandomSource> Session<R> {
    pub fn new(width: i32, height: i32, tuning: Tuning, rng: R) -> Result<Self, TuningError> {
        Ok(Self {
            state: SimulationState::new(width, height, tuning)?,
            rng,
            held: HeldKeys::new(),
            on_game_over: None,
            reported: false,
        })
    }

    /// Register the consumer notified when a match ends
    pub fn on_game_over(&mut self, hook: impl FnMut(&MatchResult) + 'static) {
        self.on_game_over = Some(Box::new(hook));
    }

    /// Start (or restart) a match
    pub fn start(&mut self, multiplayer: bool) {
        self.state.init(multiplayer);
        self.held.clear();
        self.reported = false;
    }

    /// Advance one tick
    ///
    /// Returns the match result on the tick the match ends, and `None` on
    /// every other tick, including later ticks of a finished match.
    pub fn tick(&mut self) -> Option<MatchResult> {
        if self.state.status != SimulationStatus::Racing {
            return None;
        }

        let input = self.held.snapshot(self.state.is_multiplayer());
        update(&mut self.state, &input, &mut self.rng);

        if self.state.status != SimulationStatus::GameOver || self.reported {
            return None;
        }
        self.reported = true;

        let result = MatchResult::from_state(&self.state);
        log::info!("Game over: {:?}", result.verdict);
        if let Some(hook) = self.on_game_over.as_mut() {
            hook(&result);
        }
        Some(result)
    }

    pub fn set_paused(&mut self, paused: bool) {
        let next = match (self.state.status, paused) {
            (SimulationStatus::Racing, true) => SimulationStatus::Paused,
            (SimulationStatus::Paused, false) => SimulationStatus::Racing,
            _ => return,
        };
        log::debug!("{:?} -> {:?}", self.state.status, next);
        if next == SimulationStatus::Paused {
            // Keys may be released while the host shows its pause screen
            self.held.clear();
        }
        self.state.status = next;
    }

    pub fn toggle_pause(&mut self) {
        let paused = self.state.status == SimulationStatus::Paused;
        self.set_paused(!paused);
    }

    pub fn is_paused(&self) -> bool {
        self.state.status == SimulationStatus::Paused
    }

    /// Presses only count while racing
    pub fn key_down(&mut self, key: Key) {
        if self.state.status == SimulationStatus::Racing {
            self.held.press(key);
        }
    }

    /// Releases always count so no key stays stuck across a pause
    pub fn key_up(&mut self, key: Key) {
        self.held.release(key);
    }

    pub fn held_keys(&self) -> &HeldKeys {
        &self.held
    }

    /// Read-only view for renderers
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct access for hosts and tests that stage scenarios
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }
}
