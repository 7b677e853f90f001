//! Keyboard mapping
//!
//! The host forwards key-down/key-up events; [`HeldKeys::snapshot`] turns the
//! currently held keys into the [`TickInput`] consumed by one tick.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use crate::sim::tick::{Direction, Directions, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowLeft,
    ArrowDown,
    ArrowRight,
}

/// Which physical key cluster a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCluster {
    /// W/A/S/D, player one
    Letters,
    /// Arrow keys, player two in multiplayer
    Arrows,
}

impl Key {
    /// Parse a host key name (case-insensitive, DOM `KeyboardEvent.key` style)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "w" => Some(Key::W),
            "a" => Some(Key::A),
            "s" => Some(Key::S),
            "d" => Some(Key::D),
            "arrowup" | "up" => Some(Key::ArrowUp),
            "arrowleft" | "left" => Some(Key::ArrowLeft),
            "arrowdown" | "down" => Some(Key::ArrowDown),
            "arrowright" | "right" => Some(Key::ArrowRight),
            _ => None,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Key::W | Key::ArrowUp => Direction::Up,
            Key::A | Key::ArrowLeft => Direction::Left,
            Key::S | Key::ArrowDown => Direction::Down,
            Key::D | Key::ArrowRight => Direction::Right,
        }
    }

    pub fn cluster(self) -> KeyCluster {
        match self {
            Key::W | Key::A | Key::S | Key::D => KeyCluster::Letters,
            _ => KeyCluster::Arrows,
        }
    }
}

/// Keys currently held down
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    keys: BTreeSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Build the input for one tick
    ///
    /// In multiplayer the letter keys steer Player1 and the arrows steer
    /// Player2. In single-player both clusters steer Player1.
    pub fn snapshot(&self, multiplayer: bool) -> TickInput {
        let mut input = TickInput::default();
        for key in &self.keys {
            let target = match (multiplayer, key.cluster()) {
                (true, KeyCluster::Arrows) => &mut input.player2,
                _ => &mut input.player1,
            };
            target.set(key.direction(), true);
        }
        input
    }
}
