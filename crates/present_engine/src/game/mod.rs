//! Game state
//!
//! Counts hearts and collected presents and tracks whether the session is
//! still being played. Counters only change through
//! [`Game::increment_presents`] and [`Game::decrement_hearts`]; the state only
//! ever leaves [`GameState::Playing`] until [`Game::reset_game`].

use crate::config::GameConfig;
use log::info;
use serde::{Deserialize, Serialize};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameState {
    /// Initial state
    #[default]
    Playing,
    /// Hearts ran out
    Lost,
    /// Presents goal reached
    Won,
    /// Reserved for the driver; no transition in the core reaches it
    Paused,
}

impl GameState {
    /// True for `Lost` and `Won`
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Lost | Self::Won)
    }
}

/// Hearts, presents and session state
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    config: GameConfig,
    hearts: i32,
    presents: i32,
    state: GameState,
}

impl Game {
    /// Start a session with the configured hearts and presents goal
    pub fn new(config: GameConfig) -> Self {
        Self {
            hearts: config.hearts,
            presents: 0,
            state: GameState::Playing,
            config,
        }
    }

    /// Remaining hearts
    pub fn hearts(&self) -> i32 {
        self.hearts
    }

    /// Presents collected so far
    pub fn presents(&self) -> i32 {
        self.presents
    }

    /// Presents needed to win
    pub fn presents_goal(&self) -> i32 {
        self.config.presents_goal
    }

    /// Current state
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Count a collected present; reaching the goal while playing wins
    pub fn increment_presents(&mut self) {
        self.presents += 1;
        info!("Presents: {}/{}", self.presents, self.config.presents_goal);
        if self.state == GameState::Playing && self.presents >= self.config.presents_goal {
            self.transition(GameState::Won);
        }
    }

    /// Lose a heart; running out while playing loses
    pub fn decrement_hearts(&mut self) {
        self.hearts -= 1;
        info!("Hearts: {}", self.hearts);
        if self.state == GameState::Playing && self.hearts <= 0 {
            self.transition(GameState::Lost);
        }
    }

    /// Restore the configured counters and resume playing
    pub fn reset_game(&mut self) {
        self.hearts = self.config.hearts;
        self.presents = 0;
        self.transition(GameState::Playing);
    }

    fn transition(&mut self, state: GameState) {
        if self.state != state {
            info!("Game state: {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
