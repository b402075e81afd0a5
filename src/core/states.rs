//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Turret AI only
//! ticks while the game is in `InGame` and not paused.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while turret data files are read
/// - Move to `InGame` once loading completes
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
}

/// Sub-states for gameplay - only active when GameState::InGame.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Simulation is stepping
    #[default]
    Running,
    /// Simulation is frozen, the world stays visible
    Paused,
}
