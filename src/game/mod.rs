//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! State lives in an explicit [`GameState`] value; [`GameEngine`] applies ticks and
//! turns to it and [`GameState::project`] maps it onto display categories.

pub mod action;
pub mod config;
pub mod engine;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, GameEvent};
pub use config::GameConfig;
pub use engine::{GameEngine, TickOutcome};
pub use grid::CellKind;
pub use state::{Cell, CollisionType, GameState, Snake, detect_collision};
