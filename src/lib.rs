//! Grid Snake
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal session (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
