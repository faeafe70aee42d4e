//! Core of a single-player maze-chase game.
//!
//! The [`Game`] owns the maze, the player and the ghosts and is advanced
//! one frame at a time with [`Game::update`]. Input, drawing and frame
//! pacing live outside the core: callers feed it direction intents and
//! elapsed seconds, then read its state back to draw it.

pub mod config;
pub mod direction;
pub mod error;
pub mod game;
pub mod ghost;
pub mod grid;
pub mod level;
pub mod mover;
pub mod player;

pub use config::GameConfig;
pub use direction::Direction;
pub use error::{MazeError, OutOfBounds};
pub use game::{Game, GameEvent, GameStatus};
pub use ghost::{Ghost, GhostMode};
pub use grid::{Cell, Consumed, Grid, TileKind};
pub use level::Level;
pub use mover::{MoveResult, Mover};
pub use player::{Player, PlayerTick};
