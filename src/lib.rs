//! Grid snake: a snake game on a square board.
//!
//! The core is `snake::GameState` (pure state and step rules) driven by
//! `game::GameLoop` at a fixed 10 Hz. The terminal front end in `term`,
//! `input` and `app` only consumes render instructions and feeds turns.

pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod snake;
pub mod term;

pub use config::{Boundary, GameConfig, GridSize, TICK_INTERVAL};
pub use error::SnakeError;
pub use game::{GameLoop, Instruction, LoopHandle, LoopStatus};
pub use grid::{Board, CellChange, CellState, Grid, Position};
pub use snake::{DeathCause, Direction, GameState, StepResult};
