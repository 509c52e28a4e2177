//! Conway's Game of Life on a fixed-size toroidal grid.
//!
//! [`Grid`] owns the cells and advances them one generation per
//! [`Grid::step`], notifying its observers after every mutation.
//! [`Scheduler`] drives `step` on a tokio interval with idempotent
//! start/stop. Drawing and input are left to front ends through the
//! [`Renderer`] and [`InputSource`] traits.
//!
//! ```
//! use lifegame::Grid;
//!
//! let mut grid = Grid::new(5, 5);
//! grid.put(1, 2, &["***"]);
//! grid.step();
//! assert!(grid.get(2, 1) && grid.get(2, 2) && grid.get(2, 3));
//! assert_eq!(grid.generation(), 1);
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod history;
pub mod observer;
pub mod patterns;
pub mod scheduler;
pub mod text;

pub use config::{Config, Seed, parse_dimensions};
pub use error::{LifeError, Result};
pub use grid::{DEFAULT_SIDE, Grid, GridView, SharedGrid, Snapshot};
pub use history::CycleDetector;
pub use observer::{InputSource, Observer, ObserverId, Renderer, apply_input};
pub use patterns::{PATTERNS, Pattern};
pub use scheduler::{DEFAULT_PERIOD, Scheduler};
pub use text::TextRenderer;
