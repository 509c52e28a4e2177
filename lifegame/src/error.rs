//! Error types for lifegame.

use thiserror::Error;

/// Errors surfaced by the simulation and its configuration layer.
///
/// Cell coordinates never produce errors: out-of-range toggles are ignored
/// and pattern writes are clipped to the grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// Width or height text did not parse as a positive integer.
    #[error("invalid grid dimensions: width {width:?}, height {height:?}")]
    InvalidDimensions {
        /// Width as supplied.
        width: String,
        /// Height as supplied.
        height: String,
    },

    /// A command-line argument could not be parsed.
    #[error("invalid value for {name}: {value:?}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Value as supplied.
        value: String,
    },

    /// No pattern with the given name exists in the library.
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    /// A scheduler was created outside of a tokio runtime.
    #[error("no tokio runtime available to drive the scheduler")]
    NoRuntime,

    /// The tick period must be non-zero.
    #[error("scheduler period must be greater than zero")]
    InvalidPeriod,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, LifeError>;
