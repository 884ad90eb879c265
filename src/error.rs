use thiserror::Error;

/// Unified error type for the skip list set.
///
/// The engine performs no I/O, so every variant is a misuse reported
/// synchronously at the call site. Nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A configuration value outside its accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// `first()` / `last()` on a set with no elements.
    #[error("Set is empty")]
    Empty,
    /// The cursor was advanced past the last element.
    #[error("No more elements")]
    Exhausted,
    /// Cursor removal before any advance, or twice for the same element.
    #[error("Illegal cursor state: {0}")]
    IllegalState(&'static str),
    /// Range views are not provided by this set.
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
