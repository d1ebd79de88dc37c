//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::SimTime;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("clock cannot move backwards from {now} to {requested}")]
    ClockRewind { now: SimTime, requested: SimTime },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `isim-core`.
pub type CoreResult<T> = Result<T, CoreError>;
