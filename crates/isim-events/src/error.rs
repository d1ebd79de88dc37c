use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("event parse error: {0}")]
    Parse(String),

    #[error("event time must be finite, got {0}")]
    InvalidTime(f64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EventResult<T> = Result<T, EventError>;

/// Reject NaN and infinite times.
pub(crate) fn checked_time(t: f64) -> EventResult<ordered_float::NotNan<f64>> {
    if !t.is_finite() {
        return Err(EventError::InvalidTime(t));
    }
    ordered_float::NotNan::new(t).map_err(|_| EventError::InvalidTime(t))
}
