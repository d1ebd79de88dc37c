use isim_core::CoreError;
use isim_events::EventError;
use isim_mobility::MobilityError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("No host for address {address}. Address range of 0-{} is valid", .count.saturating_sub(1))]
    AddressOutOfRange { address: usize, count: usize },

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),

    #[error("event error: {0}")]
    Event(#[from] EventError),
}

pub type SimResult<T> = Result<T, SimError>;
