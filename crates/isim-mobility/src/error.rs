use isim_core::AgentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("No such interface: {id} on {agent}")]
    UnknownInterface { agent: AgentId, id: String },

    #[error("leg for {0} has a non-finite or negative speed ({1})")]
    InvalidSpeed(AgentId, f64),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
