use thiserror::Error;

/// Failures of the impedance model. None of them is fatal: the caller reports
/// the message and the session keeps all previously accumulated state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("undefined impedance: {reason}")]
    UndefinedImpedance { reason: &'static str },

    #[error("invalid selection: index {index} is outside the catalogue [1, {len}]")]
    InvalidSelection { index: usize, len: usize },

    #[error("components must be added in series before a parallel group")]
    NoSeriesBackbone,

    #[error("no circuit has been created yet")]
    NoCircuit,
}

pub type Result<T> = std::result::Result<T, DomainError>;
