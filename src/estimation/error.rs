use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimateError {
    #[error("variance undefined for number of observations = {observed}")]
    InsufficientData { observed: u64 },

    #[error("target interval width is zero")]
    ZeroWidth,
}
