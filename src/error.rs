//! Error types for the Boost codec

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoostError {
    #[error("bad length: expected {expected} bytes, got {actual}")]
    BadLength { expected: usize, actual: usize },

    #[error("script malformed: {0}")]
    BadScript(String),

    #[error("compact bits encode a non-positive or oversized target")]
    BadTarget,

    #[error("solution does not match the puzzle's version mask")]
    BadSolution,

    #[error("proof of work hash does not meet the target")]
    InvalidProof,

    #[error("key does not match the miner committed to by the output")]
    InvalidPuzzle,

    #[error("estimated fee of {fee} satoshis does not fit in the {value} satoshi output")]
    InsufficientFunds { fee: u64, value: u64 },

    #[error("signing failed: {0}")]
    SignatureFailure(String),

    #[error("job has no attached outpoint to spend")]
    AttachmentMissing,
}

impl From<hex::FromHexError> for BoostError {
    fn from(err: hex::FromHexError) -> Self {
        BoostError::BadScript(format!("invalid hex: {err}"))
    }
}

impl From<secp256k1::Error> for BoostError {
    fn from(err: secp256k1::Error) -> Self {
        BoostError::SignatureFailure(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BoostError>;
