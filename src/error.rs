//! Error type shared by the loaders, validators and both analyses.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeqScanError {
    /// The input file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A scale or result file could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `position` is 0-based.
    #[error("invalid residue '{residue}' at position {position} in sequence: {sequence}")]
    InvalidResidue {
        residue: char,
        position: usize,
        sequence: String,
    },

    /// Sequence number `index` (1-based) does not have the length of the first sequence.
    #[error("misaligned sequences: sequence {index} has length {found}, expected {expected}")]
    Misaligned {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("no sequences found in input")]
    EmptyInput,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, SeqScanError>;
