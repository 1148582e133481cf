//! Error taxonomy for fee calculation and tip injection.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TipError {
    /// A gas-cost field was not a base-10 non-negative integer.
    #[error("invalid {label}: {value:?}")]
    InvalidAmount { label: &'static str, value: String },

    /// A computed amount does not fit in a u64. Fatal for the given input.
    #[error("{label} exceeds u64: {value}")]
    AmountOverflow { label: &'static str, value: String },

    /// Address conversion or input registration failed while building the graph.
    #[error("transaction graph: {0}")]
    Graph(String),

    /// A pure value or the transaction envelope could not be BCS-encoded.
    #[error("bcs encoding: {0}")]
    Encoding(#[from] bcs::Error),

    /// Failure reported by the dry-run collaborator, passed through untouched.
    #[error(transparent)]
    Query(#[from] anyhow::Error),
}

pub type TipResult<T> = std::result::Result<T, TipError>;
