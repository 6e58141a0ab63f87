//! Core error type, shared domain enums, and record serialization.

pub mod serialization;
pub mod types;

pub use serialization::*;
pub use types::*;

/// Engine and model errors surfaced by the API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RiskError {
    /// Input validation error (bounds, domain, confidence level, sample count).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// Simulation requested before every factor was set.
    #[error("missing parameter: {} not set", join_factors(.0))]
    MissingParameter(Vec<Factor>),
    /// Reduction requested on a table with no rows.
    #[error("empty results: {0}")]
    EmptyResults(String),
    /// A distribution rejected its derived parameters.
    #[error("numerical error: {0}")]
    Numerical(String),
    /// Record encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Export sink failed.
    #[error("io error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for RiskError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for RiskError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

fn join_factors(factors: &[Factor]) -> String {
    factors
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}
