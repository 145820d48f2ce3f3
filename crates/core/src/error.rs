//! Error types for the impact-effects pipeline
//!
//! The physics models themselves never fail: degenerate inputs produce
//! zero or neutral results. Errors only arise at the edges, when input
//! parameters are rejected or when the near-Earth-object catalog cannot
//! supply a record.

use thiserror::Error;

/// Stable error classification for presentation layers.
///
/// Lets callers map an error to a status code without matching on
/// message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactErrorCode {
    /// A required input is missing, non-numeric, or out of its domain
    InvalidParameter,
    /// The named object is absent from the catalog window
    NotFound,
    /// The catalog collaborator failed or returned unusable data
    UpstreamUnavailable,
}

impl ImpactErrorCode {
    /// HTTP-style status code conventionally used for this error class.
    pub fn status(self) -> u16 {
        match self {
            ImpactErrorCode::InvalidParameter => 400,
            ImpactErrorCode::NotFound => 404,
            ImpactErrorCode::UpstreamUnavailable => 502,
        }
    }
}

/// Errors surfaced by the pipeline and its parameter sources.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImpactError {
    /// Input rejected before any calculation ran.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the offending input (e.g. `"diameter_m"`)
        name: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Named object not present in the catalog for the queried window.
    #[error("object '{name}' not found between {start_date} and {end_date}")]
    NotFound {
        /// Object name as requested
        name: String,
        /// First day of the queried window (YYYY-MM-DD)
        start_date: String,
        /// Last day of the queried window (YYYY-MM-DD)
        end_date: String,
    },

    /// Catalog collaborator failed, timed out, or sent malformed data.
    #[error("catalog unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl ImpactError {
    /// Create an `InvalidParameter` error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ImpactError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Error classification for this error.
    pub fn code(&self) -> ImpactErrorCode {
        match self {
            ImpactError::InvalidParameter { .. } => ImpactErrorCode::InvalidParameter,
            ImpactError::NotFound { .. } => ImpactErrorCode::NotFound,
            ImpactError::UpstreamUnavailable(_) => ImpactErrorCode::UpstreamUnavailable,
        }
    }
}

impl From<serde_json::Error> for ImpactError {
    fn from(err: serde_json::Error) -> Self {
        ImpactError::UpstreamUnavailable(format!("malformed document: {err}"))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ImpactError>;
