// Error types for the card rules engine

use thiserror::Error;

/// Outcome of a failed rule evaluation
///
/// Every variant is a recoverable, caller-facing rejection. The message carried
/// by the rejection variants is the exact reason reported to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// Tier policy failure at registration
    #[error("{0}")]
    EligibilityRejected(String),

    /// Geographic restriction hit at purchase time
    #[error("{0}")]
    PurchaseRejected(String),

    /// Purchase timestamp could not be parsed
    #[error("Malformed purchase date: {0}")]
    MalformedTimestamp(String),
}

/// Result type alias for rule evaluation
pub type RulesResult<T> = Result<T, RulesError>;
