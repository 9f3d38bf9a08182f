use thiserror::Error;

/// Error type for JWT signing operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token lifetime must be positive, got {0} seconds")]
    InvalidTtl(i64),

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}

/// Reason a presented token was rejected.
///
/// Every variant means the bearer is not authenticated; the distinction only
/// exists so callers can log and report it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,
}
