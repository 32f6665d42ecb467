use thiserror::Error;

/// Error type for JWT operations.
///
/// Verification failures stay distinguishable here; HTTP callers collapse
/// them into one unauthorized response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Unexpected signing algorithm: {0}")]
    AlgorithmMismatch(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,
}
