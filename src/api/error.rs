use thiserror::Error;

/// Failure of a single remote call.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response within the configured timeout
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The server could not be reached
    #[error("cannot connect to {0}")]
    Connect(String),

    /// The server rejected the credentials
    #[error("unauthorized")]
    Unauthorized,

    /// Any other non-success status
    #[error("api error {status}: {body}")]
    Status { status: u16, body: String },

    /// The body could not be decoded
    #[error("decode error: {0}")]
    Decode(String),

    /// Transport failure not covered above
    #[error("request failed: {0}")]
    Request(String),
}
