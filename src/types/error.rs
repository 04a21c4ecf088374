use thiserror::Error;

/// leetstreak error types
#[derive(Error, Debug)]
pub enum StreakError {
    /// Configuration missing or invalid (message is shown to the user as-is)
    #[error("{0}")]
    Config(String),

    /// Stats API returned 404 for the configured username
    #[error("User '{0}' not found. Please check your username.")]
    NotFound(String),

    /// Stats API returned 429
    #[error("Rate limit exceeded. Will retry in next refresh cycle.")]
    RateLimited,

    /// Any other non-success HTTP status
    #[error("API Error: {status} {reason}")]
    Api { status: u16, reason: String },

    /// Response body or submission calendar could not be decoded
    #[error("Failed to read submission calendar: {0}")]
    Parse(String),

    /// Request never produced a response (DNS, TLS, timeout...)
    #[error("network error: {0}")]
    Network(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for leetstreak
pub type Result<T> = std::result::Result<T, StreakError>;
