use thiserror::Error;

/// Domain errors. `Display` text is user-presentable; the transport layer
/// renders these directly into replies.
#[derive(Debug, Error)]
pub enum Error {
    #[error("admin only")]
    PermissionDenied,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("key expired")]
    Expired,

    #[error("rate limited, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("key space exhausted, try again")]
    KeyspaceExhausted,

    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),

    #[error("corrupt access file: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
