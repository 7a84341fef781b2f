use thiserror::Error;

pub type Result<T> = std::result::Result<T, AqsError>;

#[derive(Error, Debug)]
pub enum AqsError {
    /// Transport failure talking to the API.
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Non-2xx reply, or a reply whose header reports a failed request.
    #[error("AQS request failed: {0}")]
    RemoteError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to decode AQS reply: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// A sample whose local date or time does not parse.
    #[error("Bad sample time: {0}")]
    TimestampError(String),

    #[error("Missing credential: set {0}")]
    MissingCredentials(&'static str),

    #[error("Polars error: {0}")]
    PolarsError(#[from] polars::prelude::PolarsError),
}
