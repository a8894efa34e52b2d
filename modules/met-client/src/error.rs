use thiserror::Error;

pub type Result<T> = std::result::Result<T, MetError>;

#[derive(Debug, Error)]
pub enum MetError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx answer from `endpoint` (e.g. `objects/436535`).
    #[error("Met API error on {endpoint} (status {status}): {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// 2xx answer whose body is not the expected record shape.
    #[error("Unexpected response from {endpoint}: {message}")]
    Parse { endpoint: String, message: String },
}

impl MetError {
    /// The HTTP status for `Api` errors; 404 means the object does not exist.
    pub fn status(&self) -> Option<u16> {
        match self {
            MetError::Api { status, .. } => Some(*status),
            MetError::Network(_) | MetError::Parse { .. } => None,
        }
    }
}

impl From<reqwest::Error> for MetError {
    fn from(err: reqwest::Error) -> Self {
        MetError::Network(err.to_string())
    }
}
