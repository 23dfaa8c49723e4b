use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Service returned no text")]
    EmptyResponse,

    #[error("Serialization error: {0}")]
    Serde(String),
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        AdvisorError::Serde(err.to_string())
    }
}
