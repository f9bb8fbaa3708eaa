use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// Error text the server put in the response body.
    #[error("{0}")]
    Api(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// Message the login form shows for this failure.
    pub fn login_message(&self) -> String {
        match self {
            Error::Api(message) if !message.trim().is_empty() => message.clone(),
            _ => crate::types::LOGIN_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized | Error::Status { status: 401, .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
