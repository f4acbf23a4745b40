use contracts::shared::envelope::EnvelopeError;
use thiserror::Error;

/// Where a failure happened. Every kind is terminal: nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response reached the client.
    Transport,
    /// The backend answered with a failure.
    Server,
    /// A client-side precondition was violated; nothing was sent.
    State,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network Error: Please check your connection.")]
    Transport(String),
    #[error("Server Error: {0}")]
    Server(String),
    #[error("{0}")]
    State(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Server(_) => ErrorKind::Server,
            ApiError::State(_) => ErrorKind::State,
        }
    }

    /// Underlying detail, for logs.
    pub fn detail(&self) -> &str {
        match self {
            ApiError::Transport(d) | ApiError::Server(d) | ApiError::State(d) => d,
        }
    }
}

impl From<EnvelopeError> for ApiError {
    fn from(e: EnvelopeError) -> Self {
        match e {
            EnvelopeError::Rejected(message) => ApiError::Server(message),
            malformed @ EnvelopeError::Malformed(_) => ApiError::Server(malformed.to_string()),
        }
    }
}
