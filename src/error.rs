use thiserror::Error;

/// Custom error type for the Honeybadger client
#[derive(Error, Debug)]
pub enum HoneybadgerError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for the Honeybadger client
pub type Result<T> = std::result::Result<T, HoneybadgerError>;

impl HoneybadgerError {
    /// Create a token generation error
    pub fn token_generation<S: Into<String>>(msg: S) -> Self {
        HoneybadgerError::TokenGeneration(msg.into())
    }

    /// Create a transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        HoneybadgerError::Transport(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        HoneybadgerError::Config(msg.into())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, HoneybadgerError::Transport(_) | HoneybadgerError::Http(_))
    }
}
