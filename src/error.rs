use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub const EMPTY_LINK_MESSAGE: &str = "Please enter a YouTube video URL";
pub const INVALID_LINK_MESSAGE: &str = "Please enter a valid YouTube URL";
pub const GENERATION_FAILED_MESSAGE: &str = "An error occurred while generating content";
pub const CONNECTIVITY_MESSAGE: &str =
    "An error occurred while communicating with the server. Please try again.";

/// Everything that can go wrong with a single submission. All of these are
/// shown inline next to the link field and never end the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("link is empty")]
    EmptyLink,

    #[error("link is not a recognised video URL")]
    InvalidLink,

    /// Backend answered with a non-success status.
    #[error("backend rejected the request: {}", .0.as_deref().unwrap_or("no message"))]
    Application(Option<String>),

    /// Request never completed or the body could not be read as a result.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::EmptyLink => EMPTY_LINK_MESSAGE.to_string(),
            SubmitError::InvalidLink => INVALID_LINK_MESSAGE.to_string(),
            SubmitError::Application(Some(message)) => message.clone(),
            SubmitError::Application(None) => GENERATION_FAILED_MESSAGE.to_string(),
            SubmitError::Transport(_) => CONNECTIVITY_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        SubmitError::Transport(err.to_string())
    }
}
