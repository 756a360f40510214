use thiserror::Error;

pub const GENERIC_CATALOG_FAILURE: &str = "Failed to fetch the model list.";
pub const GENERIC_GENERATION_FAILURE: &str = "Generation failed with an unknown error.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StudioError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Transport error: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },
    #[error("Empty result: the API returned a success status but no image data")]
    EmptyResult,
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StudioError {
    pub fn validation(message: impl Into<String>) -> Self {
        StudioError::Validation(message.into())
    }

    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        StudioError::Transport {
            status,
            message: message.into(),
        }
    }

    /// Text shown in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            StudioError::Validation(msg) => msg.clone(),
            StudioError::Transport { message, .. } => message.clone(),
            StudioError::EmptyResult => {
                "The API returned a success status but no image data.".to_string()
            }
            StudioError::MalformedResponse(msg) => msg.clone(),
            StudioError::Config(msg) => format!("Configuration error: {}", msg),
        }
    }

    /// HTTP status attached to the failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            StudioError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
