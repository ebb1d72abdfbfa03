use thiserror::Error;

pub type MarkupResult<T> = Result<T, MarkupError>;

#[derive(Error, Debug, Clone)]
pub enum MarkupError {
    #[error("Invalid color value '{value}': {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("Invalid size value '{value}': must be a non-negative number, optionally suffixed with px, em, rem or %")]
    InvalidSize { value: String },

    #[error("Invalid speaker colors: {0}")]
    SpeakerColors(String),

    #[error("Invalid preview options: {0}")]
    Options(String),

    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },
}

impl From<serde_yaml::Error> for MarkupError {
    fn from(err: serde_yaml::Error) -> Self {
        MarkupError::Options(err.to_string())
    }
}

impl From<serde_json::Error> for MarkupError {
    fn from(err: serde_json::Error) -> Self {
        MarkupError::SpeakerColors(err.to_string())
    }
}
