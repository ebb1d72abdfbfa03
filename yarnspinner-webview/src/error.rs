use thiserror::Error;

pub type WebviewResult<T> = Result<T, WebviewError>;

#[derive(Error, Debug)]
pub enum WebviewError {
    #[error("Invalid message from host: {0}")]
    InvalidMessage(#[from] serde_json::Error),

    #[error("Failed to find {anchor}")]
    MissingAnchor { anchor: String },
}
