use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the download widget. Cloneable so they can ride inside UI messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Please enter a URL")]
    Validation,

    #[error("Download failed: {0}")]
    Download(String),

    #[error("I/O error: {0}")]
    Io(String),
}

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("registration rejected ({status}): {detail}")]
    Rejected { status: StatusCode, detail: String },
}

impl ProvisionError {
    /// The part worth showing an operator: the response body when the server
    /// sent one, the transport message otherwise.
    pub fn detail(&self) -> String {
        match self {
            ProvisionError::InvalidEndpoint(e) => e.to_string(),
            ProvisionError::Transport(e) => e.to_string(),
            ProvisionError::Rejected { detail, .. } => detail.clone(),
        }
    }
}
