use std::path::PathBuf;

use bytes::Bytes;
use serde::Serialize;

pub const SAVED_FILENAME: &str = "audio.mp3";
pub const DEFAULT_ROLE: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Audio,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Audio => "audio",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub source_url: String,
    pub media_type: MediaType,
}

impl DownloadRequest {
    pub fn audio(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            media_type: MediaType::Audio,
        }
    }
}

/// Payload returned by the download service plus the name it is offered under.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub payload: Bytes,
    pub filename: String,
}

impl DownloadResult {
    pub fn new(payload: Bytes) -> Self {
        Self {
            payload,
            filename: SAVED_FILENAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPhase {
    Idle,
    Requesting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Created,
    AlreadyExists,
}
