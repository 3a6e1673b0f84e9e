use reqwest::StatusCode;
use thiserror::Error;

use crate::actions::DisplayResult;

pub const API_ERROR_TITLE: &str = "YouTube API Error";
pub const SEARCH_ERROR_TITLE: &str = "Error searching YouTube";

#[derive(Error, Debug)]
pub enum YoutubeError {
    #[error("YouTube API key not configured")]
    MissingApiKey,
    #[error("Invalid YouTube API key. Please check your configuration.")]
    Unauthorized,
    #[error("YouTube API quota exceeded or access denied.")]
    Forbidden,
    #[error("YouTube API error: {}", status_details(.status, .message))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("YouTube API error: {0}")]
    Transport(reqwest::Error),
    #[error("Error: {0}")]
    Decode(String),
}

fn status_details(status: &StatusCode, message: &Option<String>) -> String {
    match message.as_deref() {
        Some(m) if !m.is_empty() => format!("HTTP {status}: {m}"),
        _ => format!("HTTP {status}"),
    }
}

// The request URL carries the API key as a query parameter.
impl From<reqwest::Error> for YoutubeError {
    fn from(e: reqwest::Error) -> Self {
        YoutubeError::Transport(e.without_url())
    }
}

impl YoutubeError {
    /// Map a non-success HTTP status to its error, keeping the message the API
    /// returned in the body when there is one.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => YoutubeError::Unauthorized,
            StatusCode::FORBIDDEN => YoutubeError::Forbidden,
            status => YoutubeError::Status { status, message },
        }
    }

    /// The single result shown in place of the result list.
    pub fn fallback(&self) -> DisplayResult {
        match self {
            YoutubeError::MissingApiKey => DisplayResult::fallback(
                self.to_string(),
                "Please set your YouTube Data API key in plugin settings",
            ),
            YoutubeError::Decode(_) => DisplayResult::fallback(SEARCH_ERROR_TITLE, self.to_string()),
            _ => DisplayResult::fallback(API_ERROR_TITLE, self.to_string()),
        }
    }
}

/// A duration string that starts with `PT` but cannot be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid duration '{input}': {reason}")]
pub struct DurationParseError {
    pub input: String,
    pub reason: String,
}

impl DurationParseError {
    pub fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
