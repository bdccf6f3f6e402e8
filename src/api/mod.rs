//! Client for the attendance backend REST API.

pub mod attendance;
pub mod client;
pub mod company;
pub mod departments;
pub mod files;
pub mod positions;
pub mod types;
pub mod users;

use std::fmt;

pub use client::{ApiClient, Credentials};
pub use types::*;

#[derive(Debug)]
pub enum ApiError {
    Transport(reqwest::Error),
    Status { status: u16, body: String },
    /// The backend answered with `"status": false`.
    Rejected(String),
    Decode(serde_json::Error),
    MissingField(&'static str),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "Backend request failed: {e}"),
            ApiError::Status { status, body } => {
                write!(f, "Backend responded with status {status}: {body}")
            }
            ApiError::Rejected(msg) => write!(f, "Backend rejected request: {msg}"),
            ApiError::Decode(e) => write!(f, "Unexpected backend response: {e}"),
            ApiError::MissingField(field) => write!(f, "Missing required field: {field}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e)
    }
}
