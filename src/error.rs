//! Error types for the ping_drive crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while pinging a Google Drive item.
#[derive(Error, Debug)]
pub enum DriveError {
    #[error("The `{0}` file doesn't exist")]
    FileMissing(PathBuf),

    #[error("`{0}` is not a file")]
    NotAFile(PathBuf),

    #[error("The `{path}` file content is not a valid JSON: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Couldn't parse the configuration file YAML: {0}")]
    ConfigParseError(#[from] serde_yaml::Error),

    #[error("The `{0}` exists neither in the current directory nor in any parent directory")]
    ConfigNotFound(String),

    #[error("The client secret file is specified neither in the CLI arguments nor in the configuration file")]
    MissingClientSecret,

    #[error("The client secret file has neither an `installed` nor a `web` section")]
    InvalidClientSecret,

    #[error("Google has declined the auth code: {0}")]
    AuthCodeDeclined(String),

    #[error("Google has declined refreshing the token: {0}")]
    TokenRefreshDeclined(String),

    #[error("The access token is expired and there is no refresh token")]
    MissingRefreshToken,

    #[error("No auth code was given: {0}")]
    AuthCodePrompt(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
}

/// Result type alias for DriveError.
pub type Result<T> = std::result::Result<T, DriveError>;
