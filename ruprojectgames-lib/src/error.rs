use std::{io, path::PathBuf, sync::Arc, time::Duration};

use strum::Display;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors are cheap to clone so they can travel inside UI messages.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Could not reach the server: {0}")]
    Network(#[source] Arc<reqwest::Error>),
    #[error("The server did not answer within {0:?}")]
    Timeout(Duration),
    #[error("The server rejected the request ({status}): {message}")]
    ServerRejected { status: u16, message: String },
    #[error("Invalid admin password")]
    InvalidCredentials,
    #[error("Unexpected response from the server: {0}")]
    Decode(#[source] Arc<serde_json::Error>),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("A request of this kind is already in flight")]
    AlreadyInFlight,
    #[error("This action requires a successful admin login")]
    NotAuthenticated,
    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("Unable to determine the configuration directory")]
    NoConfigDir,
    #[error("Failed to parse {}: {reason}", path.display())]
    ConfigParse { path: PathBuf, reason: String },
    #[error("Failed to serialize the configuration: {0}")]
    ConfigSerialize(String),
    #[error(transparent)]
    Io(Arc<io::Error>),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(Arc::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(Arc::new(err))
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigSerialize(err.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(Arc::new(err))
    }
}

impl Error {
    /// Whether the request never produced an answer from the server.
    pub fn is_connection_problem(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Timeout(_))
    }
}

/// A form field that a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Field {
    #[strum(to_string = "mod name")]
    ModName,
    #[strum(to_string = "author")]
    Author,
    #[strum(to_string = "version")]
    Version,
    #[strum(to_string = "download URL")]
    DownloadUrl,
    #[strum(to_string = "password")]
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The {0} must not be empty")]
    Empty(Field),
    #[error("'{0}' is not an absolute http(s) URL")]
    InvalidUrl(String),
}
