//! Error types shared by the library modules.

use std::path::PathBuf;

use thiserror::Error;

use crate::github::QueryCounter;

/// Failure while reading frames or writing the animation.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure while reading back a generated animation document.
#[derive(Debug, Error)]
pub enum AnimationError {
    #[error("malformed SVG at byte {position}: {message}")]
    Xml { position: usize, message: String },
    /// Document has groups but no `dur` could be read
    #[error("animation has no loop duration")]
    MissingDuration,
    #[error("invalid loop duration {0:?}")]
    InvalidDuration(String),
    /// A group's visibility schedule is not the expected one-hot sequence
    #[error("frame {index} has schedule {values:?}, expected {expected} slots shown only at its own index")]
    Schedule {
        index: usize,
        expected: usize,
        values: String,
    },
}

/// Failure while patching a stat document or README.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("malformed SVG at byte {position}: {message}")]
    Xml { position: usize, message: String },
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure while loading the joke pool.
#[derive(Debug, Error)]
pub enum JokeError {
    #[error("failed to read jokes from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("jokes file is not a JSON list of strings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("joke pool is empty")]
    Empty,
}

/// Failure talking to the GraphQL API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Any status other than 200 ends the run
    #[error("{query} has failed with a {status} {body} ({counts})")]
    Status {
        query: &'static str,
        status: u16,
        body: String,
        counts: QueryCounter,
    },
    #[error("no user named {0:?}")]
    MissingUser(String),
}

/// Failure while building configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
}
