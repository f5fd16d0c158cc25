//! Error types for the stamping pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`run`](crate::run()) and rule loading.
///
/// A referenced asset that does not exist is NOT an error: it is
/// reported through the `on_missing` callback and the reference is
/// left untouched.
#[derive(Debug, Error)]
pub enum StampError {
    #[error("IO error when reading `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("IO error when writing `{0}`")]
    Write(PathBuf, #[source] std::io::Error),

    /// Malformed CSS selector in a tag rule, as reported by the
    /// selection engine.
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    #[error("rules file parsing error")]
    Toml(#[from] toml::de::Error),
}
