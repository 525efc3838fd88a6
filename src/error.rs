// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for the date highlighter.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the date highlighter.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration parsed but holds values the engine cannot use
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A date given explicitly (e.g. a pinned reference date) does not parse
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The host failed to allocate or apply a rendering resource
    #[error("Host error: {0}")]
    Host(String),
}
