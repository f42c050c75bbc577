//! Error types for the navigation engine.

use thiserror::Error;

/// Failure of [`Navigator::run`](crate::Navigator::run).
#[derive(Error, Debug)]
pub enum NavError {
    /// `run` was called with nothing to show. The terminal was not touched.
    #[error("no sections to display")]
    NoSections,

    /// A terminal operation failed and could not be degraded around.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failure to apply an option directive to a [`Config`](crate::Config).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// The option exists but the value does not parse.
    #[error("invalid value for {option}: {value:?}")]
    InvalidValue { option: String, value: String },

    /// A boolean form (`name`, `noname`, `name!`) used on a valued option,
    /// or `name=value` on a boolean one.
    #[error("option {0} does not take that form")]
    WrongKind(String),
}

pub type NavResult<T> = std::result::Result<T, NavError>;
