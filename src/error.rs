use crate::components::playbook::split::SplitError;
use crate::components::zones::ZoneError;
use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the playbook pipeline
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(dco::config))]
    Config(String),

    #[error("No day columns found in the report")]
    #[diagnostic(
        code(dco::no_days_found),
        help("the report needs an \"Employee\" header row with day abbreviations (Sun..Sat)")
    )]
    NoDaysFound,

    #[error("Day not found in the report: {0}")]
    #[diagnostic(code(dco::unknown_day))]
    UnknownDay(String),

    #[error("Employee index out of range: {0}")]
    #[diagnostic(code(dco::unknown_employee))]
    UnknownEmployee(usize),

    #[error("Employee name cannot be empty")]
    #[diagnostic(code(dco::empty_name))]
    EmptyName,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Zone(#[from] ZoneError),

    #[error(transparent)]
    #[diagnostic(code(dco::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(dco::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(dco::other))]
    Other(String),
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type PlaybookResult<T> = Result<T, Error>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
