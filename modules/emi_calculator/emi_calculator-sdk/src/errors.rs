//! Error types for the calculator SDK.

use thiserror::Error;

/// Shown when a failure carries no usable message of its own.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong while calculating EMI.";

/// Failure outcome of a calculation.
///
/// `Display` renders the bare message, which is what the user sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    /// The service understood the request and refused it
    #[error("{0}")]
    Rejected(String),

    /// Network or protocol failure
    #[error("{0}")]
    Transport(String),
}

impl CalculatorError {
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Transport error with the service-provided message, or the default one
    /// when the message is missing or blank.
    #[must_use]
    pub fn transport(message: Option<String>) -> Self {
        match message {
            Some(m) if !m.trim().is_empty() => Self::Transport(m),
            _ => Self::Transport(DEFAULT_ERROR_MESSAGE.to_owned()),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Rejected(m) | Self::Transport(m) => m,
        }
    }
}
