// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use vvf_log_domain::DomainError;

/// A failure reported by a reference-data or persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Creates a new `StoreError`.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of what went wrong
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StoreError {}

/// Errors raised while handling one wizard event.
///
/// Format and validation errors re-prompt the same step. Every other
/// variant ends the current wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The input does not have the shape the current step asked for.
    Format {
        /// What the step accepts.
        expected: String,
    },
    /// The input parsed but broke a business rule.
    Validation(DomainError),
    /// A referenced session or record does not exist.
    Lookup(String),
    /// The final commit failed for the second time.
    Commit(String),
    /// A collaborator failed outside the final commit.
    Store(StoreError),
}

impl CoreError {
    /// Returns whether the step can simply be re-prompted.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Format { .. } | Self::Validation(_))
    }

    /// Shorthand for a format error.
    pub(crate) fn format(expected: &str) -> Self {
        Self::Format {
            expected: expected.to_string(),
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format { expected } => write!(f, "Unexpected input, expected {expected}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Lookup(msg) => write!(f, "Not found: {msg}"),
            Self::Commit(msg) => write!(f, "Could not save the report: {msg}"),
            Self::Store(err) => write!(f, "Storage error: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MalformedInput { field, expected } => Self::Format {
                expected: format!("{field} as {expected}"),
            },
            other => Self::Validation(other),
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
