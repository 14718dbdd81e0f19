//! Authentication error types.

use thiserror::Error;

use crate::services::FieldErrors;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more login form fields failed validation.
    #[error("invalid login: {0}")]
    Invalid(FieldErrors),

    /// Checkout or another protected action needs a logged-in session.
    #[error("you must be logged in")]
    NotAuthenticated,
}

impl AuthError {
    /// Per-field messages, if this is a validation failure.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::NotAuthenticated => None,
        }
    }
}
