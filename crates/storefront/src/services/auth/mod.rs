//! Authentication service.
//!
//! Mock email/password login. Any well-formed email with a long enough
//! password is accepted and signed in as the demo user; no credentials are
//! checked anywhere. The session survives restarts via [`Storage`].

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};
use uuid::Uuid;

use shopeasy_core::{Email, Storage, UserId};

use crate::models::{CurrentUser, Session, keys};
use crate::services::{FieldErrors, RestoreOutcome, persist_snapshot, restore_snapshot};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Display name given to every mock login.
const DEMO_USER_NAME: &str = "Demo User";

/// User id given to every mock login.
const DEMO_USER_ID: i64 = 1;

/// Authentication service, persisted under [`keys::SESSION`].
#[derive(Debug)]
pub struct AuthService<S: Storage> {
    storage: S,
    session: Option<Session>,
}

impl<S: Storage> AuthService<S> {
    /// Open the service, restoring a stored session if present.
    pub fn open(storage: S) -> Self {
        let (session, restore) = restore_snapshot(&storage, keys::SESSION, |raw| {
            serde_json::from_str::<Option<Session>>(raw)
        });
        debug!(
            ?restore,
            authenticated = session.is_some(),
            "Session opened"
        );
        if restore == RestoreOutcome::Discarded {
            // Don't keep re-reading an unusable session on every start
            let _ = storage.remove_item(keys::SESSION);
        }

        Self { storage, session }
    }

    // =========================================================================
    // Password Authentication
    // =========================================================================

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Invalid` with per-field messages if the email or
    /// password fails validation.
    pub fn login(&mut self, email: &str, password: &SecretString) -> Result<&Session, AuthError> {
        let email = validate_login(email, password).map_err(AuthError::Invalid)?;

        let session = Session {
            token: Uuid::new_v4().to_string(),
            user: CurrentUser {
                id: UserId::new(DEMO_USER_ID),
                email,
                name: DEMO_USER_NAME.to_string(),
            },
        };
        info!(email = %session.user.email, "User logged in");

        persist_snapshot(&self.storage, keys::SESSION, &session);
        Ok(self.session.insert(session))
    }

    /// End the current session. No-op when logged out.
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!(email = %session.user.email, "User logged out");
            if let Err(e) = self.storage.remove_item(keys::SESSION) {
                tracing::error!(error = %e, "Failed to remove stored session");
            }
        }
    }

    /// The logged-in session, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The logged-in session, or `AuthError::NotAuthenticated`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` when logged out.
    pub fn require_session(&self) -> Result<&Session, AuthError> {
        self.session.as_ref().ok_or(AuthError::NotAuthenticated)
    }
}

/// Validate login form fields.
fn validate_login(email: &str, password: &SecretString) -> Result<Email, FieldErrors> {
    let mut errors = FieldErrors::new();

    let email = if errors.require("email", email, "Email is required") {
        None
    } else {
        let parsed = Email::parse(email.trim()).ok();
        if parsed.is_none() {
            errors.add("email", "Email is invalid");
        }
        parsed
    };

    if let Err(message) = validate_password(password.expose_secret()) {
        errors.add("password", message);
    }

    match email {
        Some(email) if errors.is_empty() => Ok(email),
        _ => Err(errors),
    }
}

/// Validate password requirements.
fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("Password is required");
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}
