//! Persisted login session.
//!
//! After a successful login the backend returns a bearer token and the user
//! record. The token and a trimmed [`UserProfile`] are kept in storage under
//! [`keys::ACCESS_TOKEN`] and [`keys::USER`] so the session survives
//! reloads.
//!
//! # Hydration rules
//!
//! - No token: anonymous.
//! - Token and a parseable (or absent) profile: authenticated. A stored
//!   `null`, or JSON that is not a profile, leaves the user unknown.
//! - Token and a profile that is not valid JSON: both keys are removed and
//!   the session is anonymous.
//!
//! Logout wipes the whole client profile, including the cart.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::instrument;

use crate::models::UserProfile;
use crate::storage::{KeyValueStorage, keys};

/// The `data` object of a successful login or registration response.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

/// Authentication state derived from storage.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// No usable token.
    Anonymous,
    /// A token is present.
    Authenticated {
        token: SecretString,
        /// `None` when the token was stored without a profile.
        user: Option<UserProfile>,
    },
}

impl SessionState {
    /// Whether a token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// The logged-in user's profile, if known.
    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated { user, .. } => user.as_ref(),
            Self::Anonymous => None,
        }
    }

    /// `Authorization` header value for API calls.
    #[must_use]
    pub fn bearer_header(&self) -> Option<SecretString> {
        match self {
            Self::Authenticated { token, .. } => {
                Some(SecretString::from(format!("Bearer {}", token.expose_secret())))
            }
            Self::Anonymous => None,
        }
    }
}

/// Login session over a key/value storage.
#[derive(Debug)]
pub struct AuthSession<S> {
    storage: S,
    cart_key: String,
}

impl<S: KeyValueStorage> AuthSession<S> {
    /// Create a session whose logout also clears the default cart key.
    pub fn new(storage: S) -> Self {
        Self::with_cart_key(storage, keys::CART)
    }

    /// Create a session whose logout also clears `cart_key`.
    pub fn with_cart_key(storage: S, cart_key: impl Into<String>) -> Self {
        Self {
            storage,
            cart_key: cart_key.into(),
        }
    }

    /// Read the current session from storage.
    ///
    /// Never fails: unreadable storage is treated as anonymous, and a
    /// corrupt profile logs the session out.
    #[instrument(skip(self))]
    pub fn check(&self) -> SessionState {
        let token = match self.storage.get(keys::ACCESS_TOKEN) {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return SessionState::Anonymous,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read access token");
                return SessionState::Anonymous;
            }
        };

        let raw_user = match self.storage.get(keys::USER) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read user profile");
                None
            }
        };

        let user = match raw_user.as_deref().map(serde_json::from_str::<serde_json::Value>) {
            None | Some(Ok(serde_json::Value::Null)) => None,
            Some(Ok(value)) => match serde_json::from_value::<UserProfile>(value) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Stored user record is not a profile, ignoring it");
                    None
                }
            },
            Some(Err(e)) => {
                tracing::error!(error = %e, "Stored user profile is corrupt, clearing session");
                self.forget_credentials();
                return SessionState::Anonymous;
            }
        };

        SessionState::Authenticated {
            token: SecretString::from(token),
            user,
        }
    }

    /// Persist a successful login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmptyToken` for a blank token, or a storage or
    /// encoding error if the session could not be saved.
    #[instrument(skip(self, response), fields(user = %response.user.name))]
    pub fn login(&self, response: &LoginResponse) -> Result<SessionState, AuthError> {
        let token = response.token.trim();
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }

        let user_json = serde_json::to_string(&response.user)?;
        self.storage.set(keys::ACCESS_TOKEN, token)?;
        self.storage.set(keys::USER, &user_json)?;
        tracing::info!("User logged in");

        Ok(SessionState::Authenticated {
            token: SecretString::from(token.to_owned()),
            user: Some(response.user.clone()),
        })
    }

    /// Forget the session and the cart.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if any key could not be removed. Every
    /// key is attempted regardless.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), AuthError> {
        let mut first_error = None;
        for key in [keys::ACCESS_TOKEN, keys::USER, self.cart_key.as_str()] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, error = %e, "Failed to remove key on logout");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e.into()),
            None => {
                tracing::info!("User logged out");
                Ok(())
            }
        }
    }

    fn forget_credentials(&self) {
        for key in [keys::ACCESS_TOKEN, keys::USER] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, error = %e, "Failed to remove corrupt session key");
            }
        }
    }
}
