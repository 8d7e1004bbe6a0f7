//! Session commands.
//!
//! # Usage
//!
//! ```bash
//! mp-cli session login --token "$TOKEN" -n "Siti Rahma" -e siti@example.com
//! mp-cli session show
//! mp-cli session logout
//! ```

use marketplace_core::Email;
use marketplace_storefront::models::UserProfile;
use marketplace_storefront::services::LoginResponse;
use marketplace_storefront::{AppError, AuthSession, FileStorage, StorefrontConfig};

fn open_session<'a>(
    config: &StorefrontConfig,
    storage: &'a FileStorage,
) -> AuthSession<&'a FileStorage> {
    AuthSession::with_cart_key(storage, config.cart_key.as_str())
}

/// Print the current session.
#[allow(clippy::print_stdout)]
pub fn show(config: &StorefrontConfig, storage: &FileStorage) {
    let state = open_session(config, storage).check();
    if !state.is_authenticated() {
        println!("Not logged in");
        return;
    }

    match state.user() {
        Some(user) => {
            let role = if user.is_admin() { " (admin)" } else { "" };
            let email = user
                .email
                .as_ref()
                .map_or_else(String::new, |email| format!(" <{email}>"));
            println!("[{}] {}{email}{role}", user.initials(), user.name);
        }
        None => println!("Logged in (no profile stored)"),
    }
}

/// Store a login session.
///
/// # Errors
///
/// Returns `AppError::Auth` if the token is blank or storage fails.
pub fn login(
    config: &StorefrontConfig,
    storage: &FileStorage,
    token: String,
    name: String,
    email: Email,
    role: String,
) -> Result<(), AppError> {
    let response = LoginResponse {
        token,
        user: UserProfile {
            name,
            email: Some(email),
            role,
        },
    };
    open_session(config, storage).login(&response)?;
    tracing::info!("Logged in as {}", response.user.name);
    Ok(())
}

/// Clear the session and the cart.
///
/// # Errors
///
/// Returns `AppError::Auth` if a key could not be removed.
pub fn logout(config: &StorefrontConfig, storage: &FileStorage) -> Result<(), AppError> {
    open_session(config, storage).logout()?;
    tracing::info!("Logged out");
    Ok(())
}
