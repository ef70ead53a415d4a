use crate::client::{AuthClient, ProfileStore, RemoteError};
use crate::models::{AuthUser, NewProfile, UserMetadata};
use std::time::Duration;

/// How long a password reset request may run before it is abandoned.
pub const RESET_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Password must be at least 8 characters long and include uppercase, lowercase, and a number.")]
    WeakPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
    /// The bounded wait elapsed locally before the backend answered.
    #[error("The request took too long to complete. Please try again later.")]
    TimedOut,
    /// The backend itself reported a timeout.
    #[error("The request timed out. Please try again later.")]
    RemoteTimedOut,
    #[error("{0}")]
    Remote(RemoteError),
}

/// Where to send the user after a successful sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Profile is missing a name; finish it before anything else.
    CompleteProfile,
    Admin,
    Member,
}

pub fn validate_password(password: &str) -> Result<(), AuthError> {
    let long_enough = password.len() >= 8;
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if long_enough && has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err(AuthError::WeakPassword)
    }
}

/// Registers an account. The names travel as account metadata so the profile
/// row can be seeded from them on first sign-in; the confirmation email
/// points back at the dashboard.
pub async fn sign_up(
    auth: &dyn AuthClient,
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
    site_url: &str,
) -> Result<AuthUser, AuthError> {
    validate_password(password)?;
    let metadata = UserMetadata {
        first_name: Some(first_name.to_string()),
        last_name: Some(last_name.to_string()),
        picture: None,
    };
    let redirect_to = format!("{}/dashboard", site_url.trim_end_matches('/'));
    auth.sign_up(email, password, metadata, &redirect_to)
        .await
        .map_err(AuthError::Remote)
}

/// Signs in, refreshes the profile seed columns from the account, then reads
/// the row back to decide where the user lands.
pub async fn sign_in(
    auth: &dyn AuthClient,
    profiles: &dyn ProfileStore,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, AuthError> {
    let user = auth
        .sign_in(email, password)
        .await
        .map_err(AuthError::Remote)?;

    let seed = NewProfile {
        id: user.id,
        email: user.email.clone(),
        first_name: user.metadata.first_name.clone(),
        last_name: user.metadata.last_name.clone(),
        avatar_url: None,
    };
    profiles
        .upsert_profile(seed)
        .await
        .map_err(AuthError::Remote)?;

    let profile = profiles
        .fetch_profile(user.id)
        .await
        .map_err(AuthError::Remote)?
        .ok_or_else(|| AuthError::Remote(RemoteError::new("profile row missing after upsert")))?;

    if !profile.is_complete() {
        Ok(LoginOutcome::CompleteProfile)
    } else if profile.is_admin {
        Ok(LoginOutcome::Admin)
    } else {
        Ok(LoginOutcome::Member)
    }
}

pub async fn sign_out(auth: &dyn AuthClient) -> Result<(), AuthError> {
    auth.sign_out().await.map_err(AuthError::Remote)
}

/// Asks the backend to email reset instructions, waiting at most `timeout`.
/// A backend error that itself mentions a timeout keeps its own wording,
/// distinct from the local bound elapsing.
pub async fn request_password_reset(
    auth: &dyn AuthClient,
    email: &str,
    site_url: &str,
    timeout: Duration,
) -> Result<(), AuthError> {
    let redirect_to = format!("{}/reset-password", site_url.trim_end_matches('/'));
    match tokio::time::timeout(timeout, auth.request_password_reset(email, &redirect_to)).await {
        Err(_) => Err(AuthError::TimedOut),
        Ok(Err(error)) if error.message.contains("timeout") => Err(AuthError::RemoteTimedOut),
        Ok(Err(error)) => Err(AuthError::Remote(error)),
        Ok(Ok(())) => Ok(()),
    }
}

/// Sets a new password for the signed-in user. The confirmation mismatch
/// check never reaches the backend.
pub async fn update_password(
    auth: &dyn AuthClient,
    new_password: &str,
    confirmation: &str,
) -> Result<(), AuthError> {
    if new_password != confirmation {
        return Err(AuthError::PasswordMismatch);
    }
    auth.update_password(new_password)
        .await
        .map_err(AuthError::Remote)
}
