use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account data returned by the auth backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub metadata: UserMetadata,
}

/// Free-form metadata attached to an account at sign-up (or by an OAuth provider).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Provider-supplied avatar, if any.
    pub picture: Option<String>,
}

/// The two facts the rest of the application keys off: is someone signed in,
/// and is that someone an admin. Both are explicit, never derived on the fly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionFlags {
    pub logged_in: bool,
    pub admin: bool,
}

/// Auth state transition pushed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
}
