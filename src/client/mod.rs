//! Backend seam. Every remote concern the application touches sits behind
//! one of these traits, so controllers and services stay testable without
//! a live backend.

mod memory;

pub use memory::MemoryBackend;

use crate::models::{
    AuthUser, ContactMessage, MediaItem, MediaRecord, NewProfile, Profile, ProfileUpdate,
    UserMetadata,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Error surfaced by a backend call. `code` carries the backend's own
/// error code (Postgres SQLSTATE, storage status, auth error code) when
/// one was provided; callers branch on it for recoverable cases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RemoteError {
    pub message: String,
    pub code: Option<String>,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Account lifecycle against the auth backend.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Registers a new account. The account is not signed in afterwards;
    /// the backend sends a confirmation email with `redirect_to` baked in.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
        redirect_to: &str,
    ) -> RemoteResult<AuthUser>;

    async fn sign_in(&self, email: &str, password: &str) -> RemoteResult<AuthUser>;

    async fn sign_out(&self) -> RemoteResult<()>;

    /// The currently signed-in user, if any.
    async fn current_user(&self) -> RemoteResult<Option<AuthUser>>;

    async fn request_password_reset(&self, email: &str, redirect_to: &str) -> RemoteResult<()>;

    /// Changes the password of the signed-in user.
    async fn update_password(&self, new_password: &str) -> RemoteResult<()>;
}

/// The `library_items` table.
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// All rows, newest first.
    async fn list_items(&self) -> RemoteResult<Vec<MediaItem>>;

    async fn insert_item(&self, record: MediaRecord) -> RemoteResult<MediaItem>;

    async fn update_item(&self, id: Uuid, record: MediaRecord) -> RemoteResult<()>;

    async fn delete_item(&self, id: Uuid) -> RemoteResult<()>;
}

/// The `profiles` table.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch_profile(&self, user_id: Uuid) -> RemoteResult<Option<Profile>>;

    /// Inserts a fresh row; duplicates fail with code 23505.
    async fn insert_profile(&self, profile: NewProfile) -> RemoteResult<()>;

    /// Inserts or refreshes the seed columns, leaving the rest of the row alone.
    async fn upsert_profile(&self, profile: NewProfile) -> RemoteResult<()>;

    async fn update_profile(&self, user_id: Uuid, changes: ProfileUpdate) -> RemoteResult<()>;

    async fn set_avatar_url(&self, user_id: Uuid, url: Option<&str>) -> RemoteResult<()>;
}

/// The `newsletter_subscribers` table.
#[async_trait]
pub trait NewsletterStore: Send + Sync {
    /// Returns the stored email when the address is already subscribed.
    async fn find_subscriber(&self, email: &str) -> RemoteResult<Option<String>>;

    async fn insert_subscriber(&self, email: &str) -> RemoteResult<()>;
}

/// The `contacts` table.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn find_contact(&self, email: &str) -> RemoteResult<Option<Uuid>>;

    async fn insert_contact(&self, message: ContactMessage) -> RemoteResult<()>;
}

/// Bucketed object storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads `data` under `bucket/key`. With `overwrite` false an existing
    /// key fails with code 409.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        overwrite: bool,
    ) -> RemoteResult<()>;

    async fn remove(&self, bucket: &str, key: &str) -> RemoteResult<()>;

    /// Public URL for an object. Pure string construction, no network round trip.
    fn public_url(&self, bucket: &str, key: &str) -> String;
}
