use crate::client::{
    AuthClient, ContactStore, LibraryStore, NewsletterStore, ObjectStore, ProfileStore,
    RemoteError, RemoteResult,
};
use crate::models::{
    AuthUser, ContactMessage, MediaItem, MediaRecord, NewProfile, Profile, ProfileUpdate,
    UserMetadata,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

/// In-memory implementation of every backend trait, used by the test suite
/// and by demos that run without a live backend.
///
/// Every trait call is appended to an operation log (`operations`) under a
/// stable name like `"library.insert"` or `"storage.upload"`, so tests can
/// assert that a code path made no remote calls at all. Calls can be forced
/// to fail (`fail`) or to stall (`delay`) by operation name.
pub struct MemoryBackend {
    base_url: String,
    state: Mutex<State>,
    ops: Mutex<Vec<String>>,
    failures: Mutex<HashMap<String, RemoteError>>,
    delays: Mutex<HashMap<String, Duration>>,
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, Account>,
    current: Option<AuthUser>,
    items: Vec<MediaItem>,
    profiles: HashMap<Uuid, Profile>,
    subscribers: Vec<String>,
    contacts: Vec<(Uuid, ContactMessage)>,
    objects: HashMap<String, StoredObject>,
}

struct Account {
    id: Uuid,
    password: String,
    metadata: UserMetadata,
}

struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

impl MemoryBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            state: Mutex::new(State::default()),
            ops: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
        }
    }

    /// Operation names logged so far, oldest first.
    pub fn operations(&self) -> Vec<String> {
        self.ops.lock().unwrap().clone()
    }

    pub fn clear_operations(&self) {
        self.ops.lock().unwrap().clear();
    }

    /// Forces every subsequent call of `op` to fail with `error` until
    /// [`clear_failure`](Self::clear_failure) is called.
    pub fn fail(&self, op: &str, error: RemoteError) {
        self.failures.lock().unwrap().insert(op.to_string(), error);
    }

    pub fn clear_failure(&self, op: &str) {
        self.failures.lock().unwrap().remove(op);
    }

    /// Makes every call of `op` sleep before completing.
    pub fn delay(&self, op: &str, pause: Duration) {
        self.delays.lock().unwrap().insert(op.to_string(), pause);
    }

    pub fn seed_items(&self, items: Vec<MediaItem>) {
        self.state.lock().unwrap().items = items;
    }

    pub fn seed_profile(&self, profile: Profile) {
        self.state
            .lock()
            .unwrap()
            .profiles
            .insert(profile.id, profile);
    }

    pub fn grant_admin(&self, user_id: Uuid) {
        if let Some(profile) = self.state.lock().unwrap().profiles.get_mut(&user_id) {
            profile.is_admin = true;
        }
    }

    // Inspectors below read state without touching the operation log.

    pub fn stored_items(&self) -> Vec<MediaItem> {
        self.state.lock().unwrap().items.clone()
    }

    pub fn stored_profile(&self, user_id: Uuid) -> Option<Profile> {
        self.state.lock().unwrap().profiles.get(&user_id).cloned()
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.state
            .lock()
            .unwrap()
            .objects
            .get(&object_key(bucket, key))
            .map(|o| o.bytes.clone())
    }

    pub fn object_content_type(&self, bucket: &str, key: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .objects
            .get(&object_key(bucket, key))
            .map(|o| o.content_type.clone())
    }

    pub fn object_count(&self) -> usize {
        self.state.lock().unwrap().objects.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.lock().unwrap().subscribers.len()
    }

    pub fn contact_count(&self) -> usize {
        self.state.lock().unwrap().contacts.len()
    }

    /// Logs the call, applies any configured delay, then fails if a failure
    /// is registered for this operation.
    async fn begin(&self, op: &str) -> RemoteResult<()> {
        self.ops.lock().unwrap().push(op.to_string());
        let pause = self.delays.lock().unwrap().get(op).copied();
        if let Some(pause) = pause {
            tokio::time::sleep(pause).await;
        }
        let forced = self.failures.lock().unwrap().get(op).cloned();
        match forced {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new("https://example.supabase.co")
    }
}

fn object_key(bucket: &str, key: &str) -> String {
    format!("{}/{}", bucket, key)
}

fn seed_profile_row(seed: &NewProfile) -> Profile {
    Profile {
        id: seed.id,
        email: seed.email.clone(),
        first_name: seed.first_name.clone(),
        last_name: seed.last_name.clone(),
        date_of_birth: None,
        address: None,
        avatar_url: seed.avatar_url.clone(),
        is_admin: false,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl AuthClient for MemoryBackend {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
        _redirect_to: &str,
    ) -> RemoteResult<AuthUser> {
        self.begin("auth.sign_up").await?;
        let mut state = self.state.lock().unwrap();
        if state.accounts.contains_key(email) {
            return Err(RemoteError::with_code(
                "User already registered",
                "user_already_exists",
            ));
        }
        let id = Uuid::new_v4();
        let user = AuthUser {
            id,
            email: email.to_string(),
            metadata: metadata.clone(),
        };
        state.accounts.insert(
            email.to_string(),
            Account {
                id,
                password: password.to_string(),
                metadata,
            },
        );
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> RemoteResult<AuthUser> {
        self.begin("auth.sign_in").await?;
        let mut state = self.state.lock().unwrap();
        let user = match state.accounts.get(email) {
            Some(account) if account.password == password => AuthUser {
                id: account.id,
                email: email.to_string(),
                metadata: account.metadata.clone(),
            },
            _ => {
                return Err(RemoteError::with_code(
                    "Invalid login credentials",
                    "invalid_credentials",
                ))
            }
        };
        state.current = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&self) -> RemoteResult<()> {
        self.begin("auth.sign_out").await?;
        self.state.lock().unwrap().current = None;
        Ok(())
    }

    async fn current_user(&self) -> RemoteResult<Option<AuthUser>> {
        self.begin("auth.current_user").await?;
        Ok(self.state.lock().unwrap().current.clone())
    }

    async fn request_password_reset(
        &self,
        _email: &str,
        _redirect_to: &str,
    ) -> RemoteResult<()> {
        // Succeeds whether or not the address has an account, like the real
        // backend, which never reveals account existence here.
        self.begin("auth.reset_password").await?;
        Ok(())
    }

    async fn update_password(&self, new_password: &str) -> RemoteResult<()> {
        self.begin("auth.update_password").await?;
        let mut state = self.state.lock().unwrap();
        let email = match &state.current {
            Some(user) => user.email.clone(),
            None => return Err(RemoteError::new("Auth session missing!")),
        };
        if let Some(account) = state.accounts.get_mut(&email) {
            account.password = new_password.to_string();
        }
        Ok(())
    }
}

#[async_trait]
impl LibraryStore for MemoryBackend {
    async fn list_items(&self) -> RemoteResult<Vec<MediaItem>> {
        self.begin("library.select").await?;
        let mut items = self.state.lock().unwrap().items.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn insert_item(&self, record: MediaRecord) -> RemoteResult<MediaItem> {
        self.begin("library.insert").await?;
        let item = record.into_item(Uuid::new_v4());
        self.state.lock().unwrap().items.push(item.clone());
        Ok(item)
    }

    async fn update_item(&self, id: Uuid, record: MediaRecord) -> RemoteResult<()> {
        self.begin("library.update").await?;
        let mut state = self.state.lock().unwrap();
        // A miss matches zero rows on the real backend: not an error.
        if let Some(slot) = state.items.iter_mut().find(|item| item.id == id) {
            *slot = record.into_item(id);
        }
        Ok(())
    }

    async fn delete_item(&self, id: Uuid) -> RemoteResult<()> {
        self.begin("library.delete").await?;
        self.state.lock().unwrap().items.retain(|item| item.id != id);
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryBackend {
    async fn fetch_profile(&self, user_id: Uuid) -> RemoteResult<Option<Profile>> {
        self.begin("profiles.select").await?;
        Ok(self.state.lock().unwrap().profiles.get(&user_id).cloned())
    }

    async fn insert_profile(&self, profile: NewProfile) -> RemoteResult<()> {
        self.begin("profiles.insert").await?;
        let mut state = self.state.lock().unwrap();
        if state.profiles.contains_key(&profile.id) {
            return Err(RemoteError::with_code(
                "duplicate key value violates unique constraint \"profiles_pkey\"",
                "23505",
            ));
        }
        state.profiles.insert(profile.id, seed_profile_row(&profile));
        Ok(())
    }

    async fn upsert_profile(&self, profile: NewProfile) -> RemoteResult<()> {
        self.begin("profiles.upsert").await?;
        let mut state = self.state.lock().unwrap();
        match state.profiles.get_mut(&profile.id) {
            Some(row) => {
                row.email = profile.email;
                row.first_name = profile.first_name;
                row.last_name = profile.last_name;
                if profile.avatar_url.is_some() {
                    row.avatar_url = profile.avatar_url;
                }
            }
            None => {
                state.profiles.insert(profile.id, seed_profile_row(&profile));
            }
        }
        Ok(())
    }

    async fn update_profile(&self, user_id: Uuid, changes: ProfileUpdate) -> RemoteResult<()> {
        self.begin("profiles.update").await?;
        let mut state = self.state.lock().unwrap();
        if let Some(row) = state.profiles.get_mut(&user_id) {
            row.first_name = changes.first_name;
            row.last_name = changes.last_name;
            row.date_of_birth = changes.date_of_birth;
            row.address = changes.address;
        }
        Ok(())
    }

    async fn set_avatar_url(&self, user_id: Uuid, url: Option<&str>) -> RemoteResult<()> {
        self.begin("profiles.set_avatar").await?;
        let mut state = self.state.lock().unwrap();
        if let Some(row) = state.profiles.get_mut(&user_id) {
            row.avatar_url = url.map(str::to_string);
        }
        Ok(())
    }
}

#[async_trait]
impl NewsletterStore for MemoryBackend {
    async fn find_subscriber(&self, email: &str) -> RemoteResult<Option<String>> {
        self.begin("newsletter.select").await?;
        let state = self.state.lock().unwrap();
        Ok(state.subscribers.iter().find(|s| *s == email).cloned())
    }

    async fn insert_subscriber(&self, email: &str) -> RemoteResult<()> {
        self.begin("newsletter.insert").await?;
        let mut state = self.state.lock().unwrap();
        if state.subscribers.iter().any(|s| s == email) {
            return Err(RemoteError::with_code(
                "duplicate key value violates unique constraint \"newsletter_subscribers_email_key\"",
                "23505",
            ));
        }
        state.subscribers.push(email.to_string());
        Ok(())
    }
}

#[async_trait]
impl ContactStore for MemoryBackend {
    async fn find_contact(&self, email: &str) -> RemoteResult<Option<Uuid>> {
        self.begin("contacts.select").await?;
        let state = self.state.lock().unwrap();
        Ok(state
            .contacts
            .iter()
            .find(|(_, message)| message.email == email)
            .map(|(id, _)| *id))
    }

    async fn insert_contact(&self, message: ContactMessage) -> RemoteResult<()> {
        self.begin("contacts.insert").await?;
        self.state
            .lock()
            .unwrap()
            .contacts
            .push((Uuid::new_v4(), message));
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for MemoryBackend {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        overwrite: bool,
    ) -> RemoteResult<()> {
        self.begin("storage.upload").await?;
        let mut state = self.state.lock().unwrap();
        let full_key = object_key(bucket, key);
        if !overwrite && state.objects.contains_key(&full_key) {
            return Err(RemoteError::with_code("The resource already exists", "409"));
        }
        state.objects.insert(
            full_key,
            StoredObject {
                bytes: data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn remove(&self, bucket: &str, key: &str) -> RemoteResult<()> {
        self.begin("storage.remove").await?;
        self.state
            .lock()
            .unwrap()
            .objects
            .remove(&object_key(bucket, key));
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url.trim_end_matches('/'),
            bucket,
            key
        )
    }
}
