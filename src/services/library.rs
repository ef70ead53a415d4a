//! The studio library controller: the admin-curated collection of venue
//! artwork, with filtering, a single add/edit form, and per-item playback
//! state. Holds both the full collection and the currently visible subset;
//! the subset is always derived from the full collection by
//! [`filter::apply`], never filtered incrementally.

use crate::client::{AuthClient, LibraryStore, ObjectStore, RemoteError};
use crate::models::{Category, FilePayload, MediaItem, MediaKind, MediaRecord, SessionFlags};
use crate::services::filter::{self, LibraryFilter};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LibraryError {
    #[error("Only admins can add or edit media items")]
    NotAdmin,
    #[error("Title is required")]
    MissingTitle,
    #[error("Tags are required")]
    MissingTags,
    #[error("File is required")]
    MissingFile,
    #[error("No media form is open")]
    FormClosed,
    #[error("Media item not found")]
    NotFound,
    #[error("Failed to fetch media items: {0}")]
    Fetch(RemoteError),
    #[error("{}", schema_hint("Failed to upload file", .0))]
    Upload(RemoteError),
    #[error("{}", schema_hint("Failed to save media item", .0))]
    Insert(RemoteError),
    #[error("{}", schema_hint("Failed to update media item", .0))]
    Update(RemoteError),
    #[error("Failed to delete media item: {0}")]
    Delete(RemoteError),
    #[error("Failed to delete file: {0}")]
    DeleteFile(RemoteError),
}

/// Backend complaints about a stale schema cache get an actionable hint
/// appended, since the fix is a table migration rather than a retry.
fn schema_hint(prefix: &str, error: &RemoteError) -> String {
    let message = format!("{}: {}", prefix, error);
    if error.message.contains("schema cache") {
        format!(
            "{}. Please ensure the 'library_items' table schema matches the expected fields.",
            message
        )
    } else {
        message
    }
}

/// What a successful [`MediaLibrary::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saved {
    Created,
    Updated,
}

impl Saved {
    pub fn message(self) -> &'static str {
        match self {
            Saved::Created => "Media item added successfully!",
            Saved::Updated => "Media item updated successfully!",
        }
    }
}

/// The single open add-or-edit form. `target` is the snapshot of the item
/// being edited; `None` means the form creates a new item.
#[derive(Debug, Clone)]
pub struct MediaForm {
    target: Option<MediaItem>,
    pub title: String,
    /// Comma-separated, normalised on submit.
    pub tags: String,
    pub category: Category,
    pub kind: MediaKind,
    pub file: Option<FilePayload>,
}

impl MediaForm {
    fn add() -> Self {
        Self {
            target: None,
            title: String::new(),
            tags: String::new(),
            category: Category::DigitalPainting,
            kind: MediaKind::Photo,
            file: None,
        }
    }

    fn edit(item: MediaItem) -> Self {
        Self {
            title: item.title.clone(),
            tags: item.hashtags.join(", "),
            category: item.category,
            kind: item.kind,
            file: None,
            target: Some(item),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&MediaItem> {
        self.target.as_ref()
    }

    pub fn attach_file(&mut self, file: FilePayload) {
        self.file = Some(file);
    }
}

pub struct MediaLibrary {
    store: Arc<dyn LibraryStore>,
    objects: Arc<dyn ObjectStore>,
    auth: Arc<dyn AuthClient>,
    bucket: String,
    session: SessionFlags,
    items: Vec<MediaItem>,
    visible: Vec<MediaItem>,
    filter: LibraryFilter,
    form: Option<MediaForm>,
    playing: HashMap<Uuid, bool>,
}

impl MediaLibrary {
    pub fn new(
        store: Arc<dyn LibraryStore>,
        objects: Arc<dyn ObjectStore>,
        auth: Arc<dyn AuthClient>,
        bucket: impl Into<String>,
        session: SessionFlags,
    ) -> Self {
        Self {
            store,
            objects,
            auth,
            bucket: bucket.into(),
            session,
            items: Vec::new(),
            visible: Vec::new(),
            filter: LibraryFilter::default(),
            form: None,
            playing: HashMap::new(),
        }
    }

    /// Reloads the full collection from the backend and reapplies the filter.
    pub async fn refresh(&mut self) -> Result<(), LibraryError> {
        let items = self.store.list_items().await.map_err(LibraryError::Fetch)?;
        self.items = items;
        self.apply_filter();
        Ok(())
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// The subset matching the current filter, in collection order.
    pub fn visible(&self) -> &[MediaItem] {
        &self.visible
    }

    pub fn filter(&self) -> &LibraryFilter {
        &self.filter
    }

    pub fn session(&self) -> SessionFlags {
        self.session
    }

    pub fn set_session(&mut self, session: SessionFlags) {
        self.session = session;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filter.search = query.into();
        self.apply_filter();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.filter.category = category;
        self.apply_filter();
    }

    pub fn set_kind(&mut self, kind: Option<MediaKind>) {
        self.filter.kind = kind;
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        self.visible = filter::apply(&self.items, &self.filter);
    }

    /// Opens a blank form for a new item. Admins only.
    pub fn open_add(&mut self) -> Result<&mut MediaForm, LibraryError> {
        self.require_admin()?;
        Ok(self.form.insert(MediaForm::add()))
    }

    /// Opens the form prefilled from an existing item. Admins only.
    pub fn open_edit(&mut self, id: Uuid) -> Result<&mut MediaForm, LibraryError> {
        self.require_admin()?;
        let item = self
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(LibraryError::NotFound)?;
        Ok(self.form.insert(MediaForm::edit(item)))
    }

    pub fn form(&self) -> Option<&MediaForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut MediaForm> {
        self.form.as_mut()
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Validates and saves the open form. On success the form closes and the
    /// collection is refetched; on any failure the form stays open with its
    /// data intact. Validation runs in a fixed order (admin, title, tags,
    /// file) and a validation failure makes no backend call.
    pub async fn submit(&mut self) -> Result<Saved, LibraryError> {
        self.require_admin()?;
        let form = self.form.take().ok_or(LibraryError::FormClosed)?;
        match self.save_form(&form).await {
            Ok(saved) => {
                self.refresh().await?;
                Ok(saved)
            }
            Err(error) => {
                self.form = Some(form);
                Err(error)
            }
        }
    }

    async fn save_form(&self, form: &MediaForm) -> Result<Saved, LibraryError> {
        if form.title.trim().is_empty() {
            return Err(LibraryError::MissingTitle);
        }
        let hashtags = split_tags(&form.tags);
        if hashtags.is_empty() {
            return Err(LibraryError::MissingTags);
        }
        if !form.is_edit() && form.file.is_none() {
            return Err(LibraryError::MissingFile);
        }

        let mut file_location = form
            .target
            .as_ref()
            .map(|target| target.file_location.clone())
            .unwrap_or_default();

        if let Some(file) = form.file.as_ref() {
            let key = storage_key(file);
            let content_type = file.content_type();
            self.objects
                .upload(&self.bucket, &key, file.bytes.clone(), &content_type, false)
                .await
                .map_err(LibraryError::Upload)?;
            if let Some(target) = form.target.as_ref() {
                if !target.file_location.is_empty() {
                    if let Err(error) =
                        self.objects.remove(&self.bucket, &target.file_location).await
                    {
                        warn!(key = %target.file_location, error = %error, "could not remove replaced object");
                    }
                }
            }
            file_location = key;
        }

        let uploaded_by = self
            .auth
            .current_user()
            .await
            .ok()
            .flatten()
            .map(|user| user.id);

        let record = MediaRecord {
            title: form.title.clone(),
            file_location,
            hashtags,
            category: form.category,
            kind: form.kind,
            uploaded_by,
            created_at: Utc::now(),
        };

        match form.target.as_ref() {
            Some(target) => {
                self.store
                    .update_item(target.id, record)
                    .await
                    .map_err(LibraryError::Update)?;
                Ok(Saved::Updated)
            }
            None => {
                self.store
                    .insert_item(record)
                    .await
                    .map_err(LibraryError::Insert)?;
                Ok(Saved::Created)
            }
        }
    }

    /// Deletes an item: database row first, then the stored object, then the
    /// local copies. No refetch happens here; both lists are spliced in place.
    pub async fn delete(&mut self, id: Uuid) -> Result<(), LibraryError> {
        self.require_admin()?;
        let location = self
            .items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.file_location.clone())
            .ok_or(LibraryError::NotFound)?;

        self.store
            .delete_item(id)
            .await
            .map_err(LibraryError::Delete)?;

        if !location.is_empty() {
            self.objects
                .remove(&self.bucket, &location)
                .await
                .map_err(LibraryError::DeleteFile)?;
        }

        self.items.retain(|item| item.id != id);
        self.visible.retain(|item| item.id != id);
        self.playing.remove(&id);
        Ok(())
    }

    /// Flips playback for one item and returns the new flag. Other items
    /// keep playing; there is no global stop.
    pub fn toggle_playback(&mut self, id: Uuid) -> bool {
        let flag = self.playing.entry(id).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn is_playing(&self, id: Uuid) -> bool {
        self.playing.get(&id).copied().unwrap_or(false)
    }

    pub fn public_url(&self, item: &MediaItem) -> String {
        self.objects.public_url(&self.bucket, &item.file_location)
    }

    fn require_admin(&self) -> Result<(), LibraryError> {
        if self.session.admin {
            Ok(())
        } else {
            Err(LibraryError::NotAdmin)
        }
    }
}

/// Splits the comma-separated tag field into normalised hashtags:
/// trimmed, lowercased, empties dropped.
pub(crate) fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Objects are stored under a fresh random name so uploads never collide;
/// the original file name only contributes its extension.
pub(crate) fn storage_key(file: &FilePayload) -> String {
    match file.extension() {
        Some(extension) if !extension.is_empty() => {
            format!("{}.{}", Uuid::new_v4(), extension)
        }
        _ => Uuid::new_v4().to_string(),
    }
}
