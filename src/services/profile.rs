use crate::client::{ObjectStore, ProfileStore, RemoteError, RemoteResult};
use crate::models::{AuthUser, FilePayload, NewProfile, Profile, ProfileUpdate};
use uuid::Uuid;

/// Fetches the signed-in user's profile, creating the row from account
/// metadata on first visit.
pub async fn load_or_create(profiles: &dyn ProfileStore, user: &AuthUser) -> RemoteResult<Profile> {
    if let Some(profile) = profiles.fetch_profile(user.id).await? {
        return Ok(profile);
    }
    let seed = NewProfile {
        id: user.id,
        email: user.email.clone(),
        first_name: user.metadata.first_name.clone(),
        last_name: user.metadata.last_name.clone(),
        avatar_url: user.metadata.picture.clone(),
    };
    profiles.insert_profile(seed).await?;
    profiles
        .fetch_profile(user.id)
        .await?
        .ok_or_else(|| RemoteError::new("profile row missing after insert"))
}

pub async fn update(
    profiles: &dyn ProfileStore,
    user_id: Uuid,
    changes: ProfileUpdate,
) -> RemoteResult<()> {
    profiles.update_profile(user_id, changes).await
}

/// Stores the avatar under a key derived from the user id, overwriting any
/// previous upload, and records the public URL on the profile. Returns the URL.
pub async fn upload_avatar(
    profiles: &dyn ProfileStore,
    objects: &dyn ObjectStore,
    bucket: &str,
    user: &AuthUser,
    file: FilePayload,
) -> RemoteResult<String> {
    let key = avatar_key_for(user.id, &file);
    let content_type = file.content_type();
    objects
        .upload(bucket, &key, file.bytes, &content_type, true)
        .await?;
    let url = objects.public_url(bucket, &key);
    profiles.set_avatar_url(user.id, Some(&url)).await?;
    Ok(url)
}

/// Removes the stored avatar object, then clears the URL from the profile.
/// The object key is recovered from the URL's last path segment. Doing
/// nothing when no avatar is set is deliberate.
pub async fn remove_avatar(
    profiles: &dyn ProfileStore,
    objects: &dyn ObjectStore,
    bucket: &str,
    user: &AuthUser,
    avatar_url: &str,
) -> RemoteResult<()> {
    if avatar_url.is_empty() {
        return Ok(());
    }
    let file_name = avatar_url.rsplit('/').next().unwrap_or(avatar_url);
    let key = format!("profile-avatars/{}", file_name);
    objects.remove(bucket, &key).await?;
    profiles.set_avatar_url(user.id, None).await?;
    Ok(())
}

fn avatar_key_for(user_id: Uuid, file: &FilePayload) -> String {
    match file.extension() {
        Some(extension) if !extension.is_empty() => {
            format!("profile-avatars/{}.{}", user_id, extension)
        }
        _ => format!("profile-avatars/{}", user_id),
    }
}
