use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row of the `profiles` table, keyed by the auth user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    /// Full public URL of the stored avatar, not a bare object key.
    pub avatar_url: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// A profile counts as complete once both name fields carry text.
    pub fn is_complete(&self) -> bool {
        let filled = |field: &Option<String>| matches!(field, Some(v) if !v.trim().is_empty());
        filled(&self.first_name) && filled(&self.last_name)
    }
}

/// Seed row written right after authentication. Admin status and the
/// remaining columns keep their defaults until the user fills them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProfile {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Fields a signed-in user may edit on their own profile. The update
/// replaces all four columns, so `None` clears a previously set value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
}
