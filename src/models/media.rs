use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

/// Curated category of a library item. Values match the backend column verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Digital Painting")]
    DigitalPainting,
    Interactive,
    Generative,
    #[serde(rename = "Audio Reactive")]
    AudioReactive,
    #[serde(rename = "Animation Painting")]
    AnimationPainting,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::DigitalPainting,
        Category::Interactive,
        Category::Generative,
        Category::AudioReactive,
        Category::AnimationPainting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DigitalPainting => "Digital Painting",
            Category::Interactive => "Interactive",
            Category::Generative => "Generative",
            Category::AudioReactive => "Audio Reactive",
            Category::AnimationPainting => "Animation Painting",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Digital Painting" => Ok(Category::DigitalPainting),
            "Interactive" => Ok(Category::Interactive),
            "Generative" => Ok(Category::Generative),
            "Audio Reactive" => Ok(Category::AudioReactive),
            "Animation Painting" => Ok(Category::AnimationPainting),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Playback shape of a library item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Photo,
    #[serde(rename = "GIF")]
    Gif,
    Video,
}

impl MediaKind {
    pub const ALL: [MediaKind; 3] = [MediaKind::Photo, MediaKind::Gif, MediaKind::Video];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Photo => "Photo",
            MediaKind::Gif => "GIF",
            MediaKind::Video => "Video",
        }
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Photo" => Ok(MediaKind::Photo),
            "GIF" => Ok(MediaKind::Gif),
            "Video" => Ok(MediaKind::Video),
            _ => Err(format!("Unknown media type: {}", s)),
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A row of the `library_items` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: Uuid,
    pub title: String,
    /// Object key inside the media bucket, not a full URL.
    pub file_location: String,
    pub hashtags: Vec<String>,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting or updating a library row. The backend assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub title: String,
    pub file_location: String,
    pub hashtags: Vec<String>,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl MediaRecord {
    pub fn into_item(self, id: Uuid) -> MediaItem {
        MediaItem {
            id,
            title: self.title,
            file_location: self.file_location,
            hashtags: self.hashtags,
            category: self.category,
            kind: self.kind,
            uploaded_by: self.uploaded_by,
            created_at: self.created_at,
        }
    }
}

/// An in-memory file selected for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePayload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FilePayload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.name).extension().and_then(|e| e.to_str())
    }

    pub fn content_type(&self) -> String {
        mime_guess::from_path(&self.name)
            .first_or_octet_stream()
            .to_string()
    }
}
