//! Photo model and the fixed sticker vocabulary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One of the five symbolic tags attachable to a photo.
///
/// Serialized as the emoji itself so persisted records and exports stay
/// readable and compatible with the original album format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sticker {
    #[serde(rename = "💖")]
    Heart,
    #[serde(rename = "⭐")]
    Star,
    #[serde(rename = "🎵")]
    Music,
    #[serde(rename = "📸")]
    Camera,
    #[serde(rename = "🌙")]
    Moon,
}

impl Sticker {
    /// The full sticker vocabulary, in display order.
    pub const ALL: [Sticker; 5] = [
        Sticker::Heart,
        Sticker::Star,
        Sticker::Music,
        Sticker::Camera,
        Sticker::Moon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sticker::Heart => "💖",
            Sticker::Star => "⭐",
            Sticker::Music => "🎵",
            Sticker::Camera => "📸",
            Sticker::Moon => "🌙",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "💖" => Some(Sticker::Heart),
            "⭐" => Some(Sticker::Star),
            "🎵" => Some(Sticker::Music),
            "📸" => Some(Sticker::Camera),
            "🌙" => Some(Sticker::Moon),
            _ => None,
        }
    }
}

/// A photo in the album.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Photo {
    pub id: String,
    /// Self-contained image payload as a `data:<mime>;base64,...` URL
    pub image: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Display date (calendar precision); sorting uses `created_at`
    pub date: NaiveDate,
    #[serde(default)]
    pub stickers: Vec<Sticker>,
    pub created_at: DateTime<Utc>,
}

impl Photo {
    /// Create a photo from a decoded upload, with a fresh id and upload-time
    /// date, empty description and sticker set.
    pub fn from_upload(title: impl Into<String>, image: String) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            image,
            title: title.into(),
            description: String::new(),
            date: now.date_naive(),
            stickers: Vec::new(),
            created_at: now,
        }
    }

    pub fn has_sticker(&self, sticker: Sticker) -> bool {
        self.stickers.contains(&sticker)
    }
}
