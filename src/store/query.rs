//! Pure filtering and sorting over the photo collection.

use serde::{Deserialize, Serialize};

use crate::models::{Photo, Sticker};

/// Sort order for album views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Newest first, by full-precision upload timestamp
    #[default]
    DateDesc,
    /// Oldest first
    DateAsc,
    /// Lexicographic by title, case-insensitive
    TitleAsc,
    /// Most stickers first; ties keep their relative order
    #[serde(rename = "sticker")]
    StickerCount,
    /// Identity order (insertion order of the collection)
    Unsorted,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateDesc => "date-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::TitleAsc => "title-asc",
            SortKey::StickerCount => "sticker",
            SortKey::Unsorted => "unsorted",
        }
    }

    /// Parse a sort key name; unknown names yield `None` and callers fall
    /// back to identity order.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "date-desc" => Some(SortKey::DateDesc),
            "date-asc" => Some(SortKey::DateAsc),
            "title-asc" => Some(SortKey::TitleAsc),
            "sticker" => Some(SortKey::StickerCount),
            "unsorted" => Some(SortKey::Unsorted),
            _ => None,
        }
    }
}

/// Filter and sort a photo collection into a fresh, ordered sequence.
///
/// Never mutates the input. All sorts are stable, so equal elements keep
/// their prior relative order.
pub fn run(photos: &[Photo], filter: Option<Sticker>, sort: SortKey) -> Vec<Photo> {
    let mut result: Vec<Photo> = match filter {
        Some(sticker) => photos
            .iter()
            .filter(|p| p.has_sticker(sticker))
            .cloned()
            .collect(),
        None => photos.to_vec(),
    };

    match sort {
        SortKey::DateDesc => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::DateAsc => result.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::TitleAsc => result.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title))
        }),
        SortKey::StickerCount => result.sort_by(|a, b| b.stickers.len().cmp(&a.stickers.len())),
        SortKey::Unsorted => {}
    }

    result
}
