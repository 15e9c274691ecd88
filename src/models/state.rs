//! Root album state: the persisted record and the export snapshot envelope.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{GuestEntry, Photo, Profile};
use crate::errors::StoreError;

/// Snapshot format version.
pub const SNAPSHOT_VERSION: &str = "1.0";

/// Named UI theme.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Pastel,
    Mint,
    Sky,
    Night,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Pastel => "pastel",
            Theme::Mint => "mint",
            Theme::Sky => "sky",
            Theme::Night => "night",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pastel" => Some(Theme::Pastel),
            "mint" => Some(Theme::Mint),
            "sky" => Some(Theme::Sky),
            "night" => Some(Theme::Night),
            _ => None,
        }
    }
}

/// The root state owned by the store. Serialized as-is, this is the single
/// persisted record (fields: `photos`, `guestbook`, `profile`, `theme`,
/// `bgm_url`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AlbumState {
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub guestbook: Vec<GuestEntry>,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub bgm_url: String,
}

impl AlbumState {
    /// Rebuild state from a JSON value, field by field.
    ///
    /// Each field falls back to its default independently, so one corrupt
    /// field never takes down the rest of the record. Returns the state and
    /// the names of fields that had to be defaulted away from a present but
    /// malformed value.
    pub fn from_value(value: &Value) -> (Self, Vec<&'static str>) {
        let mut recovered = Vec::new();

        fn field<T: Default + serde::de::DeserializeOwned>(
            value: &Value,
            name: &'static str,
            recovered: &mut Vec<&'static str>,
        ) -> T {
            match value.get(name) {
                None | Some(Value::Null) => T::default(),
                Some(raw) => serde_json::from_value(raw.clone()).unwrap_or_else(|err| {
                    tracing::warn!("Discarding malformed field {}: {}", name, err);
                    recovered.push(name);
                    T::default()
                }),
            }
        }

        let state = AlbumState {
            photos: field(value, "photos", &mut recovered),
            guestbook: field(value, "guestbook", &mut recovered),
            profile: field(value, "profile", &mut recovered),
            theme: field(value, "theme", &mut recovered),
            bgm_url: field(value, "bgm_url", &mut recovered),
        };

        (state, recovered)
    }

    /// Validate the top-level shape of an import payload: `photos` must be an
    /// array, `guestbook` an array, `profile` an object. Anything else is
    /// rejected wholesale.
    pub fn validate_import_shape(value: &Value) -> Result<(), StoreError> {
        if !value.get("photos").is_some_and(Value::is_array) {
            return Err(StoreError::Validation(
                "Import payload must contain a photos array".to_string(),
            ));
        }
        if !value.get("guestbook").is_some_and(Value::is_array) {
            return Err(StoreError::Validation(
                "Import payload must contain a guestbook array".to_string(),
            ));
        }
        if !value.get("profile").is_some_and(Value::is_object) {
            return Err(StoreError::Validation(
                "Import payload must contain a profile object".to_string(),
            ));
        }
        Ok(())
    }
}

/// The full exportable representation of store state at a point in time.
///
/// Flat JSON object: the persisted fields plus `export_date` and `version`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub photos: Vec<Photo>,
    pub guestbook: Vec<GuestEntry>,
    pub profile: Profile,
    pub theme: Theme,
    #[serde(default)]
    pub bgm_url: String,
    pub export_date: String,
    pub version: String,
}

impl Snapshot {
    /// Capture the given state with the current timestamp.
    pub fn capture(state: &AlbumState) -> Self {
        Self {
            photos: state.photos.clone(),
            guestbook: state.guestbook.clone(),
            profile: state.profile.clone(),
            theme: state.theme,
            bgm_url: state.bgm_url.clone(),
            export_date: Utc::now().to_rfc3339(),
            version: SNAPSHOT_VERSION.to_string(),
        }
    }

    /// Conventional download filename, embedding the current calendar date.
    pub fn file_name() -> String {
        format!("album_{}.json", Utc::now().date_naive())
    }
}
