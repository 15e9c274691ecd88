//! The album store: all application state plus its write-through
//! synchronization to persistent storage.
//!
//! An explicitly constructed instance owns the state; UI collaborators call
//! the operations here and re-render through the observer seam. Every
//! mutation persists the full record immediately (write-through, no
//! batching) and fires `state_changed` exactly once.

mod query;

pub use query::SortKey;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;

use crate::bgm;
use crate::errors::StoreError;
use crate::media;
use crate::models::{AlbumState, GuestEntry, Photo, ProfileUpdate, Snapshot, Sticker, Theme};
use crate::storage::PersistenceAdapter;
use crate::view::{AlbumObserver, Notice};

/// Result of a batch photo upload.
#[derive(Debug, Default)]
pub struct UploadOutcome {
    /// Ids of the photos appended, in submission order
    pub added: Vec<String>,
    /// Files rejected individually; the rest of the batch proceeded
    pub skipped: Vec<SkippedUpload>,
}

/// A single rejected file from a batch upload.
#[derive(Debug)]
pub struct SkippedUpload {
    pub file_name: String,
    pub reason: StoreError,
}

/// In-memory state container for the whole album, persisted write-through.
pub struct AlbumStore {
    state: AlbumState,
    adapter: Arc<dyn PersistenceAdapter>,
    storage_key: String,
    observers: Vec<Arc<dyn AlbumObserver>>,
}

impl AlbumStore {
    /// Load the store from persistent storage.
    ///
    /// Missing records yield an empty album. Unreadable storage or malformed
    /// fields fall back to defaults (per field) and the non-fatal error is
    /// returned alongside the usable store.
    pub async fn open(
        adapter: Arc<dyn PersistenceAdapter>,
        storage_key: impl Into<String>,
    ) -> (Self, Option<StoreError>) {
        let storage_key = storage_key.into();
        let mut issue = None;

        let state = match adapter.read(&storage_key).await {
            Ok(None) => AlbumState::default(),
            Ok(Some(bytes)) => match serde_json::from_slice::<Value>(&bytes) {
                Ok(value) => {
                    let (state, recovered) = AlbumState::from_value(&value);
                    if !recovered.is_empty() {
                        issue = Some(StoreError::StorageRead(format!(
                            "Recovered malformed fields: {}",
                            recovered.join(", ")
                        )));
                    }
                    state
                }
                Err(err) => {
                    tracing::warn!("Persisted album record is not valid JSON: {}", err);
                    issue = Some(StoreError::StorageRead(format!(
                        "Persisted album record is not valid JSON: {}",
                        err
                    )));
                    AlbumState::default()
                }
            },
            Err(err) => {
                tracing::warn!("Failed to read album record: {}", err);
                issue = Some(err);
                AlbumState::default()
            }
        };

        let store = Self {
            state,
            adapter,
            storage_key,
            observers: Vec::new(),
        };
        (store, issue)
    }

    /// Register an observer to be notified after visible state changes.
    pub fn subscribe(&mut self, observer: Arc<dyn AlbumObserver>) {
        self.observers.push(observer);
    }

    /// Current state, for rendering and inspection.
    pub fn state(&self) -> &AlbumState {
        &self.state
    }

    /// Serialize the full state and write it through the adapter.
    ///
    /// Write failures (quota, disk) are logged and surfaced as an error
    /// notice; they never unwind into the caller's control flow.
    pub async fn save(&self) {
        let bytes = match serde_json::to_vec(&self.state) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::error!("Failed to serialize album record: {}", err);
                self.emit_notice(Notice::error("Failed to save album data"));
                return;
            }
        };

        if let Err(err) = self.adapter.write(&self.storage_key, &bytes).await {
            tracing::error!("Failed to persist album record: {}", err);
            self.emit_notice(Notice::error("Failed to save album data"));
        }
    }

    // ==================== PHOTOS ====================

    /// Upload a batch of files.
    ///
    /// All decodes run concurrently and are awaited together; accepted photos
    /// are appended in submission order, so decode completion order never
    /// shows in the album. Non-image files are skipped individually with an
    /// error notice. The batch triggers exactly one persistence write and one
    /// `state_changed` after every decode has finished.
    pub async fn add_photos(&mut self, paths: &[PathBuf]) -> UploadOutcome {
        let mut outcome = UploadOutcome::default();
        if paths.is_empty() {
            return outcome;
        }

        let decodes = join_all(paths.iter().map(|path| media::decode_image_file(path))).await;

        for (path, decoded) in paths.iter().zip(decodes) {
            match decoded {
                Ok(image) => {
                    let photo = Photo::from_upload(file_stem(path), image.data_url);
                    outcome.added.push(photo.id.clone());
                    self.state.photos.push(photo);
                }
                Err(reason) => {
                    let file_name = file_display_name(path);
                    self.emit_notice(Notice::error(format!(
                        "{} is not a supported file",
                        file_name
                    )));
                    outcome.skipped.push(SkippedUpload { file_name, reason });
                }
            }
        }

        if !outcome.added.is_empty() {
            self.save().await;
            self.emit_state();
            self.emit_notice(Notice::info(format!(
                "{} photo(s) uploaded",
                outcome.added.len()
            )));
        }

        outcome
    }

    /// Remove a photo by id. Absent ids are a no-op.
    pub async fn delete_photo(&mut self, id: &str) -> bool {
        let before = self.state.photos.len();
        self.state.photos.retain(|p| p.id != id);
        if self.state.photos.len() == before {
            return false;
        }

        self.save().await;
        self.emit_state();
        self.emit_notice(Notice::info("Photo deleted"));
        true
    }

    /// Add the sticker if the photo doesn't carry it, remove it if it does.
    /// Absent photos are a no-op.
    pub async fn toggle_sticker(&mut self, photo_id: &str, sticker: Sticker) {
        let Some(photo) = self.state.photos.iter_mut().find(|p| p.id == photo_id) else {
            return;
        };

        match photo.stickers.iter().position(|&s| s == sticker) {
            Some(index) => {
                photo.stickers.remove(index);
            }
            None => photo.stickers.push(sticker),
        }

        self.save().await;
        self.emit_state();
    }

    /// Look up a photo by id.
    pub fn photo(&self, id: &str) -> Option<&Photo> {
        self.state.photos.iter().find(|p| p.id == id)
    }

    /// The most recently uploaded photos, newest last.
    pub fn recent_photos(&self, limit: usize) -> &[Photo] {
        let start = self.state.photos.len().saturating_sub(limit);
        &self.state.photos[start..]
    }

    /// Pure view over the photo collection: filter by sticker (None keeps
    /// all), then order by the sort key. Never mutates store state.
    pub fn query_photos(&self, filter: Option<Sticker>, sort: SortKey) -> Vec<Photo> {
        query::run(&self.state.photos, filter, sort)
    }

    // ==================== PROFILE ====================

    /// Merge a partial update into the profile and persist.
    pub async fn set_profile(&mut self, update: ProfileUpdate) {
        self.state.profile.apply(update);
        self.save().await;
    }

    /// Replace the profile image with a decoded upload.
    pub async fn set_profile_image(&mut self, path: &Path) -> Result<(), StoreError> {
        let image = media::decode_image_file(path).await?;
        self.state.profile.image = Some(image.data_url);

        self.save().await;
        self.emit_state();
        self.emit_notice(Notice::info("Profile image updated"));
        Ok(())
    }

    // ==================== GUESTBOOK ====================

    /// Append a guestbook entry. Both name and message must be non-empty
    /// after trimming; otherwise the operation is rejected with no mutation.
    pub async fn add_guest_entry(
        &mut self,
        name: &str,
        message: &str,
    ) -> Result<GuestEntry, StoreError> {
        let name = name.trim();
        let message = message.trim();
        if name.is_empty() || message.is_empty() {
            return Err(StoreError::Validation(
                "Both a name and a message are required".to_string(),
            ));
        }

        let entry = GuestEntry::new(name, message);
        self.state.guestbook.push(entry.clone());

        self.save().await;
        self.emit_state();
        self.emit_notice(Notice::info("Guestbook entry added"));
        Ok(entry)
    }

    /// Remove a guestbook entry by id. Absent ids are a no-op.
    pub async fn delete_guest_entry(&mut self, id: &str) -> bool {
        let before = self.state.guestbook.len();
        self.state.guestbook.retain(|e| e.id != id);
        if self.state.guestbook.len() == before {
            return false;
        }

        self.save().await;
        self.emit_state();
        self.emit_notice(Notice::info("Guestbook entry deleted"));
        true
    }

    // ==================== THEME & BGM ====================

    /// Record the theme selection and persist.
    pub async fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;

        self.save().await;
        self.emit_state();
        self.emit_notice(Notice::info(format!("{} theme applied", theme.as_str())));
    }

    /// Set or clear the background-music reference.
    ///
    /// An empty (or whitespace-only) string clears it. A non-empty string
    /// must carry an extractable video identifier; otherwise the operation
    /// is rejected and the stored reference stays unchanged. Returns the
    /// extracted id, or `None` when cleared.
    pub async fn set_bgm_reference(&mut self, raw_url: &str) -> Result<Option<String>, StoreError> {
        let raw_url = raw_url.trim();

        if raw_url.is_empty() {
            self.state.bgm_url.clear();
            self.save().await;
            self.emit_state();
            self.emit_notice(Notice::info("Background music removed"));
            return Ok(None);
        }

        let Some(video_id) = bgm::extract_video_id(raw_url) else {
            return Err(StoreError::Validation(
                "Not a valid video URL".to_string(),
            ));
        };

        self.state.bgm_url = raw_url.to_string();
        self.save().await;
        self.emit_state();
        self.emit_notice(Notice::info("Background music applied"));
        Ok(Some(video_id))
    }

    /// Embeddable player URL for the current BGM reference, if one is set.
    pub fn bgm_embed_url(&self) -> Option<String> {
        bgm::extract_video_id(&self.state.bgm_url).map(|id| bgm::embed_url(&id))
    }

    // ==================== SNAPSHOTS ====================

    /// Capture the full state for export.
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Wholesale-replace state from an import payload.
    ///
    /// The payload must carry a photos array, a guestbook array and a
    /// profile object, or it is rejected entirely with prior state left
    /// untouched. Below that gate, fields are extracted with the same
    /// per-field defaults as `open`; extra fields are ignored.
    pub async fn import_snapshot(&mut self, payload: &Value) -> Result<(), StoreError> {
        AlbumState::validate_import_shape(payload)?;

        let (state, _recovered) = AlbumState::from_value(payload);
        self.state = state;

        self.save().await;
        self.emit_state();
        self.emit_notice(Notice::info("Album data imported"));
        Ok(())
    }

    /// Replace state with defaults and clear persisted storage.
    pub async fn reset_all(&mut self) {
        self.state = AlbumState::default();

        if let Err(err) = self.adapter.clear(&self.storage_key).await {
            tracing::error!("Failed to clear album record: {}", err);
            self.emit_notice(Notice::error("Failed to clear stored album data"));
        }

        self.emit_state();
        self.emit_notice(Notice::info("Album reset"));
    }

    // ==================== OBSERVER NOTIFICATION ====================

    fn emit_state(&self) {
        for observer in &self.observers {
            observer.state_changed(&self.state);
        }
    }

    fn emit_notice(&self, notice: Notice) {
        for observer in &self.observers {
            observer.notice(&notice);
        }
    }
}

/// Photo title default: the file name without its extension.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_display_name(path))
}

fn file_display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
