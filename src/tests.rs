//! Integration tests for the album store over the SQLite adapter.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tempfile::TempDir;

use crate::models::{AlbumState, Profile, ProfileUpdate, Sticker, Theme};
use crate::storage::{PersistenceAdapter, SqliteStore};
use crate::store::{AlbumStore, SortKey};
use crate::view::{AlbumObserver, Notice, NoticeLevel};

const STORAGE_KEY: &str = "album_data";
const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Observer that records renders and notices for assertions.
#[derive(Default)]
struct RecordingObserver {
    renders: Mutex<usize>,
    notices: Mutex<Vec<Notice>>,
}

impl RecordingObserver {
    fn render_count(&self) -> usize {
        *self.renders.lock().unwrap()
    }

    fn error_notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .cloned()
            .collect()
    }
}

impl AlbumObserver for RecordingObserver {
    fn state_changed(&self, _state: &AlbumState) {
        *self.renders.lock().unwrap() += 1;
    }

    fn notice(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

/// Test fixture: a store over a fresh SQLite file, with a recording observer.
struct TestFixture {
    store: AlbumStore,
    adapter: Arc<SqliteStore>,
    observer: Arc<RecordingObserver>,
    temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let adapter = Arc::new(
            SqliteStore::open(&temp_dir.path().join("album.sqlite"))
                .await
                .expect("Failed to open sqlite store"),
        );

        let (mut store, issue) = AlbumStore::open(adapter.clone(), STORAGE_KEY).await;
        assert!(issue.is_none(), "fresh store should load cleanly");

        let observer = Arc::new(RecordingObserver::default());
        store.subscribe(observer.clone());

        TestFixture {
            store,
            adapter,
            observer,
            temp_dir,
        }
    }

    /// Re-open a second store over the same database, as a process restart would.
    async fn reopen(&self) -> (AlbumStore, Option<crate::StoreError>) {
        AlbumStore::open(self.adapter.clone(), STORAGE_KEY).await
    }

    async fn write_file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        tokio::fs::write(&path, bytes).await.expect("write file");
        path
    }

    async fn write_png(&self, name: &str) -> PathBuf {
        self.write_file(name, &PNG_HEADER).await
    }
}

#[tokio::test]
async fn test_open_empty_storage_yields_defaults() {
    let fixture = TestFixture::new().await;
    assert_eq!(*fixture.store.state(), AlbumState::default());
    assert_eq!(fixture.store.state().theme, Theme::Pastel);
}

#[tokio::test]
async fn test_mutations_persist_across_reopen() {
    let mut fixture = TestFixture::new().await;

    let photo = fixture.write_png("sunset.png").await;
    fixture.store.add_photos(&[photo]).await;
    fixture
        .store
        .add_guest_entry("mina", "what a lovely album")
        .await
        .unwrap();
    fixture.store.set_theme(Theme::Night).await;
    fixture
        .store
        .set_bgm_reference("https://youtu.be/dQw4w9WgXcQ")
        .await
        .unwrap();
    fixture
        .store
        .set_profile(ProfileUpdate {
            name: Some("mina".to_string()),
            intro: Some("my memories".to_string()),
        })
        .await;

    let (reopened, issue) = fixture.reopen().await;
    assert!(issue.is_none());
    assert_eq!(reopened.state(), fixture.store.state());
    assert_eq!(reopened.state().photos.len(), 1);
    assert_eq!(reopened.state().photos[0].title, "sunset");
    assert_eq!(reopened.state().guestbook.len(), 1);
    assert_eq!(reopened.state().theme, Theme::Night);
    assert_eq!(reopened.state().profile.name, "mina");
}

#[tokio::test]
async fn test_batch_upload_skips_non_images_individually() {
    let mut fixture = TestFixture::new().await;

    let a = fixture.write_png("a.png").await;
    let junk = fixture.write_file("notes.txt", b"not an image").await;
    let b = fixture.write_png("b.png").await;

    let outcome = fixture.store.add_photos(&[a, junk, b]).await;

    assert_eq!(outcome.added.len(), 2);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].file_name, "notes.txt");
    assert_eq!(fixture.store.state().photos.len(), 2);

    // Submission order, not decode-completion order
    let titles: Vec<_> = fixture
        .store
        .state()
        .photos
        .iter()
        .map(|p| p.title.as_str())
        .collect();
    assert_eq!(titles, vec!["a", "b"]);

    // One notification for the rejected file, one render for the whole batch
    assert_eq!(fixture.observer.error_notices().len(), 1);
    assert_eq!(fixture.observer.render_count(), 1);
}

#[tokio::test]
async fn test_sticker_toggle_is_an_involution() {
    let mut fixture = TestFixture::new().await;
    let photo = fixture.write_png("cat.png").await;
    let outcome = fixture.store.add_photos(&[photo]).await;
    let id = outcome.added[0].clone();

    let original = fixture.store.photo(&id).unwrap().stickers.clone();

    fixture.store.toggle_sticker(&id, Sticker::Heart).await;
    assert!(fixture.store.photo(&id).unwrap().has_sticker(Sticker::Heart));

    fixture.store.toggle_sticker(&id, Sticker::Heart).await;
    assert_eq!(fixture.store.photo(&id).unwrap().stickers, original);

    // Unknown photo id is a no-op
    fixture.store.toggle_sticker("missing", Sticker::Star).await;
}

#[tokio::test]
async fn test_query_photos_never_mutates_state() {
    let mut fixture = TestFixture::new().await;
    let a = fixture.write_png("zebra.png").await;
    let b = fixture.write_png("antelope.png").await;
    fixture.store.add_photos(&[a, b]).await;

    let before = fixture.store.state().clone();
    let sorted = fixture.store.query_photos(None, SortKey::TitleAsc);
    let filtered = fixture.store.query_photos(Some(Sticker::Moon), SortKey::DateDesc);

    assert_eq!(*fixture.store.state(), before);
    assert_eq!(sorted.len(), 2);
    assert_eq!(sorted[0].title, "antelope");
    assert!(filtered.is_empty());
}

#[tokio::test]
async fn test_export_import_round_trip() {
    let mut fixture = TestFixture::new().await;
    let photo = fixture.write_png("memory.png").await;
    let outcome = fixture.store.add_photos(&[photo]).await;
    fixture
        .store
        .toggle_sticker(&outcome.added[0], Sticker::Moon)
        .await;
    fixture.store.add_guest_entry("yu", "hi!").await.unwrap();
    fixture.store.set_theme(Theme::Mint).await;

    let snapshot = fixture.store.export_snapshot();
    assert_eq!(snapshot.version, "1.0");
    let payload = serde_json::to_value(&snapshot).unwrap();

    let other = TestFixture::new().await;
    let mut other_store = other.store;
    other_store.import_snapshot(&payload).await.unwrap();

    assert_eq!(other_store.state(), fixture.store.state());
}

#[tokio::test]
async fn test_import_rejects_bad_shape_and_keeps_state() {
    let mut fixture = TestFixture::new().await;
    fixture.store.add_guest_entry("yu", "hello").await.unwrap();
    let before = fixture.store.state().clone();

    let bad_payloads = [
        json!({}),
        json!({ "guestbook": [], "profile": {} }),
        json!({ "photos": [], "profile": {} }),
        json!({ "photos": "nope", "guestbook": [], "profile": {} }),
        json!({ "photos": [], "guestbook": [], "profile": "me" }),
    ];

    for payload in &bad_payloads {
        let err = fixture.store.import_snapshot(payload).await.unwrap_err();
        assert_eq!(err.error_code(), crate::errors::codes::VALIDATION_ERROR);
        assert_eq!(*fixture.store.state(), before);
    }
}

#[tokio::test]
async fn test_import_minimal_payload_defaults_everything() {
    let mut fixture = TestFixture::new().await;
    fixture.store.add_guest_entry("yu", "hello").await.unwrap();
    fixture.store.set_theme(Theme::Sky).await;

    fixture
        .store
        .import_snapshot(&json!({ "photos": [], "guestbook": [], "profile": {} }))
        .await
        .unwrap();

    assert!(fixture.store.state().photos.is_empty());
    assert!(fixture.store.state().guestbook.is_empty());
    assert_eq!(fixture.store.state().profile, Profile::default());
    assert_eq!(fixture.store.state().theme, Theme::Pastel);
    assert_eq!(fixture.store.state().bgm_url, "");
}

#[tokio::test]
async fn test_bgm_reference_accepts_and_rejects() {
    let mut fixture = TestFixture::new().await;

    let id = fixture
        .store
        .set_bgm_reference("https://youtu.be/dQw4w9WgXcQ")
        .await
        .unwrap();
    assert_eq!(id.as_deref(), Some("dQw4w9WgXcQ"));
    assert_eq!(fixture.store.state().bgm_url, "https://youtu.be/dQw4w9WgXcQ");
    assert_eq!(
        fixture.store.bgm_embed_url().unwrap(),
        "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&loop=1&playlist=dQw4w9WgXcQ"
    );

    // Invalid URLs are rejected without touching the stored reference
    let err = fixture.store.set_bgm_reference("not a url").await.unwrap_err();
    assert_eq!(err.error_code(), crate::errors::codes::VALIDATION_ERROR);
    assert_eq!(fixture.store.state().bgm_url, "https://youtu.be/dQw4w9WgXcQ");

    // Empty clears
    assert_eq!(fixture.store.set_bgm_reference("  ").await.unwrap(), None);
    assert_eq!(fixture.store.state().bgm_url, "");
    assert!(fixture.store.bgm_embed_url().is_none());
}

#[tokio::test]
async fn test_guest_entry_requires_name_and_message() {
    let mut fixture = TestFixture::new().await;

    for (name, message) in [("", "hello"), ("mina", ""), ("   ", "hi"), ("mina", " \t")] {
        let err = fixture
            .store
            .add_guest_entry(name, message)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), crate::errors::codes::VALIDATION_ERROR);
        assert!(fixture.store.state().guestbook.is_empty());
    }

    let entry = fixture
        .store
        .add_guest_entry("  mina  ", "  hello  ")
        .await
        .unwrap();
    assert_eq!(entry.name, "mina");
    assert_eq!(entry.message, "hello");
}

#[tokio::test]
async fn test_delete_operations_are_noops_when_absent() {
    let mut fixture = TestFixture::new().await;
    let photo = fixture.write_png("keep.png").await;
    let outcome = fixture.store.add_photos(&[photo]).await;
    let entry = fixture.store.add_guest_entry("yu", "hi").await.unwrap();

    assert!(!fixture.store.delete_photo("missing").await);
    assert!(!fixture.store.delete_guest_entry("missing").await);
    assert_eq!(fixture.store.state().photos.len(), 1);
    assert_eq!(fixture.store.state().guestbook.len(), 1);

    assert!(fixture.store.delete_photo(&outcome.added[0]).await);
    assert!(fixture.store.delete_guest_entry(&entry.id).await);
    assert!(fixture.store.state().photos.is_empty());
    assert!(fixture.store.state().guestbook.is_empty());
}

#[tokio::test]
async fn test_corrupt_record_recovers_to_defaults() {
    let fixture = TestFixture::new().await;
    fixture
        .adapter
        .write(STORAGE_KEY, b"{{{ not json")
        .await
        .unwrap();

    let (store, issue) = fixture.reopen().await;
    assert!(issue.is_some());
    assert_eq!(*store.state(), AlbumState::default());
}

#[tokio::test]
async fn test_partially_corrupt_record_keeps_healthy_fields() {
    let fixture = TestFixture::new().await;
    let record = json!({
        "photos": 42,
        "guestbook": [
            { "id": "g1", "name": "yu", "message": "hi", "created_at": "2024-05-01T12:00:00Z" }
        ],
        "theme": "night"
    });
    fixture
        .adapter
        .write(STORAGE_KEY, record.to_string().as_bytes())
        .await
        .unwrap();

    let (store, issue) = fixture.reopen().await;
    assert!(issue.is_some());
    assert!(store.state().photos.is_empty());
    assert_eq!(store.state().guestbook.len(), 1);
    assert_eq!(store.state().theme, Theme::Night);
}

#[tokio::test]
async fn test_reset_all_clears_storage() {
    let mut fixture = TestFixture::new().await;
    let photo = fixture.write_png("gone.png").await;
    fixture.store.add_photos(&[photo]).await;
    assert!(fixture.adapter.read(STORAGE_KEY).await.unwrap().is_some());

    fixture.store.reset_all().await;

    assert_eq!(*fixture.store.state(), AlbumState::default());
    assert_eq!(fixture.adapter.read(STORAGE_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_recent_photos_returns_newest_uploads() {
    let mut fixture = TestFixture::new().await;
    let mut paths = Vec::new();
    for i in 0..7 {
        paths.push(fixture.write_png(&format!("p{}.png", i)).await);
    }
    fixture.store.add_photos(&paths).await;

    let recent = fixture.store.recent_photos(5);
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].title, "p2");
    assert_eq!(recent[4].title, "p6");

    // Limit larger than the collection returns everything
    assert_eq!(fixture.store.recent_photos(100).len(), 7);
}

#[tokio::test]
async fn test_set_profile_image_rejects_non_image() {
    let mut fixture = TestFixture::new().await;
    let junk = fixture.write_file("cv.pdf", b"%PDF-1.4").await;

    let err = fixture.store.set_profile_image(&junk).await.unwrap_err();
    assert_eq!(err.error_code(), crate::errors::codes::VALIDATION_ERROR);
    assert_eq!(fixture.store.state().profile.image, None);

    let portrait = fixture.write_png("me.png").await;
    fixture.store.set_profile_image(&portrait).await.unwrap();
    let image = fixture.store.state().profile.image.as_deref().unwrap();
    assert!(image.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn test_wire_format_field_names() {
    let mut fixture = TestFixture::new().await;
    fixture.store.add_guest_entry("yu", "hi").await.unwrap();

    let bytes = fixture.adapter.read(STORAGE_KEY).await.unwrap().unwrap();
    let record: Value = serde_json::from_slice(&bytes).unwrap();

    for field in ["photos", "guestbook", "profile", "theme", "bgm_url"] {
        assert!(record.get(field).is_some(), "missing field {}", field);
    }
    assert_eq!(record["theme"], "pastel");
    assert_eq!(record["guestbook"][0]["name"], "yu");
}
