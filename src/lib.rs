//! Album Store
//!
//! State core for a personal photo album: photos taggable with a fixed
//! sticker vocabulary, a guestbook, a profile, a theme selection and a
//! background-music reference, persisted write-through to a local key-value
//! store. UI layers are external collaborators: they drive the [`AlbumStore`]
//! operations and re-render from its state via [`view::AlbumObserver`].

pub mod bgm;
pub mod config;
pub mod errors;
pub mod media;
pub mod models;
pub mod storage;
pub mod store;
pub mod view;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use config::Config;
pub use errors::StoreError;
pub use store::{AlbumStore, SortKey, UploadOutcome};

/// Initialize logging from the configured level, honoring `RUST_LOG`.
pub fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Open the album over a SQLite file per the configuration.
///
/// Fails only if the database itself cannot be opened; a corrupt or missing
/// album record still yields a usable (defaulted) store, with the non-fatal
/// load issue returned alongside it.
pub async fn open_album(config: &Config) -> Result<(AlbumStore, Option<StoreError>), StoreError> {
    let adapter = Arc::new(storage::SqliteStore::open(&config.db_path).await?);
    Ok(AlbumStore::open(adapter, config.storage_key.clone()).await)
}

#[cfg(test)]
mod tests;
