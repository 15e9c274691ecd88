//! Data models for the album store.
//!
//! Field names match the persisted JSON record of the original album format
//! exactly, so existing exports remain importable.

mod guest;
mod photo;
mod profile;
mod state;

pub use guest::*;
pub use photo::*;
pub use profile::*;
pub use state::*;
