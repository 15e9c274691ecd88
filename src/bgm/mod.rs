//! Background-music link handling.
//!
//! Recognizes the common YouTube link shapes carrying an 11-character video
//! token and renders the looping embed URL the player iframe uses.

use std::sync::LazyLock;

use regex::Regex;

// Matches youtu.be/<id>, /embed/<id>, /v/<id>, /e/<id> and watch?v=<id> forms.
static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("video id regex is valid")
});

/// Extract the 11-character video identifier from a URL, if it carries one.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_RE
        .captures(url)
        .map(|caps| caps[1].to_string())
}

/// Embeddable player URL: autoplaying, looping over a single-video playlist.
pub fn embed_url(video_id: &str) -> String {
    format!(
        "https://www.youtube.com/embed/{id}?autoplay=1&loop=1&playlist={id}",
        id = video_id
    )
}
