//! Profile model (singleton per store).

use serde::{Deserialize, Serialize};

/// The album owner's profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub intro: String,
    /// Profile image as a data URL, if one was set
    #[serde(default)]
    pub image: Option<String>,
}

/// Partial profile update; `None` fields keep their current value.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub intro: Option<String>,
}

impl Profile {
    /// Merge a partial update into the profile.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(intro) = update.intro {
            self.intro = intro;
        }
    }
}
