/// Runtime settings for the launcher and options page
use crate::site_data::DefaultSite;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LauncherConfig {
    /// chrome.storage key holding the site list
    pub storage_key: String,
    /// Sites written when storage holds none
    pub default_sites: Vec<DefaultSite>,
    /// Number of `open-favorite-N` commands recognized
    pub favorite_slots: usize,
    pub status_timeout_ms: u32,
    /// Used for errors and file-access notices
    pub long_status_timeout_ms: u32,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        LauncherConfig {
            storage_key: "websites".to_string(),
            default_sites: vec![
                DefaultSite {
                    url: "https://www.google.com".to_string(),
                    selected: true,
                },
                DefaultSite {
                    url: "https://www.youtube.com".to_string(),
                    selected: true,
                },
            ],
            favorite_slots: 3,
            status_timeout_ms: 4000,
            long_status_timeout_ms: 6000,
        }
    }
}

impl LauncherConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
