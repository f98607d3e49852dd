/// Data structures for Quick Launch
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A bookmarked site as persisted in chrome.storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteRecord {
    pub id: String,
    pub url: String,
    pub selected: bool,
}

impl SiteRecord {
    pub fn new(url: String, selected: bool) -> SiteRecord {
        SiteRecord {
            id: new_site_id(),
            url,
            selected,
        }
    }
}

/// A record as it may appear in storage written by older versions,
/// where `id` did not exist yet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredSite {
    pub id: Option<String>,
    pub url: Option<String>,
    pub selected: Option<bool>,
}

impl StoredSite {
    /// Read one stored element. Only non-objects are rejected; a field of
    /// the wrong type reads as missing, and `selected` counts only when
    /// it is literally `true`.
    pub fn from_value(value: &Value) -> Option<StoredSite> {
        let fields = value.as_object()?;

        Some(StoredSite {
            id: fields.get("id").and_then(Value::as_str).map(str::to_string),
            url: fields.get("url").and_then(Value::as_str).map(str::to_string),
            selected: fields.get("selected").map(|selected| *selected == Value::Bool(true)),
        })
    }

    /// Convert into a full record, generating an id when missing.
    /// The flag is true when an id had to be generated.
    pub fn into_record(self) -> (SiteRecord, bool) {
        let url = self.url.unwrap_or_default();
        let selected = self.selected.unwrap_or(false);

        match self.id.filter(|id| !id.is_empty()) {
            Some(id) => (SiteRecord { id, url, selected }, false),
            None => (SiteRecord::new(url, selected), true),
        }
    }
}

/// A seed entry used when storage holds no sites
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DefaultSite {
    pub url: String,
    #[serde(default = "default_selected")]
    pub selected: bool,
}

fn default_selected() -> bool {
    true
}

pub fn new_site_id() -> String {
    Uuid::new_v4().to_string()
}
