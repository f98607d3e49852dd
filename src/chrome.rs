/// Bridges to chrome.storage and chrome.tabs through `extension.js`

use crate::dispatcher::Launcher;
use crate::site_list::SiteList;
use crate::store::{PersistenceError, SiteRepository};
use log::error;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

// Import JS bridge functions
#[wasm_bindgen(module = "/extension.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn openOptionsPage() -> Result<(), JsValue>;
}

/// Site list kept in chrome.storage.sync under a single key
pub struct ChromeStorage {
    key: String,
}

impl ChromeStorage {
    pub fn new(key: &str) -> Self {
        ChromeStorage { key: key.to_string() }
    }
}

impl SiteRepository for ChromeStorage {
    async fn read_sites(&self) -> Result<Option<Value>, PersistenceError> {
        let stored = getStorage(&self.key)
            .await
            .map_err(|e| PersistenceError::Read(format!("{:?}", e)))?;

        if stored.is_null() || stored.is_undefined() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(stored)
            .map(Some)
            .map_err(|e| PersistenceError::Codec(format!("{:?}", e)))
    }

    async fn write_sites(&self, sites: &SiteList) -> Result<(), PersistenceError> {
        let value = serde_wasm_bindgen::to_value(sites).map_err(|e| PersistenceError::Codec(format!("{:?}", e)))?;

        setStorage(&self.key, value)
            .await
            .map_err(|e| PersistenceError::Write(format!("{:?}", e)))
    }
}

/// Opens tabs and the options page; both are fire-and-forget
pub struct ChromeTabs;

impl Launcher for ChromeTabs {
    fn open_url(&self, url: &str) {
        let url = url.to_string();
        spawn_local(async move {
            if let Err(e) = createTab(&url).await {
                error!("Failed to open {}: {:?}", url, e);
            }
        });
    }

    fn show_configuration_ui(&self) {
        spawn_local(async move {
            if let Err(e) = openOptionsPage().await {
                error!("Failed to open options page: {:?}", e);
            }
        });
    }
}
