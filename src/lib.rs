/// Quick Launch - Chrome Extension for opening favorite sites in one action
/// Built with Rust + WASM + Yew

mod chrome;
pub mod config;
pub mod dispatcher;
pub mod session;
pub mod site_data;
pub mod site_list;
pub mod store;
pub mod ui;
pub mod url_policy;

#[cfg(test)]
mod test_support;

use chrome::{ChromeStorage, ChromeTabs};
use config::LauncherConfig;
use dispatcher::{Command, LaunchDispatcher};
use log::warn;
use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export URL formatting for JavaScript access
#[wasm_bindgen]
pub fn format_url(raw: &str) -> Option<String> {
    url_policy::format_url(raw)
}

// Background: keyboard shortcuts and named commands
#[wasm_bindgen]
pub async fn handle_command(command: String, config: JsValue) {
    let config = config_from_js(config);
    let mut dispatcher = LaunchDispatcher::new(ChromeStorage::new(&config.storage_key), ChromeTabs, &config);
    dispatcher.handle_command(&command).await;
}

// Background: toolbar button click
#[wasm_bindgen]
pub async fn open_selected(config: JsValue) {
    let config = config_from_js(config);
    let mut dispatcher = LaunchDispatcher::new(ChromeStorage::new(&config.storage_key), ChromeTabs, &config);
    dispatcher.dispatch(Command::OpenSelected).await;
}

// Start the Yew app for the options page
#[wasm_bindgen]
pub fn start_options(config: JsValue) {
    let config = config_from_js(config);
    yew::Renderer::<ui::options::OptionsPage>::with_props(ui::options::OptionsProps { config }).render();
}

fn config_from_js(value: JsValue) -> LauncherConfig {
    if value.is_null() || value.is_undefined() {
        return LauncherConfig::default();
    }

    serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
        warn!("Ignoring malformed launcher config: {:?}", e);
        LauncherConfig::default()
    })
}
