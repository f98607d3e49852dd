/// Options page orchestration: user intents in, status messages and rows out
use crate::config::LauncherConfig;
use crate::dispatcher::Launcher;
use crate::site_list::{BulkAddResult, UpdateResult};
use crate::store::{LoadOutcome, PersistenceError, SiteRepository, SiteStore};
use crate::url_policy::{is_file_url, is_valid_url};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

pub const EMPTY_LIST_HINT: &str = "No websites added yet. Use \"Bulk Add\" to add websites.";

const FILE_ACCESS_NOTICE: &str =
    " For file:/// URLs to open, ensure \"Allow access to file URLs\" is enabled for this extension.";

const INVALID_URL_MESSAGE: &str = "Invalid URL. Please enter a valid URL (e.g., example.com, http://example.com, file:///path). It must use http, https, chrome-extension, or file protocols.";

static BULK_SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\s]+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Info,
    Error,
}

/// Transient message shown after each user action
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub timeout_ms: u32,
}

/// One rendered row of the site list
#[derive(Debug, Clone, PartialEq)]
pub struct SiteRow {
    pub id: String,
    pub url: String,
    pub selected: bool,
    pub can_open: bool,
    pub open_title: String,
}

/// Split bulk-add text on commas and whitespace
pub fn split_bulk_input(text: &str) -> Vec<&str> {
    BULK_SEPARATOR_RE
        .split(text.trim())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// One open options page. Owns its own store; intents must be applied
/// one at a time.
pub struct ManagementSession<R> {
    store: SiteStore<R>,
    status_timeout_ms: u32,
    long_status_timeout_ms: u32,
}

impl<R: SiteRepository> ManagementSession<R> {
    pub fn new(repository: R, config: &LauncherConfig) -> Self {
        ManagementSession {
            store: SiteStore::new(repository, config.default_sites.clone()),
            status_timeout_ms: config.status_timeout_ms,
            long_status_timeout_ms: config.long_status_timeout_ms,
        }
    }

    pub fn rows(&self) -> Vec<SiteRow> {
        self.store
            .sites()
            .sites
            .iter()
            .map(|site| {
                let can_open = is_valid_url(&site.url);
                SiteRow {
                    id: site.id.clone(),
                    url: site.url.clone(),
                    selected: site.selected,
                    can_open,
                    open_title: if can_open {
                        format!("Open {} in new tab", site.url)
                    } else {
                        "Enter a valid URL to enable opening.".to_string()
                    },
                }
            })
            .collect()
    }

    /// Load the list; a plain load produces no message
    pub async fn open(&mut self) -> Option<StatusMessage> {
        match self.store.load().await {
            Ok(LoadOutcome::Loaded) => None,
            Ok(LoadOutcome::Seeded) => Some(self.status(StatusKind::Info, "Initialized with default websites.")),
            Ok(LoadOutcome::Migrated) => {
                Some(self.status(StatusKind::Info, "Website IDs updated for compatibility."))
            }
            Err(e @ PersistenceError::Read(_)) => {
                Some(self.status(StatusKind::Error, format!("Error loading websites: {}", e)))
            }
            Err(e) => Some(self.save_failed(e)),
        }
    }

    pub async fn bulk_add(&mut self, text: &str) -> StatusMessage {
        if text.trim().is_empty() {
            return self.status(StatusKind::Info, "Bulk add input is empty.");
        }

        let entries = split_bulk_input(text);
        match self.store.add_batch(&entries).await {
            Ok(result) => self.bulk_status(&result),
            Err(e) => self.save_failed(e),
        }
    }

    pub async fn edit_url(&mut self, site_id: &str, text: &str) -> StatusMessage {
        let result = match self.store.update_url(site_id, text).await {
            Ok(result) => result,
            Err(e) => return self.save_failed(e),
        };

        match result {
            UpdateResult::Updated(_) => self.status(StatusKind::Success, "URL updated successfully."),
            UpdateResult::Cleared => {
                self.status(StatusKind::Info, "URL cleared. Press Remove or enter a valid URL.")
            }
            UpdateResult::Unchanged => self.status(StatusKind::Info, "URL is unchanged."),
            UpdateResult::Rejected => self.status(StatusKind::Error, INVALID_URL_MESSAGE),
            UpdateResult::DuplicateRejected(url) => self.status(
                StatusKind::Error,
                format!("URL \"{}\" already exists in your list. Please use a unique URL.", url),
            ),
            UpdateResult::NotFound => self.status(StatusKind::Error, "Could not find website to update."),
        }
    }

    pub async fn toggle(&mut self, site_id: &str) -> StatusMessage {
        match self.store.toggle_selected(site_id).await {
            Ok(Some(_)) => self.status(StatusKind::Success, "Selection updated."),
            Ok(None) => self.status(StatusKind::Error, "Could not find website to update."),
            Err(e) => self.save_failed(e),
        }
    }

    pub async fn remove(&mut self, site_id: &str) -> StatusMessage {
        match self.store.remove(site_id).await {
            Ok(true) => self.status(StatusKind::Success, "Website removed."),
            Ok(false) => self.status(StatusKind::Error, "Could not find website to remove."),
            Err(e) => self.save_failed(e),
        }
    }

    /// Stale ids are ignored without a message
    pub async fn reorder(&mut self, moved_id: &str, target_id: &str) -> Option<StatusMessage> {
        match self.store.reorder(moved_id, target_id).await {
            Ok(true) => Some(self.status(StatusKind::Success, "Websites reordered.")),
            Ok(false) => None,
            Err(e) => Some(self.save_failed(e)),
        }
    }

    /// Open one row's URL in a new tab; only strictly valid URLs qualify
    pub fn open_site<L: Launcher>(&self, site_id: &str, launcher: &L) -> Option<StatusMessage> {
        match self.store.sites().get(site_id) {
            Some(site) if is_valid_url(&site.url) => {
                if is_file_url(&site.url) {
                    info!(
                        "Attempting to open file URL. Ensure 'Allow access to file URLs' is enabled for this extension."
                    );
                }
                launcher.open_url(&site.url);
                None
            }
            _ => Some(self.status(StatusKind::Error, "Cannot open: URL is invalid or empty.")),
        }
    }

    fn bulk_status(&self, result: &BulkAddResult) -> StatusMessage {
        if result.added_count() > 0 {
            let mut text = format!("{} website(s) added.", result.added_count());
            if result.duplicates > 0 {
                text.push_str(&format!(" {} duplicate(s) skipped.", result.duplicates));
            }
            if result.invalid > 0 {
                text.push_str(&format!(" {} invalid entry(ies) skipped.", result.invalid));
            }
            if result.added.iter().any(|site| is_file_url(&site.url)) {
                text.push_str(FILE_ACCESS_NOTICE);
            }
            self.status(StatusKind::Success, text)
        } else {
            let mut text = "No new websites were added.".to_string();
            if result.duplicates > 0 {
                text.push_str(&format!(" {} duplicate(s) found.", result.duplicates));
            }
            if result.invalid > 0 {
                text.push_str(&format!(" {} invalid entry(ies) found.", result.invalid));
            }
            self.status(StatusKind::Info, text)
        }
    }

    fn save_failed(&self, error: PersistenceError) -> StatusMessage {
        self.status(StatusKind::Error, format!("Error saving websites: {}", error))
    }

    fn status(&self, kind: StatusKind, text: impl Into<String>) -> StatusMessage {
        let text = text.into();
        let timeout_ms = if kind == StatusKind::Error || text.contains("file:///") {
            self.long_status_timeout_ms
        } else {
            self.status_timeout_ms
        };
        StatusMessage { kind, text, timeout_ms }
    }
}
