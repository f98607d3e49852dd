/// The ordered site list and its in-memory mutations
use crate::site_data::{DefaultSite, SiteRecord};
use crate::url_policy::{format_url, is_valid_url};
use serde::{Deserialize, Serialize};

/// Ordered list of sites; position matters for favorite slots
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct SiteList {
    pub sites: Vec<SiteRecord>,
}

/// Outcome of a bulk add
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BulkAddResult {
    /// Newly created records, in input order
    pub added: Vec<SiteRecord>,
    pub duplicates: usize,
    pub invalid: usize,
}

impl BulkAddResult {
    pub fn added_count(&self) -> usize {
        self.added.len()
    }
}

/// Outcome of editing a single site's URL
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateResult {
    /// The URL was replaced by this formatted value
    Updated(String),
    /// The input was blank and the URL was emptied
    Cleared,
    /// Nothing to change
    Unchanged,
    /// Not a valid URL or not an allowed scheme
    Rejected,
    /// Another site already uses this formatted URL
    DuplicateRejected(String),
    NotFound,
}

impl UpdateResult {
    /// Whether the list was mutated and needs persisting
    pub fn is_mutation(&self) -> bool {
        matches!(self, UpdateResult::Updated(_) | UpdateResult::Cleared)
    }
}

impl SiteList {
    pub fn new() -> Self {
        SiteList { sites: Vec::new() }
    }

    pub fn from_sites(sites: Vec<SiteRecord>) -> Self {
        SiteList { sites }
    }

    /// Build the seed list, each entry with a fresh id
    pub fn from_defaults(defaults: &[DefaultSite]) -> Self {
        SiteList {
            sites: defaults
                .iter()
                .map(|site| SiteRecord::new(site.url.clone(), site.selected))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn get(&self, site_id: &str) -> Option<&SiteRecord> {
        self.sites.iter().find(|s| s.id == site_id)
    }

    fn index_of(&self, site_id: &str) -> Option<usize> {
        self.sites.iter().position(|s| s.id == site_id)
    }

    /// Whether a site other than `except_id` already uses `url`
    pub fn has_url(&self, url: &str, except_id: Option<&str>) -> bool {
        self.sites
            .iter()
            .any(|s| s.url == url && Some(s.id.as_str()) != except_id)
    }

    /// Classify each entry as added, duplicate or invalid, in input order.
    /// Accepted entries are selected and placed ahead of the existing sites.
    pub fn add_batch<S: AsRef<str>>(&mut self, entries: &[S]) -> BulkAddResult {
        let mut result = BulkAddResult::default();

        for entry in entries {
            let url = match format_url(entry.as_ref()) {
                Some(url) if is_valid_url(&url) => url,
                _ => {
                    result.invalid += 1;
                    continue;
                }
            };

            if self.has_url(&url, None) || result.added.iter().any(|s| s.url == url) {
                result.duplicates += 1;
                continue;
            }

            result.added.push(SiteRecord::new(url, true));
        }

        if !result.added.is_empty() {
            let existing = std::mem::take(&mut self.sites);
            self.sites = result.added.iter().cloned().chain(existing).collect();
        }

        result
    }

    pub fn update_url(&mut self, site_id: &str, raw_value: &str) -> UpdateResult {
        let Some(index) = self.index_of(site_id) else {
            return UpdateResult::NotFound;
        };

        if raw_value.trim().is_empty() {
            if self.sites[index].url.is_empty() {
                return UpdateResult::Unchanged;
            }
            self.sites[index].url.clear();
            return UpdateResult::Cleared;
        }

        let url = match format_url(raw_value) {
            Some(url) if is_valid_url(&url) => url,
            _ => return UpdateResult::Rejected,
        };

        if self.has_url(&url, Some(site_id)) {
            return UpdateResult::DuplicateRejected(url);
        }

        if self.sites[index].url == url {
            return UpdateResult::Unchanged;
        }

        self.sites[index].url = url.clone();
        UpdateResult::Updated(url)
    }

    /// Flip the selection flag, returning the new value
    pub fn toggle_selected(&mut self, site_id: &str) -> Option<bool> {
        self.sites
            .iter_mut()
            .find(|s| s.id == site_id)
            .map(|site| {
                site.selected = !site.selected;
                site.selected
            })
    }

    pub fn remove(&mut self, site_id: &str) -> bool {
        let original_len = self.sites.len();
        self.sites.retain(|s| s.id != site_id);
        self.sites.len() < original_len
    }

    /// Move `moved_id` into the slot currently held by `target_id`
    pub fn reorder(&mut self, moved_id: &str, target_id: &str) -> bool {
        if moved_id == target_id {
            return false;
        }

        match (self.index_of(moved_id), self.index_of(target_id)) {
            (Some(from), Some(to)) => {
                let moved = self.sites.remove(from);
                self.sites.insert(to, moved);
                true
            }
            _ => false,
        }
    }
}
