/// Persistence of the site list through an injected key-value backend
use crate::site_data::{DefaultSite, StoredSite};
use crate::site_list::{BulkAddResult, SiteList, UpdateResult};
use log::{error, info, warn};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PersistenceError {
    #[error("failed to read sites: {0}")]
    Read(String),
    #[error("failed to write sites: {0}")]
    Write(String),
    #[error("failed to convert sites: {0}")]
    Codec(String),
}

/// Backend holding the durable copy of the list under one key.
///
/// Reads return the raw stored value so that lists written by older
/// versions (or garbage) can be inspected before trusting them. Writes
/// always replace the whole list.
#[allow(async_fn_in_trait)]
pub trait SiteRepository {
    async fn read_sites(&self) -> Result<Option<Value>, PersistenceError>;

    async fn write_sites(&self, sites: &SiteList) -> Result<(), PersistenceError>;
}

impl<R: SiteRepository> SiteRepository for &R {
    async fn read_sites(&self) -> Result<Option<Value>, PersistenceError> {
        (**self).read_sites().await
    }

    async fn write_sites(&self, sites: &SiteList) -> Result<(), PersistenceError> {
        (**self).write_sites(sites).await
    }
}

/// What `load` found in storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Stored list used as-is
    Loaded,
    /// Storage was empty; defaults were written
    Seeded,
    /// Ids were assigned (or non-object entries dropped) and the list rewritten
    Migrated,
}

/// Owns the in-memory list and keeps the durable copy in step with it.
///
/// Every mutation ends in a full write. A failed write leaves the
/// in-memory list as mutated, so the next successful write carries it.
pub struct SiteStore<R> {
    repository: R,
    defaults: Vec<DefaultSite>,
    list: SiteList,
}

impl<R: SiteRepository> SiteStore<R> {
    pub fn new(repository: R, defaults: Vec<DefaultSite>) -> Self {
        SiteStore {
            repository,
            defaults,
            list: SiteList::new(),
        }
    }

    pub fn sites(&self) -> &SiteList {
        &self.list
    }

    /// Read the list, seeding defaults or migrating ids as needed.
    /// On a read failure the in-memory list is left empty.
    pub async fn load(&mut self) -> Result<LoadOutcome, PersistenceError> {
        let stored = self.read().await?;

        match decode_stored(stored) {
            None if self.defaults.is_empty() => {
                self.list = SiteList::new();
                Ok(LoadOutcome::Loaded)
            }
            None => {
                self.list = SiteList::from_defaults(&self.defaults);
                info!("Quick Launch: Initialized with default websites.");
                self.save().await?;
                Ok(LoadOutcome::Seeded)
            }
            Some((list, true)) => {
                self.list = list;
                info!("Quick Launch: Website IDs updated for compatibility.");
                self.save().await?;
                Ok(LoadOutcome::Migrated)
            }
            Some((list, false)) => {
                self.list = list;
                Ok(LoadOutcome::Loaded)
            }
        }
    }

    /// Read the list as stored, without seeding or writing anything back.
    /// Empty or unusable storage gives an empty list; ids missing from
    /// legacy records are filled in memory only.
    pub async fn load_stored(&mut self) -> Result<(), PersistenceError> {
        let stored = self.read().await?;
        self.list = decode_stored(stored).map(|(list, _)| list).unwrap_or_default();
        Ok(())
    }

    async fn read(&mut self) -> Result<Option<Value>, PersistenceError> {
        match self.repository.read_sites().await {
            Ok(stored) => Ok(stored),
            Err(e) => {
                error!("Error loading websites: {}", e);
                self.list = SiteList::new();
                Err(e)
            }
        }
    }

    /// Write the whole in-memory list
    pub async fn save(&self) -> Result<(), PersistenceError> {
        self.repository.write_sites(&self.list).await.map_err(|e| {
            error!("Error saving websites: {}", e);
            e
        })
    }

    pub async fn add_batch<S: AsRef<str>>(&mut self, entries: &[S]) -> Result<BulkAddResult, PersistenceError> {
        let result = self.list.add_batch(entries);
        if result.added_count() > 0 {
            self.save().await?;
        }
        Ok(result)
    }

    pub async fn update_url(&mut self, site_id: &str, raw_value: &str) -> Result<UpdateResult, PersistenceError> {
        let result = self.list.update_url(site_id, raw_value);
        if result.is_mutation() {
            self.save().await?;
        }
        Ok(result)
    }

    /// Returns the new selection state, or `None` when the id is unknown
    pub async fn toggle_selected(&mut self, site_id: &str) -> Result<Option<bool>, PersistenceError> {
        let selected = self.list.toggle_selected(site_id);
        if selected.is_some() {
            self.save().await?;
        }
        Ok(selected)
    }

    pub async fn remove(&mut self, site_id: &str) -> Result<bool, PersistenceError> {
        let removed = self.list.remove(site_id);
        if removed {
            self.save().await?;
        }
        Ok(removed)
    }

    pub async fn reorder(&mut self, moved_id: &str, target_id: &str) -> Result<bool, PersistenceError> {
        let moved = self.list.reorder(moved_id, target_id);
        if moved {
            self.save().await?;
        } else {
            warn!("Reorder ignored: could not find {} or {} in the list", moved_id, target_id);
        }
        Ok(moved)
    }
}

/// Interpret a stored value. `None` means there is nothing usable and the
/// defaults apply; otherwise the flag says whether the list must be rewritten.
fn decode_stored(stored: Option<Value>) -> Option<(SiteList, bool)> {
    let Some(Value::Array(items)) = stored else {
        return None;
    };

    let mut needs_rewrite = false;
    let mut sites = Vec::with_capacity(items.len());

    for item in items {
        match StoredSite::from_value(&item) {
            Some(stored_site) => {
                let (site, generated_id) = stored_site.into_record();
                needs_rewrite |= generated_id;
                sites.push(site);
            }
            None => {
                warn!("Dropping malformed stored website: {}", item);
                needs_rewrite = true;
            }
        }
    }

    if sites.is_empty() {
        None
    } else {
        Some((SiteList::from_sites(sites), needs_rewrite))
    }
}
