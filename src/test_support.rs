//! Hand-rolled test doubles for the storage and launcher seams.

use std::cell::{Cell, RefCell};

use serde_json::Value;

use crate::dispatcher::Launcher;
use crate::site_list::SiteList;
use crate::store::{PersistenceError, SiteRepository};

/// In-memory stand-in for chrome.storage, with call counting and
/// switchable failures.
#[derive(Default)]
pub struct MemoryRepository {
    value: RefCell<Option<Value>>,
    writes: Cell<usize>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl MemoryRepository {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_value(value: Value) -> Self {
        let repo = Self::default();
        repo.value.replace(Some(value));
        repo
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// The last written list, if storage holds a well-formed one
    pub fn stored_list(&self) -> Option<SiteList> {
        self.value
            .borrow()
            .clone()
            .and_then(|value| serde_json::from_value(value).ok())
    }
}

impl SiteRepository for MemoryRepository {
    async fn read_sites(&self) -> Result<Option<Value>, PersistenceError> {
        if self.fail_reads.get() {
            return Err(PersistenceError::Read("storage unavailable".to_string()));
        }
        Ok(self.value.borrow().clone())
    }

    async fn write_sites(&self, sites: &SiteList) -> Result<(), PersistenceError> {
        if self.fail_writes.get() {
            return Err(PersistenceError::Write("quota exceeded".to_string()));
        }
        let value = serde_json::to_value(sites).map_err(|e| PersistenceError::Codec(e.to_string()))?;
        self.value.replace(Some(value));
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Records every side effect requested by the code under test.
#[derive(Default)]
pub struct RecordingLauncher {
    opened: RefCell<Vec<String>>,
    configuration_shown: Cell<usize>,
}

impl RecordingLauncher {
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }

    pub fn configuration_shown(&self) -> usize {
        self.configuration_shown.get()
    }
}

impl Launcher for RecordingLauncher {
    fn open_url(&self, url: &str) {
        self.opened.borrow_mut().push(url.to_string());
    }

    fn show_configuration_ui(&self) {
        self.configuration_shown.set(self.configuration_shown.get() + 1);
    }
}
