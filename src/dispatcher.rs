/// Background command handling: decide which sites to open for a trigger
use crate::config::LauncherConfig;
use crate::site_list::SiteList;
use crate::store::{SiteRepository, SiteStore};
use crate::url_policy::is_structurally_valid;
use log::{error, info, warn};

/// Side effects the launcher asks the browser for
pub trait Launcher {
    fn open_url(&self, url: &str);

    fn show_configuration_ui(&self);
}

impl<L: Launcher> Launcher for &L {
    fn open_url(&self, url: &str) {
        (**self).open_url(url)
    }

    fn show_configuration_ui(&self) {
        (**self).show_configuration_ui()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    OpenSelected,
    /// Zero-based position in the site list
    OpenFavorite(usize),
}

impl Command {
    /// Map a browser command name to a launcher command.
    ///
    /// Accepts both the manifest names (`_execute_action`,
    /// `open_favorite_site_N`) and the short forms (`open-selected`,
    /// `open-favorite-N`). Favorite numbers are 1-based and limited to
    /// `favorite_slots`.
    pub fn parse(name: &str, favorite_slots: usize) -> Option<Command> {
        if matches!(name, "_execute_action" | "open-selected") {
            return Some(Command::OpenSelected);
        }

        let number = name
            .strip_prefix("open_favorite_site_")
            .or_else(|| name.strip_prefix("open-favorite-"))?;

        match number.parse::<usize>() {
            Ok(n) if (1..=favorite_slots).contains(&n) => Some(Command::OpenFavorite(n - 1)),
            _ => None,
        }
    }
}

/// What a single launch did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchReport {
    pub opened: Vec<String>,
    pub skipped: Vec<String>,
    pub showed_configuration: bool,
}

/// Reads the list fresh on every command and opens the target sites
pub struct LaunchDispatcher<R, L> {
    store: SiteStore<R>,
    launcher: L,
    favorite_slots: usize,
}

impl<R: SiteRepository, L: Launcher> LaunchDispatcher<R, L> {
    pub fn new(repository: R, launcher: L, config: &LauncherConfig) -> Self {
        LaunchDispatcher {
            store: SiteStore::new(repository, config.default_sites.clone()),
            launcher,
            favorite_slots: config.favorite_slots,
        }
    }

    /// Handle a raw command name; unknown commands are ignored
    pub async fn handle_command(&mut self, name: &str) -> Option<LaunchReport> {
        info!("Command received: {}", name);

        match Command::parse(name, self.favorite_slots) {
            Some(command) => Some(self.dispatch(command).await),
            None => {
                warn!("Quick Launch: Unknown command ignored: {}", name);
                None
            }
        }
    }

    pub async fn dispatch(&mut self, command: Command) -> LaunchReport {
        match command {
            Command::OpenSelected => self.open_selected().await,
            Command::OpenFavorite(index) => self.open_favorite(index).await,
        }
    }

    /// Open every selected site with a URL, skipping unparseable ones.
    /// With nothing selected, the options page is shown instead.
    pub async fn open_selected(&mut self) -> LaunchReport {
        self.refresh().await;

        let mut report = LaunchReport::default();
        let targets = selected_urls(self.store.sites());

        if targets.is_empty() {
            info!("Quick Launch: No websites selected for quick launch. Opening options page.");
            self.show_configuration(&mut report);
            return report;
        }

        for url in targets {
            if is_structurally_valid(&url) {
                self.launcher.open_url(&url);
                report.opened.push(url);
            } else {
                warn!("Quick Launch: Invalid URL skipped: {}", url);
                report.skipped.push(url);
            }
        }

        report
    }

    /// Open the site at `index`; any problem with that slot leads to the
    /// options page so the user can fix it. Storage is only read here,
    /// never seeded.
    pub async fn open_favorite(&mut self, index: usize) -> LaunchReport {
        if let Err(e) = self.store.load_stored().await {
            error!("Error retrieving websites: {}", e);
        }

        let mut report = LaunchReport::default();
        let url = self
            .store
            .sites()
            .sites
            .get(index)
            .map(|site| site.url.clone())
            .filter(|url| !url.is_empty());

        match url {
            Some(url) if is_structurally_valid(&url) => {
                self.launcher.open_url(&url);
                report.opened.push(url);
            }
            Some(url) => {
                warn!(
                    "Quick Launch: Invalid URL for favorite site at index {}: {}. Opening options page.",
                    index, url
                );
                report.skipped.push(url);
                self.show_configuration(&mut report);
            }
            None => {
                info!("Quick Launch: No favorite website configured at index {}. Opening options page.", index);
                self.show_configuration(&mut report);
            }
        }

        report
    }

    async fn refresh(&mut self) {
        if let Err(e) = self.store.load().await {
            error!("Error retrieving websites: {}", e);
        }
    }

    fn show_configuration(&self, report: &mut LaunchReport) {
        self.launcher.show_configuration_ui();
        report.showed_configuration = true;
    }
}

/// Selected, non-empty URLs in list order
fn selected_urls(list: &SiteList) -> Vec<String> {
    list.sites
        .iter()
        .filter(|site| site.selected && !site.url.is_empty())
        .map(|site| site.url.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryRepository, RecordingLauncher};
    use futures::executor::block_on;
    use serde_json::{Value, json};

    fn run_selected(stored: Value) -> (LaunchReport, RecordingLauncher) {
        let repo = MemoryRepository::with_value(stored);
        let launcher = RecordingLauncher::default();
        let mut dispatcher = LaunchDispatcher::new(&repo, &launcher, &LauncherConfig::default());
        let report = block_on(dispatcher.open_selected());
        drop(dispatcher);
        (report, launcher)
    }

    fn run_favorite(stored: Value, index: usize) -> (LaunchReport, RecordingLauncher) {
        let repo = MemoryRepository::with_value(stored);
        let launcher = RecordingLauncher::default();
        let mut dispatcher = LaunchDispatcher::new(&repo, &launcher, &LauncherConfig::default());
        let report = block_on(dispatcher.open_favorite(index));
        drop(dispatcher);
        (report, launcher)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("_execute_action", 3), Some(Command::OpenSelected));
        assert_eq!(Command::parse("open-selected", 3), Some(Command::OpenSelected));
        assert_eq!(Command::parse("open-favorite-1", 3), Some(Command::OpenFavorite(0)));
        assert_eq!(Command::parse("open_favorite_site_3", 3), Some(Command::OpenFavorite(2)));
    }

    #[test]
    fn test_parse_rejects_unknown_commands() {
        assert_eq!(Command::parse("open-favorite-0", 3), None);
        assert_eq!(Command::parse("open-favorite-4", 3), None);
        assert_eq!(Command::parse("open_favorite_site_x", 3), None);
        assert_eq!(Command::parse("reload", 3), None);
        assert_eq!(Command::parse("open-favorite-4", 5), Some(Command::OpenFavorite(3)));
    }

    #[test]
    fn test_open_selected_opens_in_list_order() {
        let (report, launcher) = run_selected(json!([
            {"id": "1", "url": "https://a.com", "selected": true},
            {"id": "2", "url": "https://b.com", "selected": false},
            {"id": "3", "url": "https://c.com", "selected": true},
        ]));

        assert_eq!(launcher.opened(), vec!["https://a.com", "https://c.com"]);
        assert_eq!(launcher.configuration_shown(), 0);
        assert!(!report.showed_configuration);
    }

    #[test]
    fn test_open_selected_without_selection_shows_configuration() {
        let (report, launcher) = run_selected(json!([
            {"id": "1", "url": "https://a.com", "selected": false},
            {"id": "2", "url": "https://b.com", "selected": false},
        ]));

        assert!(launcher.opened().is_empty());
        assert_eq!(launcher.configuration_shown(), 1);
        assert!(report.showed_configuration);
    }

    #[test]
    fn test_open_selected_ignores_selected_empty_urls() {
        let (_, launcher) = run_selected(json!([{"id": "1", "url": "", "selected": true}]));

        assert!(launcher.opened().is_empty());
        assert_eq!(launcher.configuration_shown(), 1);
    }

    #[test]
    fn test_open_selected_skips_invalid_entries() {
        let (report, launcher) = run_selected(json!([
            {"id": "1", "url": "not a url", "selected": true},
            {"id": "2", "url": "https://ok.com", "selected": true},
        ]));

        assert_eq!(launcher.opened(), vec!["https://ok.com"]);
        assert_eq!(report.skipped, vec!["not a url"]);
        assert_eq!(launcher.configuration_shown(), 0);
    }

    #[test]
    fn test_open_selected_tolerates_unlisted_schemes() {
        let (_, launcher) = run_selected(json!([{"id": "1", "url": "ftp://files.example.com", "selected": true}]));

        assert_eq!(launcher.opened(), vec!["ftp://files.example.com"]);
    }

    #[test]
    fn test_open_selected_seeds_defaults() {
        let (_, launcher) = run_selected(Value::Null);

        assert_eq!(launcher.opened(), vec!["https://www.google.com", "https://www.youtube.com"]);
    }

    #[test]
    fn test_open_selected_read_failure_shows_configuration() {
        let repo = MemoryRepository::with_value(json!([{"id": "1", "url": "https://a.com", "selected": true}]));
        repo.fail_reads(true);
        let launcher = RecordingLauncher::default();
        let mut dispatcher = LaunchDispatcher::new(&repo, &launcher, &LauncherConfig::default());

        block_on(dispatcher.open_selected());

        assert!(launcher.opened().is_empty());
        assert_eq!(launcher.configuration_shown(), 1);
    }

    #[test]
    fn test_open_favorite_opens_slot() {
        let (report, launcher) = run_favorite(
            json!([
                {"id": "1", "url": "https://a.com", "selected": false},
                {"id": "2", "url": "https://b.com", "selected": false},
            ]),
            1,
        );

        assert_eq!(launcher.opened(), vec!["https://b.com"]);
        assert_eq!(report.opened, vec!["https://b.com"]);
        assert_eq!(launcher.configuration_shown(), 0);
    }

    #[test]
    fn test_open_favorite_empty_url_shows_configuration() {
        let (_, launcher) = run_favorite(json!([{"id": "1", "url": "", "selected": true}]), 0);

        assert!(launcher.opened().is_empty());
        assert_eq!(launcher.configuration_shown(), 1);
    }

    #[test]
    fn test_open_favorite_out_of_bounds_shows_configuration() {
        let (_, launcher) = run_favorite(json!([{"id": "1", "url": "https://a.com", "selected": true}]), 2);

        assert!(launcher.opened().is_empty());
        assert_eq!(launcher.configuration_shown(), 1);
    }

    #[test]
    fn test_open_favorite_on_empty_storage_shows_configuration_without_seeding() {
        let repo = MemoryRepository::empty();
        let launcher = RecordingLauncher::default();
        let mut dispatcher = LaunchDispatcher::new(&repo, &launcher, &LauncherConfig::default());

        let report = block_on(dispatcher.open_favorite(0));
        drop(dispatcher);

        assert!(report.showed_configuration);
        assert!(launcher.opened().is_empty());
        assert_eq!(launcher.configuration_shown(), 1);
        assert_eq!(repo.write_count(), 0);
    }

    #[test]
    fn test_open_favorite_invalid_url_shows_configuration() {
        let (report, launcher) = run_favorite(json!([{"id": "1", "url": "not a url", "selected": true}]), 0);

        assert!(launcher.opened().is_empty());
        assert_eq!(report.skipped, vec!["not a url"]);
        assert_eq!(launcher.configuration_shown(), 1);
    }

    #[test]
    fn test_handle_command_routes_and_ignores_unknown() {
        let repo = MemoryRepository::with_value(json!([
            {"id": "1", "url": "https://a.com", "selected": true},
            {"id": "2", "url": "https://b.com", "selected": true},
        ]));
        let launcher = RecordingLauncher::default();
        let mut dispatcher = LaunchDispatcher::new(&repo, &launcher, &LauncherConfig::default());

        assert!(block_on(dispatcher.handle_command("open_favorite_site_2")).is_some());
        assert!(block_on(dispatcher.handle_command("open-favorite-9")).is_none());
        block_on(dispatcher.handle_command("_execute_action"));

        assert_eq!(launcher.opened(), vec!["https://b.com", "https://a.com", "https://b.com"]);
    }

    #[test]
    fn test_each_command_reads_fresh_list() {
        let repo = MemoryRepository::with_value(json!([{"id": "1", "url": "https://a.com", "selected": true}]));
        let launcher = RecordingLauncher::default();
        let mut dispatcher = LaunchDispatcher::new(&repo, &launcher, &LauncherConfig::default());

        block_on(dispatcher.open_favorite(0));
        let mut other = SiteStore::new(&repo, Vec::new());
        block_on(other.load()).unwrap();
        block_on(other.update_url("1", "z.com")).unwrap();
        block_on(dispatcher.open_favorite(0));

        assert_eq!(launcher.opened(), vec!["https://a.com", "https://z.com"]);
    }
}
