//! Recent-search history
//!
//! Keeps the capped, deduplicated, most-recent-first list of submitted city
//! names and persists it as a single JSON array (≤ 5 strings) under the
//! platform data directory. The file is read once at startup and rewritten
//! on every submission.

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Maximum number of recent searches kept
pub const MAX_RECENT: usize = 5;

/// File name of the persisted search list
const HISTORY_FILE: &str = "recent_searches.json";

/// Promotes `city` to the front of `entries`, dropping any prior duplicate
/// occurrence and trimming the list to [`MAX_RECENT`].
pub fn promote(entries: &mut Vec<String>, city: &str) {
    entries.retain(|entry| entry != city);
    entries.insert(0, city.to_string());
    entries.truncate(MAX_RECENT);
}

/// Disk store for the recent-search list
///
/// Stores the list as a plain JSON string array, the same shape the
/// reference client kept in its single storage key.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    dir: PathBuf,
}

impl HistoryStore {
    /// Creates a store rooted at the platform data directory.
    ///
    /// Returns `None` if the platform directories cannot be determined
    /// (e.g. no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "skycast")?;
        Some(Self {
            dir: project_dirs.data_dir().to_path_buf(),
        })
    }

    /// Creates a store rooted at a custom directory (used in tests)
    #[allow(dead_code)]
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    /// Reads the persisted list. A missing or corrupt file reads as empty;
    /// an over-long file is trimmed to [`MAX_RECENT`].
    pub fn load(&self) -> Vec<String> {
        let Ok(content) = fs::read_to_string(self.path()) else {
            return Vec::new();
        };

        let mut entries: Vec<String> = serde_json::from_str(&content).unwrap_or_default();
        entries.truncate(MAX_RECENT);
        entries
    }

    /// Rewrites the persisted list, creating the directory as needed
    pub fn save(&self, entries: &[String]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let json = serde_json::to_string(entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        fs::write(self.path(), json)
    }
}

/// The recent-search list with its optional backing store
#[derive(Debug)]
pub struct RecentSearches {
    entries: Vec<String>,
    store: Option<HistoryStore>,
}

impl RecentSearches {
    /// Loads the list from the given store; `None` keeps it in memory only
    pub fn load(store: Option<HistoryStore>) -> Self {
        let entries = store.as_ref().map(HistoryStore::load).unwrap_or_default();
        Self { entries, store }
    }

    /// An empty list with no backing store
    #[allow(dead_code)]
    pub fn in_memory() -> Self {
        Self {
            entries: Vec::new(),
            store: None,
        }
    }

    /// Entries, most recent first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Promotes `city` and rewrites the store. Persistence failures are
    /// ignored; the in-memory list stays authoritative for the session.
    pub fn record(&mut self, city: &str) {
        promote(&mut self.entries, city);

        if let Some(store) = &self.store {
            let _ = store.save(&self.entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (HistoryStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = HistoryStore::with_dir(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    fn cities(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_promote_inserts_at_front() {
        let mut entries = cities(&["Paris", "Tokyo"]);
        promote(&mut entries, "London");
        assert_eq!(entries, cities(&["London", "Paris", "Tokyo"]));
    }

    #[test]
    fn test_promote_moves_duplicate_to_front_without_duplication() {
        let mut entries = cities(&["London", "Paris"]);
        promote(&mut entries, "London");
        assert_eq!(entries, cities(&["London", "Paris"]));

        let mut entries = cities(&["Paris", "London"]);
        promote(&mut entries, "London");
        assert_eq!(entries, cities(&["London", "Paris"]));
    }

    #[test]
    fn test_promote_caps_at_five() {
        let mut entries = cities(&["A", "B", "C", "D", "E"]);
        promote(&mut entries, "F");
        assert_eq!(entries, cities(&["F", "A", "B", "C", "D"]));
        assert_eq!(entries.len(), MAX_RECENT);
    }

    #[test]
    fn test_promote_is_case_sensitive() {
        // Dedup is by exact string match.
        let mut entries = cities(&["london"]);
        promote(&mut entries, "London");
        assert_eq!(entries, cities(&["London", "london"]));
    }

    #[test]
    fn test_store_roundtrip() {
        let (store, _temp_dir) = store();
        let entries = cities(&["London", "Paris"]);

        store.save(&entries).expect("Save should succeed");
        assert_eq!(store.load(), entries);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let (store, _temp_dir) = store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let (store, temp_dir) = store();
        std::fs::write(temp_dir.path().join("recent_searches.json"), "{not-json")
            .expect("Write should succeed");

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_overlong_file_is_trimmed_on_load() {
        let (store, temp_dir) = store();
        std::fs::write(
            temp_dir.path().join("recent_searches.json"),
            r#"["A","B","C","D","E","F","G"]"#,
        )
        .expect("Write should succeed");

        assert_eq!(store.load(), cities(&["A", "B", "C", "D", "E"]));
    }

    #[test]
    fn test_save_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("nested").join("dir");
        let store = HistoryStore::with_dir(nested.clone());

        store.save(&cities(&["London"])).expect("Save should succeed");

        assert!(nested.join("recent_searches.json").exists());
    }

    #[test]
    fn test_record_persists_across_loads() {
        let (store, _temp_dir) = store();

        let mut recent = RecentSearches::load(Some(store.clone()));
        recent.record("London");
        recent.record("Paris");
        recent.record("London");

        let reloaded = RecentSearches::load(Some(store));
        assert_eq!(reloaded.entries(), cities(&["London", "Paris"]).as_slice());
    }

    #[test]
    fn test_in_memory_list_never_touches_disk() {
        let mut recent = RecentSearches::in_memory();
        recent.record("London");

        assert_eq!(recent.entries(), cities(&["London"]).as_slice());
        assert_eq!(recent.len(), 1);
        assert!(!recent.is_empty());
    }
}
