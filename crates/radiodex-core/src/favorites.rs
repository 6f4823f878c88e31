//! Favorites store — an ordered, url-unique station set mirrored into a
//! single persistent key on every mutation.
//!
//! Storage failures never reach the caller: malformed or missing
//! persisted state degrades to "no favorites", and a failed write is
//! logged and carried on from the in-memory set.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::station::StationRecord;

/// The external single-key get/set service the store persists through.
/// Injected so tests (and ephemeral sessions) can use [`MemoryStorage`].
pub trait Storage: Send {
    fn get(&self) -> Option<String>;
    fn set(&mut self, value: &str) -> anyhow::Result<()>;
}

/// File-backed storage: one JSON document at a fixed path.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Storage for FileStorage {
    fn get(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    fn set(&mut self, value: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, value)?;
        Ok(())
    }
}

/// In-memory storage backend.
#[derive(Default)]
pub struct MemoryStorage {
    value: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl Storage for MemoryStorage {
    fn get(&self) -> Option<String> {
        self.value.clone()
    }

    fn set(&mut self, value: &str) -> anyhow::Result<()> {
        self.value = Some(value.to_string());
        Ok(())
    }
}

pub struct FavoritesStore {
    storage: Box<dyn Storage>,
    stations: Vec<StationRecord>,
}

impl FavoritesStore {
    /// Read the persisted set at startup. Absent or malformed data is an
    /// empty set, never an error. Entries that no longer pass the model
    /// invariant (hand-edited files) are dropped on the way in.
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let stations = match storage.get() {
            Some(raw) => match serde_json::from_str::<Vec<StationRecord>>(&raw) {
                Ok(list) => {
                    let mut seen: Vec<StationRecord> = Vec::with_capacity(list.len());
                    for st in list {
                        let valid = st.url_resolved.starts_with("https://")
                            && !st.name.trim().is_empty();
                        if valid && !seen.iter().any(|s| s.same_station(&st)) {
                            seen.push(st);
                        }
                    }
                    seen
                }
                Err(e) => {
                    warn!("persisted favorites unreadable, starting empty: {e}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        debug!(count = stations.len(), "favorites loaded");
        Self { storage, stations }
    }

    pub fn stations(&self) -> &[StationRecord] {
        &self.stations
    }

    pub fn contains(&self, url_resolved: &str) -> bool {
        self.stations.iter().any(|s| s.url_resolved == url_resolved)
    }

    /// Favorite / unfavorite by `url_resolved` identity. The full updated
    /// set is persisted before this returns, so persisted state is never
    /// stale relative to the last completed toggle.
    pub fn toggle(&mut self, station: &StationRecord) -> &[StationRecord] {
        match self
            .stations
            .iter()
            .position(|s| s.same_station(station))
        {
            Some(idx) => {
                self.stations.remove(idx);
            }
            None => self.stations.push(station.clone()),
        }
        self.persist();
        &self.stations
    }

    fn persist(&mut self) {
        match serde_json::to_string(&self.stations) {
            Ok(json) => {
                if let Err(e) = self.storage.set(&json) {
                    warn!("failed to persist favorites: {e}");
                }
            }
            Err(e) => warn!("failed to serialize favorites: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(name: &str, url: &str) -> StationRecord {
        StationRecord {
            name: name.to_string(),
            country: String::new(),
            url_resolved: url.to_string(),
            favicon: None,
        }
    }

    #[test]
    fn empty_storage_loads_empty() {
        let store = FavoritesStore::load(Box::new(MemoryStorage::new()));
        assert!(store.stations().is_empty());
    }

    #[test]
    fn malformed_storage_degrades_to_empty() {
        let mut mem = MemoryStorage::new();
        mem.set("{not json at all").unwrap();
        let store = FavoritesStore::load(Box::new(mem));
        assert!(store.stations().is_empty());
    }

    #[test]
    fn toggle_adds_then_removes_and_persists_each_step() {
        let mut store = FavoritesStore::load(Box::new(MemoryStorage::new()));
        let x = station("X", "https://x.example/live");

        let after_add = store.toggle(&x).to_vec();
        assert_eq!(after_add, vec![x.clone()]);
        assert!(store.contains("https://x.example/live"));

        let after_remove = store.toggle(&x).to_vec();
        assert!(after_remove.is_empty());
        assert!(!store.contains("https://x.example/live"));
    }

    #[test]
    fn toggle_pair_restores_exact_prior_state() {
        let mut store = FavoritesStore::load(Box::new(MemoryStorage::new()));
        let a = station("A", "https://a.example/s");
        let b = station("B", "https://b.example/s");
        let c = station("C", "https://c.example/s");
        store.toggle(&a);
        store.toggle(&b);
        store.toggle(&c);
        let before = store.stations().to_vec();

        store.toggle(&b);
        store.toggle(&b);
        // b re-added at the end, not in place — a toggle pair on a member
        // removes then appends. Same members, order per append semantics.
        assert_eq!(store.stations().len(), before.len());
        assert!(store.contains(&b.url_resolved));

        // A toggle pair on a non-member is a true no-op.
        let d = station("D", "https://d.example/s");
        let before = store.stations().to_vec();
        store.toggle(&d);
        store.toggle(&d);
        assert_eq!(store.stations(), before.as_slice());
    }

    #[test]
    fn identity_is_url_not_name() {
        let mut store = FavoritesStore::load(Box::new(MemoryStorage::new()));
        let a = station("Old Name", "https://same.example/s");
        let renamed = station("New Name", "https://same.example/s");
        store.toggle(&a);
        store.toggle(&renamed);
        assert!(store.stations().is_empty());
    }

    #[test]
    fn persisted_set_round_trips_through_load() {
        let mut mem = MemoryStorage::new();
        let a = station("A", "https://a.example/s");
        {
            let mut store = FavoritesStore::load(Box::new(MemoryStorage::new()));
            store.toggle(&a);
            mem.set(&serde_json::to_string(store.stations()).unwrap())
                .unwrap();
        }
        let store = FavoritesStore::load(Box::new(mem));
        assert_eq!(store.stations(), &[a]);
    }

    #[test]
    fn load_drops_entries_violating_model_invariant() {
        let mut mem = MemoryStorage::new();
        mem.set(
            r#"[
                {"name":"Good","country":"","url_resolved":"https://g.example/s","favicon":null},
                {"name":"","country":"","url_resolved":"https://noname.example/s","favicon":null},
                {"name":"Insecure","country":"","url_resolved":"http://i.example/s","favicon":null}
            ]"#,
        )
        .unwrap();
        let store = FavoritesStore::load(Box::new(mem));
        let names: Vec<_> = store.stations().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Good"]);
    }
}
