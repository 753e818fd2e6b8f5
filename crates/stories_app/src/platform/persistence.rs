use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use stories_core::{StoreError, ValueStore};
use tempfile::NamedTempFile;
use stories_logging::{stories_info, stories_warn};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedValues {
    values: BTreeMap<String, String>,
    saved_utc: Option<String>,
}

/// [`ValueStore`] backed by a ron file, rewritten atomically on every `set`.
#[derive(Debug)]
pub(crate) struct RonValueStore {
    dir: PathBuf,
    filename: String,
    persisted: PersistedValues,
}

impl RonValueStore {
    /// Opens the store at `path`. Unreadable or unparsable files start empty.
    pub fn open(path: &Path) -> Self {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".hacker_stories_state.ron".to_string());

        Self {
            persisted: read_persisted(path),
            dir,
            filename,
        }
    }

    fn save(&self) -> Result<(), StoreError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&self.persisted, pretty)
            .map_err(|err| StoreError::Serialize(err.to_string()))?;

        // Readers see either the previous snapshot or the new one, never a partial file.
        fs::create_dir_all(&self.dir)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(self.dir.join(&self.filename))
            .map_err(|err| StoreError::Io(err.error))?;
        Ok(())
    }
}

impl ValueStore for RonValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.persisted.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.persisted
            .values
            .insert(key.to_string(), value.to_string());
        self.persisted.saved_utc = Some(Utc::now().to_rfc3339());
        self.save()
    }
}

fn read_persisted(path: &Path) -> PersistedValues {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return PersistedValues::default();
        }
        Err(err) => {
            stories_warn!("Failed to read persisted values from {:?}: {}", path, err);
            return PersistedValues::default();
        }
    };

    match ron::from_str(&content) {
        Ok(persisted) => {
            stories_info!("Loaded persisted values from {:?}", path);
            persisted
        }
        Err(err) => {
            stories_warn!("Failed to parse persisted values from {:?}: {}", path, err);
            PersistedValues::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stories_core::{SearchTermHolder, SEARCH_TERM_KEY};
    use tempfile::TempDir;

    #[test]
    fn values_survive_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.ron");

        let mut store = RonValueStore::open(&path);
        assert_eq!(store.get(SEARCH_TERM_KEY), None);
        store.set(SEARCH_TERM_KEY, "Rust").unwrap();

        let reopened = RonValueStore::open(&path);
        assert_eq!(reopened.get(SEARCH_TERM_KEY).as_deref(), Some("Rust"));
        assert!(reopened.persisted.saved_utc.is_some());
    }

    #[test]
    fn holder_does_not_create_file_on_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.ron");

        let mut holder = SearchTermHolder::load(RonValueStore::open(&path), SEARCH_TERM_KEY, "React");
        assert_eq!(holder.read(), "React");
        assert!(!path.exists());

        holder.write("Redux").unwrap();
        assert!(path.exists());
        let reloaded = SearchTermHolder::load(RonValueStore::open(&path), SEARCH_TERM_KEY, "React");
        assert_eq!(reloaded.read(), "Redux");
    }

    #[test]
    fn repeated_sets_replace_the_snapshot_without_leftovers() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("state.ron");

        let mut store = RonValueStore::open(&path);
        store.set(SEARCH_TERM_KEY, "React").unwrap();
        store.set(SEARCH_TERM_KEY, "Rust").unwrap();
        store.set("theme", "dark").unwrap();

        let reopened = RonValueStore::open(&path);
        assert_eq!(reopened.get(SEARCH_TERM_KEY).as_deref(), Some("Rust"));
        assert_eq!(reopened.get("theme").as_deref(), Some("dark"));
        let entries: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("state.ron")]);
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.ron");
        fs::write(&path, "not ron at all {").unwrap();

        let store = RonValueStore::open(&path);
        assert_eq!(store.get(SEARCH_TERM_KEY), None);
    }

    #[test]
    fn write_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let mut store = RonValueStore::open(&blocker.join("state.ron"));
        assert!(matches!(store.set(SEARCH_TERM_KEY, "Rust"), Err(StoreError::Io(_))));
    }
}
