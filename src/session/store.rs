//! Backend chiave-valore per lo stato persistente della sessione

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use tempfile::NamedTempFile;

use crate::error::Result;

/// Store chiave-valore condiviso dal processo
///
/// Le scritture multiple (`set_all`, `remove_all`) sono applicate in
/// un'unica operazione: un lettore vede tutte le chiavi o nessuna.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<()>;

    fn remove_all(&self, keys: &[&str]) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<()> {
        (**self).set_all(entries)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        (**self).remove_all(keys)
    }
}

/// Store in memoria, perso alla chiusura del processo
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set_all(&self, new_entries: &[(&str, &str)]) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        for (key, value) in new_entries {
            entries.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}

/// Store su file: un oggetto JSON `{chiave: valore}`
///
/// Ogni scrittura produce un file temporaneo nella stessa directory che
/// poi sostituisce il file originale, quindi un crash non lascia mai un
/// file scritto a metà.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<String, String>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(
                    "File di sessione {} illeggibile, ignorato: {}",
                    self.path.display(),
                    e
                );
                Ok(HashMap::new())
            }
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut file = NamedTempFile::new_in(&dir)?;
        file.write_all(serde_json::to_string_pretty(map)?.as_bytes())?;
        file.flush()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.read_map()?.remove(key))
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut map = self.read_map()?;
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        self.write_map(&map)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        if !self.path.exists() {
            return Ok(());
        }
        let mut map = self.read_map()?;
        for key in keys {
            map.remove(*key);
        }
        self.write_map(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        store.set_all(&[("a", "1"), ("b", "2")]).unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));

        store.remove_all(&["a", "b", "missing"]).unwrap();
        assert!(store.get("a").unwrap().is_none());
        assert!(store.get("b").unwrap().is_none());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileStore::new(&path)
            .set_all(&[("token", "abc"), ("user", "{}")])
            .unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("abc"));
        assert_eq!(reopened.get("user").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_store_remove_missing_file_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::new(&path);

        store.remove_all(&["token", "user"]).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_file_store_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileStore::new(&path);
        assert!(store.get("token").unwrap().is_none());

        store.remove_all(&["token"]).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.trim(), "{}");
    }
}
