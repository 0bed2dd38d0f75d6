use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Key/value backend for session state, shaped like browser `sessionStorage`.
///
/// Implementations must never fail outward: an unreadable backend reads as
/// empty and a failed write is dropped.
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Process-scoped storage; the session dies with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        // Poisoned lock reads as absent
        self.items.read().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.write() {
            items.insert(key.to_string(), value.to_string());
        }
    }

    fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.write() {
            items.remove(key);
        }
    }
}

/// JSON file storage so that separate CLI invocations share one session.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: RwLock<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> HashMap<String, String> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    fn store(&self, items: &HashMap<String, String>) {
        let result = serde_json::to_string_pretty(items)
            .map_err(std::io::Error::from)
            .and_then(|content| {
                if let Some(parent) = self.path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&self.path, content)
            });

        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "session storage unavailable");
        }
    }

    fn update(&self, f: impl FnOnce(&mut HashMap<String, String>)) {
        let Ok(_guard) = self.lock.write() else {
            return;
        };
        let mut items = self.load();
        f(&mut items);
        self.store(&items);
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let _guard = self.lock.read().ok()?;
        self.load().remove(key)
    }

    fn set_item(&self, key: &str, value: &str) {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
        });
    }

    fn remove_item(&self, key: &str) {
        self.update(|items| {
            items.remove(key);
        });
    }
}
