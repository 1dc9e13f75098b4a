use crate::error::{FoodieError, FoodieResult};
use crate::gateways::CapabilityFuture;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Durable string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> CapabilityFuture<FoodieResult<Option<String>>>;

    fn set(&self, key: &str, value: String) -> CapabilityFuture<FoodieResult<()>>;

    fn remove(&self, key: &str) -> CapabilityFuture<FoodieResult<()>>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.lock().clone()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CapabilityFuture<FoodieResult<Option<String>>> {
        let value = self.entries.lock().get(key).cloned();
        Box::pin(async move { Ok(value) })
    }

    fn set(&self, key: &str, value: String) -> CapabilityFuture<FoodieResult<()>> {
        self.entries.lock().insert(key.to_string(), value);
        Box::pin(async { Ok(()) })
    }

    fn remove(&self, key: &str) -> CapabilityFuture<FoodieResult<()>> {
        self.entries.lock().remove(key);
        Box::pin(async { Ok(()) })
    }
}

/// Stores every key in a single JSON object file.
///
/// Writes go to a sibling temporary file which then replaces the original, so
/// an interrupted write never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Arc<tokio::sync::Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(path: &Path) -> FoodieResult<HashMap<String, String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(FoodieError::Storage(format!("{}: {}", path.display(), e))),
        }
    }

    async fn write_entries(path: &Path, entries: &HashMap<String, String>) -> FoodieResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let serialized = serde_json::to_string_pretty(entries)?;
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, serialized).await?;
        tokio::fs::rename(&tmp_path, path).await?;
        Ok(())
    }

    fn update<F>(&self, change: F) -> CapabilityFuture<FoodieResult<()>>
    where
        F: FnOnce(&mut HashMap<String, String>) + 'static,
    {
        let path = self.path.clone();
        let write_lock = self.write_lock.clone();
        Box::pin(async move {
            let _guard = write_lock.lock().await;
            let mut entries = Self::read_entries(&path).await?;
            change(&mut entries);
            Self::write_entries(&path, &entries).await
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> CapabilityFuture<FoodieResult<Option<String>>> {
        let path = self.path.clone();
        let key = key.to_string();
        Box::pin(async move {
            let mut entries = Self::read_entries(&path).await?;
            Ok(entries.remove(&key))
        })
    }

    fn set(&self, key: &str, value: String) -> CapabilityFuture<FoodieResult<()>> {
        let key = key.to_string();
        self.update(move |entries| {
            entries.insert(key, value);
        })
    }

    fn remove(&self, key: &str) -> CapabilityFuture<FoodieResult<()>> {
        let key = key.to_string();
        self.update(move |entries| {
            entries.remove(&key);
        })
    }
}
