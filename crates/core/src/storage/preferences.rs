use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::CoreError;

/// Key under which the selected display currency code is persisted.
pub const SELECTED_CURRENCY_KEY: &str = "selectedCurrency";

/// Scalar key-value persistence for user preferences that must survive
/// restarts (currently only the selected currency code).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// In-process store. Shared across "restarts" in tests by cloning it.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat JSON object in a file, e.g.
/// `{"selectedCurrency": "USD"}`. The file is rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Open (or lazily create) the preference file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let text = std::fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&text).map_err(|e| {
                    CoreError::Deserialization(format!(
                        "Failed to parse preferences {}: {e}",
                        path.display()
                    ))
                })?
            }
        } else {
            BTreeMap::new()
        };
        debug!("Opened preferences at {} ({} keys)", path.display(), values.len());
        Ok(Self { path, values })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut next = self.values.clone();
        next.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&next)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize preferences: {e}")))?;
        std::fs::write(&self.path, json)?;
        // Only commit in memory once the file write succeeded.
        self.values = next;
        debug!(key, value, "Persisted preference to {}", self.path.display());
        Ok(())
    }
}
