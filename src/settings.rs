use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

/// One persisted entry: a currency and whether it is shown.
#[derive(Debug, Serialize, Deserialize)]
struct CurrencySetting {
    id: String,
    visible: bool,
}

/// Persists the per-currency visibility mapping as a YAML document with one
/// `{id, visible}` entry per currency. Every mutation is written through as
/// a full overwrite; there is no merge.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing file is a first run and a malformed file is discarded;
    /// both load as an empty mapping rather than an error.
    pub fn load(&self) -> HashMap<String, bool> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                warn!("could not read {}: {}", self.path.display(), e);
                return HashMap::new();
            }
        };

        match serde_yaml::from_str::<Vec<CurrencySetting>>(&contents) {
            Ok(entries) => entries.into_iter().map(|e| (e.id, e.visible)).collect(),
            Err(e) => {
                warn!(
                    "settings file {} is malformed ({}); starting with empty settings",
                    self.path.display(),
                    e
                );
                HashMap::new()
            }
        }
    }

    pub fn save(&self, visibility: &HashMap<String, bool>) -> Result<()> {
        let mut entries: Vec<CurrencySetting> = visibility
            .iter()
            .map(|(id, visible)| CurrencySetting {
                id: id.clone(),
                visible: *visible,
            })
            .collect();
        // Stable file contents across runs.
        entries.sort_by(|a, b| a.id.cmp(&b.id));

        let contents = serde_yaml::to_string(&entries).context("serializing settings")?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.yaml"));

        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.yaml"));
        let visibility = HashMap::from([
            ("USD".to_string(), true),
            ("EUR".to_string(), false),
        ]);

        store.save(&visibility).unwrap();

        assert_eq!(store.load(), visibility);
    }

    #[test]
    fn malformed_file_loads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "not a settings document").unwrap();

        let store = SettingsStore::new(path);

        assert!(store.load().is_empty());
    }

    #[test]
    fn save_overwrites_stale_entries() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.yaml"));

        store
            .save(&HashMap::from([("USD".to_string(), true)]))
            .unwrap();
        store
            .save(&HashMap::from([("EUR".to_string(), false)]))
            .unwrap();

        let loaded = store.load();
        assert_eq!(loaded, HashMap::from([("EUR".to_string(), false)]));
    }

    #[test]
    fn document_has_one_entry_per_currency() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        let store = SettingsStore::new(&path);

        store
            .save(&HashMap::from([
                ("USD".to_string(), true),
                ("EUR".to_string(), false),
            ]))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("id: EUR"));
        assert!(contents.contains("visible: false"));
        assert!(contents.contains("id: USD"));
        assert!(contents.contains("visible: true"));
    }
}
