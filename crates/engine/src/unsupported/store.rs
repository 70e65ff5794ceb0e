//! Persistence of the user-override layer.
//!
//! The override file is JSON mapping feature name → list of model names.
//! It is rewritten wholesale on every addition (read-modify-write, not an
//! append), so writers must hold both the process mutex and an exclusive
//! advisory lock on the file for the whole cycle.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::OpenOptions;
use std::path::PathBuf;

use fs2::FileExt;
use parking_lot::Mutex;

use mm_domain::{Feature, Model, Result};

use super::AddOutcome;

/// Owns the override file. Inject one store per registry; tests point it
/// at a temp directory.
pub struct OverrideStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl OverrideStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the user layer. Missing, unreadable, or corrupt content
    /// degrades to an empty layer — the override file must never be able
    /// to take the registry down.
    pub fn load(&self) -> HashMap<Feature, BTreeSet<Model>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "override file unreadable");
                return HashMap::new();
            }
        };

        let parsed: BTreeMap<String, Vec<String>> = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "override file unparsable, treating as empty");
                return HashMap::new();
            }
        };

        let mut layer: HashMap<Feature, BTreeSet<Model>> = HashMap::new();
        for (feature_name, model_names) in parsed {
            let feature = match feature_name.parse::<Feature>() {
                Ok(feature) => feature,
                Err(_) => {
                    tracing::debug!(feature = %feature_name, "unknown feature in override file, skipping");
                    continue;
                }
            };
            let models = layer.entry(feature).or_default();
            for model_name in model_names {
                match model_name.parse::<Model>() {
                    Ok(model) => {
                        models.insert(model);
                    }
                    Err(_) => {
                        tracing::debug!(feature = %feature, model = %model_name, "unknown model in override file, skipping");
                    }
                }
            }
        }
        layer
    }

    /// Add one pair to the user layer and rewrite the file.
    ///
    /// The state on disk is re-read under the lock: another writer may
    /// have changed the file since the caller's last look.
    pub fn append(&self, feature: Feature, model: Model) -> Result<AddOutcome> {
        let _guard = self.write_lock.lock();

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)?;
        lock_file.lock_exclusive()?;

        let result = self.append_locked(feature, model);

        let _ = fs2::FileExt::unlock(&lock_file);
        result
    }

    fn append_locked(&self, feature: Feature, model: Model) -> Result<AddOutcome> {
        let mut layer = self.load();
        let models = layer.entry(feature).or_default();
        if !models.insert(model) {
            return Ok(AddOutcome::AlreadyPresent);
        }

        let serializable: BTreeMap<&str, Vec<&str>> = layer
            .iter()
            .map(|(f, models)| {
                (
                    f.as_str(),
                    models.iter().map(Model::as_str).collect::<Vec<_>>(),
                )
            })
            .collect();

        let json = serde_json::to_string_pretty(&serializable)?;
        std::fs::write(&self.path, json)?;
        Ok(AddOutcome::Added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = OverrideStore::new(dir.path().join("none.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn append_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = OverrideStore::new(dir.path().join("unsupported_user.json"));

        assert_eq!(
            store.append(Feature::GuestWifi, Model::R4A).unwrap(),
            AddOutcome::Added
        );
        assert_eq!(
            store.append(Feature::GuestWifi, Model::D01).unwrap(),
            AddOutcome::Added
        );
        assert_eq!(
            store.append(Feature::GuestWifi, Model::R4A).unwrap(),
            AddOutcome::AlreadyPresent
        );

        let layer = store.load();
        assert_eq!(
            layer[&Feature::GuestWifi],
            BTreeSet::from([Model::R4A, Model::D01])
        );
    }

    #[test]
    fn file_content_is_stable_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unsupported_user.json");
        let store = OverrideStore::new(&path);
        store.append(Feature::PerDeviceQos, Model::RA70).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["per_device_qos"][0], "RA70");
    }
}
