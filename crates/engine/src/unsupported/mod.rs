//! Layered registry of features known not to work on specific models.
//!
//! Two layers: a built-in table compiled into the binary, and a
//! user-override file managed by [`OverrideStore`]. The combined view is
//! the per-feature union of both layers. The built-in layer is never
//! mutated at runtime; administrative additions go to the override file.
//!
//! The user layer can change between calls (another process, an
//! administrative add), so the registry never caches a merge: callers
//! request a fresh [`combined`](UnsupportedRegistry::combined) view per
//! logical operation.

mod store;

use std::collections::{BTreeSet, HashMap};

use mm_domain::{Feature, Model, Result};

pub use store::OverrideStore;

/// Result of an administrative add. `AlreadyPresent` is a successful
/// no-op, reported distinctly so callers can phrase their messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Snapshot of the merged built-in + user layers.
#[derive(Debug, Clone)]
pub struct CombinedUnsupported {
    map: HashMap<Feature, BTreeSet<Model>>,
}

impl CombinedUnsupported {
    /// Whether `model` is listed as unsupported for `feature` in either
    /// layer. A feature absent from both layers has an empty set.
    pub fn contains(&self, feature: Feature, model: Model) -> bool {
        self.map
            .get(&feature)
            .map(|models| models.contains(&model))
            .unwrap_or(false)
    }

    /// The merged model set for one feature.
    pub fn models_for(&self, feature: Feature) -> BTreeSet<Model> {
        self.map.get(&feature).cloned().unwrap_or_default()
    }
}

/// The built-in layer. Content is maintained from field reports; the
/// probe engine's exhaustion warning tells users which pairs to add.
pub fn builtin() -> HashMap<Feature, BTreeSet<Model>> {
    let mut map: HashMap<Feature, BTreeSet<Model>> = HashMap::new();
    map.insert(Feature::WifiConfig, BTreeSet::from([Model::CR8806]));
    map.insert(Feature::MacFilter, BTreeSet::from([Model::RM1800]));
    map.insert(Feature::MacFilterInfo, BTreeSet::new());
    map.insert(Feature::PerDeviceQos, BTreeSet::new());
    map
}

/// The layered registry. Construct with the store that owns the
/// override file; the built-in layer is implicit.
pub struct UnsupportedRegistry {
    store: OverrideStore,
}

impl UnsupportedRegistry {
    pub fn new(store: OverrideStore) -> Self {
        Self { store }
    }

    /// Merge both layers. The user layer is re-read from disk on every
    /// call; a missing or unreadable override file contributes nothing.
    pub fn combined(&self) -> CombinedUnsupported {
        let mut map = builtin();
        for (feature, models) in self.store.load() {
            map.entry(feature).or_default().extend(models);
        }
        CombinedUnsupported { map }
    }

    /// Pure lookup against a fresh combined view.
    pub fn is_unsupported(&self, feature: Feature, model: Model) -> bool {
        self.combined().contains(feature, model)
    }

    /// Add one (feature, model) pair to the user layer and persist it.
    ///
    /// A pair already present in either layer is a distinct no-op; the
    /// built-in layer is checked first so it is never duplicated into the
    /// override file.
    pub fn add(&self, feature: Feature, model: Model) -> Result<AddOutcome> {
        if builtin()
            .get(&feature)
            .map(|models| models.contains(&model))
            .unwrap_or(false)
        {
            tracing::debug!(%feature, %model, "pair already in built-in layer");
            return Ok(AddOutcome::AlreadyPresent);
        }

        let outcome = self.store.append(feature, model)?;
        match outcome {
            AddOutcome::Added => {
                tracing::info!(%feature, %model, "added to unsupported override layer")
            }
            AddOutcome::AlreadyPresent => {
                tracing::debug!(%feature, %model, "pair already in override layer")
            }
        }
        Ok(outcome)
    }
}
