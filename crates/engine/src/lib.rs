//! `mm-engine` — node discovery and capability probing.
//!
//! The engine turns one known address into a map of the whole mesh
//! ([`DiscoveryService`]) and, per node, a report of which management-API
//! features are actually usable ([`CompatibilityProbe`]). The
//! [`UnsupportedRegistry`] carries the static knowledge of feature/model
//! combinations that are known not to work, layered with a user-editable
//! override file.
//!
//! Network access goes exclusively through the `mm-client` traits; the
//! engine never builds a transport of its own.

pub mod catalogue;
pub mod discovery;
pub mod probe;
pub mod unsupported;

pub use catalogue::{catalogue, FeatureSpec};
pub use discovery::DiscoveryService;
pub use probe::CompatibilityProbe;
pub use unsupported::{AddOutcome, CombinedUnsupported, OverrideStore, UnsupportedRegistry};
