//! `mm-domain` — shared types for the meshmap crates.
//!
//! Everything that crosses a crate boundary lives here: the error taxonomy,
//! the `Mode`/`Model` enums and their normalization rules, the feature
//! catalogue, topology descriptors, and configuration.

pub mod config;
pub mod error;
pub mod feature;
pub mod mode;
pub mod model;
pub mod topology;

pub use error::{Error, Result};
pub use feature::{CompatibilityReport, Feature, FeatureStatus};
pub use mode::{Mode, RawMode};
pub use model::Model;
pub use topology::{TopoGraphResponse, TopologyNode};
