//! The feature catalogue and probe results.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::mode::Mode;
use crate::model::Model;

/// Management-API capabilities the probe engine knows how to exercise.
///
/// The catalogue is closed and ordered; every probe run reports exactly this
/// set. Variant order is the evaluation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    MacFilter,
    MacFilterInfo,
    PerDeviceQos,
    RomUpdate,
    FlashPermission,
    LedControl,
    GuestWifi,
    WifiConfig,
    DeviceList,
    TopoGraph,
    Portforward,
}

impl Feature {
    /// Fixed catalogue, in evaluation order.
    pub const CATALOGUE: [Feature; 11] = [
        Feature::MacFilter,
        Feature::MacFilterInfo,
        Feature::PerDeviceQos,
        Feature::RomUpdate,
        Feature::FlashPermission,
        Feature::LedControl,
        Feature::GuestWifi,
        Feature::WifiConfig,
        Feature::DeviceList,
        Feature::TopoGraph,
        Feature::Portforward,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::MacFilter => "mac_filter",
            Feature::MacFilterInfo => "mac_filter_info",
            Feature::PerDeviceQos => "per_device_qos",
            Feature::RomUpdate => "rom_update",
            Feature::FlashPermission => "flash_permission",
            Feature::LedControl => "led_control",
            Feature::GuestWifi => "guest_wifi",
            Feature::WifiConfig => "wifi_config",
            Feature::DeviceList => "device_list",
            Feature::TopoGraph => "topo_graph",
            Feature::Portforward => "portforward",
        }
    }
}

impl FromStr for Feature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::CATALOGUE
            .iter()
            .find(|f| f.as_str() == s.trim().to_ascii_lowercase())
            .copied()
            .ok_or_else(|| Error::UnknownFeature(s.to_owned()))
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one feature check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    /// The endpoint answered with a structured payload.
    Supported,
    /// Statically excluded for this model, or every attempt failed.
    Unsupported,
    /// Structurally meaningless for the node's current mode; never probed.
    NotApplicable,
}

/// Result of one probe run against one node.
///
/// Covers every catalogue feature exactly once. Immutable once returned:
/// a re-check produces a fresh report, callers never patch an old one.
#[derive(Debug, Clone, Serialize)]
pub struct CompatibilityReport {
    /// Address the run was performed against.
    pub address: String,
    /// Mode resolved at the start of the run (`Default` when detection failed).
    pub mode: Mode,
    /// Model resolved at the start of the run (`NOT_KNOWN` when detection failed).
    pub model: Model,
    features: BTreeMap<Feature, FeatureStatus>,
}

impl CompatibilityReport {
    pub fn new(address: impl Into<String>, mode: Mode, model: Model) -> Self {
        Self {
            address: address.into(),
            mode,
            model,
            features: BTreeMap::new(),
        }
    }

    /// Record the status for one feature. Last write wins; the probe engine
    /// writes each feature exactly once.
    pub fn record(&mut self, feature: Feature, status: FeatureStatus) {
        self.features.insert(feature, status);
    }

    pub fn status(&self, feature: Feature) -> Option<FeatureStatus> {
        self.features.get(&feature).copied()
    }

    /// Features in catalogue order with their recorded status.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, FeatureStatus)> + '_ {
        self.features.iter().map(|(f, s)| (*f, *s))
    }

    /// True once every catalogue feature has a recorded status.
    pub fn is_complete(&self) -> bool {
        self.features.len() == Feature::CATALOGUE.len()
    }
}
