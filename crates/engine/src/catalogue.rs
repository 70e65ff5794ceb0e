//! The feature catalogue as data.
//!
//! Each entry carries everything the probe engine needs to evaluate one
//! feature: how to invoke it, the modes in which the check is structurally
//! meaningless, and whether the static unsupported registry may veto it.
//! Keeping this as a table means the probe loop itself has no per-feature
//! control flow.

use std::time::Duration;

use futures_util::future::BoxFuture;
use serde_json::{json, Value};

use mm_client::{ClientResult, DeviceClient};
use mm_domain::{Feature, Mode};

/// Every role other than plain router. WAN-side maintenance features
/// (QoS shaping, ROM updates) are owned by the mesh root in these roles.
pub const NON_ROUTER_MODES: [Mode; 5] = [
    Mode::Repeater,
    Mode::AccessPoint,
    Mode::Mesh,
    Mode::MeshLeaf,
    Mode::MeshNode,
];

type InvokeFn = for<'a> fn(&'a dyn DeviceClient, Duration) -> BoxFuture<'a, ClientResult<Value>>;

/// One probe-able feature and its static properties.
pub struct FeatureSpec {
    pub feature: Feature,
    /// Modes in which the check is recorded not-applicable, never probed.
    pub na_modes: &'static [Mode],
    /// Whether the static unsupported registry may veto this feature.
    pub registry_skippable: bool,
    invoke: InvokeFn,
}

impl FeatureSpec {
    /// Issue this feature's probe call.
    pub fn invoke<'a>(
        &self,
        client: &'a dyn DeviceClient,
        timeout: Duration,
    ) -> BoxFuture<'a, ClientResult<Value>> {
        (self.invoke)(client, timeout)
    }

    pub fn not_applicable_in(&self, mode: Mode) -> bool {
        self.na_modes.contains(&mode)
    }
}

/// The catalogue in evaluation order. Matches [`Feature::CATALOGUE`]
/// entry for entry.
pub fn catalogue() -> &'static [FeatureSpec] {
    &CATALOGUE
}

static CATALOGUE: [FeatureSpec; 11] = [
    FeatureSpec {
        feature: Feature::MacFilter,
        na_modes: &[],
        registry_skippable: true,
        invoke: invoke_mac_filter,
    },
    FeatureSpec {
        feature: Feature::MacFilterInfo,
        na_modes: &[],
        registry_skippable: true,
        invoke: invoke_mac_filter_info,
    },
    FeatureSpec {
        feature: Feature::PerDeviceQos,
        na_modes: &NON_ROUTER_MODES,
        registry_skippable: true,
        invoke: invoke_qos_info,
    },
    FeatureSpec {
        feature: Feature::RomUpdate,
        na_modes: &NON_ROUTER_MODES,
        registry_skippable: true,
        invoke: invoke_rom_update,
    },
    FeatureSpec {
        feature: Feature::FlashPermission,
        na_modes: &[],
        registry_skippable: true,
        invoke: invoke_flash_permission,
    },
    FeatureSpec {
        feature: Feature::LedControl,
        na_modes: &[],
        registry_skippable: true,
        invoke: invoke_led,
    },
    FeatureSpec {
        feature: Feature::GuestWifi,
        na_modes: &[],
        registry_skippable: true,
        invoke: invoke_guest_wifi,
    },
    FeatureSpec {
        feature: Feature::WifiConfig,
        na_modes: &[],
        registry_skippable: true,
        invoke: invoke_set_wifi,
    },
    FeatureSpec {
        feature: Feature::DeviceList,
        na_modes: &[],
        registry_skippable: true,
        invoke: invoke_device_list,
    },
    FeatureSpec {
        feature: Feature::TopoGraph,
        na_modes: &[],
        registry_skippable: true,
        invoke: invoke_topo_graph,
    },
    FeatureSpec {
        feature: Feature::Portforward,
        na_modes: &[],
        registry_skippable: true,
        invoke: invoke_portforward,
    },
];

// ── invoke shims ─────────────────────────────────────────────────────
//
// Probe calls that mutate state are issued with no-op arguments: a
// null MAC for the filter, empty config objects for the wifi setters.
// A router that serves the endpoint validates and answers; one that
// does not answers with an error either way.

fn invoke_mac_filter(c: &dyn DeviceClient, t: Duration) -> BoxFuture<'_, ClientResult<Value>> {
    c.set_mac_filter("00:00:00:00:00:00", true, t)
}

fn invoke_mac_filter_info(c: &dyn DeviceClient, t: Duration) -> BoxFuture<'_, ClientResult<Value>> {
    c.macfilter_info(t)
}

fn invoke_qos_info(c: &dyn DeviceClient, t: Duration) -> BoxFuture<'_, ClientResult<Value>> {
    c.qos_info(t)
}

fn invoke_rom_update(c: &dyn DeviceClient, t: Duration) -> BoxFuture<'_, ClientResult<Value>> {
    c.rom_update(t)
}

fn invoke_flash_permission(
    c: &dyn DeviceClient,
    t: Duration,
) -> BoxFuture<'_, ClientResult<Value>> {
    c.flash_permission(t)
}

fn invoke_led(c: &dyn DeviceClient, t: Duration) -> BoxFuture<'_, ClientResult<Value>> {
    c.led(t)
}

fn invoke_guest_wifi(c: &dyn DeviceClient, t: Duration) -> BoxFuture<'_, ClientResult<Value>> {
    Box::pin(async move {
        let empty = json!({});
        c.set_guest_wifi(&empty, t).await
    })
}

fn invoke_set_wifi(c: &dyn DeviceClient, t: Duration) -> BoxFuture<'_, ClientResult<Value>> {
    Box::pin(async move {
        let empty = json!({});
        c.set_wifi(&empty, t).await
    })
}

fn invoke_device_list(c: &dyn DeviceClient, t: Duration) -> BoxFuture<'_, ClientResult<Value>> {
    c.device_list(t)
}

fn invoke_topo_graph(c: &dyn DeviceClient, t: Duration) -> BoxFuture<'_, ClientResult<Value>> {
    c.topo_graph(t)
}

fn invoke_portforward(c: &dyn DeviceClient, t: Duration) -> BoxFuture<'_, ClientResult<Value>> {
    c.portforward(1, t)
}
