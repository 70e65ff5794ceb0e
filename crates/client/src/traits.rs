//! The seam between the engine and the device RPC implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientResult;

/// One management-API client bound to a single node address.
///
/// Every method issues exactly one request and returns the decoded JSON
/// payload. Callers pass a per-call timeout: discovery uses a short one for
/// liveness checks, the probe engine a longer one for feature calls.
#[async_trait]
pub trait DeviceClient: Send + Sync {
    /// Address this client talks to.
    fn address(&self) -> &str;

    /// Topology descriptor for this node and its children.
    async fn topo_graph(&self, timeout: Duration) -> ClientResult<Value>;

    /// Operating-mode query. The payload shape varies by firmware.
    async fn mode(&self, timeout: Duration) -> ClientResult<Value>;

    /// Self-info query; carries the `hardware` model field.
    async fn init_info(&self, timeout: Duration) -> ClientResult<Value>;

    async fn set_mac_filter(
        &self,
        mac: &str,
        allow: bool,
        timeout: Duration,
    ) -> ClientResult<Value>;

    async fn macfilter_info(&self, timeout: Duration) -> ClientResult<Value>;

    async fn qos_info(&self, timeout: Duration) -> ClientResult<Value>;

    async fn rom_update(&self, timeout: Duration) -> ClientResult<Value>;

    async fn flash_permission(&self, timeout: Duration) -> ClientResult<Value>;

    async fn led(&self, timeout: Duration) -> ClientResult<Value>;

    async fn set_guest_wifi(&self, config: &Value, timeout: Duration) -> ClientResult<Value>;

    async fn set_wifi(&self, config: &Value, timeout: Duration) -> ClientResult<Value>;

    async fn device_list(&self, timeout: Duration) -> ClientResult<Value>;

    async fn portforward(&self, ftype: u8, timeout: Duration) -> ClientResult<Value>;
}

/// Produces a [`DeviceClient`] for an arbitrary address.
///
/// Topology traversal visits addresses it learns at runtime; the factory
/// lets it do so over one shared connection pool.
pub trait ClientFactory: Send + Sync {
    fn client_for(&self, address: &str) -> Arc<dyn DeviceClient>;
}
