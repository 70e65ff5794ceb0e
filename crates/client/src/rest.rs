//! REST implementation of [`DeviceClient`].
//!
//! `RestDeviceClient` wraps a `reqwest::Client` and translates every trait
//! method into the corresponding HTTP call against the router's status API.
//! One pooled `reqwest::Client` is shared by every per-address client the
//! factory hands out.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};
use crate::traits::{ClientFactory, DeviceClient};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A REST client bound to one node address.
#[derive(Debug, Clone)]
pub struct RestDeviceClient {
    http: Client,
    address: String,
    base_url: String,
}

impl RestDeviceClient {
    /// Build a client for `address` over the given pooled `reqwest::Client`.
    pub fn new(http: Client, address: &str) -> Self {
        let address = address.trim().to_owned();
        let base_url = format!("http://{address}/cgi-bin/luci/api");
        Self {
            http,
            address,
            base_url,
        }
    }

    // ── request helpers ──────────────────────────────────────────────

    /// Build the full URL for a path like `misystem/topo_graph`.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Decorate a `RequestBuilder` with standard headers and the timeout.
    fn decorate(&self, rb: RequestBuilder, timeout: Duration) -> RequestBuilder {
        let trace_id = Uuid::new_v4().to_string();
        rb.header("X-Client-Type", "meshmap")
            .header("X-Trace-Id", trace_id)
            .timeout(timeout)
    }

    /// Issue a GET and decode the envelope.
    async fn get(&self, path: &str, timeout: Duration) -> ClientResult<Value> {
        let rb = self.http.get(self.url(path));
        self.execute(path, self.decorate(rb, timeout)).await
    }

    /// Issue a POST with a JSON body and decode the envelope.
    async fn post(&self, path: &str, body: &Value, timeout: Duration) -> ClientResult<Value> {
        let rb = self.http.post(self.url(path)).json(body);
        self.execute(path, self.decorate(rb, timeout)).await
    }

    /// Send the request and classify the outcome.
    ///
    /// * Connect failures and timeouts → [`ClientError::Connection`].
    /// * HTTP error statuses and `code != 0` envelopes → [`ClientError::Protocol`].
    async fn execute(&self, path: &str, rb: RequestBuilder) -> ClientResult<Value> {
        let response = rb.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::Connection(e.to_string())
            } else {
                ClientError::Protocol {
                    code: -1,
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(address = %self.address, path, %status, "device returned http error");
            return Err(ClientError::Protocol {
                code: i64::from(status.as_u16()),
                message: body,
            });
        }

        let payload: Value = response.json().await.map_err(|e| ClientError::Protocol {
            code: -1,
            message: format!("invalid JSON body: {e}"),
        })?;

        // The status API wraps everything in `{"code": n, ...}`; nonzero
        // means the device understood the request but refused it.
        if let Some(code) = payload.get("code").and_then(Value::as_i64) {
            if code != 0 {
                let message = payload
                    .get("msg")
                    .and_then(Value::as_str)
                    .unwrap_or("device error")
                    .to_owned();
                return Err(ClientError::Protocol { code, message });
            }
        }

        Ok(payload)
    }
}

#[async_trait]
impl DeviceClient for RestDeviceClient {
    fn address(&self) -> &str {
        &self.address
    }

    async fn topo_graph(&self, timeout: Duration) -> ClientResult<Value> {
        self.get("misystem/topo_graph", timeout).await
    }

    async fn mode(&self, timeout: Duration) -> ClientResult<Value> {
        self.get("xqnetwork/mode", timeout).await
    }

    async fn init_info(&self, timeout: Duration) -> ClientResult<Value> {
        self.get("xqsystem/init_info", timeout).await
    }

    async fn set_mac_filter(
        &self,
        mac: &str,
        allow: bool,
        timeout: Duration,
    ) -> ClientResult<Value> {
        let body = json!({ "mac": mac, "wan": if allow { 1 } else { 0 } });
        self.post("xqnetwork/set_mac_filter", &body, timeout).await
    }

    async fn macfilter_info(&self, timeout: Duration) -> ClientResult<Value> {
        self.get("xqnetwork/macfilter_info", timeout).await
    }

    async fn qos_info(&self, timeout: Duration) -> ClientResult<Value> {
        self.get("misystem/qos_info", timeout).await
    }

    async fn rom_update(&self, timeout: Duration) -> ClientResult<Value> {
        self.get("xqsystem/check_rom_update", timeout).await
    }

    async fn flash_permission(&self, timeout: Duration) -> ClientResult<Value> {
        self.get("xqsystem/flash_permission", timeout).await
    }

    async fn led(&self, timeout: Duration) -> ClientResult<Value> {
        self.get("misystem/led", timeout).await
    }

    async fn set_guest_wifi(&self, config: &Value, timeout: Duration) -> ClientResult<Value> {
        self.post("xqnetwork/set_guest_wifi", config, timeout).await
    }

    async fn set_wifi(&self, config: &Value, timeout: Duration) -> ClientResult<Value> {
        self.post("xqnetwork/set_wifi", config, timeout).await
    }

    async fn device_list(&self, timeout: Duration) -> ClientResult<Value> {
        self.get("misystem/devicelist", timeout).await
    }

    async fn portforward(&self, ftype: u8, timeout: Duration) -> ClientResult<Value> {
        self.get(&format!("xqnetwork/portforward?ftype={ftype}"), timeout)
            .await
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Factory
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Hands out per-address clients over one shared connection pool.
#[derive(Debug, Clone, Default)]
pub struct RestClientFactory {
    http: Client,
}

impl RestClientFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientFactory for RestClientFactory {
    fn client_for(&self, address: &str) -> Arc<dyn DeviceClient> {
        Arc::new(RestDeviceClient::new(self.http.clone(), address))
    }
}
