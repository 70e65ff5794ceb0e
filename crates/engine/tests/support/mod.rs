//! Scripted in-process device client for engine tests.
//!
//! Each endpoint gets a queue of outcomes; the last entry repeats once the
//! queue drains. Call counts per endpoint back the "no network call was
//! made" assertions.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use mm_client::{ClientError, ClientFactory, ClientResult, DeviceClient};

/// One scripted call outcome.
#[derive(Clone)]
pub enum Scripted {
    Ok(Value),
    Connection,
    Protocol,
    /// Unclassified error (bad URL); must propagate out of liveness checks.
    Fatal,
}

impl Scripted {
    fn produce(&self) -> ClientResult<Value> {
        match self {
            Scripted::Ok(v) => Ok(v.clone()),
            Scripted::Connection => Err(ClientError::Connection("scripted: unreachable".into())),
            Scripted::Protocol => Err(ClientError::Protocol {
                code: 1,
                message: "scripted: device error".into(),
            }),
            Scripted::Fatal => Err(ClientError::Url("scripted: fatal".into())),
        }
    }
}

pub struct MockClient {
    address: String,
    default: Scripted,
    scripts: Mutex<HashMap<&'static str, Vec<Scripted>>>,
    calls: Mutex<HashMap<&'static str, u32>>,
}

impl MockClient {
    /// A device that answers every call with an empty success envelope.
    pub fn reachable(address: &str) -> Arc<Self> {
        Arc::new(Self {
            address: address.to_owned(),
            default: Scripted::Ok(json!({"code": 0})),
            scripts: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
        })
    }

    /// A device that refuses every connection.
    pub fn unreachable(address: &str) -> Arc<Self> {
        Arc::new(Self {
            address: address.to_owned(),
            default: Scripted::Connection,
            scripts: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
        })
    }

    /// Script an endpoint. Outcomes play in order; the last one repeats.
    pub fn script(&self, endpoint: &'static str, outcomes: &[Scripted]) {
        self.scripts.lock().insert(endpoint, outcomes.to_vec());
    }

    pub fn calls_to(&self, endpoint: &str) -> u32 {
        self.calls.lock().get(endpoint).copied().unwrap_or(0)
    }

    fn next(&self, endpoint: &'static str) -> ClientResult<Value> {
        *self.calls.lock().entry(endpoint).or_insert(0) += 1;

        let mut scripts = self.scripts.lock();
        match scripts.get_mut(endpoint) {
            Some(queue) if queue.len() > 1 => queue.remove(0).produce(),
            Some(queue) if queue.len() == 1 => queue[0].produce(),
            _ => self.default.produce(),
        }
    }
}

#[async_trait]
impl DeviceClient for MockClient {
    fn address(&self) -> &str {
        &self.address
    }

    async fn topo_graph(&self, _timeout: Duration) -> ClientResult<Value> {
        self.next("topo_graph")
    }

    async fn mode(&self, _timeout: Duration) -> ClientResult<Value> {
        self.next("mode")
    }

    async fn init_info(&self, _timeout: Duration) -> ClientResult<Value> {
        self.next("init_info")
    }

    async fn set_mac_filter(
        &self,
        _mac: &str,
        _allow: bool,
        _timeout: Duration,
    ) -> ClientResult<Value> {
        self.next("set_mac_filter")
    }

    async fn macfilter_info(&self, _timeout: Duration) -> ClientResult<Value> {
        self.next("macfilter_info")
    }

    async fn qos_info(&self, _timeout: Duration) -> ClientResult<Value> {
        self.next("qos_info")
    }

    async fn rom_update(&self, _timeout: Duration) -> ClientResult<Value> {
        self.next("rom_update")
    }

    async fn flash_permission(&self, _timeout: Duration) -> ClientResult<Value> {
        self.next("flash_permission")
    }

    async fn led(&self, _timeout: Duration) -> ClientResult<Value> {
        self.next("led")
    }

    async fn set_guest_wifi(&self, _config: &Value, _timeout: Duration) -> ClientResult<Value> {
        self.next("set_guest_wifi")
    }

    async fn set_wifi(&self, _config: &Value, _timeout: Duration) -> ClientResult<Value> {
        self.next("set_wifi")
    }

    async fn device_list(&self, _timeout: Duration) -> ClientResult<Value> {
        self.next("device_list")
    }

    async fn portforward(&self, _ftype: u8, _timeout: Duration) -> ClientResult<Value> {
        self.next("portforward")
    }
}

/// Factory over a fixed set of mock clients. Addresses nobody registered
/// behave as unreachable.
#[derive(Default)]
pub struct MockFactory {
    clients: Mutex<HashMap<String, Arc<MockClient>>>,
}

impl MockFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, client: Arc<MockClient>) {
        self.clients
            .lock()
            .insert(client.address().to_owned(), client);
    }
}

impl ClientFactory for MockFactory {
    fn client_for(&self, address: &str) -> Arc<dyn DeviceClient> {
        let key = address.trim().to_owned();
        let client = self.clients.lock().get(&key).cloned();
        match client {
            Some(client) => client,
            None => MockClient::unreachable(&key),
        }
    }
}
