//! Topology discovery.
//!
//! Starting from a list of candidate root addresses, fetch the reported
//! topology and walk it depth-first, liveness-checking every qualifying
//! address. The reported graph comes from firmware and is not trusted:
//! a visited set and a depth ceiling bound the walk even when the graph
//! carries cycles or repeated entries.

use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::BoxFuture;

use mm_client::ClientFactory;
use mm_domain::config::DiscoveryConfig;
use mm_domain::{Error, Result, TopoGraphResponse, TopologyNode};

/// Maps the mesh into a flat, deduplicated, order-stable address list.
pub struct DiscoveryService {
    factory: Arc<dyn ClientFactory>,
    config: DiscoveryConfig,
}

impl DiscoveryService {
    pub fn new(factory: Arc<dyn ClientFactory>, config: DiscoveryConfig) -> Self {
        Self { factory, config }
    }

    /// Discover from the configured candidate roots.
    pub async fn discover(&self) -> Result<Vec<String>> {
        self.discover_from(&self.config.candidates).await
    }

    /// Discover from explicit candidates, tried in order; the first that
    /// returns a well-formed topology descriptor wins. No winner means an
    /// empty result, not an error.
    ///
    /// Order of the result: root first, then children depth-first. An
    /// address appears at most once and only if it answered the liveness
    /// probe itself.
    pub async fn discover_from(&self, candidates: &[String]) -> Result<Vec<String>> {
        let mut root: Option<TopologyNode> = None;

        for address in candidates {
            let client = self.factory.client_for(address);
            match client.topo_graph(self.config.request_timeout()).await {
                Ok(payload) => {
                    match TopoGraphResponse::parse(&payload).filter(TopoGraphResponse::is_well_formed)
                    {
                        Some(response) => {
                            tracing::debug!(address = %address, "topology obtained");
                            root = response.graph;
                            break;
                        }
                        None => {
                            tracing::debug!(address = %address, "candidate answered with a malformed topology");
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!(address = %address, error = %e, "candidate did not answer");
                }
            }
        }

        let Some(root) = root else {
            tracing::debug!("no candidate produced a topology");
            return Ok(Vec::new());
        };

        let mut devices = Vec::new();
        let mut visited = HashSet::new();

        let root_address = root.ip.trim().to_owned();
        visited.insert(root_address.clone());
        if self.check_alive(&root_address).await? {
            devices.push(root_address);
        }

        self.walk_leafs(&root.leafs, &mut devices, &mut visited, 1)
            .await?;

        tracing::debug!(count = devices.len(), devices = ?devices, "discovery finished");
        Ok(devices)
    }

    /// Depth-first walk of one `leafs` list.
    ///
    /// A child qualifies only with a non-empty address AND a non-empty
    /// hardware field; anything else is skipped without noise. The
    /// visited set is consulted before the liveness check and before
    /// recursing, so repeated or cyclic entries cannot re-enter the walk.
    fn walk_leafs<'a>(
        &'a self,
        leafs: &'a [TopologyNode],
        devices: &'a mut Vec<String>,
        visited: &'a mut HashSet<String>,
        depth: usize,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if depth > self.config.max_depth {
                tracing::warn!(
                    depth,
                    max_depth = self.config.max_depth,
                    "reported topology exceeds depth ceiling, pruning"
                );
                return Ok(());
            }

            for leaf in leafs {
                let address = leaf.ip.trim();
                if address.is_empty() || leaf.hardware.trim().is_empty() {
                    continue;
                }

                if !visited.insert(address.to_owned()) {
                    tracing::debug!(address = %address, "address already visited, skipping branch");
                    continue;
                }

                if self.check_alive(address).await? {
                    devices.push(address.to_owned());
                }

                if !leaf.leafs.is_empty() {
                    self.walk_leafs(&leaf.leafs, devices, visited, depth + 1)
                        .await?;
                }
            }

            Ok(())
        })
    }

    /// Lightweight reachability probe with a short timeout.
    ///
    /// A connection failure means dead; a protocol failure still means
    /// alive — a device that answers with an error proves it is on the
    /// network. Unclassified failures propagate and fail this one check.
    pub async fn check_alive(&self, address: &str) -> Result<bool> {
        let client = self.factory.client_for(address);
        match client.topo_graph(self.config.check_timeout()).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_connection() => {
                tracing::debug!(address = %address, error = %e, "liveness check: unreachable");
                Ok(false)
            }
            Err(e) if e.is_protocol() => {
                tracing::debug!(address = %address, error = %e, "liveness check: reachable with error");
                Ok(true)
            }
            Err(e) => Err(Error::Client(e.to_string())),
        }
    }
}
