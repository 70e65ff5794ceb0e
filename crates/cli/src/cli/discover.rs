//! `discover` and `watch` commands.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use mm_client::RestClientFactory;
use mm_domain::config::Config;
use mm_engine::DiscoveryService;

fn service(config: &Config) -> DiscoveryService {
    DiscoveryService::new(Arc::new(RestClientFactory::new()), config.discovery.clone())
}

/// One discovery run, printed to stdout.
pub async fn run(config: &Config, json: bool) -> anyhow::Result<()> {
    let devices = service(config).discover().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    if devices.is_empty() {
        println!("No devices found.");
    } else {
        for device in &devices {
            println!("{device}");
        }
    }
    Ok(())
}

/// Periodic re-discovery. Each run is a full re-walk; addresses not seen
/// in earlier runs are reported as new. Runs until interrupted.
pub async fn watch(config: &Config, interval_secs: u64) -> anyhow::Result<()> {
    let service = service(config);
    let mut known: BTreeSet<String> = BTreeSet::new();
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

    tracing::info!(interval_secs, "watching for topology changes");

    loop {
        ticker.tick().await;
        match service.discover().await {
            Ok(devices) => {
                for device in devices {
                    if known.insert(device.clone()) {
                        tracing::info!(address = %device, "new node discovered");
                        println!("new node: {device}");
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "discovery run failed");
            }
        }
    }
}
