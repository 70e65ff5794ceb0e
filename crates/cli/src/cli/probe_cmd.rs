//! `probe` command.

use std::sync::Arc;

use mm_client::{ClientFactory, RestClientFactory};
use mm_domain::config::Config;
use mm_domain::FeatureStatus;
use mm_engine::{CompatibilityProbe, OverrideStore, UnsupportedRegistry};

pub async fn run(
    config: &Config,
    address: &str,
    max_retries: Option<u32>,
    silent: bool,
    json: bool,
) -> anyhow::Result<()> {
    let client = RestClientFactory::new().client_for(address);
    let registry = Arc::new(UnsupportedRegistry::new(OverrideStore::new(
        config.registry.override_path.clone(),
    )));

    let mut probe_config = config.probe.clone();
    if let Some(retries) = max_retries {
        probe_config.max_retries = retries;
    }
    if silent {
        probe_config.silent = true;
    }

    let report = CompatibilityProbe::new(client, registry, probe_config)
        .run()
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("node  : {}", report.address);
    println!("mode  : {}", report.mode);
    println!("model : {}", report.model);
    println!();
    for (feature, status) in report.iter() {
        let label = match status {
            FeatureStatus::Supported => "supported",
            FeatureStatus::Unsupported => "unsupported",
            FeatureStatus::NotApplicable => "not applicable",
        };
        println!("  {:<16} {label}", feature.as_str());
    }
    Ok(())
}
