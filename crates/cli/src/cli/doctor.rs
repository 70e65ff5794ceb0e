//! `doctor` — walk the management endpoints of one node and report each.
//!
//! Useful when filing a support report for an unlisted model: the output
//! shows exactly which endpoints the firmware serves.

use mm_client::{ClientFactory, ClientResult, RestClientFactory};
use mm_domain::config::Config;
use mm_engine::catalogue;

/// Returns `Ok(true)` when every endpoint answered, `Ok(false)` when at
/// least one failed.
pub async fn run(config: &Config, address: &str) -> anyhow::Result<bool> {
    println!("meshmap doctor — {address}");
    println!("==========================\n");

    let client = RestClientFactory::new().client_for(address);
    let timeout = config.probe.request_timeout();
    let mut all_passed = true;

    // Core queries the engine depends on.
    check("topo_graph", client.topo_graph(timeout).await, &mut all_passed);
    check("mode", client.mode(timeout).await, &mut all_passed);
    check("init_info", client.init_info(timeout).await, &mut all_passed);

    // One call per catalogue feature.
    for spec in catalogue() {
        check(
            spec.feature.as_str(),
            spec.invoke(client.as_ref(), timeout).await,
            &mut all_passed,
        );
    }

    println!();
    if all_passed {
        println!("All endpoints answered.");
    } else {
        println!("Some endpoints failed. A failing endpoint is a candidate for the unsupported registry.");
    }

    Ok(all_passed)
}

fn check(name: &str, result: ClientResult<serde_json::Value>, all_passed: &mut bool) {
    match result {
        Ok(_) => println!("  {name:<16} OK"),
        Err(e) => {
            println!("  {name:<16} FAIL ({e})");
            *all_passed = false;
        }
    }
}
