//! Discovery traversal against scripted topologies: candidate fallback,
//! child filtering, dedup/cycle handling, and the liveness asymmetry.

mod support;

use serde_json::json;

use mm_domain::config::DiscoveryConfig;
use mm_engine::DiscoveryService;
use support::{MockClient, MockFactory, Scripted};

fn candidates(addresses: &[&str]) -> Vec<String> {
    addresses.iter().map(|a| (*a).to_owned()).collect()
}

#[tokio::test]
async fn walks_children_and_skips_blank_addresses() {
    let factory = MockFactory::new();

    let root = MockClient::reachable("10.0.0.1");
    root.script(
        "topo_graph",
        &[Scripted::Ok(json!({
            "graph": {
                "ip": "10.0.0.1",
                "hardware": "R3",
                "leafs": [
                    {"ip": "10.0.0.2", "hardware": "RA70"},
                    {"ip": "", "hardware": "X"},
                ]
            }
        }))],
    );
    factory.insert(root);
    factory.insert(MockClient::reachable("10.0.0.2"));

    let service = DiscoveryService::new(factory, DiscoveryConfig::default());
    let devices = service
        .discover_from(&candidates(&["10.0.0.1"]))
        .await
        .unwrap();

    assert_eq!(devices, vec!["10.0.0.1", "10.0.0.2"]);
}

#[tokio::test]
async fn child_without_hardware_is_never_probed() {
    let factory = MockFactory::new();

    let root = MockClient::reachable("10.0.0.1");
    root.script(
        "topo_graph",
        &[Scripted::Ok(json!({
            "graph": {
                "ip": "10.0.0.1",
                "hardware": "R3",
                "leafs": [{"ip": "10.0.0.3"}]
            }
        }))],
    );
    factory.insert(root);
    let orphan = MockClient::reachable("10.0.0.3");
    factory.insert(orphan.clone());

    let service = DiscoveryService::new(factory, DiscoveryConfig::default());
    let devices = service
        .discover_from(&candidates(&["10.0.0.1"]))
        .await
        .unwrap();

    assert_eq!(devices, vec!["10.0.0.1"]);
    // Excluded by filtering, not by a failed liveness check.
    assert_eq!(orphan.calls_to("topo_graph"), 0);
}

#[tokio::test]
async fn unreachable_candidate_falls_through_to_the_next() {
    let factory = MockFactory::new();

    let root = MockClient::reachable("192.168.1.1");
    root.script(
        "topo_graph",
        &[Scripted::Ok(json!({
            "graph": {"ip": "192.168.1.1", "hardware": "R3G", "leafs": []}
        }))],
    );
    factory.insert(root);

    let service = DiscoveryService::new(factory, DiscoveryConfig::default());
    let devices = service
        .discover_from(&candidates(&["miwifi.com", "192.168.31.1", "192.168.1.1"]))
        .await
        .unwrap();

    assert_eq!(devices, vec!["192.168.1.1"]);
}

#[tokio::test]
async fn all_candidates_failing_yields_empty_not_error() {
    let factory = MockFactory::new();
    let service = DiscoveryService::new(factory, DiscoveryConfig::default());

    let devices = service
        .discover_from(&candidates(&["10.0.0.1", "10.0.0.2"]))
        .await
        .unwrap();

    assert!(devices.is_empty());
}

#[tokio::test]
async fn malformed_descriptor_does_not_win_candidate_selection() {
    let factory = MockFactory::new();

    // Answers, but without a usable self address.
    let broken = MockClient::reachable("10.0.0.1");
    broken.script(
        "topo_graph",
        &[Scripted::Ok(json!({"graph": {"ip": ""}}))],
    );
    factory.insert(broken);

    let healthy = MockClient::reachable("10.0.0.2");
    healthy.script(
        "topo_graph",
        &[Scripted::Ok(json!({
            "graph": {"ip": "10.0.0.2", "hardware": "RA70", "leafs": []}
        }))],
    );
    factory.insert(healthy);

    let service = DiscoveryService::new(factory, DiscoveryConfig::default());
    let devices = service
        .discover_from(&candidates(&["10.0.0.1", "10.0.0.2"]))
        .await
        .unwrap();

    assert_eq!(devices, vec!["10.0.0.2"]);
}

#[tokio::test]
async fn duplicate_and_cyclic_entries_terminate_with_unique_result() {
    let factory = MockFactory::new();

    // 10.0.0.2 appears in two branches; the second branch also points back
    // at the root.
    let root = MockClient::reachable("10.0.0.1");
    root.script(
        "topo_graph",
        &[Scripted::Ok(json!({
            "graph": {
                "ip": "10.0.0.1",
                "hardware": "R3G",
                "leafs": [
                    {"ip": "10.0.0.2", "hardware": "RA70"},
                    {
                        "ip": "10.0.0.3",
                        "hardware": "RA67",
                        "leafs": [
                            {"ip": "10.0.0.1", "hardware": "R3G"},
                            {"ip": "10.0.0.2", "hardware": "RA70"},
                        ]
                    },
                ]
            }
        }))],
    );
    factory.insert(root);
    let repeated = MockClient::reachable("10.0.0.2");
    factory.insert(repeated.clone());
    factory.insert(MockClient::reachable("10.0.0.3"));

    let service = DiscoveryService::new(factory, DiscoveryConfig::default());
    let devices = service
        .discover_from(&candidates(&["10.0.0.1"]))
        .await
        .unwrap();

    assert_eq!(devices, vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
    // The duplicate entry was not liveness-checked a second time.
    assert_eq!(repeated.calls_to("topo_graph"), 1);
}

#[tokio::test]
async fn protocol_error_still_counts_as_alive() {
    let factory = MockFactory::new();

    // Candidate fetch succeeds, then the liveness check gets an error
    // response. The device answered, so it is part of the network.
    let root = MockClient::reachable("10.0.0.1");
    root.script(
        "topo_graph",
        &[
            Scripted::Ok(json!({
                "graph": {"ip": "10.0.0.1", "hardware": "R3", "leafs": []}
            })),
            Scripted::Protocol,
        ],
    );
    factory.insert(root);

    let service = DiscoveryService::new(factory, DiscoveryConfig::default());
    let devices = service
        .discover_from(&candidates(&["10.0.0.1"]))
        .await
        .unwrap();

    assert_eq!(devices, vec!["10.0.0.1"]);
}

#[tokio::test]
async fn dead_child_is_omitted_without_error() {
    let factory = MockFactory::new();

    let root = MockClient::reachable("10.0.0.1");
    root.script(
        "topo_graph",
        &[Scripted::Ok(json!({
            "graph": {
                "ip": "10.0.0.1",
                "hardware": "R3",
                "leafs": [{"ip": "10.0.0.2", "hardware": "RA70"}]
            }
        }))],
    );
    factory.insert(root);
    factory.insert(MockClient::unreachable("10.0.0.2"));

    let service = DiscoveryService::new(factory, DiscoveryConfig::default());
    let devices = service
        .discover_from(&candidates(&["10.0.0.1"]))
        .await
        .unwrap();

    assert_eq!(devices, vec!["10.0.0.1"]);
}

#[tokio::test]
async fn unclassified_liveness_failure_propagates() {
    let factory = MockFactory::new();

    let root = MockClient::reachable("10.0.0.1");
    root.script(
        "topo_graph",
        &[Scripted::Ok(json!({
            "graph": {
                "ip": "10.0.0.1",
                "hardware": "R3",
                "leafs": [{"ip": "10.0.0.2", "hardware": "RA70"}]
            }
        }))],
    );
    factory.insert(root);

    let poisoned = MockClient::reachable("10.0.0.2");
    poisoned.script("topo_graph", &[Scripted::Fatal]);
    factory.insert(poisoned);

    let service = DiscoveryService::new(factory, DiscoveryConfig::default());
    assert!(service
        .discover_from(&candidates(&["10.0.0.1"]))
        .await
        .is_err());
}

#[tokio::test]
async fn depth_ceiling_prunes_runaway_graphs() {
    let factory = MockFactory::new();

    // A 4-deep chain with a ceiling of 2: only the first two levels of
    // children are walked.
    let root = MockClient::reachable("10.0.0.1");
    root.script(
        "topo_graph",
        &[Scripted::Ok(json!({
            "graph": {
                "ip": "10.0.0.1",
                "hardware": "R3",
                "leafs": [{
                    "ip": "10.0.0.2",
                    "hardware": "RA70",
                    "leafs": [{
                        "ip": "10.0.0.3",
                        "hardware": "RA70",
                        "leafs": [{"ip": "10.0.0.4", "hardware": "RA70"}]
                    }]
                }]
            }
        }))],
    );
    factory.insert(root);
    for address in ["10.0.0.2", "10.0.0.3", "10.0.0.4"] {
        factory.insert(MockClient::reachable(address));
    }

    let config = DiscoveryConfig {
        max_depth: 2,
        ..Default::default()
    };
    let service = DiscoveryService::new(factory, config);
    let devices = service
        .discover_from(&candidates(&["10.0.0.1"]))
        .await
        .unwrap();

    assert_eq!(devices, vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
}
