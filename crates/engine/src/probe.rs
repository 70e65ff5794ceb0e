//! Compatibility probing.
//!
//! One run per node: resolve mode and model, consult the unsupported
//! registry once, then walk the feature catalogue in order. Every feature
//! ends in exactly one of three states; per-feature failures never abort
//! the run.

use std::sync::Arc;

use mm_client::DeviceClient;
use mm_domain::config::ProbeConfig;
use mm_domain::{CompatibilityReport, Feature, FeatureStatus, Mode, Model, RawMode};

use crate::catalogue::{catalogue, FeatureSpec};
use crate::unsupported::UnsupportedRegistry;

/// Probes one node's feature compatibility.
pub struct CompatibilityProbe {
    client: Arc<dyn DeviceClient>,
    registry: Arc<UnsupportedRegistry>,
    config: ProbeConfig,
}

impl CompatibilityProbe {
    pub fn new(
        client: Arc<dyn DeviceClient>,
        registry: Arc<UnsupportedRegistry>,
        config: ProbeConfig,
    ) -> Self {
        Self {
            client,
            registry,
            config,
        }
    }

    /// Run the full check. Never fails: detection errors degrade to
    /// defaults and per-feature failures are folded into the report.
    pub async fn run(&self) -> CompatibilityReport {
        let mode = self.detect_mode().await;
        let model = self.detect_model().await;

        // One fresh merge per run; the user layer may change between runs.
        let unsupported = self.registry.combined();

        let mut report = CompatibilityReport::new(self.client.address(), mode, model);

        for spec in catalogue() {
            if spec.registry_skippable && unsupported.contains(spec.feature, model) {
                tracing::debug!(
                    feature = %spec.feature,
                    model = %model,
                    "skipping check, model is statically unsupported"
                );
                report.record(spec.feature, FeatureStatus::Unsupported);
                continue;
            }

            if spec.not_applicable_in(mode) {
                tracing::debug!(
                    feature = %spec.feature,
                    mode = %mode,
                    "not applicable in this mode"
                );
                report.record(spec.feature, FeatureStatus::NotApplicable);
                continue;
            }

            if self.safe_call(spec).await {
                report.record(spec.feature, FeatureStatus::Supported);
            } else {
                report.record(spec.feature, FeatureStatus::Unsupported);
                if !self.config.silent {
                    tracing::warn!(
                        feature = %spec.feature,
                        attempts = self.config.max_retries,
                        model = %model,
                        mode = %mode,
                        "feature failed every attempt"
                    );
                    tracing::warn!(
                        feature = %spec.feature,
                        model = %model,
                        "add the pair to the unsupported registry if this is confirmed"
                    );
                }
            }
        }

        report
    }

    // ── detection ────────────────────────────────────────────────────

    /// Resolve the operating mode. Any failure degrades to
    /// [`Mode::Default`]: a node we cannot classify is probed as a router.
    async fn detect_mode(&self) -> Mode {
        match self.client.mode(self.config.request_timeout()).await {
            Ok(payload) => {
                tracing::debug!(payload = %payload, "raw mode response");
                match RawMode::from_payload(&payload) {
                    Some(raw) => {
                        let mode = Mode::from_raw(&raw);
                        tracing::debug!(mode = %mode, "mode resolved");
                        mode
                    }
                    None => {
                        tracing::debug!("mode payload unusable, assuming router");
                        Mode::Default
                    }
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "could not detect mode, assuming router");
                Mode::Default
            }
        }
    }

    /// Resolve the hardware model; failures leave it unrecognized.
    async fn detect_model(&self) -> Model {
        match self.client.init_info(self.config.request_timeout()).await {
            Ok(payload) => match payload.get("hardware").and_then(|v| v.as_str()) {
                Some(hardware) => Model::from_hardware(hardware),
                None => {
                    tracing::debug!("self-info payload carries no hardware field");
                    Model::NotKnown
                }
            },
            Err(e) => {
                tracing::debug!(error = %e, "could not detect model");
                Model::NotKnown
            }
        }
    }

    // ── retry primitive ──────────────────────────────────────────────

    /// Bounded-retry probe of one feature. True means the endpoint
    /// answered with a structured payload (or a literal `true`).
    ///
    /// Every failure class consumes one attempt; a pause separates
    /// attempts. Connection failures on the portforward endpoint are the
    /// expected "not present on this firmware" signal and stay at debug,
    /// while other unexpected portforward failures warn.
    async fn safe_call(&self, spec: &FeatureSpec) -> bool {
        let max = self.config.max_retries;
        for attempt in 1..=max {
            match spec
                .invoke(self.client.as_ref(), self.config.request_timeout())
                .await
            {
                Ok(payload) if payload.is_object() || payload.as_bool() == Some(true) => {
                    return true;
                }
                Ok(payload) => {
                    tracing::debug!(
                        feature = %spec.feature,
                        attempt,
                        max,
                        payload = %payload,
                        "unexpected payload"
                    );
                }
                Err(e) if e.is_connection() => {
                    if spec.feature == Feature::Portforward {
                        tracing::debug!(
                            attempt,
                            max,
                            "portforward endpoint not present on this firmware"
                        );
                    } else {
                        tracing::debug!(
                            feature = %spec.feature,
                            attempt,
                            max,
                            error = %e,
                            "connection error"
                        );
                    }
                }
                Err(e) if e.is_protocol() => {
                    tracing::debug!(
                        feature = %spec.feature,
                        attempt,
                        max,
                        error = %e,
                        "protocol error"
                    );
                }
                Err(e) => {
                    if spec.feature == Feature::Portforward {
                        tracing::warn!(
                            attempt,
                            max,
                            error = %e,
                            "unexpected error during portforward check"
                        );
                    } else {
                        tracing::debug!(
                            feature = %spec.feature,
                            attempt,
                            max,
                            error = %e,
                            "unexpected error"
                        );
                    }
                }
            }

            tokio::time::sleep(self.config.retry_delay()).await;
        }

        false
    }
}
