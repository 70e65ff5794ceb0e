//! Configuration for the meshmap engine and CLI.
//!
//! Loaded from a TOML file; every section and field has a default so an
//! absent file yields a fully usable configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
}

impl Config {
    /// Load from a TOML file. A missing file yields defaults; unreadable or
    /// invalid content is a hard error (a present config must be honored).
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Sanity-check the configuration. Returns human-readable issues;
    /// empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.discovery.candidates.is_empty() {
            issues.push("discovery.candidates is empty — nothing to discover from".into());
        }
        if self.discovery.max_depth == 0 {
            issues.push("discovery.max_depth must be at least 1".into());
        }
        if self.probe.max_retries == 0 {
            issues.push("probe.max_retries must be at least 1".into());
        }
        issues
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Discovery
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Candidate root addresses, tried in order. The first to return a
    /// well-formed topology descriptor wins.
    #[serde(default = "d_candidates")]
    pub candidates: Vec<String>,
    /// Timeout for the lightweight liveness probe.
    #[serde(default = "d_check_timeout_ms")]
    pub check_timeout_ms: u64,
    /// Timeout for the root topology query.
    #[serde(default = "d_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Ceiling on child recursion. The reported graph is
    /// firmware-controlled; real meshes are nowhere near this deep.
    #[serde(default = "d_max_depth")]
    pub max_depth: usize,
}

impl DiscoveryConfig {
    pub fn check_timeout(&self) -> Duration {
        Duration::from_millis(self.check_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            candidates: d_candidates(),
            check_timeout_ms: d_check_timeout_ms(),
            request_timeout_ms: d_request_timeout_ms(),
            max_depth: d_max_depth(),
        }
    }
}

fn d_candidates() -> Vec<String> {
    vec![
        "miwifi.com".into(),
        "192.168.31.1".into(),
        "192.168.1.1".into(),
    ]
}

fn d_check_timeout_ms() -> u64 {
    3_000
}

fn d_request_timeout_ms() -> u64 {
    10_000
}

fn d_max_depth() -> usize {
    16
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Probe
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Attempts per feature before recording it unsupported.
    #[serde(default = "d_max_retries")]
    pub max_retries: u32,
    /// Pause between attempts.
    #[serde(default = "d_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Timeout for each probe call.
    #[serde(default = "d_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Suppress the exhaustion warning (re-checks triggered from
    /// automation set this; interactive runs want the advice).
    #[serde(default)]
    pub silent: bool,
}

impl ProbeConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_retries: d_max_retries(),
            retry_delay_ms: d_retry_delay_ms(),
            request_timeout_ms: d_request_timeout_ms(),
            silent: false,
        }
    }
}

fn d_max_retries() -> u32 {
    5
}

fn d_retry_delay_ms() -> u64 {
    1_000
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Unsupported registry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Path of the user-override file (JSON, feature name → model names).
    #[serde(default = "d_override_path")]
    pub override_path: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            override_path: d_override_path(),
        }
    }
}

fn d_override_path() -> PathBuf {
    PathBuf::from("unsupported_user.json")
}
