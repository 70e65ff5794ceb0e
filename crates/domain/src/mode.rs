//! Operating role of a node.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operational role a node is currently configured for.
///
/// Derived once per probe run from the loosely-typed `netmode`/`mode` field
/// a node reports. Firmware is inconsistent about this field (string names
/// on newer builds, small integer codes on older ones), so normalization
/// goes through [`RawMode`] and one total lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Plain router. The firmware calls this "default".
    Default,
    AccessPoint,
    Repeater,
    Mesh,
    MeshLeaf,
    MeshNode,
    /// Reserved for callers that persist a mode they could not resolve.
    /// Normalization itself never produces this; it falls back to `Default`.
    Unknown,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Default => "default",
            Mode::AccessPoint => "access_point",
            Mode::Repeater => "repeater",
            Mode::Mesh => "mesh",
            Mode::MeshLeaf => "mesh_leaf",
            Mode::MeshNode => "mesh_node",
            Mode::Unknown => "unknown",
        }
    }

    /// Total lookup from a raw reported value. Unrecognized values map to
    /// [`Mode::Default`] — a node we cannot classify is treated as a router.
    pub fn from_raw(raw: &RawMode) -> Self {
        let key = match raw {
            RawMode::Str(s) => s.trim().to_ascii_lowercase(),
            RawMode::Num(n) => n.to_string(),
        };

        match key.as_str() {
            "repeater" => Mode::Repeater,
            "access_point" | "ap" => Mode::AccessPoint,
            "mesh" => Mode::Mesh,
            "router" | "default" => Mode::Default,
            "8" => Mode::MeshLeaf,
            "3" => Mode::MeshNode,
            _ => Mode::Default,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw mode value as a node reports it: a string or an integer code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawMode {
    Str(String),
    Num(i64),
}

impl RawMode {
    /// Pull a raw mode out of a mode-query payload.
    ///
    /// Accepts a bare scalar, or an object carrying a `netmode` field with
    /// `mode` as the fallback key. Returns `None` for anything else; the
    /// caller degrades to [`Mode::Default`].
    pub fn from_payload(value: &serde_json::Value) -> Option<Self> {
        let scalar = match value {
            serde_json::Value::Object(map) => map.get("netmode").or_else(|| map.get("mode"))?,
            other => other,
        };

        match scalar {
            serde_json::Value::String(s) => Some(RawMode::Str(s.clone())),
            serde_json::Value::Number(n) => n.as_i64().map(RawMode::Num),
            _ => None,
        }
    }
}
