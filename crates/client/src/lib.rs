//! `mm-client` — the device RPC boundary.
//!
//! This crate provides:
//! - The [`DeviceClient`] trait: one method per management-API call the
//!   engine knows about, every call with an explicit per-call timeout.
//! - The [`ClientFactory`] trait for obtaining a client for an arbitrary
//!   address during topology traversal.
//! - [`RestDeviceClient`], a `reqwest`-based implementation against the
//!   router's unauthenticated status API. Login, request signing, and
//!   session handling are deliberately not modeled here.
//!
//! The engine only ever sees the traits; tests substitute scripted mocks.

pub mod error;
pub mod rest;
pub mod traits;

pub use error::{ClientError, ClientResult};
pub use rest::{RestClientFactory, RestDeviceClient};
pub use traits::{ClientFactory, DeviceClient};
