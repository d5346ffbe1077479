//! Provider-facing descriptors.
//!
//! `descriptor` exposes validated metadata (`ProviderDescriptor`) covering HTTPS-only
//! endpoints, the connection discriminator identities are matched on, the preferred client
//! authentication method, and per-request transport settings.

pub mod descriptor;

pub use descriptor::*;
