//! Identity records exchanged with the authentication pipeline.
//!
//! `profile` maps the provider's `/v1/me` payload into a [`NormalizedProfile`], `user`
//! models the caller's [`UserRecord`] with its linked identities keyed by connection, and
//! `context` holds the [`AuthContext`] claim bags written by the refresh flow.

pub mod context;
pub mod profile;
pub mod user;

pub use context::*;
pub use profile::*;
pub use user::*;
