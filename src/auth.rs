//! Auth-domain identifiers, redacted secrets, and client credentials.

pub mod credentials;
pub mod id;
pub mod secret;

pub use credentials::*;
pub use id::*;
pub use secret::*;
