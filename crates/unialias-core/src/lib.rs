//! Alias reconciliation between a UniFi controller and reverse DNS.
//!
//! - **[`AliasSync`]** runs reconciliation passes: open a [`Session`], list
//!   clients, reverse-resolve each IP, and push the first DNS label as the
//!   client's alias when it differs. Passes repeat on a fixed interval in
//!   daemon mode.
//!
//! - **[`ControllerApi`]** is the narrow seam to the controller (`login`,
//!   `logout`, `list_clients`, `update_alias`). [`LegacyController`] is the
//!   HTTP implementation over `unialias-api`.
//!
//! - **[`HostnameResolver`]** is the seam to reverse DNS;
//!   [`SystemResolver`] asks the OS resolver.
//!
//! - **[`SyncConfig`]** is the immutable configuration record built by
//!   `unialias-config` and handed in by the binary; core never reads the
//!   environment.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod resolver;
pub mod session;
pub mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{PlatformHint, SyncConfig, TlsVerification};
pub use controller::{ControllerApi, LegacyController};
pub use error::CoreError;
pub use model::{ClientRecord, PassSummary};
pub use resolver::{HostnameResolver, SystemResolver, short_hostname};
pub use session::Session;
pub use sync::AliasSync;
