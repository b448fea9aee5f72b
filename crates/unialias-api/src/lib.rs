// unialias-api: Async client for the UniFi controller legacy API
//
// Only the slice of the legacy surface needed to keep client aliases in
// step with DNS: session login/logout, platform detection, listing
// connected clients, and renaming a client.

pub mod auth;
pub mod error;
pub mod legacy;
pub mod transport;

pub use auth::ControllerPlatform;
pub use error::Error;
pub use legacy::LegacyClient;
pub use legacy::models::LegacyClientEntry;
pub use transport::{TlsMode, TransportConfig};
