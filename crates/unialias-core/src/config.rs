// ── Runtime configuration record ──
//
// Describes *what* to reconcile and *how* to reach the controller. Built
// once by unialias-config, never mutated, and never read from disk here.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use unialias_api::{ControllerPlatform, TlsMode, TransportConfig};

/// TLS verification strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// Verify the controller certificate (default).
    #[default]
    Verify,
    /// Skip verification (self-signed controllers).
    DangerAcceptInvalid,
}

/// Which login/path flavour the controller speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlatformHint {
    /// Probe the controller once per pass.
    Auto,
    /// UniFi OS console (`/proxy/network` prefix).
    UnifiOs,
    /// Standalone Network Application (`/api/login`).
    #[default]
    Classic,
}

impl PlatformHint {
    /// The forced platform, or `None` when detection is needed.
    pub fn forced(self) -> Option<ControllerPlatform> {
        match self {
            Self::Auto => None,
            Self::UnifiOs => Some(ControllerPlatform::UnifiOs),
            Self::Classic => Some(ControllerPlatform::ClassicController),
        }
    }
}

/// Resolved settings for one process run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Controller root, trailing slashes already stripped.
    pub base_url: Url,
    /// Site identifier (`default` unless configured).
    pub site: String,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    pub platform: PlatformHint,
    /// Seconds to sleep between passes. 0 = run once.
    pub daemonize_secs: u64,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl SyncConfig {
    /// Sleep between passes, or `None` for a single pass.
    pub fn interval(&self) -> Option<Duration> {
        (self.daemonize_secs > 0).then(|| Duration::from_secs(self.daemonize_secs))
    }

    /// Transport settings for a fresh per-pass HTTP client.
    pub fn transport(&self) -> TransportConfig {
        let tls = match self.tls {
            TlsVerification::Verify => TlsMode::System,
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            cookie_jar: None,
        }
        .with_cookie_jar()
    }
}
