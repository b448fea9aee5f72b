// ── Core error types ──
//
// Domain errors from unialias-core. Consumers never see HTTP status codes
// or JSON parse failures directly; the `From<unialias_api::Error>` impl
// translates transport-layer errors into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Controller request timed out")]
    Timeout,

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Authentication failures end the process; everything else is
    /// scoped to the pass that hit it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. } | Self::Config { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<unialias_api::Error> for CoreError {
    fn from(err: unialias_api::Error) -> Self {
        match err {
            unialias_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            unialias_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            unialias_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            unialias_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            unialias_api::Error::LegacyApi { message } => CoreError::Api {
                message,
                status: None,
            },
            unialias_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
