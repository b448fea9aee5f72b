//! Configuration resolution for unialias.
//!
//! Every option can come from a command-line flag, an environment variable
//! of the same name, or a file named by `<NAME>__FILE` (Docker / Kubernetes
//! secrets). Precedence, highest first:
//!
//! 1. command-line flag
//! 2. contents of the file named by `<NAME>__FILE`, verbatim, when that
//!    file exists
//! 3. `<NAME>` itself
//! 4. built-in default
//!
//! The environment is read through a lookup closure so the layering stays a
//! pure function; [`load`] plugs in the process environment. Layers are
//! merged with figment and the result is validated into a
//! [`unialias_core::SyncConfig`].

use std::io::ErrorKind;
use std::time::Duration;

use figment::{Figment, providers::Serialized};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use unialias_core::{PlatformHint, SyncConfig, TlsVerification};

/// Suffix that turns an environment variable into a path to read the value from.
pub const FILE_SUFFIX: &str = "__FILE";

pub const DEFAULT_SITE: &str = "default";
pub const DEFAULT_BASE_URL: &str = "https://unifi:8443";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "{field} is missing. Pass in as an argument, or set an environment var of the same \
         name ({env}). Use {env}__FILE to read the value from a file."
    )]
    Missing { field: &'static str, env: &'static str },

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("cannot read {env}__FILE ({path}): {source}")]
    SecretFile {
        env: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Layers ──────────────────────────────────────────────────────────

/// One source's view of the options, all as raw strings.
///
/// `None` means "this source says nothing", so a later layer only
/// overrides the fields it actually sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigLayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_verify_ssl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_ssl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daemonize: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl ConfigLayer {
    /// Built-in defaults for the optional settings.
    pub fn defaults() -> Self {
        Self {
            site: Some(DEFAULT_SITE.into()),
            base_url: Some(DEFAULT_BASE_URL.into()),
            daemonize: Some("0".into()),
            platform: Some("classic".into()),
            ..Self::default()
        }
    }

    /// Read every option from the environment via `lookup`, honouring
    /// `<NAME>__FILE` indirection.
    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| env_value(key, &lookup);
        Ok(Self {
            username: get("USERNAME")?,
            password: get("PASSWORD")?,
            site: get("SITE")?,
            base_url: get("BASE_URL")?,
            no_verify_ssl: get("NO_VERIFY_SSL")?,
            verify_ssl: get("VERIFY_SSL")?,
            daemonize: get("DAEMONIZE")?,
            platform: get("PLATFORM")?,
        })
    }
}

/// Resolve one environment key: the file named by `<key>__FILE` if it
/// exists, else `<key>` itself, else nothing.
///
/// File contents are taken exactly as read, trailing newline included.
/// A file that exists but cannot be read (permissions, not UTF-8) is an
/// error rather than a silent fallback.
pub fn env_value(
    key: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Option<String>, ConfigError> {
    if let Some(file) = lookup(&format!("{key}{FILE_SUFFIX}")).filter(|f| !f.is_empty()) {
        match std::fs::read_to_string(&file) {
            Ok(contents) => return Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key, path = %file, "secret file not found, using {key}");
            }
            Err(source) => {
                return Err(ConfigError::SecretFile {
                    env: key.to_owned(),
                    path: file,
                    source,
                });
            }
        }
    }
    Ok(lookup(key))
}

/// Merge `defaults < env < cli` into a single layer.
pub fn merge_layers(cli: &ConfigLayer, env: &ConfigLayer) -> Result<ConfigLayer, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(ConfigLayer::defaults()))
        .merge(Serialized::defaults(env))
        .merge(Serialized::defaults(cli));

    Ok(figment.extract()?)
}

// ── Validation ──────────────────────────────────────────────────────

/// Case-insensitive `true/1/t/y/yes`; anything else is false.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "t" | "y" | "yes"
    )
}

fn parse_platform(value: &str) -> Result<PlatformHint, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "auto" => Ok(PlatformHint::Auto),
        "unifi-os" | "unifios" => Ok(PlatformHint::UnifiOs),
        "classic" | "standalone" => Ok(PlatformHint::Classic),
        other => Err(ConfigError::Validation {
            field: "platform",
            reason: format!("expected 'auto', 'unifi-os', or 'classic', got '{other}'"),
        }),
    }
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| ConfigError::Validation {
        field: "base-url",
        reason: format!("{e}: {value}"),
    })
}

fn parse_daemonize(value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "daemonize",
            reason: format!("expected a number of seconds, got '{value}'"),
        })
}

fn tls_from(layer: &ConfigLayer) -> TlsVerification {
    let disabled = layer.no_verify_ssl.as_deref().is_some_and(parse_bool)
        || layer.verify_ssl.as_deref().is_some_and(|v| !parse_bool(v));
    if disabled {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::Verify
    }
}

/// Turn a merged layer into a validated [`SyncConfig`].
pub fn validate(layer: ConfigLayer) -> Result<SyncConfig, ConfigError> {
    let tls = tls_from(&layer);

    let username = layer.username.ok_or(ConfigError::Missing {
        field: "username",
        env: "USERNAME",
    })?;
    let password = layer.password.ok_or(ConfigError::Missing {
        field: "password",
        env: "PASSWORD",
    })?;

    let base_url = parse_base_url(layer.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
    let daemonize_secs = parse_daemonize(layer.daemonize.as_deref().unwrap_or("0"))?;
    let platform = parse_platform(layer.platform.as_deref().unwrap_or("classic"))?;

    Ok(SyncConfig {
        base_url,
        site: layer.site.unwrap_or_else(|| DEFAULT_SITE.into()),
        username,
        password: SecretString::from(password),
        tls,
        platform,
        daemonize_secs,
        timeout: DEFAULT_TIMEOUT,
    })
}

// ── Entry points ────────────────────────────────────────────────────

/// Resolve `cli` against an environment given by `lookup`.
pub fn resolve(
    cli: &ConfigLayer,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SyncConfig, ConfigError> {
    let env = ConfigLayer::from_env(lookup)?;
    validate(merge_layers(cli, &env)?)
}

/// Resolve `cli` against the process environment.
pub fn load(cli: &ConfigLayer) -> Result<SyncConfig, ConfigError> {
    resolve(cli, |key| std::env::var(key).ok())
}
