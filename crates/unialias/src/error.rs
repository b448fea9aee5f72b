//! CLI error types with miette diagnostics.
//!
//! Maps config and core errors into user-facing messages with exit codes.

use miette::Diagnostic;
use thiserror::Error;

use unialias_config::ConfigError;
use unialias_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("Missing required option: {field}")]
    #[diagnostic(
        code(unialias::missing_option),
        help(
            "Pass in as an argument (--{field}), or set an environment var of the same name \
             ({env}).\nUse {env}__FILE to read the value from a file."
        )
    )]
    MissingOption { field: &'static str, env: &'static str },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(unialias::validation))]
    Validation { field: &'static str, reason: String },

    #[error("Cannot read secret file {path} (from {env}__FILE)")]
    #[diagnostic(
        code(unialias::secret_file),
        help("Check that the file is readable by this process and holds UTF-8 text.")
    )]
    SecretFile {
        env: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(unialias::config))]
    Config(Box<figment::Error>),

    // ── Controller ───────────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(unialias::auth_failed),
        help("Check USERNAME / PASSWORD, and --platform if auto-detection picked the wrong login endpoint.")
    )]
    AuthFailed { message: String },

    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(unialias::connection_failed),
        help(
            "Check that the controller is running and reachable.\n\
             Reason: {reason}\n\
             Self-signed certificate? Try --no-verify-ssl"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Controller request timed out")]
    #[diagnostic(code(unialias::timeout))]
    Timeout,

    #[error("Controller error: {message}")]
    #[diagnostic(code(unialias::api_error))]
    Controller { message: String },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingOption { .. }
            | Self::Validation { .. }
            | Self::SecretFile { .. }
            | Self::Config(_) => exit_code::USAGE,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::ConnectionFailed { .. } | Self::Timeout => exit_code::CONNECTION,
            Self::Controller { .. } => exit_code::GENERAL,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Missing { field, env } => Self::MissingOption { field, env },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::SecretFile { env, path, source } => {
                Self::SecretFile { env, path, source }
            }
            ConfigError::Figment(e) => Self::Config(e),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::Config { message } => Self::Validation {
                field: "configuration",
                reason: message,
            },
            CoreError::Api { message, status } => Self::Controller {
                message: match status {
                    Some(status) => format!("{message} (HTTP {status})"),
                    None => message,
                },
            },
            CoreError::Internal(message) => Self::Controller { message },
        }
    }
}
