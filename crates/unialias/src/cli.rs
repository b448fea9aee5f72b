//! Command-line surface.
//!
//! Every flag here is optional at the clap level: unset flags fall through
//! to the environment (and `<NAME>__FILE`) in unialias-config, so clap
//! never reads the environment itself.

use clap::Parser;

use unialias_config::ConfigLayer;

/// Keep UniFi client aliases in sync with reverse DNS.
///
/// Each pass logs in to the controller, resolves every client IP to a
/// hostname, and renames clients whose alias differs from the first DNS
/// label. Every option can also be set through an environment variable of
/// the same name (USERNAME, BASE_URL, ...) or read from the file named by
/// <NAME>__FILE.
#[derive(Debug, Parser)]
#[command(name = "unialias", version, about, long_about)]
pub struct Cli {
    /// Controller login [env: USERNAME]
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Controller password [env: PASSWORD]
    #[arg(long, short = 'p')]
    pub password: Option<String>,

    /// Site identifier [env: SITE] [default: default]
    #[arg(long)]
    pub site: Option<String>,

    /// Controller root URL [env: BASE_URL] [default: https://unifi:8443]
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Accept self-signed TLS certificates [env: NO_VERIFY_SSL]
    #[arg(long)]
    pub no_verify_ssl: bool,

    /// Repeat every SECONDS; 0 runs a single pass [env: DAEMONIZE]
    #[arg(long, value_name = "SECONDS")]
    pub daemonize: Option<String>,

    /// Controller flavour: auto, unifi-os, classic [env: PLATFORM] [default: classic]
    #[arg(long)]
    pub platform: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The command-line layer for config resolution.
    pub fn config_layer(&self) -> ConfigLayer {
        ConfigLayer {
            username: self.username.clone(),
            password: self.password.clone(),
            site: self.site.clone(),
            base_url: self.base_url.clone(),
            no_verify_ssl: self.no_verify_ssl.then(|| "true".to_owned()),
            verify_ssl: None,
            daemonize: self.daemonize.clone(),
            platform: self.platform.clone(),
        }
    }
}
