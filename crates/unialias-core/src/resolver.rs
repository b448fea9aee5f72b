// ── Reverse DNS ──
//
// Lookup failures are an expected outcome (no PTR record, resolver
// timeout) and never surface as errors: the client is simply skipped.

use std::future::Future;
use std::net::IpAddr;

use tracing::debug;

/// Reverse-resolves an address to a hostname.
pub trait HostnameResolver {
    /// The canonical name for `ip`, or `None` when there is no answer.
    fn reverse_lookup(&self, ip: IpAddr) -> impl Future<Output = Option<String>> + Send;
}

/// The platform resolver (`getnameinfo`), run on tokio's blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl HostnameResolver for SystemResolver {
    async fn reverse_lookup(&self, ip: IpAddr) -> Option<String> {
        let lookup = tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&ip)).await;

        match lookup {
            // getnameinfo echoes the numeric address back when there is no PTR record.
            Ok(Ok(name)) if name.parse::<IpAddr>().is_ok() => {
                debug!(%ip, "no PTR record");
                None
            }
            Ok(Ok(name)) => Some(name),
            Ok(Err(e)) => {
                debug!(%ip, error = %e, "reverse lookup failed");
                None
            }
            Err(e) => {
                debug!(%ip, error = %e, "reverse lookup task failed");
                None
            }
        }
    }
}

/// First DNS label of `fqdn`: everything before the first `.`.
///
/// Returns `None` when that label is empty.
pub fn short_hostname(fqdn: &str) -> Option<&str> {
    let label = fqdn.split_once('.').map_or(fqdn, |(label, _)| label);
    (!label.is_empty()).then_some(label)
}
