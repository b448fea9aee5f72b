// ── Domain model ──
//
// Flat records fetched fresh on every pass and dropped at its end.

use std::fmt;

use unialias_api::LegacyClientEntry;

/// One network client as reported by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    /// Identifier used for alias updates (`user_id` on the wire).
    pub client_id: Option<String>,
    pub ip: Option<String>,
    /// Operator-visible display name (`name` on the wire).
    pub alias: Option<String>,
    pub mac: Option<String>,
}

impl From<LegacyClientEntry> for ClientRecord {
    fn from(entry: LegacyClientEntry) -> Self {
        Self {
            client_id: entry.user_id,
            ip: entry.ip,
            alias: entry.name,
            mac: entry.mac,
        }
    }
}

/// Outcome of a single reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Clients with a `client_id` that were considered.
    pub examined: usize,
    /// Updates the controller acknowledged with `rc == "ok"`.
    pub updated: usize,
    /// Updates the controller refused or that failed in transit.
    pub failed: usize,
    /// No IP, no reverse DNS answer, or alias already current.
    pub skipped: usize,
}

impl fmt::Display for PassSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} examined, {} updated, {} failed, {} unchanged",
            self.examined, self.updated, self.failed, self.skipped
        )
    }
}
