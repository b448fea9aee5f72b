// Legacy API response types
//
// All responses are wrapped in the `LegacyResponse<T>` envelope. Fields use
// `#[serde(default)]` liberally because the API is inconsistent about field
// presence across firmware versions.

use serde::{Deserialize, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Standard UniFi legacy API response envelope.
///
/// ```json
/// { "meta": { "rc": "ok", "msg": "optional" }, "data": [...] }
/// ```
#[derive(Debug, Deserialize)]
pub struct LegacyResponse<T> {
    pub meta: Meta,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Metadata from the legacy envelope. `rc` == `"ok"` means success.
#[derive(Debug, Deserialize)]
pub struct Meta {
    pub rc: String,
    #[serde(default)]
    pub msg: Option<String>,
}

impl Meta {
    pub fn is_ok(&self) -> bool {
        self.rc == "ok"
    }
}

// ── Client (Station) ─────────────────────────────────────────────────

/// Connected client from `stat/sta`.
///
/// `user_id` is the id of the persistent user object behind the station;
/// it is what `rest/user/{id}` expects. `name` is the operator-set alias.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyClientEntry {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Body for `PUT rest/user/{id}` when only the alias changes.
#[derive(Debug, Serialize)]
pub struct AliasUpdate<'a> {
    pub name: &'a str,
}
