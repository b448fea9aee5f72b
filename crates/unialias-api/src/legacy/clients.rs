// Legacy API client (station) endpoints
//
// Reading connected stations via stat/sta and renaming the user object
// behind a station via rest/user.

use tracing::{debug, warn};

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::{AliasUpdate, LegacyClientEntry};

impl LegacyClient {
    /// List all currently connected clients (stations).
    ///
    /// `GET /api/s/{site}/stat/sta`
    pub async fn list_clients(&self) -> Result<Vec<LegacyClientEntry>, Error> {
        let url = self.site_url("stat/sta")?;
        debug!(site = self.site(), "listing connected clients");
        self.get(url).await
    }

    /// Set the alias (`name`) of a client's user object.
    ///
    /// `PUT /api/s/{site}/rest/user/{user_id}` with `{"name": "..."}`
    ///
    /// Returns `Ok(true)` when the controller answers with `meta.rc == "ok"`
    /// and `Ok(false)` for any other `rc`. A 401 is still an
    /// [`Error::Authentication`].
    pub async fn update_alias(&self, user_id: &str, alias: &str) -> Result<bool, Error> {
        let url = self.site_url(&format!("rest/user/{user_id}"))?;
        debug!(user_id, alias, "updating client alias");

        let envelope = self
            .put_envelope::<serde_json::Value>(url, &AliasUpdate { name: alias })
            .await?;

        if !envelope.meta.is_ok() {
            warn!(
                user_id,
                rc = %envelope.meta.rc,
                msg = envelope.meta.msg.as_deref().unwrap_or(""),
                "controller rejected alias update"
            );
        }
        Ok(envelope.meta.is_ok())
    }
}
