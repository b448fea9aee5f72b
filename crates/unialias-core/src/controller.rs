// ── Controller seam ──
//
// The reconciliation loop only ever needs four controller operations.
// They live behind `ControllerApi` so passes can run against a fake in
// tests; `LegacyController` is the one real implementation.

use std::future::Future;

use secrecy::SecretString;
use tracing::debug;

use unialias_api::LegacyClient;

use crate::config::SyncConfig;
use crate::error::CoreError;
use crate::model::ClientRecord;

/// Operations the reconciliation loop performs against a controller.
pub trait ControllerApi {
    /// Start an authenticated session.
    fn login(&self) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// End the session started by [`login`](Self::login).
    fn logout(&self) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Every client currently known for the configured site.
    fn list_clients(&self) -> impl Future<Output = Result<Vec<ClientRecord>, CoreError>> + Send;

    /// Set the alias of `client_id`. `Ok(false)` means the controller
    /// answered but refused the change.
    fn update_alias(
        &self,
        client_id: &str,
        alias: &str,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;
}

impl<C: ControllerApi + Sync> ControllerApi for &C {
    fn login(&self) -> impl Future<Output = Result<(), CoreError>> + Send {
        (**self).login()
    }

    fn logout(&self) -> impl Future<Output = Result<(), CoreError>> + Send {
        (**self).logout()
    }

    fn list_clients(&self) -> impl Future<Output = Result<Vec<ClientRecord>, CoreError>> + Send {
        (**self).list_clients()
    }

    fn update_alias(
        &self,
        client_id: &str,
        alias: &str,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send {
        (**self).update_alias(client_id, alias)
    }
}

/// [`ControllerApi`] over the controller's legacy HTTP API.
///
/// Built fresh for every pass so the cookie jar never outlives it.
pub struct LegacyController {
    client: LegacyClient,
    username: String,
    password: SecretString,
}

impl LegacyController {
    /// Build an HTTP client for `config`, probing the platform unless one
    /// is forced. Does NOT log in.
    pub async fn from_config(config: &SyncConfig) -> Result<Self, CoreError> {
        let transport = config.transport();

        let platform = match config.platform.forced() {
            Some(platform) => platform,
            None => LegacyClient::detect_platform(&config.base_url, &transport).await?,
        };
        debug!(?platform, "controller platform");

        let client = LegacyClient::new(
            config.base_url.clone(),
            config.site.clone(),
            platform,
            &transport,
        )?;

        Ok(Self {
            client,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }
}

impl ControllerApi for LegacyController {
    async fn login(&self) -> Result<(), CoreError> {
        Ok(self.client.login(&self.username, &self.password).await?)
    }

    async fn logout(&self) -> Result<(), CoreError> {
        Ok(self.client.logout().await?)
    }

    async fn list_clients(&self) -> Result<Vec<ClientRecord>, CoreError> {
        let entries = self.client.list_clients().await?;
        Ok(entries.into_iter().map(ClientRecord::from).collect())
    }

    async fn update_alias(&self, client_id: &str, alias: &str) -> Result<bool, CoreError> {
        Ok(self.client.update_alias(client_id, alias).await?)
    }
}
