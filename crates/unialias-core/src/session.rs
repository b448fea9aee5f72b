// ── Session scope ──
//
// A pass opens exactly one session and must close it on every exit path.
// `Session::close` is async, so release can't live in `Drop`; the guard
// only reports a session that was dropped while still open.

use tracing::{debug, warn};

use crate::controller::ControllerApi;
use crate::error::CoreError;
use crate::model::ClientRecord;

/// An authenticated controller session scoped to one pass.
pub struct Session<'a, C: ControllerApi> {
    api: &'a C,
    open: bool,
}

impl<'a, C: ControllerApi> Session<'a, C> {
    /// Log in. On failure there is nothing to release.
    pub async fn open(api: &'a C) -> Result<Self, CoreError> {
        api.login().await?;
        debug!("session opened");
        Ok(Self { api, open: true })
    }

    pub async fn list_clients(&self) -> Result<Vec<ClientRecord>, CoreError> {
        self.api.list_clients().await
    }

    pub async fn update_alias(&self, client_id: &str, alias: &str) -> Result<bool, CoreError> {
        self.api.update_alias(client_id, alias).await
    }

    /// Log out. A failed logout is logged and swallowed so it never masks
    /// the outcome of the pass.
    pub async fn close(mut self) {
        self.open = false;
        match self.api.logout().await {
            Ok(()) => debug!("session closed"),
            Err(e) => warn!(error = %e, "logout failed"),
        }
    }
}

impl<C: ControllerApi> Drop for Session<'_, C> {
    fn drop(&mut self) {
        if self.open {
            warn!("controller session dropped without logout");
        }
    }
}
