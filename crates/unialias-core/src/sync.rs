// ── Reconciliation loop ──
//
// One pass: open a session, list clients, reverse-resolve every IP, and
// push the first DNS label as the alias wherever it differs. Per-client
// problems stay inside the per-client step; only authentication failures
// escape a pass as fatal.

use std::future::Future;
use std::net::IpAddr;
use std::pin::pin;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::controller::ControllerApi;
use crate::error::CoreError;
use crate::model::{ClientRecord, PassSummary};
use crate::resolver::{HostnameResolver, short_hostname};
use crate::session::Session;

/// What happened to a single client during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClientOutcome {
    Updated,
    Failed,
    Unchanged,
}

/// Drives reconciliation passes with a given resolver.
#[derive(Debug, Clone, Default)]
pub struct AliasSync<R> {
    resolver: R,
}

impl<R: HostnameResolver + Sync> AliasSync<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Run a single reconciliation pass against `api`.
    ///
    /// The session is closed whether the pass succeeds or fails.
    pub async fn pass<C: ControllerApi + Sync>(&self, api: &C) -> Result<PassSummary, CoreError> {
        info!("Updating all clients");

        let session = Session::open(api).await?;
        let outcome = self.reconcile(&session).await;
        session.close().await;

        outcome
    }

    /// Run once when `interval` is `None`; otherwise repeat passes with
    /// `interval` of sleep between the end of one pass and the start of the
    /// next, until a fatal error or until `shutdown` resolves.
    ///
    /// `connect` builds a fresh controller handle for each pass.
    pub async fn run<C, F, Fut, S>(
        &self,
        interval: Option<Duration>,
        mut connect: F,
        shutdown: S,
    ) -> Result<(), CoreError>
    where
        C: ControllerApi + Sync,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<C, CoreError>>,
        S: Future<Output = ()>,
    {
        let Some(interval) = interval else {
            let api = connect().await?;
            let summary = self.pass(&api).await?;
            info!("Pass complete: {summary}");
            return Ok(());
        };

        let mut shutdown = pin!(shutdown);
        loop {
            let attempt = match connect().await {
                Ok(api) => self.pass(&api).await,
                Err(e) => Err(e),
            };

            match attempt {
                Ok(summary) => info!("Pass complete: {summary}"),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => error!(error = %e, "pass failed, retrying in {}s", interval.as_secs()),
            }

            tokio::select! {
                () = tokio::time::sleep(interval) => {}
                () = &mut shutdown => {
                    info!("shutdown requested");
                    return Ok(());
                }
            }
        }
    }

    async fn reconcile<C: ControllerApi + Sync>(
        &self,
        session: &Session<'_, C>,
    ) -> Result<PassSummary, CoreError> {
        let clients = session.list_clients().await?;
        debug!(count = clients.len(), "fetched clients");

        let mut summary = PassSummary::default();
        for client in &clients {
            let Some(client_id) = client.client_id.as_deref() else {
                continue;
            };
            summary.examined += 1;

            match self.reconcile_client(session, client_id, client).await? {
                ClientOutcome::Updated => summary.updated += 1,
                ClientOutcome::Failed => summary.failed += 1,
                ClientOutcome::Unchanged => summary.skipped += 1,
            }
        }

        Ok(summary)
    }

    async fn reconcile_client<C: ControllerApi + Sync>(
        &self,
        session: &Session<'_, C>,
        client_id: &str,
        client: &ClientRecord,
    ) -> Result<ClientOutcome, CoreError> {
        let Some(ip) = client.ip.as_deref() else {
            debug!(client_id, mac = client.mac.as_deref(), "no IP address");
            return Ok(ClientOutcome::Unchanged);
        };

        let Some(new_alias) = self.resolve_alias(ip).await else {
            return Ok(ClientOutcome::Unchanged);
        };

        if client.alias.as_deref() == Some(new_alias.as_str()) {
            return Ok(ClientOutcome::Unchanged);
        }

        let old_alias = client.alias.as_deref().unwrap_or("None");
        match session.update_alias(client_id, &new_alias).await {
            Ok(true) => {
                info!("{ip}: {old_alias} -> {new_alias}");
                Ok(ClientOutcome::Updated)
            }
            Ok(false) => {
                warn!("Unable to update {ip}!");
                Ok(ClientOutcome::Failed)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!(error = %e, "Unable to update {ip}!");
                Ok(ClientOutcome::Failed)
            }
        }
    }

    /// Reverse-resolve `ip` and reduce the answer to its first label.
    async fn resolve_alias(&self, ip: &str) -> Option<String> {
        let addr: IpAddr = match ip.parse() {
            Ok(addr) => addr,
            Err(e) => {
                debug!(ip, error = %e, "unparsable IP address");
                return None;
            }
        };

        let fqdn = self.resolver.reverse_lookup(addr).await?;
        short_hostname(&fqdn).map(str::to_owned)
    }
}
