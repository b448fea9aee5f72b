// Legacy API authentication
//
// Cookie-based session login/logout and controller platform detection.
// The login endpoint sets a session cookie in the client's jar;
// subsequent requests use that cookie automatically.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::auth::ControllerPlatform;
use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::transport::TransportConfig;

impl LegacyClient {
    /// Authenticate with the controller using username/password.
    ///
    /// On success the session cookie is stored in the client's cookie jar
    /// and used for all subsequent requests. The login endpoint differs
    /// by platform:
    /// - UniFi OS: `POST /api/auth/login`
    /// - Standalone: `POST /api/login`
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.root_url(self.platform().login_path())?;

        debug!("logging in at {}", url);

        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });

        let resp = self.http().post(url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = format!("login failed (HTTP {status}): {}", body.trim());
            // 400/401 reject the credentials; anything else (502, 503) is not an auth failure.
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST => {
                    Error::Authentication { message }
                }
                _ => Error::LegacyApi { message },
            });
        }

        // UniFi OS requires the CSRF token on every mutating request
        // through the proxy.
        if let Some(token) = resp
            .headers()
            .get("X-CSRF-Token")
            .or_else(|| resp.headers().get("x-csrf-token"))
            .and_then(|v| v.to_str().ok())
        {
            self.set_csrf_token(token.to_owned());
        }

        debug!("login successful");
        Ok(())
    }

    /// End the current session.
    ///
    /// Platform-specific logout endpoint:
    /// - UniFi OS: `POST /api/auth/logout`
    /// - Standalone: `POST /api/logout`
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.root_url(self.platform().logout_path())?;

        debug!("logging out at {}", url);

        let builder = self.http().post(url);
        let resp = builder.send().await?;
        self.clear_csrf_token();

        if !resp.status().is_success() {
            return Err(Error::LegacyApi {
                message: format!("logout failed (HTTP {})", resp.status()),
            });
        }

        debug!("logout complete");
        Ok(())
    }

    /// Auto-detect the controller platform by probing login endpoints.
    ///
    /// Tries the UniFi OS endpoint first (`/api/auth/login`). If it
    /// responds with anything but 404, we're on UniFi OS. Otherwise falls
    /// back to the standalone endpoint.
    pub async fn detect_platform(
        base_url: &Url,
        transport: &TransportConfig,
    ) -> Result<ControllerPlatform, Error> {
        let http = transport.build_client()?;
        let base = base_url.as_str().trim_end_matches('/');

        let unifi_os_url = Url::parse(&format!("{base}/api/auth/login"))?;
        debug!("probing UniFi OS at {}", unifi_os_url);

        if let Ok(resp) = http.get(unifi_os_url).send().await {
            // UniFi OS returns a response (even 401/405) at this path.
            // Standalone controllers don't have this endpoint at all.
            if resp.status() != StatusCode::NOT_FOUND {
                debug!("detected UniFi OS platform");
                return Ok(ControllerPlatform::UnifiOs);
            }
        }

        let standalone_url = Url::parse(&format!("{base}/api/login"))?;
        debug!("probing standalone at {}", standalone_url);

        http.get(standalone_url).send().await?;
        debug!("detected standalone (classic) controller");
        Ok(ControllerPlatform::ClassicController)
    }
}
