#![allow(clippy::unwrap_used)]
// Integration tests for `LegacyClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use unialias_api::{ControllerPlatform, Error, LegacyClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(platform: ControllerPlatform) -> (MockServer, LegacyClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = LegacyClient::new(
        base_url,
        "default".into(),
        platform,
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

fn site_path(suffix: &str) -> String {
    format!("/api/s/default/{suffix}")
}

fn password(value: &str) -> secrecy::SecretString {
    value.to_string().into()
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "username": "admin", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "meta": { "rc": "ok" }, "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    client.login("admin", &password("hunter2")).await.unwrap();
}

#[tokio::test]
async fn test_login_unauthorized() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("api.err.Invalid"))
        .mount(&server)
        .await;

    let result = client.login("admin", &password("wrong")).await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(message.contains("401"), "expected status in message, got: {message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_bad_request_is_authentication() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(400).set_body_string("api.err.Invalid"))
        .mount(&server)
        .await;

    let result = client.login("admin", &password("wrong")).await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_login_service_unavailable_is_not_authentication() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client.login("admin", &password("hunter2")).await;

    match result {
        Err(Error::LegacyApi { ref message }) => {
            assert!(message.contains("503"), "expected status in message, got: {message}");
        }
        other => panic!("expected LegacyApi error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unifi_os_login_captures_csrf_for_updates() {
    let (server, client) = setup(ControllerPlatform::UnifiOs).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).insert_header("X-CSRF-Token", "tok-1"))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/proxy/network/api/s/default/rest/user/u1"))
        .and(header("X-CSRF-Token", "tok-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "meta": { "rc": "ok" }, "data": [{}] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.login("admin", &password("pw")).await.unwrap();
    assert!(client.update_alias("u1", "nas").await.unwrap());
}

#[tokio::test]
async fn test_logout() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.logout().await.unwrap();
}

// ── Platform detection ──────────────────────────────────────────────

#[tokio::test]
async fn test_detect_unifi_os() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;

    let base = Url::parse(&server.uri()).unwrap();
    let platform = LegacyClient::detect_platform(&base, &TransportConfig::default())
        .await
        .unwrap();
    assert_eq!(platform, ControllerPlatform::UnifiOs);
}

#[tokio::test]
async fn test_detect_classic_when_unifi_os_path_missing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let base = Url::parse(&server.uri()).unwrap();
    let platform = LegacyClient::detect_platform(&base, &TransportConfig::default())
        .await
        .unwrap();
    assert_eq!(platform, ControllerPlatform::ClassicController);
}

// ── Client tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_clients() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    let envelope = json!({
        "meta": { "rc": "ok" },
        "data": [
            {
                "_id": "sta1",
                "user_id": "u1",
                "mac": "aa:bb:cc:dd:ee:01",
                "ip": "10.0.0.5",
                "name": "old-host",
                "hostname": "dhcp-name"
            },
            {
                "_id": "sta2",
                "mac": "aa:bb:cc:dd:ee:02"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path(site_path("stat/sta")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let clients = client.list_clients().await.unwrap();

    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].user_id.as_deref(), Some("u1"));
    assert_eq!(clients[0].ip.as_deref(), Some("10.0.0.5"));
    assert_eq!(clients[0].name.as_deref(), Some("old-host"));
    assert!(clients[1].user_id.is_none());
    assert!(clients[1].ip.is_none());
}

#[tokio::test]
async fn test_update_alias_ok() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    Mock::given(method("PUT"))
        .and(path(site_path("rest/user/u1")))
        .and(body_json(json!({ "name": "new-host" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "meta": { "rc": "ok" }, "data": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.update_alias("u1", "new-host").await.unwrap());
}

#[tokio::test]
async fn test_update_alias_rejected_is_false() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    Mock::given(method("PUT"))
        .and(path(site_path("rest/user/u1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "meta": { "rc": "error", "msg": "api.err.InvalidObject" }, "data": [] }),
        ))
        .mount(&server)
        .await;

    assert!(!client.update_alias("u1", "new-host").await.unwrap());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_alias_session_expired() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.update_alias("u1", "new-host").await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_unifi_os_error_body_with_http_200() {
    let (server, client) = setup(ControllerPlatform::UnifiOs).await;

    Mock::given(method("GET"))
        .and(path("/proxy/network/api/s/default/stat/sta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "error": { "code": 401, "message": "Unauthorized" } }),
        ))
        .mount(&server)
        .await;

    let result = client.list_clients().await;
    assert!(
        matches!(result, Err(Error::Authentication { ref message }) if message == "Unauthorized"),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_legacy_api_error() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    Mock::given(method("GET"))
        .and(path(site_path("stat/sta")))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "meta": { "rc": "error", "msg": "api.err.NoSiteContext" }, "data": [] }),
        ))
        .mount(&server)
        .await;

    match client.list_clients().await {
        Err(Error::LegacyApi { ref message }) => {
            assert!(message.contains("NoSiteContext"), "got: {message}");
        }
        other => panic!("expected LegacyApi error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    Mock::given(method("GET"))
        .and(path(site_path("stat/sta")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let result = client.list_clients().await;
    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body.contains("proxy error")),
        "expected Deserialization error, got: {result:?}"
    );
}
