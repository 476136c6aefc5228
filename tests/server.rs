//! End-to-end tests against the demo server over a real socket.

use version_dispatch::config::{ServiceConfig, VersionEntry, VersionsConfig};
use version_dispatch::http::EchoBody;

mod common;

fn config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.versions = VersionsConfig(vec![
        VersionEntry {
            range: "1.x".into(),
            label: "legacy".into(),
        },
        VersionEntry {
            range: "^2.0.0".into(),
            label: "current".into(),
        },
    ]);
    config
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn test_header_dispatch_over_http() {
    let addr = common::start_server(config()).await;

    let res = client()
        .get(format!("http://{}/api/users", addr))
        .header("Accept-Version", "1.4.2")
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers().get("x-api-version").unwrap(), "1.x");

    let body: EchoBody = res.json().await.unwrap();
    assert_eq!(
        body,
        EchoBody {
            label: "legacy".into(),
            version: Some("1.x".into()),
            path: "/api/users".into(),
        }
    );
}

#[tokio::test]
async fn test_route_param_dispatch_over_http() {
    let addr = common::start_server(config()).await;

    let res = client()
        .get(format!("http://{}/v2.3.0/api/users", addr))
        .header("Accept-Version", "1.0.0")
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 200);
    let body: EchoBody = res.json().await.unwrap();
    assert_eq!(body.label, "current");
    assert_eq!(body.version.as_deref(), Some("^2.0.0"));
}

#[tokio::test]
async fn test_unsupported_version_over_http() {
    let addr = common::start_server(config()).await;

    let res = client()
        .get(format!("http://{}/api/users", addr))
        .header("Accept-Version", "3.0.0")
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 400);
    assert_eq!(res.text().await.unwrap(), "Version 3.0.0 is not supported");
}

#[tokio::test]
async fn test_health_is_not_versioned() {
    let addr = common::start_server(config()).await;

    let res = client()
        .get(format!("http://{}/health", addr))
        .header("Accept-Version", "99.0.0")
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 200);
    assert!(res.headers().get("x-api-version").is_none());
}
