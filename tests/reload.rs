//! Hot reload of the config file feeding the running gateway.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

mod common;

use common::{TestApp, FORECAST_PATH, GEO_PATH};

fn config_file(upstream: &MockServer, api_key: &str) -> String {
    format!(
        r#"
[listener]
bind_address = "127.0.0.1:0"

[upstream]
api_key = "{api_key}"
geo_url = "{base}{GEO_PATH}"
forecast_url = "{base}{FORECAST_PATH}"
"#,
        base = upstream.uri()
    )
}

/// Replace the file the way editors do: write a sibling, rename it over.
fn save_by_rename(path: &Path, contents: &str) {
    let staging = path.with_extension("toml.tmp");
    fs::write(&staging, contents).unwrap();
    fs::rename(&staging, path).unwrap();
}

async fn suggestions_for_key(upstream: &MockServer, key: &str, name: &str) {
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .and(query_param("appid", key))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": name, "lat": 1.0, "lon": 2.0, "country": "GB" }
        ])))
        .mount(upstream)
        .await;
}

/// Poll until the gateway answers with the suggestion named `expected`.
async fn wait_for_suggestion(app: &TestApp, expected: &str) {
    for _ in 0..100 {
        let res = app.get("/api/location-suggestions?query=x").await;
        if res.status() == StatusCode::OK {
            let body: Value = res.json().await.unwrap();
            if body[0]["name"] == expected {
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("gateway never answered with {expected}");
}

#[tokio::test]
async fn test_key_rotation_applies_without_restart() {
    let upstream = MockServer::start().await;
    suggestions_for_key(&upstream, "first-key", "First").await;
    suggestions_for_key(&upstream, "second-key", "Second").await;
    suggestions_for_key(&upstream, "third-key", "Third").await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nimbus.toml");
    fs::write(&path, config_file(&upstream, "first-key")).unwrap();

    let app = TestApp::spawn_watching(upstream, &path).await;
    wait_for_suggestion(&app, "First").await;

    save_by_rename(&path, &config_file(&app.upstream, "second-key"));
    wait_for_suggestion(&app, "Second").await;

    save_by_rename(&path, &config_file(&app.upstream, "third-key"));
    wait_for_suggestion(&app, "Third").await;
}

#[tokio::test]
async fn test_invalid_edit_keeps_running_config() {
    let upstream = MockServer::start().await;
    suggestions_for_key(&upstream, "first-key", "First").await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nimbus.toml");
    fs::write(&path, config_file(&upstream, "first-key")).unwrap();

    let app = TestApp::spawn_watching(upstream, &path).await;
    save_by_rename(&path, "[upstream]\nsuggestion_limit = 0\n");
    tokio::time::sleep(Duration::from_millis(500)).await;

    wait_for_suggestion(&app, "First").await;
}
