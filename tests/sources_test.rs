//! Integration tests for the four request sources (web form, Slack bot,
//! JSON API, plain API) and their response formats.

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use shortng_server::clock::ManualClock;
use shortng_server::links::guard::EditGuard;
use shortng_server::store::FsLinkStore;

async fn start_test_server() -> String {
    let tmp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let data_dir = tmp_dir.path().to_str().unwrap().to_string();

    let store = Arc::new(FsLinkStore::open(&data_dir).expect("Failed to open store"));
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
    ));
    let guard = EditGuard::new(Duration::days(7), clock.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let public_url = format!("http://{}", addr);

    let state = shortng_server::state::AppState {
        store,
        clock,
        guard,
        viewer_url: "https://clio-ng.janelia.org/".to_string(),
        public_url: public_url.clone(),
    };

    let app = shortng_server::routes::build_router(state);
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
        let _keep = tmp_dir;
    });

    public_url
}

#[tokio::test]
async fn test_json_api_returns_link_object() {
    let base_url = start_test_server().await;

    let resp = reqwest::Client::new()
        .post(format!("{}/shortng", base_url))
        .json(&json!({"text": "{\"state\": 1}", "filename": "abc"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        body["link"].as_str().unwrap(),
        format!("https://clio-ng.janelia.org/#!{}/short/abc.json", base_url)
    );
}

#[tokio::test]
async fn test_plain_api_returns_bare_link() {
    let base_url = start_test_server().await;

    let resp = reqwest::Client::new()
        .post(format!("{}/shortng", base_url))
        .form(&[("text", "{\"state\": 1}"), ("filename", "abc")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let body = resp.text().await.unwrap();
    assert_eq!(
        body,
        format!("https://clio-ng.janelia.org/#!{}/short/abc.json", base_url)
    );
}

#[tokio::test]
async fn test_web_form_returns_result_page() {
    let base_url = start_test_server().await;

    let resp = reqwest::Client::new()
        .post(format!("{}/shortng", base_url))
        .form(&[
            ("text", "{\"state\": 1}"),
            ("filename", "abc"),
            ("client", "web"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let body = resp.text().await.unwrap();
    assert!(body.contains("Your shortened link"));
    assert!(body.contains("/short/abc.json"));
}

#[tokio::test]
async fn test_slack_bot_parses_filename_and_link() {
    let base_url = start_test_server().await;

    let resp = reqwest::Client::new()
        .post(format!("{}/shortng", base_url))
        .header(reqwest::header::USER_AGENT, "Slackbot 1.0")
        .form(&[("text", "abc {\"state\": 1}")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["response_type"], "ephemeral");
    assert!(body["text"].as_str().unwrap().ends_with("/short/abc.json"));
}

#[tokio::test]
async fn test_slack_bot_error_is_ephemeral_json() {
    let base_url = start_test_server().await;

    let resp = reqwest::Client::new()
        .post(format!("{}/shortng", base_url))
        .header(reqwest::header::USER_AGENT, "Slackbot 1.0")
        .form(&[("text", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["response_type"], "ephemeral");
    assert!(body["text"].as_str().unwrap().contains("/shortng"));
}

#[tokio::test]
async fn test_form_page_prefills_fields() {
    let base_url = start_test_server().await;

    let resp = reqwest::get(format!(
        "{}/shortener.html?filename=abc&title=My+Title",
        base_url
    ))
    .await
    .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let body = resp.text().await.unwrap();
    assert!(body.contains("value=\"abc\""));
    assert!(body.contains("value=\"My Title\""));
}

#[tokio::test]
async fn test_health_check() {
    let base_url = start_test_server().await;
    let resp = reqwest::get(format!("{}/health", base_url)).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");
}
