mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use common::{create_link, login_token, test_app, token_with_raw_user_id};
use link_shortener::domain::repositories::LinkRepository;
use serde_json::{Value, json};

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_link_success() {
    let app = test_app();
    let token = login_token(&app.server, "alice").await;

    let link = create_link(&app.server, &token, "https://example.com/some/long/path").await;

    let short_id = link["short_id"].as_str().unwrap();
    assert_eq!(short_id.len(), 6);
    assert!(short_id.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(
        link["short_url"],
        format!("http://localhost:8081/shortener/{short_id}")
    );
    assert_eq!(link["long_url"], "https://example.com/some/long/path");
    assert_eq!(link["clicks"], 0);
    assert!(link["last_click"].is_null());
}

#[tokio::test]
async fn test_create_link_expires_in_thirty_days() {
    let app = test_app();
    let token = login_token(&app.server, "alice").await;

    let link = create_link(&app.server, &token, "https://example.com/x").await;

    let created_at: DateTime<Utc> = link["created_at"].as_str().unwrap().parse().unwrap();
    let expires_at: DateTime<Utc> = link["expires_at"].as_str().unwrap().parse().unwrap();
    assert_eq!(expires_at - created_at, Duration::days(30));
}

#[tokio::test]
async fn test_create_link_invalid_url_is_not_stored() {
    let app = test_app();
    let token = login_token(&app.server, "alice").await;

    for url in ["not-a-url", "example.com", "mailto:a@b.c", "http://"] {
        let response = app
            .server
            .post("/shortener")
            .authorization_bearer(&token)
            .json(&json!({ "url": url }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["success"], false);
    }

    let response = app
        .server
        .get("/shortener")
        .authorization_bearer(&token)
        .await;
    assert!(response.json::<Value>()["links"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_link_empty_url() {
    let app = test_app();
    let token = login_token(&app.server, "alice").await;

    let response = app
        .server
        .post("/shortener")
        .authorization_bearer(&token)
        .json(&json!({ "url": "" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_link_requires_token() {
    let app = test_app();

    let response = app
        .server
        .post("/shortener")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_create_link_ftp_accepted() {
    let app = test_app();
    let token = login_token(&app.server, "alice").await;

    let link = create_link(&app.server, &token, "ftp://files.example.com/pub/file.txt").await;

    assert_eq!(link["long_url"], "ftp://files.example.com/pub/file.txt");
}

// ─── LIST ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_links_only_own() {
    let app = test_app();
    let alice = login_token(&app.server, "alice").await;
    let bob = login_token(&app.server, "bob").await;

    create_link(&app.server, &alice, "https://example.com/a1").await;
    create_link(&app.server, &alice, "https://example.com/a2").await;
    create_link(&app.server, &bob, "https://example.com/b1").await;

    let response = app
        .server
        .get("/shortener")
        .authorization_bearer(&alice)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["success"], true);

    let links = json["links"].as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert!(
        links
            .iter()
            .all(|l| l["long_url"].as_str().unwrap().contains("/a"))
    );
}

#[tokio::test]
async fn test_list_links_empty() {
    let app = test_app();
    let token = login_token(&app.server, "alice").await;

    let response = app
        .server
        .get("/shortener")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    assert!(response.json::<Value>()["links"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_links_with_malformed_user_id() {
    let app = test_app();
    let token = token_with_raw_user_id("not-a-uuid");

    let response = app
        .server
        .get("/shortener")
        .authorization_bearer(&token)
        .await;

    response.assert_status_unauthorized();
    assert_eq!(response.json::<Value>()["success"], false);
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_link() {
    let app = test_app();
    let token = login_token(&app.server, "alice").await;
    let link = create_link(&app.server, &token, "https://example.com/x").await;
    let short_id = link["short_id"].as_str().unwrap();

    let response = app
        .server
        .delete(&format!("/shortener/{short_id}"))
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["success"], true);
    assert!(app.links.find_by_short_id(short_id).await.unwrap().is_none());

    let response = app
        .server
        .get(&format!("/shortener/{short_id}"))
        .authorization_bearer(&token)
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_unknown_link_succeeds() {
    let app = test_app();
    let token = login_token(&app.server, "alice").await;

    let response = app
        .server
        .delete("/shortener/nothere")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_delete_requires_token() {
    let app = test_app();

    let response = app.server.delete("/shortener/abc123").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

// ─── STATS ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_stats_reflect_clicks() {
    let app = test_app();
    let token = login_token(&app.server, "alice").await;
    let link = create_link(&app.server, &token, "https://example.com/x").await;
    let short_id = link["short_id"].as_str().unwrap();

    for _ in 0..3 {
        app.server
            .get(&format!("/shortener/{short_id}"))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::MOVED_PERMANENTLY);
    }

    let response = app
        .server
        .get(&format!("/shortener/stats/{short_id}"))
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["link"]["clicks"], 3);
    assert!(json["link"]["last_click"].is_string());
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn test_stats_do_not_count_as_click() {
    let app = test_app();
    let token = login_token(&app.server, "alice").await;
    let link = create_link(&app.server, &token, "https://example.com/x").await;
    let short_id = link["short_id"].as_str().unwrap();

    for _ in 0..2 {
        app.server
            .get(&format!("/shortener/stats/{short_id}"))
            .authorization_bearer(&token)
            .await
            .assert_status_ok();
    }

    let stored = app.links.find_by_short_id(short_id).await.unwrap().unwrap();
    assert_eq!(stored.clicks, 0);
}

#[tokio::test]
async fn test_stats_unknown_link() {
    let app = test_app();
    let token = login_token(&app.server, "alice").await;

    let response = app
        .server
        .get("/shortener/stats/zzzzzz")
        .authorization_bearer(&token)
        .await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["message"], "Not found");
}
