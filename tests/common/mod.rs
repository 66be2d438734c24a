#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use link_shortener::application::services::Claims;
use link_shortener::domain::entities::{NewShortLink, ShortLink};
use link_shortener::domain::repositories::{LinkRepository, UserRepository};
use link_shortener::infrastructure::persistence::{InMemoryLinkRepository, InMemoryUserRepository};
use link_shortener::routes::api_router;
use link_shortener::state::AppState;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-jwt-secret";
pub const BASE_URL: &str = "http://localhost:8081";
pub const PASSWORD: &str = "Secr3t!pass";

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub users: Arc<InMemoryUserRepository>,
    pub links: Arc<InMemoryLinkRepository>,
}

pub fn create_test_state() -> (AppState, Arc<InMemoryUserRepository>, Arc<InMemoryLinkRepository>) {
    let users = Arc::new(InMemoryUserRepository::new());
    let links = Arc::new(InMemoryLinkRepository::new());

    let user_repo: Arc<dyn UserRepository> = users.clone();
    let link_repo: Arc<dyn LinkRepository> = links.clone();
    let state = AppState::new(user_repo, link_repo, JWT_SECRET, BASE_URL);

    (state, users, links)
}

pub fn test_app() -> TestApp {
    let (state, users, links) = create_test_state();
    let server = TestServer::new(api_router(state.clone())).unwrap();

    TestApp {
        server,
        state,
        users,
        links,
    }
}

pub async fn register(server: &TestServer, username: &str) -> Value {
    let response = server
        .post("/auth/register")
        .json(&json!({ "username": username, "password": PASSWORD }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

/// Registers `username` and returns a bearer token for it.
pub async fn login_token(server: &TestServer, username: &str) -> String {
    register(server, username).await;

    let response = server
        .post("/auth/login")
        .json(&json!({ "username": username, "password": PASSWORD }))
        .await;
    response.assert_status_ok();

    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Creates a link through the API and returns the `short_link` object.
pub async fn create_link(server: &TestServer, token: &str, url: &str) -> Value {
    let response = server
        .post("/shortener")
        .authorization_bearer(token)
        .json(&json!({ "url": url }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["short_link"].clone()
}

/// Stores a link that expired an hour ago.
pub async fn insert_expired_link(
    links: &InMemoryLinkRepository,
    short_id: &str,
    owner: Option<Uuid>,
) -> ShortLink {
    let created_at = Utc::now() - Duration::days(31);
    let new_link = NewShortLink {
        user_id: owner,
        long_url: "https://example.com/expired".to_string(),
        short_id: short_id.to_string(),
        created_at,
        expires_at: Some(Utc::now() - Duration::hours(1)),
    };

    links.create(new_link).await.unwrap()
}

/// Signs a valid token whose `user_id` claim is taken verbatim.
pub fn token_with_raw_user_id(user_id: &str) -> String {
    let now = Utc::now();
    let claims = Claims {
        user_id: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(1)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}
