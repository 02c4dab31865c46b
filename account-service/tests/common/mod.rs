#![allow(dead_code)]

use std::sync::Arc;

use account_service::domain::account::service::CredentialService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserStore;
use auth::Authenticator;
use auth::SigningSecret;
use auth::TokenCodec;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_PASSWORD: &str = "pass_word1";

/// Test application that spawns a real server over the in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub token_codec: TokenCodec,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let secret = SigningSecret::new(TEST_SECRET).expect("Invalid test secret");
        let authenticator = Arc::new(Authenticator::new(&secret));
        let user_store = Arc::new(InMemoryUserStore::new());
        let credential_service = Arc::new(CredentialService::new(
            user_store,
            Arc::clone(&authenticator),
        ));

        let router = create_router(credential_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            token_codec: TokenCodec::new(&secret),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return the response body's `data`
    pub async fn register(&self, username: &str, email: &str) -> Value {
        let response = self
            .post("/api/v1/auth/register")
            .json(&json!({
                "username": username,
                "email": email,
                "password": TEST_PASSWORD,
                "first_name": "Test",
                "last_name": "User"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log in and return the issued token
    pub async fn login(&self, username_or_email: &str) -> String {
        let response = self
            .post("/api/v1/auth/login")
            .json(&json!({
                "username_or_email": username_or_email,
                "password": TEST_PASSWORD
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Register an account, log in, and return `(account_id, token)`
    pub async fn register_and_login(&self, username: &str, email: &str) -> (String, String) {
        let account = self.register(username, email).await;
        let id = account["id"].as_str().expect("Missing id").to_string();
        let token = self.login(username).await;
        (id, token)
    }
}
