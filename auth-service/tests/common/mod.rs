use std::sync::Arc;

use auth::Clock;
use auth::JwtHandler;
use auth::ManualClock;
use auth::PasswordHasher;
use auth::TokenIssuer;
use auth_service::credential::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryCredentialStore;
use chrono::Duration;
use chrono::Utc;
use tower_http::cors::CorsLayer;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_issuer: Arc<TokenIssuer>,
    pub clock: Arc<ManualClock>,
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

        // Cheap Argon2 cost keeps the suite fast
        let password_hasher =
            PasswordHasher::with_cost(1024, 1, 1).expect("Failed to build password hasher");
        let credential_store = Arc::new(
            InMemoryCredentialStore::new(password_hasher)
                .expect("Failed to create credential store"),
        );

        let clock = Arc::new(ManualClock::new(Utc::now()));
        let token_issuer = Arc::new(
            TokenIssuer::new(JwtHandler::new(JWT_SECRET), Duration::minutes(60))
                .with_clock(Arc::clone(&clock) as Arc<dyn Clock>),
        );

        let auth_service = Arc::new(AuthService::new(
            credential_store,
            Arc::clone(&token_issuer),
        ));

        let router = create_router(
            auth_service,
            Arc::clone(&token_issuer),
            CorsLayer::permissive(),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_issuer,
            clock,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// POST credentials to `path` and return the response
    pub async fn submit_credentials(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> reqwest::Response {
        self.post(path)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign up and return the issued token
    pub async fn signup(&self, email: &str, password: &str) -> String {
        let response = self.submit_credentials("/signup", email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }
}
