use std::sync::Arc;

use reqwest::{Client, redirect::Policy};
use tokio::net::TcpListener;

use user_api::{AppState, app, services::UserService, storage::InMemoryUserStore};

/// Minimum age used by every test server.
pub const TEST_MIN_AGE: u32 = 18;

/// HTTP test application wrapper
///
/// Manages an axum server running on a random port for HTTP testing.
/// Each test gets its own server instance with a fresh in-memory store,
/// so tests run in parallel without interfering.
#[allow(dead_code)] // Not every test binary uses every helper
pub struct TestApp {
    /// Server base URL (e.g., "http://127.0.0.1:54321")
    pub address: String,
    /// HTTP client for making requests
    pub client: Client,
}

#[allow(dead_code)]
impl TestApp {
    /// Create a new HTTP test app with server on random port
    ///
    /// # How it works:
    /// 1. Builds the application router over an in-memory user store
    /// 2. Binds to port 0 (OS assigns random available port)
    /// 3. Starts server in background task
    /// 4. Creates reqwest client configured for testing
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryUserStore::new());
        let service = UserService::new(store, TEST_MIN_AGE);
        let state = AppState::new(service);

        let router = app(state);

        // Bind to random port (port 0 tells OS to assign available port)
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{port}");

        // Start server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { address, client }
    }

    /// Get the full URL for an API endpoint
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

/// Generate a unique test email.
#[allow(dead_code)]
pub fn generate_test_email() -> String {
    format!("user_{}@example.com", nanoid::nanoid!(10))
}
