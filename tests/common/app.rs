//! Test application
//!
//! Builds the real router over an `InMemoryUserStore` and stub providers.

use assistant_gateway::backend::persistence::{InMemoryUserStore, UserStore};
use assistant_gateway::backend::routes::{create_router, with_pipeline};
use assistant_gateway::backend::server::state::AppState;
use assistant_gateway::shared::AppConfig;
use axum::Router;
use axum_test::TestServer;
use std::sync::Arc;

use super::providers::StubProvider;

pub const TEST_CLIENT_URL: &str = "http://localhost:5173";
pub const TEST_FREE_TOKEN_LIMIT: u64 = 50;
pub const VISION_REPLY: &str = "A resume with two pages of frontend experience.";
pub const TEXT_REPLY: &str = "An embedding model maps text to vectors.";

/// Configuration with a cheap bcrypt cost and a small free allowance
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .client_url(TEST_CLIENT_URL)
        .jwt_secret("test-secret")
        .bcrypt_cost(4)
        .free_token_limit(TEST_FREE_TOKEN_LIMIT)
        .build()
        .expect("test config is valid")
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub users: Arc<InMemoryUserStore>,
    pub vision: Arc<StubProvider>,
    pub text: Arc<StubProvider>,
}

pub fn test_state(vision: Arc<StubProvider>, text: Arc<StubProvider>) -> (AppState, Arc<InMemoryUserStore>) {
    let users = Arc::new(InMemoryUserStore::new());
    let store: Arc<dyn UserStore> = users.clone();
    let state = AppState::new(test_config(), store, vision, text);
    (state, users)
}

/// The full application with the given providers
pub fn spawn_app_with(vision: StubProvider, text: StubProvider) -> TestApp {
    let vision = Arc::new(vision);
    let text = Arc::new(text);
    let (state, users) = test_state(vision.clone(), text.clone());
    let server = TestServer::new(create_router(state.clone())).expect("test server starts");

    TestApp {
        server,
        state,
        users,
        vision,
        text,
    }
}

/// The full application with providers that always succeed
pub fn spawn_app() -> TestApp {
    spawn_app_with(
        StubProvider::replying("groq", VISION_REPLY),
        StubProvider::replying("gemini", TEXT_REPLY),
    )
}

/// Extra routes run through the production pipeline
pub fn pipeline_router(routes: Router<AppState>) -> Router {
    let (state, _) = test_state(
        Arc::new(StubProvider::replying("groq", VISION_REPLY)),
        Arc::new(StubProvider::replying("gemini", TEXT_REPLY)),
    );
    with_pipeline(routes, state)
}
