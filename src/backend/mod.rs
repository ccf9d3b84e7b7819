//! Backend Module
//!
//! This module contains all server-side code for the assistant gateway: an
//! Axum HTTP server exposing authentication, user, bot, tool and AI-assistant
//! endpoints, plus two demo routes that call AI providers directly.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, store/provider loading
//! - **`routes`** - Route configuration and the request pipeline
//! - **`error`** - `ApiError` and the error boundary (`normalize`)
//! - **`middleware`** - Auth and validated-JSON extractors, not-found handling
//! - **`auth`** - Registration, login, JWT sessions
//! - **`user`** - Profile management
//! - **`bots`** - Bot catalog
//! - **`tools`** - Text tools
//! - **`assistant`** - Billed chat and usage
//! - **`providers`** - Groq and Gemini clients behind `TextGenerationProvider`
//! - **`persistence`** - `UserStore` over PostgreSQL or memory
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── response.rs     - Success body
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── error/          - Error types and the error boundary
//! ├── middleware/     - Extractors and not-found handling
//! ├── auth/           - Authentication
//! ├── user/           - Profile
//! ├── bots/           - Bot catalog
//! ├── tools/          - Text tools
//! ├── assistant/      - Chat and usage
//! ├── providers/      - AI providers
//! └── persistence/    - User storage
//! ```
//!
//! # Error Handling
//!
//! Every handler returns `Result<_, ApiError>`. Whatever fails (validation,
//! a provider, the store, an unknown route, a panic) the client receives
//! `{ "success": false, "message": ... }` with the status chosen by the error
//! variant.
//!
//! # Example
//!
//! ```rust,no_run
//! use assistant_gateway::backend::server::create_app;
//! use assistant_gateway::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server initialization and state
pub mod server;

/// Route configuration
pub mod routes;

/// Error types and the error boundary
pub mod error;

/// Request extractors and middleware
pub mod middleware;

/// Success response body
pub mod response;

/// Authentication
pub mod auth;

/// Profile management
pub mod user;

/// Bot catalog
pub mod bots;

/// Text tools
pub mod tools;

/// Billed chat and usage
pub mod assistant;

/// AI providers
pub mod providers;

/// User storage
pub mod persistence;

pub use error::{ApiError, ApiResult, ErrorEnvelope};
pub use response::ApiResponse;
pub use server::{create_app, AppState};
