//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation and the request pipeline
//! - **`api_routes`** - Sub-routers mounted under `/v1/api`
//! - **`demo_routes`** - Liveness check and the two demo provider routes
//!
//! # Route Organization
//!
//! ```text
//! GET   /v1/api                         liveness
//! GET   /image-info                     vision demo
//! POST  /gemini                         text demo
//! *     /v1/api/auth/...                register, login, refresh-token, logout, me
//! *     /v1/api/user/...                profile, deactivate
//! GET   /v1/api/bots[/{slug}]           bot catalog
//! *     /v1/api/tools/...               tool catalog, word-counter
//! *     /v1/api/ai-assistant/...        chat, usage
//! *     anything else                   404 "Requested URL Not Found"
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use assistant_gateway::backend::routes::create_router;
//! use assistant_gateway::backend::server::state::AppState;
//!
//! # fn example(app_state: AppState) {
//! let router = create_router(app_state);
//! # let _ = router;
//! # }
//! ```

/// Main router creation
pub mod router;

/// Sub-routers under `/v1/api`
pub mod api_routes;

/// Liveness and demo routes
pub mod demo_routes;

// Re-export commonly used functions
pub use router::{create_router, with_pipeline};
