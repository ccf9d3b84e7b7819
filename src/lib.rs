//! Assistant Gateway - Main Library
//!
//! A backend gateway exposing authentication, user, bot, tool and
//! AI-assistant endpoints over HTTP, with a single error boundary that turns
//! every failure into `{ "success": false, "message": ... }`.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that do not depend on the HTTP layer
//!   - User entity, field validation, configuration
//!
//! - **`backend`** - The Axum server
//!   - Routing, error boundary, extractors
//!   - Auth, user, bots, tools and AI-assistant handlers
//!   - AI providers and user persistence
//!
//! # Usage
//!
//! ```rust,no_run
//! use assistant_gateway::backend::server::create_app;
//! use assistant_gateway::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

/// Types shared across the crate
pub mod shared;

/// Server-side code
pub mod backend;

pub use backend::error::{normalize, ApiError, ErrorEnvelope};
pub use shared::{AppConfig, ValidationError};
