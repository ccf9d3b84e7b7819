//! Middleware Module
//!
//! This module contains the request-processing pieces that sit around the
//! handlers.
//!
//! # Architecture
//!
//! - **`auth`** - `AuthUser` extractor for routes that need a signed-in user
//! - **`json`** - `ValidJson` extractor that deserializes and validates a body
//! - **`not_found`** - not-found guard (router fallback) and the
//!   "Page Not Found" backstop middleware

pub mod auth;

pub mod json;

pub mod not_found;

pub use auth::{bearer_token, AuthUser};
pub use json::ValidJson;
pub use not_found::{not_found_guard, page_not_found_backstop, PAGE_NOT_FOUND, ROUTE_NOT_FOUND};
