//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - A test application over the in-memory user store
//! - Stub AI providers
//! - wiremock helpers for provider HTTP contracts
//! - Authentication helpers
//! - Envelope assertions

#![allow(dead_code)]

pub mod app;
pub mod assertions;
pub mod auth_helpers;
pub mod mock_server;
pub mod providers;

// Re-export commonly used utilities
pub use app::*;
pub use assertions::*;
pub use auth_helpers::*;
pub use mock_server::*;
pub use providers::*;
