//! Infrastructure layer for cross-cutting concerns.
//!
//! Provides foundational infrastructure including:
//! - Configuration management and validation
//! - Error handling and result types
//! - The shared signer context and its CA certificate cache

pub mod config;
pub mod context;
pub mod error;
