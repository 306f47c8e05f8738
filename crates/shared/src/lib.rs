//! Shared types, errors, and configuration for Mandap.
//!
//! This crate provides common types used across all other crates:
//! - Money types with decimal precision
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CeremonyConfig, LogConfig, PricingConfig};
pub use error::{AppError, AppResult};
