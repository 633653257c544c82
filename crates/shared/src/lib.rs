//! Shared types, errors, and configuration for Ledgerstar.
//!
//! This crate provides common types used across all other crates:
//! - `Value` and `Table`, the in-memory tabular model every stage works on
//! - Application-wide error types
//! - Configuration management
//! - Tracing setup for the binaries

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::{AppConfig, OutputFormat};
pub use error::{AppError, AppResult};
pub use telemetry::init_tracing;
pub use types::{Row, Table, TableError, Value};
