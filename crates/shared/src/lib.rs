//! Shared library for the FAL scraper workspace.
//!
//! This crate provides common functionality used across all binary crates:
//! - The catalog record model and its derived metrics
//! - Configuration management
//! - Batch (ID list) definitions
//! - Output path utilities
//! - Logging infrastructure
//! - Shared error types

pub mod batch;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod paths;
pub mod record;

// Re-export commonly used types
pub use batch::Batch;
pub use config::Config;
pub use error::{MetricError, ModelError};
pub use logging::LogConfig;
pub use metrics::CatalogSnapshot;
pub use models::*;
pub use paths::{OutputPaths, WeeklyPaths};

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
