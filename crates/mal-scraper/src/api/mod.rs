//! MAL API v2 client implementation.
//!
//! This module provides a thin client for the official MyAnimeList API,
//! authenticated with an application client id.

pub mod client;
pub mod types;

pub use client::MalClient;
pub use types::*;
