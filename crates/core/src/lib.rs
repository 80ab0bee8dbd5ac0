//! Core types and shared functionality for psyfind.
//!
//! This crate provides:
//! - The event data model
//! - The in-process TTL cache and per-source event namespace
//! - Unified error types
//! - Layered configuration

pub mod cache;
pub mod config;
pub mod error;
pub mod event;

pub use cache::{CacheInfo, CacheStats, EventCache, TtlCache};
pub use config::AppConfig;
pub use error::Error;
pub use event::Event;
