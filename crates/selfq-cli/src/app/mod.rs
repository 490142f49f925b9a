//! Application-level utilities for the selfQ CLI.
//!
//! This module provides:
//! - Config file location and lazy loading
//! - Export family resolution into an engine configuration

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::{resolve_config_path, resolve_envelope};
