//! Configuration system for tabtree.
//!
//! This crate provides configuration loading, saving, and default values
//! for the pane layout engine. It includes:
//!
//! - Layout tuning (separator thickness, padding, minimum pane size, resize step)
//! - Shared identifier types (`PaneId`, `TabId`, `ProfileId`)
//! - Split orientation shared between the config and the pane tree
//! - Typed configuration errors

pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::{LogLevel, PaneId, ProfileId, SplitDirection, TabId};
