//! Pane management for split terminal support
//!
//! This module provides the pane infrastructure for split terminals:
//! - `Pane`: A single leaf hosting one terminal surface
//! - `PaneNode`: Tree structure for nested pane splits
//! - `PaneManager`: Owns the tree and implements its structural operations
//! - `PaneError`: Rejected operations (not found, no room, pane limit)

mod error;
mod manager;
mod tree_helpers;
mod types;

pub use error::PaneError;
pub use manager::{CloseOutcome, PaneManager};
pub use types::{
    Axis, LayoutNode, LayoutSettings, NavigationDirection, Pane, PaneBounds, PaneId, PaneNode,
    ProfileId, SplitDirection,
};
