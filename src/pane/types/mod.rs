//! Core types for the pane system.
//!
//! This module defines the fundamental data structures for split panes:
//! - Binary tree structure for arbitrary nesting
//! - Per-pane state (surface, profile, active/last-focused flags)
//! - Bounds calculation, snapping and directional queries
//!
//! Sub-modules:
//! - [`bounds`]: `PaneBounds` pixel-space bounding box
//! - [`common`]: `NavigationDirection`, `Axis`, identifier re-exports
//! - [`pane`]: `Pane` struct, constructors, methods, and `Drop`
//! - [`pane_node`]: `PaneNode` binary tree for pane layout
//! - [`settings`]: `LayoutSettings` consumed by the sizing algorithms
//! - [`snapshot`]: serializable `LayoutNode` copy of a tree

mod bounds;
mod common;
mod pane;
mod pane_node;
mod settings;
mod snapshot;

#[cfg(test)]
mod tests;

pub use bounds::PaneBounds;
pub use common::{Axis, NavigationDirection, PaneId, ProfileId, SplitDirection};
pub use pane::Pane;
pub(crate) use pane_node::ResizeSearch;
pub use pane_node::PaneNode;
pub use settings::LayoutSettings;
pub use snapshot::LayoutNode;
