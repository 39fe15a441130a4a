//! Typed errors for pane tree operations.
//!
//! Only rejected operations are errors. Navigation or resize requests that
//! reach a tree boundary are silent no-ops, and a malformed tree (bad ratio,
//! split with a missing child) is a programming error that panics.

use thiserror::Error;

use super::types::{PaneId, SplitDirection};

/// Error returned by pane tree and tab operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PaneError {
    /// No leaf with this ID exists in the tree.
    #[error("Pane {0} not found")]
    PaneNotFound(PaneId),

    /// The pane is too small to host two children of the requested orientation.
    #[error(
        "Not enough room to split pane {pane} {direction}: {available:.1}px available, {required:.1}px required"
    )]
    InsufficientSpace {
        /// Pane that was asked to split
        pane: PaneId,
        /// Requested orientation
        direction: SplitDirection,
        /// Current size of the pane along the split axis
        available: f32,
        /// Size needed for two minimum-size panes and a separator
        required: f32,
    },

    /// The configured pane limit has been reached.
    #[error("Pane limit of {0} reached")]
    MaxPanesReached(usize),

    /// The tree has no panes left.
    #[error("Pane tree is empty")]
    EmptyTree,

    /// The owning tab has already closed.
    #[error("Tab is closed")]
    TabClosed,
}
