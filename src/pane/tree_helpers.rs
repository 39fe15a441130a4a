//! Helper types for structural edits of the pane tree.

use super::types::{Pane, PaneId, PaneNode};

/// Result of attempting to remove a pane from the tree
pub(super) enum RemoveResult {
    /// Pane was removed
    Removed {
        /// What takes the removed pane's place (None if the tree is now empty)
        remaining: Option<PaneNode>,
        /// The detached pane, still owning its surface
        pane: Box<Pane>,
        /// Leaf inside the promoted sibling that should take over as active
        successor: Option<PaneId>,
    },
    /// Pane was not found, returning the original tree
    NotFound(PaneNode),
}

/// Pick the leaf that inherits focus from a promoted sibling subtree
///
/// A previously focused leaf inside the sibling wins; otherwise the
/// sibling's first leaf is used.
pub(super) fn successor_in(sibling: &PaneNode) -> PaneId {
    sibling
        .last_focused_pane_id()
        .unwrap_or_else(|| sibling.first_pane_id())
}
