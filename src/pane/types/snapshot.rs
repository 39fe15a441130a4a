//! Serializable view of a pane tree.
//!
//! Snapshots are read-only copies used for JSON output and test assertions;
//! they are never loaded back into a tree.

use serde::Serialize;

use super::bounds::PaneBounds;
use super::common::{PaneId, ProfileId, SplitDirection};
use super::pane_node::PaneNode;

/// One node of a layout snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutNode {
    Leaf {
        id: PaneId,
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        profile: Option<ProfileId>,
        active: bool,
        last_focused: bool,
        bounds: PaneBounds,
    },
    Split {
        direction: SplitDirection,
        ratio: f32,
        first: Box<LayoutNode>,
        second: Box<LayoutNode>,
    },
}

impl LayoutNode {
    /// Leaf IDs in first-to-second order
    pub fn pane_ids(&self) -> Vec<PaneId> {
        match self {
            LayoutNode::Leaf { id, .. } => vec![*id],
            LayoutNode::Split { first, second, .. } => {
                let mut ids = first.pane_ids();
                ids.extend(second.pane_ids());
                ids
            }
        }
    }
}

impl PaneNode {
    /// Copy the tree's shape and per-leaf state
    pub fn snapshot(&self) -> LayoutNode {
        match self {
            PaneNode::Leaf(pane) => LayoutNode::Leaf {
                id: pane.id,
                title: pane.title(),
                profile: pane.profile,
                active: pane.active,
                last_focused: pane.last_focused,
                bounds: pane.bounds,
            },
            PaneNode::Split {
                direction,
                ratio,
                first,
                second,
            } => LayoutNode::Split {
                direction: *direction,
                ratio: *ratio,
                first: Box::new(first.snapshot()),
                second: Box::new(second.snapshot()),
            },
        }
    }
}
