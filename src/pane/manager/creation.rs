//! Pane creation operations for PaneManager
//!
//! Handles creating new panes (initial and split) and the by-value tree
//! rewrites that insert and remove leaves.

use super::PaneManager;
use crate::pane::error::PaneError;
use crate::pane::tree_helpers::{RemoveResult, successor_in};
use crate::pane::types::{Axis, Pane, PaneId, PaneNode, ProfileId, SplitDirection};
use crate::surface::TerminalSurface;

impl PaneManager {
    /// Create the initial pane (when tab is first created)
    pub fn create_initial_pane(
        &mut self,
        profile: Option<ProfileId>,
        surface: Box<dyn TerminalSurface>,
    ) -> PaneId {
        let id = self.allocate_pane_id();
        let mut pane = Pane::new(id, profile, surface);
        pane.bounds = self.total_bounds;
        self.root = Some(PaneNode::leaf(pane));
        log::info!("Created initial pane {}", id);
        id
    }

    fn allocate_pane_id(&mut self) -> PaneId {
        let id = self.next_pane_id;
        self.next_pane_id += 1;
        id
    }

    /// Whether the pane has room for two children of the given orientation
    ///
    /// Returns false for unknown panes.
    pub fn can_split(&self, id: PaneId, direction: SplitDirection) -> bool {
        self.check_split(id, direction).is_ok()
    }

    /// Validate a split request without performing it
    pub(super) fn check_split(
        &self,
        id: PaneId,
        direction: SplitDirection,
    ) -> Result<(), PaneError> {
        let pane = self.get_pane(id).ok_or(PaneError::PaneNotFound(id))?;

        let limit = self.settings.max_panes;
        if limit > 0 && self.pane_count() >= limit {
            return Err(PaneError::MaxPanesReached(limit));
        }

        let axis = Axis::of(direction);
        let leaf_min = pane.min_extent(axis, self.settings.min_cells, self.settings.padding);
        let required = leaf_min * 2.0 + self.settings.divider_width;
        let available = pane.bounds.extent(axis);
        if available < required {
            return Err(PaneError::InsufficientSpace {
                pane: id,
                direction,
                available,
                required,
            });
        }
        Ok(())
    }

    /// Split a pane in the given direction
    ///
    /// The target leaf is replaced by a split whose first child is the
    /// original pane and whose second child hosts `surface`. Neither child is
    /// left active; the caller decides which pane to activate. If the target
    /// was active it becomes the only pane flagged `last_focused`.
    ///
    /// Returns the IDs of the (first, second) children.
    pub fn split(
        &mut self,
        target_id: PaneId,
        direction: SplitDirection,
        profile: Option<ProfileId>,
        surface: Box<dyn TerminalSurface>,
    ) -> Result<(PaneId, PaneId), PaneError> {
        if let Err(e) = self.check_split(target_id, direction) {
            crate::debug_info!("PANE_SPLIT", "Rejected split of pane {}: {}", target_id, e);
            return Err(e);
        }

        let was_active = self.get_pane(target_id).is_some_and(|pane| pane.active);
        let new_id = self.allocate_pane_id();
        let new_pane = Pane::new(new_id, profile, surface);

        if let Some(root) = self.root.take() {
            let (new_root, _) = Self::split_node(root, target_id, direction, Some(new_pane));
            self.root = Some(new_root);
        }

        if was_active {
            self.clear_active();
            for pane in self.all_panes_mut() {
                pane.last_focused = pane.id == target_id;
            }
        }

        self.relayout();

        crate::debug_info!(
            "PANE_SPLIT",
            "Split pane {} {}, created new pane {}. First(left/top)={} Second(right/bottom)={}",
            target_id,
            direction,
            new_id,
            target_id,
            new_id
        );

        Ok((target_id, new_id))
    }

    /// Split a node, finding the target pane and replacing it with a split
    ///
    /// Returns (new_node, remaining_pane) where remaining_pane is Some if
    /// the target was not found in this subtree.
    pub(super) fn split_node(
        node: PaneNode,
        target_id: PaneId,
        direction: SplitDirection,
        new_pane: Option<Pane>,
    ) -> (PaneNode, Option<Pane>) {
        match node {
            PaneNode::Leaf(pane) => match new_pane {
                Some(new) if pane.id == target_id => (
                    PaneNode::split(direction, 0.5, PaneNode::Leaf(pane), PaneNode::leaf(new)),
                    None,
                ),
                // Not the target, keep as-is and pass the new pane through
                other => (PaneNode::Leaf(pane), other),
            },
            PaneNode::Split {
                direction: split_dir,
                ratio,
                first,
                second,
            } => {
                let (new_first, remaining) =
                    Self::split_node(*first, target_id, direction, new_pane);

                if remaining.is_none() {
                    (
                        PaneNode::Split {
                            direction: split_dir,
                            ratio,
                            first: Box::new(new_first),
                            second,
                        },
                        None,
                    )
                } else {
                    let (new_second, remaining) =
                        Self::split_node(*second, target_id, direction, remaining);
                    (
                        PaneNode::Split {
                            direction: split_dir,
                            ratio,
                            first: Box::new(new_first),
                            second: Box::new(new_second),
                        },
                        remaining,
                    )
                }
            }
        }
    }

    /// Remove a pane from the tree, promoting its sibling into the parent's slot
    pub(super) fn remove_pane(node: PaneNode, target_id: PaneId) -> RemoveResult {
        match node {
            PaneNode::Leaf(pane) => {
                if pane.id == target_id {
                    RemoveResult::Removed {
                        remaining: None,
                        pane,
                        successor: None,
                    }
                } else {
                    RemoveResult::NotFound(PaneNode::Leaf(pane))
                }
            }
            PaneNode::Split {
                direction,
                ratio,
                first,
                second,
            } => match Self::remove_pane(*first, target_id) {
                RemoveResult::Removed {
                    remaining: None,
                    pane,
                    ..
                } => {
                    // First child was the target; the second takes this split's place
                    let successor = successor_in(&second);
                    RemoveResult::Removed {
                        remaining: Some(*second),
                        pane,
                        successor: Some(successor),
                    }
                }
                RemoveResult::Removed {
                    remaining: Some(new_first),
                    pane,
                    successor,
                } => RemoveResult::Removed {
                    remaining: Some(PaneNode::Split {
                        direction,
                        ratio,
                        first: Box::new(new_first),
                        second,
                    }),
                    pane,
                    successor,
                },
                RemoveResult::NotFound(first_node) => match Self::remove_pane(*second, target_id) {
                    RemoveResult::Removed {
                        remaining: None,
                        pane,
                        ..
                    } => {
                        // Second child was the target; the first takes this split's place
                        let successor = successor_in(&first_node);
                        RemoveResult::Removed {
                            remaining: Some(first_node),
                            pane,
                            successor: Some(successor),
                        }
                    }
                    RemoveResult::Removed {
                        remaining: Some(new_second),
                        pane,
                        successor,
                    } => RemoveResult::Removed {
                        remaining: Some(PaneNode::Split {
                            direction,
                            ratio,
                            first: Box::new(first_node),
                            second: Box::new(new_second),
                        }),
                        pane,
                        successor,
                    },
                    RemoveResult::NotFound(second_node) => {
                        RemoveResult::NotFound(PaneNode::Split {
                            direction,
                            ratio,
                            first: Box::new(first_node),
                            second: Box::new(second_node),
                        })
                    }
                },
            },
        }
    }
}
