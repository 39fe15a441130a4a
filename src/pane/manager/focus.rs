//! Focus and navigation operations for PaneManager
//!
//! Handles the active / last-focused flags, directional navigation, and
//! closing panes with a successor for the active slot.

use super::PaneManager;
use crate::pane::error::PaneError;
use crate::pane::tree_helpers::RemoveResult;
use crate::pane::types::{NavigationDirection, PaneId};

/// What closing a pane did to the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// A non-root leaf was removed and its sibling promoted
    PaneClosed {
        closed: PaneId,
        /// Leaf that should become active; `None` when the closed pane was
        /// not the active one
        successor: Option<PaneId>,
    },
    /// The tree's only leaf was closed; the tree is now empty
    LastPaneClosed { closed: PaneId },
}

impl PaneManager {
    /// Close a pane by ID
    ///
    /// The pane's surface is shut down. Closing the last pane leaves the
    /// manager empty.
    pub fn close_pane(&mut self, id: PaneId) -> Result<CloseOutcome, PaneError> {
        crate::debug_info!("PANE_CLOSE", "close_pane called for pane {}", id);

        let root = self.root.take().ok_or(PaneError::EmptyTree)?;
        match Self::remove_pane(root, id) {
            RemoveResult::Removed {
                remaining,
                mut pane,
                successor,
            } => {
                let was_active = pane.active;
                pane.shutdown();
                self.root = remaining;

                let outcome = if self.root.is_none() {
                    CloseOutcome::LastPaneClosed { closed: id }
                } else {
                    self.relayout();
                    CloseOutcome::PaneClosed {
                        closed: id,
                        successor: if was_active { successor } else { None },
                    }
                };

                if let Some(ref root) = self.root {
                    for remaining in root.all_panes() {
                        crate::debug_log!(
                            "PANE_CLOSE",
                            "Remaining pane {} bounds=({:.0},{:.0} {:.0}x{:.0})",
                            remaining.id,
                            remaining.bounds.x,
                            remaining.bounds.y,
                            remaining.bounds.width,
                            remaining.bounds.height
                        );
                    }
                }

                crate::debug_info!("PANE_CLOSE", "Closed pane {}: {:?}", id, outcome);
                Ok(outcome)
            }
            RemoveResult::NotFound(root) => {
                crate::debug_info!("PANE_CLOSE", "Pane {} not found in tree", id);
                self.root = Some(root);
                Err(PaneError::PaneNotFound(id))
            }
        }
    }

    /// Mark a pane active, clearing the flag everywhere else
    ///
    /// The previously active pane (if any) becomes the only pane flagged
    /// `last_focused`. Returns the previously active pane.
    pub fn activate(&mut self, id: PaneId) -> Result<Option<PaneId>, PaneError> {
        let root = self.root.as_mut().ok_or(PaneError::EmptyTree)?;
        if !root.contains(id) {
            return Err(PaneError::PaneNotFound(id));
        }

        let previous = root.active_pane_id();
        if previous == Some(id) {
            return Ok(previous);
        }

        for pane in root.all_panes_mut() {
            pane.active = pane.id == id;
            match previous {
                Some(prev) => pane.last_focused = pane.id == prev,
                None if pane.id == id => pane.last_focused = false,
                None => {}
            }
        }

        log::debug!("Activated pane {} (previous: {:?})", id, previous);
        Ok(previous)
    }

    /// Clear every pane's active flag
    pub fn clear_active(&mut self) {
        for pane in self.all_panes_mut() {
            pane.active = false;
        }
    }

    /// ID of the pane flagged active
    pub fn active_pane_id(&self) -> Option<PaneId> {
        self.root.as_ref()?.active_pane_id()
    }

    /// Find the pane focus moves to from `from_id` in `direction`
    ///
    /// Returns `None` when the move would leave the tree.
    pub fn navigate(&self, from_id: PaneId, direction: NavigationDirection) -> Option<PaneId> {
        let target = self
            .root
            .as_ref()?
            .find_pane_in_direction(from_id, direction);
        log::debug!(
            "Navigate {:?} from pane {} resolved to {:?}",
            direction,
            from_id,
            target
        );
        target
    }
}
