//! Pane manager for coordinating pane operations within a tab
//!
//! The PaneManager owns the pane tree and provides operations for:
//! - Splitting panes horizontally and vertically
//! - Closing panes and collapsing the tree
//! - Tracking the active and previously focused leaves
//! - Navigating between panes
//! - Resizing, laying out and snapping panes
//!
//! Sub-modules:
//! - [`super::tree_helpers`]: Removal result type and successor selection.
//! - [`creation`]: Pane creation and tree manipulation (split, remove).
//! - [`focus`]: Active-pane bookkeeping, closing, and directional navigation.
//! - [`layout`]: Bounds, surface resize, ratio adjustment and snapping.

mod creation;
mod focus;
mod layout;

pub use focus::CloseOutcome;

use crate::pane::types::{
    LayoutNode, LayoutSettings, Pane, PaneBounds, PaneId, PaneNode, ProfileId,
};
use crate::surface::TerminalSurface;

/// Manages the pane tree within a single tab
pub struct PaneManager {
    /// Root of the pane tree (None once the last pane has closed)
    pub(super) root: Option<PaneNode>,
    /// Counter for generating unique pane IDs
    pub(super) next_pane_id: PaneId,
    /// Layout tuning constants
    pub(super) settings: LayoutSettings,
    /// Current total bounds available for panes
    pub(super) total_bounds: PaneBounds,
}

impl PaneManager {
    /// Create a new empty pane manager
    pub fn new(settings: LayoutSettings) -> Self {
        Self {
            root: None,
            next_pane_id: 1,
            settings,
            total_bounds: PaneBounds::default(),
        }
    }

    /// Create a pane manager with an initial pane
    pub fn with_initial_pane(
        settings: LayoutSettings,
        profile: Option<ProfileId>,
        surface: Box<dyn TerminalSurface>,
    ) -> Self {
        let mut manager = Self::new(settings);
        manager.create_initial_pane(profile, surface);
        manager
    }

    /// Get the next pane ID that will be assigned
    pub fn next_pane_id(&self) -> PaneId {
        self.next_pane_id
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Get a pane by ID
    pub fn get_pane(&self, id: PaneId) -> Option<&Pane> {
        self.root.as_ref()?.find_pane(id)
    }

    /// Get a mutable pane by ID
    pub fn get_pane_mut(&mut self, id: PaneId) -> Option<&mut Pane> {
        self.root.as_mut()?.find_pane_mut(id)
    }

    /// Get all panes
    pub fn all_panes(&self) -> Vec<&Pane> {
        self.root
            .as_ref()
            .map(|r| r.all_panes())
            .unwrap_or_default()
    }

    /// Get all panes mutably
    pub fn all_panes_mut(&mut self) -> Vec<&mut Pane> {
        self.root
            .as_mut()
            .map(|r| r.all_panes_mut())
            .unwrap_or_default()
    }

    /// IDs of every leaf in first-to-second order
    pub fn pane_ids(&self) -> Vec<PaneId> {
        self.root
            .as_ref()
            .map(|r| r.all_pane_ids())
            .unwrap_or_default()
    }

    /// Get the number of panes
    pub fn pane_count(&self) -> usize {
        self.root.as_ref().map(|r| r.pane_count()).unwrap_or(0)
    }

    /// Check if there are multiple panes
    pub fn has_multiple_panes(&self) -> bool {
        self.pane_count() > 1
    }

    /// True once the last pane has been closed
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Get access to the root node
    pub fn root(&self) -> Option<&PaneNode> {
        self.root.as_ref()
    }

    /// Area the tree was last laid out into
    pub fn total_bounds(&self) -> PaneBounds {
        self.total_bounds
    }

    /// Serializable copy of the tree
    pub fn snapshot(&self) -> Option<LayoutNode> {
        self.root.as_ref().map(|r| r.snapshot())
    }

    /// Shut down every surface (post-order) and empty the tree
    pub fn shutdown(&mut self) {
        if let Some(mut root) = self.root.take() {
            crate::debug_info!(
                "PANE_CLOSE",
                "Shutting down {} pane(s)",
                root.pane_count()
            );
            root.shutdown();
        }
    }
}

impl Default for PaneManager {
    fn default() -> Self {
        Self::new(LayoutSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::types::{NavigationDirection, SplitDirection};
    use crate::surface::{CellSize, HeadlessHandle, HeadlessSurface};

    fn surface(title: &str) -> (Box<dyn TerminalSurface>, HeadlessHandle) {
        let surface = HeadlessSurface::new(title, CellSize::new(10.0, 20.0));
        let handle = surface.handle();
        (Box::new(surface), handle)
    }

    fn manager() -> (PaneManager, PaneId) {
        let (initial, _) = surface("initial");
        let mut manager = PaneManager::with_initial_pane(LayoutSettings::default(), None, initial);
        manager.resize_content(800.0, 600.0);
        let id = manager.pane_ids()[0];
        manager.activate(id).unwrap();
        (manager, id)
    }

    #[test]
    fn test_pane_manager_new() {
        let manager = PaneManager::default();
        assert!(manager.root.is_none());
        assert_eq!(manager.pane_count(), 0);
        assert!(!manager.has_multiple_panes());
    }

    #[test]
    fn test_split_places_new_pane_second() {
        let (mut manager, first) = manager();
        let (new_surface, _) = surface("second");
        let (a, b) = manager
            .split(first, SplitDirection::Vertical, None, new_surface)
            .unwrap();
        assert_eq!(a, first);
        assert_eq!(manager.pane_ids(), vec![first, b]);
        assert!(manager.has_multiple_panes());
        assert!(!manager.get_pane(a).unwrap().active);
        assert!(!manager.get_pane(b).unwrap().active);
        assert_eq!(manager.active_pane_id(), None);
        // The pane that was active stays on record as last focused
        assert!(manager.get_pane(a).unwrap().last_focused);
        assert!(!manager.get_pane(b).unwrap().last_focused);
    }

    #[test]
    fn test_split_lays_out_both_children() {
        let (mut manager, first) = manager();
        let (new_surface, handle) = surface("second");
        let (_, b) = manager
            .split(first, SplitDirection::Vertical, None, new_surface)
            .unwrap();
        let size = handle.last_size().unwrap();
        assert_eq!(size.width, 399.0);
        assert_eq!(manager.get_pane(b).unwrap().bounds.x, 401.0);
    }

    #[test]
    fn test_activate_tracks_last_focused() {
        let (mut manager, first) = manager();
        let (new_surface, _) = surface("second");
        let (_, second) = manager
            .split(first, SplitDirection::Vertical, None, new_surface)
            .unwrap();
        manager.activate(second).unwrap();
        let previous = manager.activate(first).unwrap();
        assert_eq!(previous, Some(second));
        assert!(manager.get_pane(second).unwrap().last_focused);
        assert!(!manager.get_pane(second).unwrap().active);
        assert!(!manager.get_pane(first).unwrap().last_focused);
        assert!(manager.get_pane(first).unwrap().active);
        assert_eq!(
            manager.navigate(first, NavigationDirection::Right),
            Some(second)
        );
    }

    #[test]
    fn test_close_unknown_pane_keeps_tree() {
        let (mut manager, _) = manager();
        assert!(matches!(
            manager.close_pane(99),
            Err(crate::pane::PaneError::PaneNotFound(99))
        ));
        assert_eq!(manager.pane_count(), 1);
    }

    #[test]
    fn test_shutdown_releases_every_surface() {
        let (initial, first_handle) = surface("initial");
        let mut manager = PaneManager::with_initial_pane(LayoutSettings::default(), None, initial);
        manager.resize_content(800.0, 600.0);
        let first = manager.pane_ids()[0];
        let (new_surface, second_handle) = surface("second");
        manager
            .split(first, SplitDirection::Horizontal, None, new_surface)
            .unwrap();
        manager.shutdown();
        assert!(manager.is_empty());
        assert!(first_handle.is_shut_down());
        assert!(second_handle.is_shut_down());
    }
}
