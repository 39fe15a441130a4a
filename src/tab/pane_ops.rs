//! Tab split pane operations.
//!
//! Provides methods for creating, closing, navigating, and resizing split panes
//! within a tab. Pane operations use `PaneManager` to manage the binary tree
//! layout of panes; this layer keeps the active pane, title and events in
//! step with the tree.

use super::Tab;
use super::events::TabEvent;
use crate::pane::{
    Axis, CloseOutcome, NavigationDirection, PaneError, PaneId, ProfileId, SplitDirection,
};
use crate::surface::TerminalSurface;

impl Tab {
    /// Check if this tab has multiple panes (split)
    pub fn has_multiple_panes(&self) -> bool {
        self.pane_manager.has_multiple_panes()
    }

    /// Number of leaf panes in this tab
    pub fn leaf_pane_count(&self) -> usize {
        self.pane_manager.pane_count()
    }

    pub fn active_pane_id(&self) -> Option<PaneId> {
        self.active_pane
    }

    fn require_active(&self) -> Result<PaneId, PaneError> {
        if self.closed {
            return Err(PaneError::TabClosed);
        }
        self.active_pane.ok_or(PaneError::EmptyTree)
    }

    /// Whether the active pane has room for a split of this orientation
    pub fn can_split_pane(&self, direction: SplitDirection) -> bool {
        self.require_active()
            .is_ok_and(|id| self.pane_manager.can_split(id, direction))
    }

    /// Split the active pane
    ///
    /// The new pane is placed after the original along the split axis and
    /// becomes active. Returns the new pane's ID.
    pub fn split(
        &mut self,
        direction: SplitDirection,
        profile: Option<ProfileId>,
        surface: Box<dyn TerminalSurface>,
    ) -> Result<PaneId, PaneError> {
        let active = self.require_active()?;
        let (_, new_id) = self.pane_manager.split(active, direction, profile, surface)?;
        log::info!("Split tab {} {}, new pane {}", self.id, direction, new_id);

        self.attach_notifier_to(new_id);
        self.update_active_pane(new_id);
        self.focus_active_surface();
        Ok(new_id)
    }

    /// Split the active pane along its longer side
    pub fn split_auto(
        &mut self,
        profile: Option<ProfileId>,
        surface: Box<dyn TerminalSurface>,
    ) -> Result<PaneId, PaneError> {
        let bounds = self.pane_manager.total_bounds();
        let direction = self.pre_calculate_auto_split(bounds.width, bounds.height);
        self.split(direction, profile, surface)
    }

    /// Orientation an automatic split of the active pane would use if the
    /// tree filled `width` x `height`
    pub fn pre_calculate_auto_split(&self, width: f32, height: f32) -> SplitDirection {
        self.active_pane
            .and_then(|id| self.pane_manager.pre_calculate_auto_split(id, width, height))
            .unwrap_or(SplitDirection::Vertical)
    }

    /// Close the active pane
    pub fn close_pane(&mut self) -> Result<CloseOutcome, PaneError> {
        let active = self.require_active()?;
        self.close_pane_by_id(active)
    }

    /// Close a specific pane
    ///
    /// Raises `PaneClosed`; closing the last pane also raises `Closed`.
    pub fn close_pane_by_id(&mut self, pane_id: PaneId) -> Result<CloseOutcome, PaneError> {
        if self.closed {
            return Err(PaneError::TabClosed);
        }
        let outcome = self.pane_manager.close_pane(pane_id)?;
        self.emit(TabEvent::PaneClosed(pane_id));

        match outcome {
            CloseOutcome::LastPaneClosed { .. } => {
                self.active_pane = None;
                self.mark_closed();
            }
            CloseOutcome::PaneClosed {
                successor: Some(successor),
                ..
            } => {
                self.update_active_pane(successor);
                self.focus_active_surface();
            }
            CloseOutcome::PaneClosed {
                successor: None, ..
            } => {}
        }
        Ok(outcome)
    }

    /// Close the whole tab, shutting down every surface
    ///
    /// Raises `Closed` once; closing an already closed tab does nothing.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.pane_manager.shutdown();
        self.active_pane = None;
        self.mark_closed();
    }

    fn mark_closed(&mut self) {
        self.closed = true;
        self.rename = super::RenameState::Normal;
        log::info!("Tab {} closed", self.id);
        self.emit(TabEvent::Closed);
        self.signal_released();
    }

    /// Tear down the tab: reset its colour, then shut down every surface
    ///
    /// Used by the owner when discarding the tab; does not raise `Closed`.
    pub fn shutdown(&mut self) {
        self.clear_color();
        self.pane_manager.shutdown();
        self.active_pane = None;
        self.closed = true;
        self.signal_released();
    }

    /// Move the separator next to the active pane
    pub fn resize_pane(&mut self, direction: NavigationDirection) -> bool {
        match self.require_active() {
            Ok(active) => self.pane_manager.resize_pane(active, direction),
            Err(_) => false,
        }
    }

    /// Move focus to the neighbouring pane in `direction`
    ///
    /// Returns false at the tree boundary.
    pub fn navigate_focus(&mut self, direction: NavigationDirection) -> bool {
        let Ok(active) = self.require_active() else {
            return false;
        };
        match self.pane_manager.navigate(active, direction) {
            Some(target) => {
                self.update_active_pane(target);
                self.focus_active_surface();
                true
            }
            None => false,
        }
    }

    /// Lay the tree out into a new total size
    pub fn resize_content(&mut self, width: f32, height: f32) {
        self.pane_manager.resize_content(width, height);
    }

    /// Snap a proposed size along an axis to the tree's character grid
    pub fn calc_snapped_dimension(&self, axis: Axis, proposed: f32) -> f32 {
        self.pane_manager.calc_snapped_dimension(axis, proposed)
    }

    /// Scroll the active surface by `delta` lines
    pub fn scroll(&mut self, delta: i32) {
        if let Some(surface) = self.active_surface_mut() {
            let offset = surface.scroll_offset().saturating_add(delta);
            surface.set_scroll_offset(offset);
        }
    }

    /// Profile of the active pane
    pub fn focused_profile(&self) -> Option<ProfileId> {
        self.active_pane
            .and_then(|id| self.pane_manager.get_pane(id))
            .and_then(|pane| pane.profile)
    }

    /// Surface of the active pane
    pub fn active_surface(&self) -> Option<&dyn TerminalSurface> {
        let id = self.active_pane?;
        self.pane_manager.get_pane(id).map(|pane| pane.surface())
    }

    /// Mutable surface of the active pane
    pub fn active_surface_mut(&mut self) -> Option<&mut dyn TerminalSurface> {
        let id = self.active_pane?;
        self.pane_manager
            .get_pane_mut(id)
            .map(|pane| pane.surface_mut())
    }
}
