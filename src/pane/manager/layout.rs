//! Layout management operations for PaneManager
//!
//! Handles bounds calculation, surface resizing, keyboard split-ratio
//! adjustment, character-grid snapping and auto-split orientation.

use super::PaneManager;
use crate::pane::types::{
    Axis, NavigationDirection, PaneBounds, PaneId, ResizeSearch, SplitDirection,
};

impl PaneManager {
    /// Set the total size available for panes and lay the tree out again
    pub fn resize_content(&mut self, width: f32, height: f32) {
        self.total_bounds = PaneBounds::new(0.0, 0.0, width.max(0.0), height.max(0.0));
        crate::debug_log!("PANE_LAYOUT", "Content resized to {:.0}x{:.0}", width, height);
        self.relayout();
    }

    /// Recalculate bounds for all panes and push them to the surfaces
    pub fn relayout(&mut self) {
        let padding = self.settings.padding;
        if let Some(ref mut root) = self.root {
            root.calculate_bounds(self.total_bounds, self.settings.divider_width);
            for pane in root.all_panes_mut() {
                pane.apply_bounds(padding);
            }
        }
    }

    /// Move the separator nearest to `pane_id` along `direction`'s axis
    ///
    /// Right/Down move the separator right/down, Left/Up move it back. The
    /// step is clamped so both sides keep their minimum size. Returns false
    /// when no split along that axis encloses the pane or the separator is
    /// already at its limit.
    pub fn resize_pane(&mut self, pane_id: PaneId, direction: NavigationDirection) -> bool {
        let Some(root) = self.root.as_mut() else {
            return false;
        };
        let result = root.resize_toward(pane_id, direction, self.total_bounds, &self.settings);
        crate::debug_log!(
            "PANE_RESIZE",
            "Resize pane {} {:?}: {:?}",
            pane_id,
            direction,
            result
        );
        if result == ResizeSearch::Applied(true) {
            self.relayout();
            true
        } else {
            false
        }
    }

    /// Snap a proposed size along `axis` to the whole tree's character grid
    ///
    /// An empty tree leaves the size unchanged.
    pub fn calc_snapped_dimension(&self, axis: Axis, proposed: f32) -> f32 {
        match self.root {
            Some(ref root) => root.snap_extent(axis, proposed, &self.settings),
            None => proposed,
        }
    }

    /// Smallest size along `axis` that keeps every pane at its minimum
    pub fn min_dimension(&self, axis: Axis) -> f32 {
        self.root
            .as_ref()
            .map(|root| root.min_extent(axis, &self.settings))
            .unwrap_or(0.0)
    }

    /// Orientation an automatic split of `pane_id` would use if the tree
    /// filled `width` x `height`
    ///
    /// Wider panes split side by side, taller ones stacked; exact squares use
    /// the configured tie-break. Returns `None` for unknown panes.
    pub fn pre_calculate_auto_split(
        &self,
        pane_id: PaneId,
        width: f32,
        height: f32,
    ) -> Option<SplitDirection> {
        let bounds = self.root.as_ref()?.estimate_pane_bounds(
            pane_id,
            PaneBounds::new(0.0, 0.0, width, height),
            self.settings.divider_width,
        )?;
        let direction = if bounds.width > bounds.height {
            SplitDirection::Vertical
        } else if bounds.height > bounds.width {
            SplitDirection::Horizontal
        } else {
            self.settings.auto_split_tie
        };
        Some(direction)
    }
}
