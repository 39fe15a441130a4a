//! `PaneBounds`: pixel-space bounding box for a pane.

use super::common::{Axis, SplitDirection};
use serde::Serialize;

/// Bounds of a pane in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PaneBounds {
    /// X position in pixels from left edge of content area
    pub x: f32,
    /// Y position in pixels from top of content area
    pub y: f32,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl PaneBounds {
    /// Create new bounds
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Size along an axis
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }

    /// Partition these bounds between the two children of a split
    ///
    /// The separator takes `divider_width` pixels; the first child gets
    /// `ratio` of what remains.
    pub fn split(
        &self,
        direction: SplitDirection,
        ratio: f32,
        divider_width: f32,
    ) -> (PaneBounds, PaneBounds) {
        match direction {
            SplitDirection::Horizontal => {
                // Panes stacked top/bottom
                let first_height = ((self.height - divider_width) * ratio).max(0.0);
                let second_height = (self.height - first_height - divider_width).max(0.0);
                (
                    PaneBounds::new(self.x, self.y, self.width, first_height),
                    PaneBounds::new(
                        self.x,
                        self.y + first_height + divider_width,
                        self.width,
                        second_height,
                    ),
                )
            }
            SplitDirection::Vertical => {
                // Panes side by side
                let first_width = ((self.width - divider_width) * ratio).max(0.0);
                let second_width = (self.width - first_width - divider_width).max(0.0);
                (
                    PaneBounds::new(self.x, self.y, first_width, self.height),
                    PaneBounds::new(
                        self.x + first_width + divider_width,
                        self.y,
                        second_width,
                        self.height,
                    ),
                )
            }
        }
    }

    /// Calculate grid dimensions (cols, rows) inside `padding` on each side
    pub fn grid_size(&self, cell_width: f32, cell_height: f32, padding: f32) -> (usize, usize) {
        if cell_width <= 0.0 || cell_height <= 0.0 {
            return (1, 1);
        }
        let content_width = (self.width - padding * 2.0).max(0.0);
        let content_height = (self.height - padding * 2.0).max(0.0);
        let cols = (content_width / cell_width).floor() as usize;
        let rows = (content_height / cell_height).floor() as usize;
        (cols.max(1), rows.max(1))
    }
}
