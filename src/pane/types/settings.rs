//! `LayoutSettings`: the layout-tuning subset of the configuration.

use super::common::SplitDirection;
use tabtree_config::Config;

/// Constants consumed by the tree's sizing algorithms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    /// Separator thickness between the two children of a split (pixels)
    pub divider_width: f32,
    /// Padding on each side of a leaf's surface (pixels)
    pub padding: f32,
    /// Minimum leaf size in character cells along either axis
    pub min_cells: usize,
    /// Ratio change applied by one keyboard resize
    pub resize_step: f32,
    /// Orientation chosen by an automatic split of a square pane
    pub auto_split_tie: SplitDirection,
    /// Pane limit per tab (0 = unlimited)
    pub max_panes: usize,
}

impl From<&Config> for LayoutSettings {
    fn from(config: &Config) -> Self {
        Self {
            divider_width: config.pane_divider_width,
            padding: config.pane_padding,
            min_cells: config.pane_min_size,
            resize_step: config.pane_resize_step,
            auto_split_tie: config.auto_split_tie,
            max_panes: config.max_panes,
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}
