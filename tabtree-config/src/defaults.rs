//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` fields, and by `impl Default for Config`.

use crate::types::{LogLevel, SplitDirection};

pub fn pane_divider_width() -> f32 {
    2.0 // 2 pixel separator between panes
}

pub fn pane_padding() -> f32 {
    4.0 // 4 pixel padding inside panes (space between content and border/divider)
}

pub fn pane_min_size() -> usize {
    10 // Minimum pane size in cells (columns or rows)
}

pub fn pane_resize_step() -> f32 {
    0.05
}

pub fn auto_split_tie() -> SplitDirection {
    SplitDirection::Vertical
}

pub fn max_panes() -> usize {
    0 // Unlimited
}

pub fn log_level() -> LogLevel {
    LogLevel::Off
}
