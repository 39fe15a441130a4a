//! Shared enums for the pane system.

use std::str::FromStr;

// Re-export identifier types from tabtree-config for shared access across crates
pub use tabtree_config::{PaneId, ProfileId, SplitDirection};

/// Direction for pane navigation and keyboard resize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationDirection {
    Left,
    Right,
    Up,
    Down,
}

impl NavigationDirection {
    /// Orientation of the splits this direction moves across
    ///
    /// Moving left or right crosses the separator of a `Vertical` split.
    pub fn split_direction(self) -> SplitDirection {
        match self {
            NavigationDirection::Left | NavigationDirection::Right => SplitDirection::Vertical,
            NavigationDirection::Up | NavigationDirection::Down => SplitDirection::Horizontal,
        }
    }

    /// True when travelling from a split's first child towards its second
    pub fn is_forward(self) -> bool {
        matches!(self, NavigationDirection::Right | NavigationDirection::Down)
    }

    pub fn opposite(self) -> Self {
        match self {
            NavigationDirection::Left => NavigationDirection::Right,
            NavigationDirection::Right => NavigationDirection::Left,
            NavigationDirection::Up => NavigationDirection::Down,
            NavigationDirection::Down => NavigationDirection::Up,
        }
    }
}

impl FromStr for NavigationDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(NavigationDirection::Left),
            "right" | "r" => Ok(NavigationDirection::Right),
            "up" | "u" => Ok(NavigationDirection::Up),
            "down" | "d" => Ok(NavigationDirection::Down),
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}

/// Pixel axis a size is measured along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    /// Axis a split divides: side-by-side splits divide the width
    pub fn of(direction: SplitDirection) -> Self {
        match direction {
            SplitDirection::Vertical => Axis::Width,
            SplitDirection::Horizontal => Axis::Height,
        }
    }
}
