//! Tests for PaneBounds, PaneNode sizing and directional queries.

use super::bounds::PaneBounds;
use super::common::{Axis, NavigationDirection, SplitDirection};
use super::pane::Pane;
use super::pane_node::PaneNode;
use super::settings::LayoutSettings;
use crate::surface::{CellSize, HeadlessSurface};

fn leaf(id: u64) -> PaneNode {
    let surface = HeadlessSurface::new(format!("pane {id}"), CellSize::new(10.0, 20.0));
    PaneNode::leaf(Pane::new(id, None, Box::new(surface)))
}

fn settings() -> LayoutSettings {
    LayoutSettings {
        divider_width: 2.0,
        padding: 4.0,
        min_cells: 10,
        resize_step: 0.05,
        auto_split_tie: SplitDirection::Vertical,
        max_panes: 0,
    }
}

#[test]
fn test_pane_bounds_split_vertical() {
    let bounds = PaneBounds::new(0.0, 0.0, 202.0, 100.0);
    let (first, second) = bounds.split(SplitDirection::Vertical, 0.5, 2.0);
    assert_eq!(first, PaneBounds::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(second, PaneBounds::new(102.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_pane_bounds_split_horizontal() {
    let bounds = PaneBounds::new(10.0, 10.0, 100.0, 42.0);
    let (first, second) = bounds.split(SplitDirection::Horizontal, 0.25, 2.0);
    assert_eq!(first.height, 10.0);
    assert_eq!(second.y, 22.0);
    assert_eq!(second.height, 30.0);
}

#[test]
fn test_pane_bounds_grid_size() {
    let bounds = PaneBounds::new(0.0, 0.0, 808.0, 600.0);
    let (cols, rows) = bounds.grid_size(10.0, 20.0, 4.0);
    assert_eq!(cols, 80);
    assert_eq!(rows, 29);
}

#[test]
fn test_leaf_snap_is_idempotent() {
    let node = leaf(1);
    let snapped = node.snap_extent(Axis::Width, 105.0, &settings());
    assert_eq!(snapped, 98.0);
    assert_eq!(node.snap_extent(Axis::Width, snapped, &settings()), snapped);
}

#[test]
fn test_leaf_snap_below_padding_is_unchanged() {
    let node = leaf(1);
    assert_eq!(node.snap_extent(Axis::Height, 6.0, &settings()), 6.0);
}

#[test]
fn test_split_snap_along_axis_sums_children() {
    let node = PaneNode::split(SplitDirection::Vertical, 0.5, leaf(1), leaf(2));
    let snapped = node.snap_extent(Axis::Width, 300.0, &settings());
    assert!((snapped - 298.0).abs() < 1e-3, "snapped to {snapped}");
    let again = node.snap_extent(Axis::Width, snapped, &settings());
    assert!((again - snapped).abs() < 1e-3);
}

#[test]
fn test_split_snap_across_axis_takes_max() {
    let node = PaneNode::split(SplitDirection::Vertical, 0.5, leaf(1), leaf(2));
    assert_eq!(node.snap_extent(Axis::Height, 100.0, &settings()), 88.0);
}

#[test]
fn test_min_extent() {
    let node = PaneNode::split(SplitDirection::Vertical, 0.5, leaf(1), leaf(2));
    assert_eq!(node.min_extent(Axis::Width, &settings()), 218.0);
    assert_eq!(node.min_extent(Axis::Height, &settings()), 208.0);
}

#[test]
fn test_navigation_enters_nearest_edge() {
    // 1 | (2 over 3)
    let node = PaneNode::split(
        SplitDirection::Vertical,
        0.5,
        leaf(1),
        PaneNode::split(SplitDirection::Horizontal, 0.5, leaf(2), leaf(3)),
    );
    assert_eq!(
        node.find_pane_in_direction(1, NavigationDirection::Right),
        Some(2)
    );
    assert_eq!(
        node.find_pane_in_direction(3, NavigationDirection::Left),
        Some(1)
    );
    assert_eq!(
        node.find_pane_in_direction(3, NavigationDirection::Up),
        Some(2)
    );
    assert_eq!(node.find_pane_in_direction(2, NavigationDirection::Up), None);
    assert_eq!(node.find_pane_in_direction(1, NavigationDirection::Left), None);
}

#[test]
fn test_navigation_prefers_last_focused_across_axis() {
    let mut node = PaneNode::split(
        SplitDirection::Vertical,
        0.5,
        leaf(1),
        PaneNode::split(SplitDirection::Horizontal, 0.5, leaf(2), leaf(3)),
    );
    if let Some(pane) = node.find_pane_mut(3) {
        pane.last_focused = true;
    }
    assert_eq!(
        node.find_pane_in_direction(1, NavigationDirection::Right),
        Some(3)
    );
}

#[test]
#[should_panic(expected = "outside (0, 1)")]
fn test_split_rejects_degenerate_ratio() {
    let _ = PaneNode::split(SplitDirection::Vertical, 1.0, leaf(1), leaf(2));
}

#[test]
fn test_navigation_direction_parse() {
    assert_eq!(
        "Right".parse::<NavigationDirection>(),
        Ok(NavigationDirection::Right)
    );
    assert_eq!("u".parse::<NavigationDirection>(), Ok(NavigationDirection::Up));
    assert!("sideways".parse::<NavigationDirection>().is_err());
    assert_eq!(
        NavigationDirection::Left.opposite(),
        NavigationDirection::Right
    );
}
