//! Tests for the pane tree
//!
//! Covers the structural invariants of split and close, character-grid
//! snapping, directional navigation, keyboard resize clamping, and the
//! CanSplit space check. All panes use a 10x20 px cell, 4 px padding, a
//! 2 px divider and a 10-cell minimum (the default layout settings).

mod common;

use common::{flag_counts, manager, manager_with, split};
use std::collections::HashSet;
use tabtree::pane::{
    Axis, CloseOutcome, LayoutSettings, NavigationDirection, PaneError, PaneManager,
    SplitDirection,
};

// ============================================================================
// Split / Close
// ============================================================================

#[test]
fn test_split_then_close_restores_layout() {
    let mut manager = manager(800.0, 600.0);
    let before = manager.snapshot();

    let new_id = split(&mut manager, 1, SplitDirection::Vertical);
    assert_eq!(manager.pane_count(), 2);

    let outcome = manager.close_pane(new_id).unwrap();
    assert_eq!(
        outcome,
        CloseOutcome::PaneClosed {
            closed: new_id,
            successor: None
        },
        "closing an inactive pane reports no successor"
    );
    // Splitting left nothing active; reactivating restores the original flags
    assert_eq!(manager.active_pane_id(), None);
    manager.activate(1).unwrap();
    assert_eq!(manager.snapshot(), before);
}

#[test]
fn test_split_and_close_change_leaf_count_by_one() {
    let mut manager = manager(1600.0, 1200.0);
    let mut ids = vec![1];
    for direction in [
        SplitDirection::Vertical,
        SplitDirection::Horizontal,
        SplitDirection::Vertical,
    ] {
        let before = manager.pane_count();
        let target = *ids.last().unwrap();
        ids.push(split(&mut manager, target, direction));
        assert_eq!(manager.pane_count(), before + 1);
    }
    while let Some(id) = ids.pop() {
        let before = manager.pane_count();
        manager.close_pane(id).unwrap();
        assert_eq!(manager.pane_count(), before - 1);
    }
    assert!(manager.is_empty());
}

#[test]
fn test_close_first_child_prefers_last_focused_in_sibling() {
    let mut manager = manager(800.0, 600.0);
    let right = split(&mut manager, 1, SplitDirection::Vertical);
    let bottom_right = split(&mut manager, right, SplitDirection::Horizontal);

    manager.activate(bottom_right).unwrap();
    manager.activate(1).unwrap();

    let outcome = manager.close_pane(1).unwrap();
    assert_eq!(
        outcome,
        CloseOutcome::PaneClosed {
            closed: 1,
            successor: Some(bottom_right)
        }
    );
    // The promoted subtree fills the whole content area
    let right_pane = manager.get_pane(right).unwrap();
    assert_eq!(right_pane.bounds.x, 0.0);
    assert_eq!(right_pane.bounds.width, 800.0);
}

#[test]
fn test_close_without_history_falls_back_to_first_leaf() {
    let mut manager = manager(800.0, 600.0);
    let right = split(&mut manager, 1, SplitDirection::Vertical);
    let bottom_right = split(&mut manager, right, SplitDirection::Horizontal);
    manager.activate(1).unwrap();

    let outcome = manager.close_pane(1).unwrap();
    assert_eq!(
        outcome,
        CloseOutcome::PaneClosed {
            closed: 1,
            successor: Some(right)
        }
    );
    assert_eq!(manager.pane_ids(), vec![right, bottom_right]);
}

#[test]
fn test_close_last_pane_empties_tree() {
    let mut manager = manager(800.0, 600.0);
    assert_eq!(
        manager.close_pane(1).unwrap(),
        CloseOutcome::LastPaneClosed { closed: 1 }
    );
    assert!(manager.root().is_none());
    assert_eq!(manager.close_pane(1), Err(PaneError::EmptyTree));
}

#[test]
fn test_pane_ids_are_never_reused() {
    let mut manager = manager(800.0, 600.0);
    let first = split(&mut manager, 1, SplitDirection::Vertical);
    manager.close_pane(first).unwrap();
    let second = split(&mut manager, 1, SplitDirection::Vertical);
    assert_ne!(first, second);
}

// ============================================================================
// Snapping
// ============================================================================

fn three_pane_manager() -> PaneManager {
    let mut manager = manager(800.0, 600.0);
    let right = split(&mut manager, 1, SplitDirection::Vertical);
    split(&mut manager, right, SplitDirection::Horizontal);
    manager
}

#[test]
fn test_snap_is_idempotent_and_never_grows() {
    let manager = three_pane_manager();
    for axis in [Axis::Width, Axis::Height] {
        for proposed in [150.0, 333.3, 517.0, 640.0, 800.0, 1234.5] {
            let snapped = manager.calc_snapped_dimension(axis, proposed);
            assert!(
                snapped <= proposed + 0.01,
                "{axis:?}: {proposed} snapped up to {snapped}"
            );
            let again = manager.calc_snapped_dimension(axis, snapped);
            assert!(
                (again - snapped).abs() < 0.01,
                "{axis:?}: snapping {snapped} again gave {again}"
            );
        }
    }
}

#[test]
fn test_snap_single_leaf_to_cell_grid() {
    let manager = manager(800.0, 600.0);
    // 8 px padding total, 10 px cells: 105 -> 8 + 9 * 10
    assert_eq!(manager.calc_snapped_dimension(Axis::Width, 105.0), 98.0);
    // 8 px padding total, 20 px cells: 250 -> 8 + 12 * 20
    assert_eq!(manager.calc_snapped_dimension(Axis::Height, 250.0), 248.0);
}

#[test]
fn test_snap_empty_tree_is_identity() {
    let manager = PaneManager::new(LayoutSettings::default());
    assert_eq!(manager.calc_snapped_dimension(Axis::Width, 123.4), 123.4);
}

#[test]
fn test_min_dimension_accounts_for_splits() {
    let manager = three_pane_manager();
    // Side by side: two leaves of 10 cells + padding, plus the divider
    assert_eq!(manager.min_dimension(Axis::Width), 108.0 * 2.0 + 2.0);
    // Right column stacks two leaves; the left leaf is smaller
    assert_eq!(manager.min_dimension(Axis::Height), 208.0 * 2.0 + 2.0);
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_navigation_between_columns_is_symmetric() {
    let mut manager = manager(800.0, 600.0);
    let right = split(&mut manager, 1, SplitDirection::Vertical);
    let bottom_right = split(&mut manager, right, SplitDirection::Horizontal);

    manager.activate(bottom_right).unwrap();
    manager.activate(1).unwrap();

    // Entering the right column lands on the pane focused most recently
    let target = manager.navigate(1, NavigationDirection::Right);
    assert_eq!(target, Some(bottom_right));
    assert_eq!(manager.navigate(bottom_right, NavigationDirection::Left), Some(1));
    assert_eq!(manager.navigate(right, NavigationDirection::Left), Some(1));
}

#[test]
fn test_navigation_within_column_and_at_edges() {
    let mut manager = manager(800.0, 600.0);
    let right = split(&mut manager, 1, SplitDirection::Vertical);
    let bottom_right = split(&mut manager, right, SplitDirection::Horizontal);

    assert_eq!(manager.navigate(right, NavigationDirection::Down), Some(bottom_right));
    assert_eq!(manager.navigate(bottom_right, NavigationDirection::Up), Some(right));
    assert_eq!(manager.navigate(1, NavigationDirection::Left), None);
    assert_eq!(manager.navigate(1, NavigationDirection::Up), None);
    assert_eq!(manager.navigate(bottom_right, NavigationDirection::Right), None);
    assert_eq!(manager.navigate(99, NavigationDirection::Right), None);
}

#[test]
fn test_navigation_into_perpendicular_split_defaults_to_first() {
    let mut manager = manager(800.0, 600.0);
    let right = split(&mut manager, 1, SplitDirection::Vertical);
    split(&mut manager, right, SplitDirection::Horizontal);
    assert_eq!(manager.navigate(1, NavigationDirection::Right), Some(right));
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_resize_moves_separator_by_step() {
    let mut manager = manager(800.0, 600.0);
    let right = split(&mut manager, 1, SplitDirection::Vertical);

    assert!(manager.resize_pane(1, NavigationDirection::Right));
    let left = manager.get_pane(1).unwrap().bounds;
    // (800 - 2) * 0.55
    assert!((left.width - 438.9).abs() < 0.01);

    // The step applies to the enclosing split whichever side the pane is on
    assert!(manager.resize_pane(right, NavigationDirection::Left));
    let left = manager.get_pane(1).unwrap().bounds;
    assert!((left.width - 399.0).abs() < 0.01);
}

#[test]
fn test_resize_is_clamped_to_minimum_sizes() {
    let mut manager = manager(800.0, 600.0);
    let right = split(&mut manager, 1, SplitDirection::Vertical);

    let mut moves = 0;
    while manager.resize_pane(1, NavigationDirection::Right) {
        moves += 1;
        assert!(moves < 100, "resize never reached its limit");
    }
    let right_width = manager.get_pane(right).unwrap().bounds.width;
    assert!(right_width >= 108.0 - 0.01, "right pane shrank to {right_width}");

    while manager.resize_pane(1, NavigationDirection::Left) {}
    let left_width = manager.get_pane(1).unwrap().bounds.width;
    assert!(left_width >= 108.0 - 0.01, "left pane shrank to {left_width}");
}

#[test]
fn test_resize_without_matching_split_is_noop() {
    let mut manager = manager(800.0, 600.0);
    assert!(!manager.resize_pane(1, NavigationDirection::Right));

    split(&mut manager, 1, SplitDirection::Vertical);
    let before = manager.snapshot();
    assert!(!manager.resize_pane(1, NavigationDirection::Down));
    assert_eq!(manager.snapshot(), before);
}

// ============================================================================
// CanSplit
// ============================================================================

#[test]
fn test_can_split_requires_two_minimum_panes() {
    // 2 * (10 * 10 + 8) + 2 = 218 px needed side by side
    let mut manager = manager(220.0, 600.0);
    assert!(manager.can_split(1, SplitDirection::Vertical));
    let right = split(&mut manager, 1, SplitDirection::Vertical);

    // Each half is now 109 px wide
    assert!(!manager.can_split(1, SplitDirection::Vertical));
    assert!(!manager.can_split(right, SplitDirection::Vertical));
    // 2 * (10 * 20 + 8) + 2 = 418 px needed stacked
    assert!(manager.can_split(1, SplitDirection::Horizontal));

    let (surface, _) = common::surface("shell");
    match manager.split(1, SplitDirection::Vertical, None, surface) {
        Err(PaneError::InsufficientSpace {
            pane,
            direction,
            available,
            required,
        }) => {
            assert_eq!(pane, 1);
            assert_eq!(direction, SplitDirection::Vertical);
            assert_eq!(available, 109.0);
            assert_eq!(required, 218.0);
        }
        other => panic!("expected InsufficientSpace, got {other:?}"),
    }
    assert_eq!(manager.pane_count(), 2);
}

#[test]
fn test_can_split_false_before_layout() {
    let (surface, _) = common::surface("shell");
    let manager = PaneManager::with_initial_pane(LayoutSettings::default(), None, surface);
    assert!(!manager.can_split(1, SplitDirection::Vertical));
    assert!(!manager.can_split(42, SplitDirection::Vertical));
}

#[test]
fn test_max_panes_limit() {
    let settings = LayoutSettings {
        max_panes: 2,
        ..LayoutSettings::default()
    };
    let mut manager = manager_with(settings, 1600.0, 1200.0);
    split(&mut manager, 1, SplitDirection::Vertical);

    let (surface, _) = common::surface("shell");
    assert_eq!(
        manager
            .split(1, SplitDirection::Horizontal, None, surface)
            .unwrap_err(),
        PaneError::MaxPanesReached(2)
    );
}

// ============================================================================
// Randomised invariants
// ============================================================================

/// Small deterministic LCG so the sequence is reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound
    }
}

#[test]
fn test_random_operations_keep_single_active_pane() {
    let mut rng = Lcg(0x5eed);
    let mut manager = manager(2400.0, 1800.0);
    let directions = [
        NavigationDirection::Left,
        NavigationDirection::Right,
        NavigationDirection::Up,
        NavigationDirection::Down,
    ];

    for _ in 0..500 {
        if manager.is_empty() {
            break;
        }
        let ids = manager.pane_ids();
        let target = ids[rng.next(ids.len())];
        match rng.next(5) {
            0 => {
                let direction = if rng.next(2) == 0 {
                    SplitDirection::Vertical
                } else {
                    SplitDirection::Horizontal
                };
                let (surface, _) = common::surface("shell");
                let _ = manager.split(target, direction, None, surface);
            }
            1 if ids.len() > 1 => {
                if let Ok(CloseOutcome::PaneClosed {
                    successor: Some(next),
                    ..
                }) = manager.close_pane(target)
                {
                    manager.activate(next).unwrap();
                }
            }
            2 => {
                manager.activate(target).unwrap();
            }
            3 => {
                let direction = directions[rng.next(4)];
                if let Some(next) = manager.navigate(target, direction) {
                    assert!(manager.get_pane(next).is_some());
                    assert_ne!(next, target);
                }
            }
            _ => {
                let direction = directions[rng.next(4)];
                manager.resize_pane(target, direction);
            }
        }

        let (active, last_focused) = flag_counts(&manager);
        assert!(active <= 1, "{active} panes flagged active");
        assert!(last_focused <= 1, "{last_focused} panes flagged last focused");

        let ids = manager.pane_ids();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len(), "duplicate pane ids: {ids:?}");

        if let Some(root) = manager.root() {
            assert_eq!(root.pane_count(), ids.len());
            for pane in root.all_panes() {
                assert!(pane.bounds.width >= 0.0 && pane.bounds.height >= 0.0);
                assert!(pane.bounds.x + pane.bounds.width <= 2400.0 + 0.01);
                assert!(pane.bounds.y + pane.bounds.height <= 1800.0 + 0.01);
            }
        }
    }
}
