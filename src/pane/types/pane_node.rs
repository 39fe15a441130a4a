//! `PaneNode`: binary tree structure for arbitrary pane nesting.

use super::bounds::PaneBounds;
use super::common::{Axis, NavigationDirection, PaneId, SplitDirection};
use super::pane::Pane;
use super::settings::LayoutSettings;

/// Tolerance used when deciding that a snapped size is stable
const SNAP_TOLERANCE: f32 = 1e-2;
/// Slack added before flooring a cell count so exact multiples survive rounding
const SNAP_EPSILON: f32 = 1e-4;
/// Upper bound on fixpoint iterations when snapping along a split's axis
const MAX_SNAP_ITERATIONS: usize = 64;
/// Closest a resized ratio may get to 0 or 1
const RATIO_EPSILON: f32 = 0.01;

/// Tree node for pane layout
///
/// The pane tree is a binary tree where:
/// - Leaf nodes contain actual terminal panes
/// - Split nodes contain two children with a split direction and ratio
pub enum PaneNode {
    /// A leaf node containing a terminal pane
    Leaf(Box<Pane>),
    /// A split containing two child nodes
    Split {
        /// Direction of the split
        direction: SplitDirection,
        /// Split ratio, strictly inside (0, 1) - position of divider
        /// For horizontal: ratio is height of first child / available height
        /// For vertical: ratio is width of first child / available width
        ratio: f32,
        /// First child (top for horizontal, left for vertical)
        first: Box<PaneNode>,
        /// Second child (bottom for horizontal, right for vertical)
        second: Box<PaneNode>,
    },
}

/// Outcome of searching one subtree for a directional neighbour
enum Neighbor {
    /// The source pane is not in this subtree
    Absent,
    /// The source pane is here but no matching ancestor has been seen yet
    Unresolved,
    /// The neighbour has been chosen
    Found(PaneId),
}

/// Outcome of searching one subtree for the split a keyboard resize moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResizeSearch {
    /// The pane is not in this subtree
    Absent,
    /// The pane is here but no split along the axis has been seen yet
    Pending,
    /// A split was found; `true` if its ratio actually changed
    Applied(bool),
}

impl PaneNode {
    /// Create a new leaf node with a pane
    pub fn leaf(pane: Pane) -> Self {
        PaneNode::Leaf(Box::new(pane))
    }

    /// Create a new split node
    ///
    /// # Panics
    /// Panics if `ratio` is not strictly between 0 and 1.
    pub fn split(direction: SplitDirection, ratio: f32, first: PaneNode, second: PaneNode) -> Self {
        assert!(
            ratio > 0.0 && ratio < 1.0,
            "split ratio {ratio} outside (0, 1)"
        );
        PaneNode::Split {
            direction,
            ratio,
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    /// Check if this is a leaf node
    pub fn is_leaf(&self) -> bool {
        matches!(self, PaneNode::Leaf(_))
    }

    /// Get the pane if this is a leaf node
    pub fn as_pane(&self) -> Option<&Pane> {
        match self {
            PaneNode::Leaf(pane) => Some(pane),
            PaneNode::Split { .. } => None,
        }
    }

    /// Find a pane by ID (recursive)
    pub fn find_pane(&self, id: PaneId) -> Option<&Pane> {
        match self {
            PaneNode::Leaf(pane) => (pane.id == id).then_some(pane.as_ref()),
            PaneNode::Split { first, second, .. } => {
                first.find_pane(id).or_else(|| second.find_pane(id))
            }
        }
    }

    /// Find a mutable pane by ID (recursive)
    pub fn find_pane_mut(&mut self, id: PaneId) -> Option<&mut Pane> {
        match self {
            PaneNode::Leaf(pane) => (pane.id == id).then_some(pane.as_mut()),
            PaneNode::Split { first, second, .. } => first
                .find_pane_mut(id)
                .or_else(move || second.find_pane_mut(id)),
        }
    }

    /// Whether the pane is somewhere in this subtree
    pub fn contains(&self, id: PaneId) -> bool {
        self.find_pane(id).is_some()
    }

    /// Get all pane IDs in this subtree, first-to-second order
    pub fn all_pane_ids(&self) -> Vec<PaneId> {
        self.all_panes().iter().map(|pane| pane.id).collect()
    }

    /// Get all panes in this subtree
    pub fn all_panes(&self) -> Vec<&Pane> {
        match self {
            PaneNode::Leaf(pane) => vec![pane],
            PaneNode::Split { first, second, .. } => {
                let mut panes = first.all_panes();
                panes.extend(second.all_panes());
                panes
            }
        }
    }

    /// Get all mutable panes in this subtree
    pub fn all_panes_mut(&mut self) -> Vec<&mut Pane> {
        match self {
            PaneNode::Leaf(pane) => vec![pane],
            PaneNode::Split { first, second, .. } => {
                let mut panes = first.all_panes_mut();
                panes.extend(second.all_panes_mut());
                panes
            }
        }
    }

    /// Count total number of panes
    pub fn pane_count(&self) -> usize {
        match self {
            PaneNode::Leaf(_) => 1,
            PaneNode::Split { first, second, .. } => first.pane_count() + second.pane_count(),
        }
    }

    /// ID of the first (left/top-most) leaf
    pub fn first_pane_id(&self) -> PaneId {
        match self {
            PaneNode::Leaf(pane) => pane.id,
            PaneNode::Split { first, .. } => first.first_pane_id(),
        }
    }

    /// ID of the leaf flagged active, if any
    pub fn active_pane_id(&self) -> Option<PaneId> {
        self.all_panes()
            .into_iter()
            .find(|pane| pane.active)
            .map(|pane| pane.id)
    }

    /// ID of the leaf flagged as previously focused, if any
    pub fn last_focused_pane_id(&self) -> Option<PaneId> {
        self.all_panes()
            .into_iter()
            .find(|pane| pane.last_focused)
            .map(|pane| pane.id)
    }

    /// Calculate bounds for all panes given the total available area
    ///
    /// This recursively distributes space according to split ratios
    /// and updates each pane's bounds field.
    pub fn calculate_bounds(&mut self, bounds: PaneBounds, divider_width: f32) {
        match self {
            PaneNode::Leaf(pane) => {
                pane.bounds = bounds;
            }
            PaneNode::Split {
                direction,
                ratio,
                first,
                second,
            } => {
                let (first_bounds, second_bounds) = bounds.split(*direction, *ratio, divider_width);
                first.calculate_bounds(first_bounds, divider_width);
                second.calculate_bounds(second_bounds, divider_width);
            }
        }
    }

    /// Smallest size along `axis` that keeps every leaf at its minimum
    pub fn min_extent(&self, axis: Axis, settings: &LayoutSettings) -> f32 {
        match self {
            PaneNode::Leaf(pane) => pane.min_extent(axis, settings.min_cells, settings.padding),
            PaneNode::Split {
                direction,
                first,
                second,
                ..
            } => {
                let first_min = first.min_extent(axis, settings);
                let second_min = second.min_extent(axis, settings);
                if Axis::of(*direction) == axis {
                    first_min + second_min + settings.divider_width
                } else {
                    first_min.max(second_min)
                }
            }
        }
    }

    /// Largest size not above `proposed` at which every leaf along `axis`
    /// holds a whole number of cells
    ///
    /// Along a split's own axis the two children are snapped independently
    /// and summed with the separator; this is repeated until the total no
    /// longer moves, so snapping a snapped size returns it unchanged. Across
    /// the axis both children see the full size and the larger result wins.
    pub fn snap_extent(&self, axis: Axis, proposed: f32, settings: &LayoutSettings) -> f32 {
        match self {
            PaneNode::Leaf(pane) => {
                snap_leaf_extent(proposed, pane.cell_extent(axis), settings.padding * 2.0)
            }
            PaneNode::Split {
                direction,
                ratio,
                first,
                second,
            } => {
                if Axis::of(*direction) != axis {
                    return first
                        .snap_extent(axis, proposed, settings)
                        .max(second.snap_extent(axis, proposed, settings));
                }

                let divider = settings.divider_width;
                if proposed <= divider {
                    return proposed.max(0.0);
                }

                let mut size = proposed;
                for _ in 0..MAX_SNAP_ITERATIONS {
                    let available = size - divider;
                    let first_size = first.snap_extent(axis, available * *ratio, settings);
                    let second_size = second.snap_extent(axis, available - first_size, settings);
                    let next = first_size + second_size + divider;
                    if (size - next).abs() < SNAP_TOLERANCE {
                        return size;
                    }
                    size = next;
                }
                size
            }
        }
    }

    /// Find the pane focus moves to when leaving `from_id` in `direction`
    ///
    /// Walks up from the source pane to the nearest split that crosses the
    /// direction's axis with the source on the departing side, then descends
    /// into the other side towards its nearest edge. Returns `None` at the
    /// tree boundary.
    pub fn find_pane_in_direction(
        &self,
        from_id: PaneId,
        direction: NavigationDirection,
    ) -> Option<PaneId> {
        match self.neighbor(from_id, direction) {
            Neighbor::Found(id) => Some(id),
            Neighbor::Absent | Neighbor::Unresolved => None,
        }
    }

    fn neighbor(&self, from_id: PaneId, direction: NavigationDirection) -> Neighbor {
        match self {
            PaneNode::Leaf(pane) => {
                if pane.id == from_id {
                    Neighbor::Unresolved
                } else {
                    Neighbor::Absent
                }
            }
            PaneNode::Split {
                direction: split_dir,
                first,
                second,
                ..
            } => {
                let crosses = *split_dir == direction.split_direction();
                match first.neighbor(from_id, direction) {
                    Neighbor::Unresolved if crosses && direction.is_forward() => {
                        Neighbor::Found(second.entry_pane_id(direction))
                    }
                    Neighbor::Absent => match second.neighbor(from_id, direction) {
                        Neighbor::Unresolved if crosses && !direction.is_forward() => {
                            Neighbor::Found(first.entry_pane_id(direction))
                        }
                        other => other,
                    },
                    other => other,
                }
            }
        }
    }

    /// Leaf reached when entering this subtree while travelling `direction`
    ///
    /// Splits along the travel axis are entered on their near side. Across
    /// the axis, the side holding the previously focused pane wins so that
    /// reversing a move returns to where it started.
    fn entry_pane_id(&self, direction: NavigationDirection) -> PaneId {
        match self {
            PaneNode::Leaf(pane) => pane.id,
            PaneNode::Split {
                direction: split_dir,
                first,
                second,
                ..
            } => {
                if *split_dir == direction.split_direction() {
                    if direction.is_forward() {
                        first.entry_pane_id(direction)
                    } else {
                        second.entry_pane_id(direction)
                    }
                } else if second.last_focused_pane_id().is_some() {
                    second.entry_pane_id(direction)
                } else {
                    first.entry_pane_id(direction)
                }
            }
        }
    }

    /// Move the separator of the nearest split along `direction`'s axis
    /// above `target_id` by `settings.resize_step`
    ///
    /// Right/Down grow the first child, Left/Up grow the second. The new
    /// ratio is clamped so both children stay above their minimum size.
    pub(crate) fn resize_toward(
        &mut self,
        target_id: PaneId,
        direction: NavigationDirection,
        bounds: PaneBounds,
        settings: &LayoutSettings,
    ) -> ResizeSearch {
        match self {
            PaneNode::Leaf(pane) => {
                if pane.id == target_id {
                    ResizeSearch::Pending
                } else {
                    ResizeSearch::Absent
                }
            }
            PaneNode::Split {
                direction: split_dir,
                ratio,
                first,
                second,
            } => {
                let (first_bounds, second_bounds) =
                    bounds.split(*split_dir, *ratio, settings.divider_width);
                let found = if first.contains(target_id) {
                    first.resize_toward(target_id, direction, first_bounds, settings)
                } else {
                    second.resize_toward(target_id, direction, second_bounds, settings)
                };
                if found != ResizeSearch::Pending || *split_dir != direction.split_direction() {
                    return found;
                }

                let axis = Axis::of(*split_dir);
                let available = bounds.extent(axis) - settings.divider_width;
                let (low, high) = if available > 0.0 {
                    (
                        first.min_extent(axis, settings) / available,
                        1.0 - second.min_extent(axis, settings) / available,
                    )
                } else {
                    // Not laid out yet
                    (0.1, 0.9)
                };
                let low = low.max(RATIO_EPSILON);
                let high = high.min(1.0 - RATIO_EPSILON);
                if low > high {
                    return ResizeSearch::Applied(false);
                }

                let delta = if direction.is_forward() {
                    settings.resize_step
                } else {
                    -settings.resize_step
                };
                let mut new_ratio = (*ratio + delta).clamp(low, high);
                if (new_ratio - *ratio) * delta < 0.0 {
                    // Never move against the requested direction
                    new_ratio = *ratio;
                }
                let changed = (new_ratio - *ratio).abs() > f32::EPSILON;
                *ratio = new_ratio;
                ResizeSearch::Applied(changed)
            }
        }
    }

    /// Estimate the pane's on-screen size if this subtree filled `bounds`
    pub fn estimate_pane_bounds(
        &self,
        target_id: PaneId,
        bounds: PaneBounds,
        divider_width: f32,
    ) -> Option<PaneBounds> {
        match self {
            PaneNode::Leaf(pane) => (pane.id == target_id).then_some(bounds),
            PaneNode::Split {
                direction,
                ratio,
                first,
                second,
            } => {
                let (first_bounds, second_bounds) = bounds.split(*direction, *ratio, divider_width);
                first
                    .estimate_pane_bounds(target_id, first_bounds, divider_width)
                    .or_else(|| second.estimate_pane_bounds(target_id, second_bounds, divider_width))
            }
        }
    }

    /// Shut down every surface, children before parents
    pub fn shutdown(&mut self) {
        match self {
            PaneNode::Leaf(pane) => pane.shutdown(),
            PaneNode::Split { first, second, .. } => {
                first.shutdown();
                second.shutdown();
            }
        }
    }
}

/// Snap a leaf size down to `padding + n * cell`
fn snap_leaf_extent(proposed: f32, cell: f32, padding: f32) -> f32 {
    if cell <= 0.0 || proposed <= padding {
        return proposed.max(0.0);
    }
    let cells = ((proposed - padding) / cell + SNAP_EPSILON).floor();
    padding + cells * cell
}
