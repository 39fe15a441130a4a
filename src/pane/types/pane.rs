//! `Pane`: a single leaf of the pane tree hosting one terminal surface.

use crate::surface::{CellSize, SurfaceSize, TerminalSurface};

use super::bounds::PaneBounds;
use super::common::{Axis, PaneId, ProfileId};

/// A single terminal pane with its own state
///
/// The pane owns its surface. Dropping a pane shuts the surface down unless
/// [`Pane::shutdown`] already did.
pub struct Pane {
    /// Unique identifier for this pane within its tab
    pub id: PaneId,
    /// Profile the surface was launched with
    pub profile: Option<ProfileId>,
    /// Whether this is the tab's active pane
    pub active: bool,
    /// Whether this pane was the active one immediately before the current
    /// active pane
    pub last_focused: bool,
    /// Set once the surface reports it finished starting up
    pub initialized: bool,
    /// Current bounds of this pane (updated on layout calculation)
    pub bounds: PaneBounds,
    surface: Box<dyn TerminalSurface>,
    shut_down: bool,
}

impl Pane {
    /// Create a new pane around a surface
    pub fn new(id: PaneId, profile: Option<ProfileId>, surface: Box<dyn TerminalSurface>) -> Self {
        Self {
            id,
            profile,
            active: false,
            last_focused: false,
            initialized: false,
            bounds: PaneBounds::default(),
            surface,
            shut_down: false,
        }
    }

    pub fn surface(&self) -> &dyn TerminalSurface {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn TerminalSurface {
        self.surface.as_mut()
    }

    /// Title reported by the surface
    pub fn title(&self) -> String {
        self.surface.title()
    }

    pub fn cell_size(&self) -> CellSize {
        self.surface.cell_size()
    }

    /// Cell dimension along an axis
    pub fn cell_extent(&self, axis: Axis) -> f32 {
        let cell = self.surface.cell_size();
        match axis {
            Axis::Width => cell.width,
            Axis::Height => cell.height,
        }
    }

    /// Smallest size along `axis` that still fits `min_cells` cells plus padding
    pub fn min_extent(&self, axis: Axis, min_cells: usize, padding: f32) -> f32 {
        min_cells as f32 * self.cell_extent(axis) + padding * 2.0
    }

    /// Push the pane's current bounds down to its surface
    pub fn apply_bounds(&mut self, padding: f32) {
        let cell = self.surface.cell_size();
        let (cols, rows) = self.bounds.grid_size(cell.width, cell.height, padding);
        self.surface.resize(SurfaceSize {
            width: self.bounds.width,
            height: self.bounds.height,
            cols,
            rows,
        });
    }

    /// Release the surface. Subsequent calls do nothing.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        log::info!("Shutting down surface of pane {}", self.id);
        self.surface.shutdown();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl std::fmt::Debug for Pane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pane")
            .field("id", &self.id)
            .field("profile", &self.profile)
            .field("active", &self.active)
            .field("last_focused", &self.last_focused)
            .field("initialized", &self.initialized)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl Drop for Pane {
    fn drop(&mut self) {
        if !self.shut_down {
            log::info!("Dropping pane {}", self.id);
            self.shutdown();
        }
    }
}
