//! Shared integration test helpers for tabtree.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{cell, new_tab, drain};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers are used per file.

#![allow(dead_code)]

use tabtree::pane::{LayoutSettings, PaneId, PaneManager};
use tabtree::surface::{CellSize, HeadlessHandle, HeadlessSurface, TerminalSurface};
use tabtree::tab::{Tab, TabEvent, TabEvents};

/// Cell size used throughout the integration tests
pub fn cell() -> CellSize {
    CellSize::new(10.0, 20.0)
}

/// A headless surface with the test cell size and its inspection handle
pub fn surface(title: &str) -> (Box<dyn TerminalSurface>, HeadlessHandle) {
    let surface = HeadlessSurface::new(title, cell());
    let handle = surface.handle();
    (Box::new(surface), handle)
}

/// A pane manager with one active pane laid out at `width` x `height`
pub fn manager(width: f32, height: f32) -> PaneManager {
    manager_with(LayoutSettings::default(), width, height)
}

pub fn manager_with(settings: LayoutSettings, width: f32, height: f32) -> PaneManager {
    let (surface, _) = surface("shell");
    let mut manager = PaneManager::with_initial_pane(settings, None, surface);
    manager.resize_content(width, height);
    manager
        .activate(1)
        .expect("initial pane should be activatable");
    manager
}

/// Split `target` in a pane manager with a fresh headless surface
pub fn split(
    manager: &mut PaneManager,
    target: PaneId,
    direction: tabtree::pane::SplitDirection,
) -> PaneId {
    let (surface, _) = surface("shell");
    manager
        .split(target, direction, None, surface)
        .expect("split should have room")
        .1
}

/// A tab with a single pane titled "shell 1" laid out at 800x600
pub fn new_tab() -> (Tab, TabEvents, HeadlessHandle) {
    new_tab_with(LayoutSettings::default())
}

pub fn new_tab_with(settings: LayoutSettings) -> (Tab, TabEvents, HeadlessHandle) {
    let (surface, handle) = surface("shell 1");
    let (mut tab, events) = Tab::new(1, settings, None, surface);
    tab.resize_content(800.0, 600.0);
    (tab, events, handle)
}

/// Collect every event raised so far
pub fn drain(events: &mut TabEvents) -> Vec<TabEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

/// Number of panes currently flagged active / last focused
pub fn flag_counts(manager: &PaneManager) -> (usize, usize) {
    let panes = manager.all_panes();
    let active = panes.iter().filter(|p| p.active).count();
    let last_focused = panes.iter().filter(|p| p.last_focused).count();
    (active, last_focused)
}
