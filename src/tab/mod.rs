//! Tab coordinator
//!
//! This module provides the per-tab state machine:
//! - `Tab`: Owns one pane tree, tracks the active pane, and derives the title
//! - `TabEvent`: Notifications for the presentation layer
//! - `TabColor` / `StyleToken`: Custom header colour and its derived style
//! - `RenameState`: The rename editor flow
//!
//! Structural operations (split, close, navigate, resize) live in
//! [`pane_ops`]; surface events arrive through [`Tab::handle_surface_event`].

mod color;
mod events;
mod pane_ops;
mod rename;

pub use color::{DESELECTED_ALPHA, ParseColorError, Rgba, StyleToken, TabColor};
pub use events::{TabEvent, TabEvents};
pub use rename::RenameState;

use crate::dispatch::{Notification, SurfaceNotifier};
use crate::pane::{LayoutNode, LayoutSettings, PaneId, PaneManager, ProfileId};
use crate::surface::{SurfaceEvent, TerminalSurface};
use serde::Serialize;
use std::sync::Arc;
use tabtree_config::TabId;
use tokio::sync::Notify;
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};

/// A single tab: one pane tree plus its presentation state
pub struct Tab {
    /// Unique identifier for this tab
    pub id: TabId,
    /// Pane tree
    pane_manager: PaneManager,
    /// Leaf currently marked active (None only after the last pane closed)
    active_pane: Option<PaneId>,
    /// User-set title; `None` derives the title from the active pane
    title_override: Option<String>,
    rename: RenameState,
    /// Custom header colour
    custom_color: Option<TabColor>,
    /// Whether the tab itself has focus in its window
    is_focused: bool,
    /// Set once the last pane closed or the tab was closed as a whole
    closed: bool,
    /// Last title published through `TitleChanged`
    last_title: String,
    events: UnboundedSender<TabEvent>,
    /// Channel for surfaces created after registration with a dispatcher
    notifications: Option<UnboundedSender<Notification>>,
    /// Dispatcher wake-up raised when the tab closes or drops
    released: Option<Arc<Notify>>,
}

/// Serializable view of a tab
#[derive(Debug, Clone, Serialize)]
pub struct TabSnapshot {
    pub id: TabId,
    pub title: String,
    pub active_pane: Option<PaneId>,
    pub focused: bool,
    pub renaming: bool,
    pub closed: bool,
    pub color: Option<String>,
    pub pane_count: usize,
    pub layout: Option<LayoutNode>,
}

impl Tab {
    /// Create a tab hosting a single pane
    ///
    /// The initial pane is active but its surface is not focused until the
    /// tab is focused and the surface reports it has initialized.
    pub fn new(
        id: TabId,
        settings: LayoutSettings,
        profile: Option<ProfileId>,
        surface: Box<dyn TerminalSurface>,
    ) -> (Self, TabEvents) {
        let (events, rx) = unbounded_channel();
        let mut pane_manager = PaneManager::with_initial_pane(settings, profile, surface);
        let initial = pane_manager.pane_ids().first().copied();
        if let Some(pane_id) = initial
            && let Err(e) = pane_manager.activate(pane_id)
        {
            log::error!("Tab {}: failed to activate initial pane: {}", id, e);
        }

        let mut tab = Self {
            id,
            pane_manager,
            active_pane: initial,
            title_override: None,
            rename: RenameState::Normal,
            custom_color: None,
            is_focused: false,
            closed: false,
            last_title: String::new(),
            events,
            notifications: None,
            released: None,
        };
        tab.last_title = tab.active_title();
        log::info!("Created tab {} with pane {:?}", id, initial);
        (tab, rx)
    }

    pub(crate) fn emit(&self, event: TabEvent) {
        crate::debug_trace!("TAB_EVENT", "Tab {} raised {:?}", self.id, event);
        // Nobody listening is fine
        let _ = self.events.send(event);
    }

    /// Route a surface event to the pane that raised it
    pub fn handle_surface_event(&mut self, pane_id: PaneId, event: SurfaceEvent) {
        if self.closed {
            return;
        }
        crate::debug_log!("TAB_EVENT", "Tab {} pane {}: {:?}", self.id, pane_id, event);

        match event {
            SurfaceEvent::GotFocus => {
                if self.active_pane != Some(pane_id) {
                    self.update_active_pane(pane_id);
                }
            }
            SurfaceEvent::TitleChanged => {
                if self.active_pane == Some(pane_id) {
                    self.update_title();
                }
            }
            SurfaceEvent::FontSizeChanged { initial, .. } => {
                if initial {
                    self.pane_manager.relayout();
                }
            }
            SurfaceEvent::Initialized => {
                if let Some(pane) = self.pane_manager.get_pane_mut(pane_id) {
                    pane.initialized = true;
                }
                if self.active_pane == Some(pane_id) {
                    self.focus_active_surface();
                }
            }
            SurfaceEvent::CloseRequested => {
                if let Err(e) = self.close_pane_by_id(pane_id) {
                    log::warn!("Tab {}: close request from pane {}: {}", self.id, pane_id, e);
                }
            }
        }
    }

    /// Make `pane_id` the active pane
    ///
    /// Clears the active flag tree-wide, sets it on the new pane, refreshes
    /// the title and raises `ActivePaneChanged`.
    pub(crate) fn update_active_pane(&mut self, pane_id: PaneId) {
        match self.pane_manager.activate(pane_id) {
            Ok(previous) => {
                self.active_pane = Some(pane_id);
                crate::debug_info!(
                    "TAB_FOCUS",
                    "Tab {} active pane {:?} -> {}",
                    self.id,
                    previous,
                    pane_id
                );
                self.update_title();
                self.emit(TabEvent::ActivePaneChanged);
            }
            Err(e) => log::warn!("Tab {}: cannot activate pane {}: {}", self.id, pane_id, e),
        }
    }

    /// Recompute the title and publish it if it changed
    pub(crate) fn update_title(&mut self) {
        let title = self.active_title();
        if title != self.last_title {
            self.last_title = title.clone();
            self.emit(TabEvent::TitleChanged(title));
        }
    }

    /// Title to display: the override, else the active surface's title
    pub fn active_title(&self) -> String {
        if let Some(ref title) = self.title_override
            && !title.is_empty()
        {
            return title.clone();
        }
        self.active_surface()
            .map(|surface| surface.title())
            .unwrap_or_default()
    }

    /// Record tab focus; gaining focus asks the active surface to take input
    pub fn set_focused(&mut self, focused: bool) {
        self.is_focused = focused;
        crate::debug_info!("TAB_FOCUS", "Tab {} focused={}", self.id, focused);
        if focused {
            self.focus_active_surface();
        }
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    /// Whether the active pane's surface has finished starting up
    pub fn control_initialized(&self) -> bool {
        self.active_pane
            .and_then(|id| self.pane_manager.get_pane(id))
            .is_some_and(|pane| pane.initialized)
    }

    /// Ask the active surface to take input focus
    ///
    /// Dropped unless the tab is focused and the surface has initialized;
    /// the surface's `Initialized` event retries for whichever pane is
    /// active by then.
    pub(crate) fn focus_active_surface(&mut self) {
        if !self.is_focused || !self.control_initialized() {
            crate::debug_log!(
                "TAB_FOCUS",
                "Tab {} focus request dropped (focused={}, initialized={})",
                self.id,
                self.is_focused,
                self.control_initialized()
            );
            return;
        }
        if let Some(surface) = self.active_surface_mut() {
            surface.focus();
        }
    }

    /// Apply a custom header colour
    pub fn set_color(&mut self, color: TabColor) {
        self.custom_color = Some(color);
        crate::debug_info!("TAB_COLOR", "Tab {} colour set to {}", self.id, color);
        self.emit(TabEvent::ColorSelected(color));
    }

    /// Remove the custom header colour
    pub fn clear_color(&mut self) {
        self.custom_color = None;
        crate::debug_info!("TAB_COLOR", "Tab {} colour cleared", self.id);
        self.emit(TabEvent::ColorCleared);
    }

    pub fn color(&self) -> Option<TabColor> {
        self.custom_color
    }

    /// True once the tab has closed; further operations are rejected
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Give every surface a notifier on `tx`, and keep `tx` for panes
    /// created later. `released` is signalled when the tab closes or drops.
    pub(crate) fn attach_notifications(
        &mut self,
        tx: UnboundedSender<Notification>,
        released: Arc<Notify>,
    ) {
        let tab_id = self.id;
        for pane in self.pane_manager.all_panes_mut() {
            let notifier = SurfaceNotifier::new(tab_id, pane.id, tx.clone());
            pane.surface_mut().attach_notifier(notifier);
        }
        self.notifications = Some(tx);
        self.released = Some(released);
    }

    /// Wake the dispatcher so it can notice the tab is gone
    pub(crate) fn signal_released(&self) {
        if let Some(released) = &self.released {
            released.notify_one();
        }
    }

    /// Attach a notifier to one pane's surface if the tab is registered
    pub(crate) fn attach_notifier_to(&mut self, pane_id: PaneId) {
        let Some(tx) = self.notifications.clone() else {
            return;
        };
        let tab_id = self.id;
        if let Some(pane) = self.pane_manager.get_pane_mut(pane_id) {
            pane.surface_mut()
                .attach_notifier(SurfaceNotifier::new(tab_id, pane_id, tx));
        }
    }

    /// Read-only access to the pane tree
    pub fn pane_manager(&self) -> &PaneManager {
        &self.pane_manager
    }

    /// Serializable copy of the tab and its layout
    pub fn snapshot(&self) -> TabSnapshot {
        TabSnapshot {
            id: self.id,
            title: self.active_title(),
            active_pane: self.active_pane,
            focused: self.is_focused,
            renaming: self.rename == RenameState::Renaming,
            closed: self.closed,
            color: self.custom_color.map(|c| c.to_string()),
            pane_count: self.pane_manager.pane_count(),
            layout: self.pane_manager.snapshot(),
        }
    }
}

impl Drop for Tab {
    fn drop(&mut self) {
        if !self.pane_manager.is_empty() {
            log::info!("Dropping tab {}", self.id);
            self.pane_manager.shutdown();
        }
        self.signal_released();
    }
}
