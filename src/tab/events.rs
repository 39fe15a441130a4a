//! Notifications a tab raises towards its presentation layer.

use super::color::TabColor;
use crate::pane::PaneId;
use tokio::sync::mpsc::UnboundedReceiver;

/// Tab-level event
#[derive(Debug, Clone, PartialEq)]
pub enum TabEvent {
    /// The displayed title changed
    TitleChanged(String),
    /// A different pane became active
    ActivePaneChanged,
    /// A pane was removed from the tree
    PaneClosed(PaneId),
    /// The tab's last pane closed, or the whole tab was closed
    Closed,
    /// A custom colour was applied
    ColorSelected(TabColor),
    /// The custom colour was removed
    ColorCleared,
    /// Rename started; carries the text to seed the editor with
    RenameRequested(String),
}

/// Receiving end of a tab's event stream
pub type TabEvents = UnboundedReceiver<TabEvent>;
