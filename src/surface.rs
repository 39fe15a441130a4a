//! Terminal surface capability.
//!
//! The pane tree never renders or emulates anything itself. Each leaf owns a
//! boxed [`TerminalSurface`], the boundary to whatever actually draws the
//! terminal. Surfaces report back through [`SurfaceEvent`]s sent on a
//! [`SurfaceNotifier`] they receive when their pane is attached to a
//! dispatcher.
//!
//! [`HeadlessSurface`] is an in-memory implementation used by the CLI driver
//! and by tests; it records what the tab asked of it so callers can inspect
//! it through a [`HeadlessHandle`].

use crate::dispatch::SurfaceNotifier;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// Size of one character cell in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

impl CellSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

/// Size handed to a surface when its pane is laid out
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfaceSize {
    /// Pane width in pixels (including padding)
    pub width: f32,
    /// Pane height in pixels (including padding)
    pub height: f32,
    /// Whole columns that fit inside the padded area
    pub cols: usize,
    /// Whole rows that fit inside the padded area
    pub rows: usize,
}

/// Events a surface raises towards its tab
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// The surface received input focus
    GotFocus,
    /// The surface's title changed; read the new value with `title()`
    TitleChanged,
    /// The font (and therefore cell size) changed. `initial` is true the
    /// first time a freshly created surface learns its real font metrics.
    FontSizeChanged {
        width: f32,
        height: f32,
        initial: bool,
    },
    /// The surface finished its startup and can take focus
    Initialized,
    /// The surface asked to be closed (e.g. its session ended)
    CloseRequested,
}

/// Capability a leaf pane needs from its terminal surface
///
/// Implementations live on the tab's thread; cross-thread reporting goes
/// through the [`SurfaceNotifier`] handed over in `attach_notifier`.
pub trait TerminalSurface {
    /// Current title as set by the running application
    fn title(&self) -> String;

    /// Request input focus
    fn focus(&mut self);

    /// Current viewport offset in lines from the top of the scrollback
    fn scroll_offset(&self) -> i32;

    /// Move the viewport to an absolute line offset
    fn set_scroll_offset(&mut self, offset: i32);

    /// Current character cell dimensions
    fn cell_size(&self) -> CellSize;

    /// Apply a new layout size
    fn resize(&mut self, size: SurfaceSize);

    /// Release the surface's resources. Called exactly once per surface.
    fn shutdown(&mut self);

    /// Receive the notifier used to report [`SurfaceEvent`]s
    fn attach_notifier(&mut self, _notifier: SurfaceNotifier) {}
}

/// Observable state of a [`HeadlessSurface`]
#[derive(Debug, Default)]
struct HeadlessState {
    title: String,
    cell: CellSize,
    scroll_offset: i32,
    size: Option<SurfaceSize>,
    focus_requests: usize,
    shut_down: bool,
    notifier: Option<SurfaceNotifier>,
}

/// In-memory terminal surface
pub struct HeadlessSurface {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessSurface {
    /// Create a surface with a title and cell size
    pub fn new(title: impl Into<String>, cell: CellSize) -> Self {
        Self {
            state: Rc::new(RefCell::new(HeadlessState {
                title: title.into(),
                cell,
                ..HeadlessState::default()
            })),
        }
    }

    /// Handle for inspecting and driving this surface after it is moved into a tab
    pub fn handle(&self) -> HeadlessHandle {
        HeadlessHandle {
            state: Rc::clone(&self.state),
        }
    }
}

impl TerminalSurface for HeadlessSurface {
    fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    fn focus(&mut self) {
        let notifier = {
            let mut state = self.state.borrow_mut();
            state.focus_requests += 1;
            state.notifier.clone()
        };
        if let Some(notifier) = notifier {
            notifier.notify(SurfaceEvent::GotFocus);
        }
    }

    fn scroll_offset(&self) -> i32 {
        self.state.borrow().scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: i32) {
        self.state.borrow_mut().scroll_offset = offset.max(0);
    }

    fn cell_size(&self) -> CellSize {
        self.state.borrow().cell
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.state.borrow_mut().size = Some(size);
    }

    fn shutdown(&mut self) {
        self.state.borrow_mut().shut_down = true;
    }

    fn attach_notifier(&mut self, notifier: SurfaceNotifier) {
        self.state.borrow_mut().notifier = Some(notifier);
    }
}

/// Shared handle onto a [`HeadlessSurface`]
#[derive(Clone)]
pub struct HeadlessHandle {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessHandle {
    /// Change the title and report it, as an application writing an OSC title would
    pub fn set_title(&self, title: impl Into<String>) {
        self.state.borrow_mut().title = title.into();
        self.emit(SurfaceEvent::TitleChanged);
    }

    /// Change the cell size and report it
    pub fn set_cell_size(&self, cell: CellSize, initial: bool) {
        self.state.borrow_mut().cell = cell;
        self.emit(SurfaceEvent::FontSizeChanged {
            width: cell.width,
            height: cell.height,
            initial,
        });
    }

    /// Send an event through the attached notifier.
    ///
    /// Returns false when no notifier has been attached yet.
    pub fn emit(&self, event: SurfaceEvent) -> bool {
        let notifier = self.state.borrow().notifier.clone();
        match notifier {
            Some(notifier) => {
                notifier.notify(event);
                true
            }
            None => false,
        }
    }

    /// Notifier attached by the dispatcher, if any
    pub fn notifier(&self) -> Option<SurfaceNotifier> {
        self.state.borrow().notifier.clone()
    }

    pub fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    pub fn focus_requests(&self) -> usize {
        self.state.borrow().focus_requests
    }

    pub fn scroll_offset(&self) -> i32 {
        self.state.borrow().scroll_offset
    }

    /// Last size applied by a layout pass
    pub fn last_size(&self) -> Option<SurfaceSize> {
        self.state.borrow().size
    }

    pub fn is_shut_down(&self) -> bool {
        self.state.borrow().shut_down
    }
}
