//! Delivery of surface events to their tabs.
//!
//! Surfaces may report from any thread. Each one holds a [`SurfaceNotifier`]
//! that pushes a [`Notification`] onto an unbounded tokio channel; sending
//! never blocks. The [`Dispatcher`] lives on the thread that owns the tabs
//! and is the only place notifications touch tab state. Tabs are held weakly,
//! so a notification for a tab that has since been dropped or closed is
//! discarded instead of applied. Registered tabs signal a shared [`Notify`]
//! when they close or drop, which wakes [`Dispatcher::run`] even while no
//! notification is in flight.

use crate::surface::SurfaceEvent;
use crate::tab::Tab;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use tabtree_config::{PaneId, TabId};
use tokio::sync::Notify;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// A surface event tagged with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub tab: TabId,
    pub pane: PaneId,
    pub event: SurfaceEvent,
}

/// Sending half handed to each surface
///
/// Cheap to clone and `Send`, so a surface can move it onto whatever thread
/// drives its session.
#[derive(Debug, Clone)]
pub struct SurfaceNotifier {
    tab: TabId,
    pane: PaneId,
    tx: UnboundedSender<Notification>,
}

impl SurfaceNotifier {
    pub fn new(tab: TabId, pane: PaneId, tx: UnboundedSender<Notification>) -> Self {
        Self { tab, pane, tx }
    }

    pub fn tab_id(&self) -> TabId {
        self.tab
    }

    pub fn pane_id(&self) -> PaneId {
        self.pane
    }

    /// Queue an event for the owning tab
    ///
    /// Returns false if the dispatcher is gone; the event is dropped.
    pub fn notify(&self, event: SurfaceEvent) -> bool {
        crate::debug_trace!(
            "DISPATCH",
            "tab {} pane {} queued {:?}",
            self.tab,
            self.pane,
            event
        );
        self.tx
            .send(Notification {
                tab: self.tab,
                pane: self.pane,
                event,
            })
            .is_ok()
    }
}

/// What woke the dispatch loop
enum Wake {
    Notification(Notification),
    /// A registered tab closed or was dropped
    Released,
    Disconnected,
}

/// Single-threaded event pump for a set of tabs
pub struct Dispatcher {
    tx: UnboundedSender<Notification>,
    rx: UnboundedReceiver<Notification>,
    /// Signalled by registered tabs as they close or drop
    released: Arc<Notify>,
    tabs: HashMap<TabId, Weak<RefCell<Tab>>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            tx,
            rx,
            released: Arc::new(Notify::new()),
            tabs: HashMap::new(),
        }
    }

    /// Track a tab and give each of its surfaces a notifier
    ///
    /// Only a weak reference is kept; dropping the last strong reference
    /// unregisters the tab implicitly.
    pub fn register(&mut self, tab: &Rc<RefCell<Tab>>) {
        self.prune();
        let id = {
            let mut tab = tab.borrow_mut();
            tab.attach_notifications(self.tx.clone(), Arc::clone(&self.released));
            tab.id
        };
        log::info!("Registered tab {} with dispatcher", id);
        self.tabs.insert(id, Rc::downgrade(tab));
    }

    /// Forget tabs whose last strong reference is gone
    fn prune(&mut self) {
        let before = self.tabs.len();
        self.tabs.retain(|_, tab| tab.strong_count() > 0);
        let pruned = before - self.tabs.len();
        if pruned > 0 {
            crate::debug_log!("DISPATCH", "Forgot {} dropped tab(s)", pruned);
        }
    }

    /// Number of tabs still registered, dropped ones excluded
    pub fn registered_tab_count(&mut self) -> usize {
        self.prune();
        self.tabs.len()
    }

    /// Number of registered tabs that are still alive and open
    pub fn live_tab_count(&self) -> usize {
        self.tabs
            .values()
            .filter_map(Weak::upgrade)
            .filter(|tab| tab.try_borrow().map(|t| !t.is_closed()).unwrap_or(true))
            .count()
    }

    /// Apply one notification
    ///
    /// Returns true if it reached a live tab.
    pub fn dispatch(&mut self, notification: Notification) -> bool {
        let Some(tab) = self.tabs.get(&notification.tab).and_then(Weak::upgrade) else {
            crate::debug_log!(
                "DISPATCH",
                "Dropping {:?} for pane {}: tab {} is gone",
                notification.event,
                notification.pane,
                notification.tab
            );
            self.tabs.remove(&notification.tab);
            return false;
        };

        let Ok(mut tab) = tab.try_borrow_mut() else {
            crate::debug_error!(
                "DISPATCH",
                "Tab {} is busy; dropping {:?}",
                notification.tab,
                notification.event
            );
            return false;
        };

        if tab.is_closed() {
            crate::debug_log!(
                "DISPATCH",
                "Dropping {:?} for pane {}: tab {} is closed",
                notification.event,
                notification.pane,
                notification.tab
            );
            return false;
        }

        tab.handle_surface_event(notification.pane, notification.event);
        true
    }

    /// Apply everything already queued without waiting
    ///
    /// Returns how many notifications reached a live tab.
    pub fn dispatch_pending(&mut self) -> usize {
        self.prune();
        let mut delivered = 0;
        while let Ok(notification) = self.rx.try_recv() {
            if self.dispatch(notification) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Deliver notifications as they arrive until no registered tab is live
    ///
    /// Intended for a current-thread runtime or a `LocalSet`, since tabs are
    /// not `Send`.
    pub async fn run(&mut self) {
        log::info!(
            "Dispatcher running for {} tab(s)",
            self.registered_tab_count()
        );
        while self.live_tab_count() > 0 {
            let wake = tokio::select! {
                received = self.rx.recv() => match received {
                    Some(notification) => Wake::Notification(notification),
                    None => Wake::Disconnected,
                },
                () = self.released.notified() => Wake::Released,
            };
            match wake {
                Wake::Notification(notification) => {
                    self.dispatch(notification);
                }
                Wake::Released => self.prune(),
                Wake::Disconnected => break,
            }
        }
        log::info!("Dispatcher stopped: no live tabs");
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
