// Library exports for testing and embedding
//
// Threading model: every `Tab` and its pane tree live on one thread and are
// mutated only there. Surfaces may report from other threads, but only by
// sending on the `Send` notifier the dispatcher handed them; the dispatcher
// applies those notifications on the owning thread.

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod dispatch;
pub mod pane;
pub mod script;
pub mod surface;
pub mod tab;

pub use tabtree_config as config;
