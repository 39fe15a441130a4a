//! Tab rename flow.
//!
//! `Normal -> Renaming` on request; back to `Normal` on confirm, cancel, or
//! when the editor loses focus (which commits whatever text it holds).

use super::Tab;
use super::events::TabEvent;

/// Whether a rename editor is open for the tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenameState {
    #[default]
    Normal,
    Renaming,
}

impl Tab {
    pub fn rename_state(&self) -> RenameState {
        self.rename
    }

    /// Enter `Renaming` and ask the presentation layer to open an editor
    /// seeded with the current title
    ///
    /// Requesting again while already renaming does nothing.
    pub fn request_rename(&mut self) {
        if self.rename == RenameState::Renaming {
            return;
        }
        self.rename = RenameState::Renaming;
        crate::debug_info!("TAB_RENAME", "Tab {} rename started", self.id);
        self.emit(TabEvent::RenameRequested(self.active_title()));
    }

    /// Commit `text` as the title override
    ///
    /// Empty text removes the override so the title follows the active pane
    /// again. Returns false when no rename was in progress.
    pub fn confirm_rename(&mut self, text: &str) -> bool {
        if self.rename != RenameState::Renaming {
            return false;
        }
        self.rename = RenameState::Normal;
        self.title_override = if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        };
        crate::debug_info!(
            "TAB_RENAME",
            "Tab {} renamed to {:?}",
            self.id,
            self.title_override
        );
        self.update_title();
        true
    }

    /// Leave `Renaming` without touching the override
    pub fn cancel_rename(&mut self) -> bool {
        if self.rename != RenameState::Renaming {
            return false;
        }
        self.rename = RenameState::Normal;
        crate::debug_info!("TAB_RENAME", "Tab {} rename cancelled", self.id);
        true
    }

    /// The editor lost focus: commit whatever it currently holds
    pub fn rename_focus_lost(&mut self, text: &str) -> bool {
        self.confirm_rename(text)
    }

    /// User-set title, if any
    pub fn title_override(&self) -> Option<&str> {
        self.title_override.as_deref()
    }
}
