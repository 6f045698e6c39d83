//! Application session: the scope that owns the selection.
//!
//! Front-ends create one `Session`, call [`Session::start`] during startup
//! and pass it to whatever needs the selection. Using the selection of a
//! session that is not active is an error, never an implicit empty store.

use crate::CoreError;
use crate::selection::SelectionStore;

#[derive(Debug, Default)]
pub struct Session {
    selection: Option<SelectionStore>,
}

impl Session {
    /// A session that has not been started yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and start a session in one step.
    pub fn started() -> Self {
        let mut session = Self::new();
        session.start();
        session
    }

    /// Begin the session with an empty selection. Restarting discards the
    /// previous selection, like a full reload.
    pub fn start(&mut self) {
        if self.selection.is_some() {
            tracing::info!("session restarted, previous selection discarded");
        }
        self.selection = Some(SelectionStore::new());
    }

    /// End the session, handing back the final selection.
    pub fn end(&mut self) -> Option<SelectionStore> {
        self.selection.take()
    }

    pub fn is_active(&self) -> bool {
        self.selection.is_some()
    }

    pub fn selection(&self) -> Result<&SelectionStore, CoreError> {
        self.selection.as_ref().ok_or(CoreError::NoActiveSession)
    }

    pub fn selection_mut(&mut self) -> Result<&mut SelectionStore, CoreError> {
        self.selection.as_mut().ok_or(CoreError::NoActiveSession)
    }
}
