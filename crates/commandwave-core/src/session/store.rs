//! The session state store.

use super::model::Session;
use crate::error::{CommandWaveError, Result};
use crate::playbook::{Block, PlaybookDocument};
use crate::terminal::TerminalId;
use crate::variable::{VariableSet, VariableSlot};
use std::collections::HashMap;

/// Owns the per-tab sessions.
///
/// The store follows a single-threaded mutation model: every mutator runs to
/// completion before the next handler fires, so the methods take `&mut self`
/// and there is no interior locking. Callers that share a store across async
/// handlers wrap it in `Arc<RwLock<_>>` at the application layer.
///
/// Reads hand out snapshots by value; the substitution engine always operates
/// on a fully-formed copy, never on state that a pending handler could still
/// be shaping.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<TerminalId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session for `terminal`, creating it with default
    /// variables and no playbooks if absent. Idempotent; never overwrites
    /// an existing session.
    pub fn ensure(&mut self, terminal: &TerminalId) -> &mut Session {
        self.sessions.entry(terminal.clone()).or_default()
    }

    pub fn contains(&self, terminal: &TerminalId) -> bool {
        self.sessions.contains_key(terminal)
    }

    /// Snapshot of the tab's variable bindings.
    ///
    /// Unknown tabs read as the all-empty default set; the store itself is
    /// not mutated, so read-only callers need not have called [`ensure`].
    ///
    /// [`ensure`]: SessionStore::ensure
    pub fn variables(&self, terminal: &TerminalId) -> VariableSet {
        self.sessions
            .get(terminal)
            .map(|session| session.variables.clone())
            .unwrap_or_default()
    }

    /// Binds one variable slot, resolved from its wire name.
    ///
    /// Creates the session if needed. Other slots are untouched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidVariableName` if `name` is not a recognized slot;
    /// in that case the store is left exactly as it was (a session that did
    /// not exist still does not).
    pub fn set_variable(
        &mut self,
        terminal: &TerminalId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        // Validate before touching the map so a bad name cannot leave a
        // freshly created session behind.
        let slot = VariableSlot::from_name(name)?;
        self.ensure(terminal).variables.set(slot, value);
        Ok(())
    }

    /// Inserts or replaces the named playbook.
    ///
    /// Replacement is silent here: when a document with the same filename
    /// already exists, the caller must have obtained the user's confirmation
    /// before calling. The inserted document starts expanded.
    pub fn add_playbook(
        &mut self,
        terminal: &TerminalId,
        filename: impl Into<String>,
        blocks: Vec<Block>,
    ) {
        self.ensure(terminal)
            .playbooks
            .insert(filename.into(), PlaybookDocument::new(blocks));
    }

    /// True if the tab already holds a playbook with this filename. Used by
    /// callers to decide whether an import needs confirmation.
    pub fn has_playbook(&self, terminal: &TerminalId, filename: &str) -> bool {
        self.sessions
            .get(terminal)
            .is_some_and(|session| session.playbooks.contains_key(filename))
    }

    pub fn playbook(&self, terminal: &TerminalId, filename: &str) -> Option<&PlaybookDocument> {
        self.sessions
            .get(terminal)
            .and_then(|session| session.playbooks.get(filename))
    }

    /// Removes the named playbook. Removing a document that is not there is
    /// a no-op, not an error; returns whether something was removed.
    pub fn remove_playbook(&mut self, terminal: &TerminalId, filename: &str) -> bool {
        self.sessions
            .get_mut(terminal)
            .is_some_and(|session| session.playbooks.remove(filename).is_some())
    }

    /// Records an edit on the code block at `index`.
    ///
    /// The edit overrides the block's original text for display, copy, and
    /// execute; the original is never touched. An empty string is a valid
    /// edit, and an edit equal to the original still counts as an edit.
    /// Repeated edits keep only the latest.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the tab has no such document, or the document has no
    ///   block at `index`.
    /// - `TypeMismatch` if the block at `index` is a text block.
    pub fn set_block_edit(
        &mut self,
        terminal: &TerminalId,
        filename: &str,
        index: usize,
        new_text: impl Into<String>,
    ) -> Result<()> {
        let document = self
            .sessions
            .get_mut(terminal)
            .and_then(|session| session.playbooks.get_mut(filename))
            .ok_or_else(|| CommandWaveError::not_found("playbook", filename))?;

        let block = document
            .blocks
            .get_mut(index)
            .ok_or_else(|| CommandWaveError::not_found("block", format!("{filename}[{index}]")))?;

        match block {
            Block::Code { edited, .. } => {
                *edited = Some(new_text.into());
                Ok(())
            }
            Block::Text { .. } => Err(CommandWaveError::type_mismatch(filename, index)),
        }
    }

    /// Flips the document's expanded flag and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the tab has no such document.
    pub fn toggle_expanded(&mut self, terminal: &TerminalId, filename: &str) -> Result<bool> {
        let document = self
            .sessions
            .get_mut(terminal)
            .and_then(|session| session.playbooks.get_mut(filename))
            .ok_or_else(|| CommandWaveError::not_found("playbook", filename))?;

        document.expanded = !document.expanded;
        Ok(document.expanded)
    }

    /// Deletes all in-memory state for a tab. Used on tab close; persisted
    /// notes are the caller's concern (they live behind the notes API).
    pub fn remove_session(&mut self, terminal: &TerminalId) -> bool {
        self.sessions.remove(terminal).is_some()
    }

    pub fn session(&self, terminal: &TerminalId) -> Option<&Session> {
        self.sessions.get(terminal)
    }

    /// Ids of every tab that currently holds state, in no particular order.
    pub fn terminal_ids(&self) -> Vec<TerminalId> {
        self.sessions.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
