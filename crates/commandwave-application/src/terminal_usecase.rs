//! Terminal tab lifecycle and command dispatch.

use crate::active_tab::ActiveTab;
use commandwave_core::error::{CommandWaveError, Result};
use commandwave_core::gateway::{NotesRepository, TerminalGateway, TerminalHandle};
use commandwave_core::substitution::{render_marked, render_plain};
use commandwave_core::{SessionStore, TerminalId, VariableSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Use case for managing terminal tabs and pushing commands into them.
///
/// Coordinates the session store, the terminal lifecycle API, and the notes
/// API so that a tab's in-memory state, its backend terminal process, and
/// its persisted notes are created and torn down together.
///
/// # Thread Safety
///
/// The store and the active-tab handle are shared (`Arc`) with the other
/// services; all mutation goes through the store's lock, matching the
/// single-threaded mutation model of the store itself.
pub struct TerminalUseCase {
    store: Arc<RwLock<SessionStore>>,
    active: ActiveTab,
    terminal_gateway: Arc<dyn TerminalGateway>,
    notes_repository: Arc<dyn NotesRepository>,
    /// Port of the main tab's terminal (configuration; not derivable from
    /// its id).
    initial_port: u16,
}

impl TerminalUseCase {
    /// Creates the use case and registers the main tab's session.
    pub async fn new(
        store: Arc<RwLock<SessionStore>>,
        active: ActiveTab,
        terminal_gateway: Arc<dyn TerminalGateway>,
        notes_repository: Arc<dyn NotesRepository>,
        initial_port: u16,
    ) -> Self {
        store.write().await.ensure(&TerminalId::main());
        Self {
            store,
            active,
            terminal_gateway,
            notes_repository,
            initial_port,
        }
    }

    /// The currently active tab.
    pub async fn active_terminal(&self) -> TerminalId {
        self.active.get().await
    }

    /// Makes `terminal` the active tab, creating its session if needed, and
    /// returns the variable snapshot the UI renders from.
    pub async fn activate(&self, terminal: &TerminalId) -> VariableSet {
        let mut store = self.store.write().await;
        store.ensure(terminal);
        let variables = store.variables(terminal);
        drop(store);

        self.active.set(terminal.clone()).await;
        tracing::debug!("[TerminalUseCase] Activated tab {terminal}");
        variables
    }

    /// Creates a new terminal tab: asks the backend for a terminal session,
    /// registers a fresh session for it, and makes it active.
    ///
    /// # Errors
    ///
    /// Returns an `Api` error if the backend could not spawn a terminal.
    pub async fn open_tab(&self) -> Result<(TerminalId, TerminalHandle)> {
        let handle = self.terminal_gateway.create().await?;
        let terminal = TerminalId::for_port(handle.port);
        tracing::info!(
            "[TerminalUseCase] Opened tab {terminal} (port {})",
            handle.port
        );

        self.store.write().await.ensure(&terminal);
        self.active.set(terminal.clone()).await;
        Ok((terminal, handle))
    }

    /// Closes a tab: tears down the backend terminal, removes the session,
    /// and deletes the tab's persisted notes. If the closed tab was active,
    /// the main tab becomes active; the new active tab is returned.
    ///
    /// The main tab cannot be closed.
    ///
    /// # Errors
    ///
    /// Returns an error if `terminal` is the main tab, carries no port, or
    /// the backend refuses to tear the terminal down. Notes deletion is
    /// best-effort: a failure is logged and does not abort the close.
    pub async fn close_tab(&self, terminal: &TerminalId) -> Result<TerminalId> {
        if terminal.is_main() {
            return Err(CommandWaveError::internal(
                "the main terminal cannot be closed",
            ));
        }
        let port = terminal.port().ok_or_else(|| {
            CommandWaveError::internal(format!("terminal id '{terminal}' carries no port"))
        })?;

        self.terminal_gateway.delete(port).await?;
        self.store.write().await.remove_session(terminal);

        if let Err(err) = self.notes_repository.delete_tab(terminal).await {
            tracing::warn!("[TerminalUseCase] Failed to delete notes for {terminal}: {err}");
        }

        if self.active.is_current(terminal).await {
            self.active.set(TerminalId::main()).await;
        }
        tracing::info!("[TerminalUseCase] Closed tab {terminal}");
        Ok(self.active.get().await)
    }

    /// Binds one variable slot on a tab, by wire name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidVariableName` for an unrecognized slot name.
    pub async fn set_variable(
        &self,
        terminal: &TerminalId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        self.store.write().await.set_variable(terminal, name, value)
    }

    /// Snapshot of a tab's variable bindings.
    pub async fn variables(&self, terminal: &TerminalId) -> VariableSet {
        self.store.read().await.variables(terminal)
    }

    /// Display rendering of a template with a tab's variables (highlight
    /// markup, HTML-escaped).
    pub async fn preview(&self, terminal: &TerminalId, template: &str) -> String {
        let variables = self.variables(terminal).await;
        render_marked(template, &variables)
    }

    /// Payload rendering of a template with a tab's variables, for the
    /// clipboard or a terminal. Plain text, no markup.
    pub async fn payload(&self, terminal: &TerminalId, template: &str) -> String {
        let variables = self.variables(terminal).await;
        render_plain(template, &variables)
    }

    /// Renders `template` with the active tab's variables and injects the
    /// result into that tab's terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the rendered command is empty, the active tab's
    /// port cannot be resolved, or the backend rejects the injection.
    pub async fn execute(&self, template: &str) -> Result<()> {
        let terminal = self.active.get().await;
        let command = self.payload(&terminal, template).await;
        let command = command.trim();
        if command.is_empty() {
            return Err(CommandWaveError::internal("cannot execute an empty command"));
        }

        let port = if terminal.is_main() {
            self.initial_port
        } else {
            terminal.port().ok_or_else(|| {
                CommandWaveError::internal(format!("terminal id '{terminal}' carries no port"))
            })?
        };

        tracing::info!("[TerminalUseCase] Sending command to port {port}");
        self.terminal_gateway.send_keys(port, command).await
    }
}
