//! Notes autosave: debounced writes, guarded reads.

use crate::active_tab::ActiveTab;
use commandwave_core::error::Result;
use commandwave_core::gateway::NotesRepository;
use commandwave_core::TerminalId;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Defers an action until a quiet period has passed.
///
/// Scheduling a new action cancels the pending one, so a burst of calls
/// results in exactly one execution, `delay` after the last call.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedules `action` to run after the quiet period, superseding any
    /// action scheduled earlier.
    pub async fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        });

        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Drops the pending action, if any, without running it.
    pub async fn cancel(&self) {
        if let Some(handle) = self.pending.lock().await.take() {
            handle.abort();
        }
    }
}

/// Per-tab and global notes with autosave discipline.
///
/// Writes are debounced so a typing burst becomes one request; reads fully
/// replace local content and are guarded against tab switches: a response
/// that arrives for a tab the user has since left is discarded.
pub struct NotesService {
    repository: Arc<dyn NotesRepository>,
    active: ActiveTab,
    tab_debounce: Debouncer,
    global_debounce: Debouncer,
}

impl NotesService {
    pub fn new(
        repository: Arc<dyn NotesRepository>,
        active: ActiveTab,
        autosave_delay: Duration,
    ) -> Self {
        Self {
            repository,
            active,
            tab_debounce: Debouncer::new(autosave_delay),
            global_debounce: Debouncer::new(autosave_delay),
        }
    }

    /// Records an edit to a tab's notes; the save fires after the quiet
    /// period, and only the latest content is written.
    pub async fn edit_tab(&self, terminal: &TerminalId, content: impl Into<String>) {
        let repository = self.repository.clone();
        let terminal = terminal.clone();
        let content = content.into();
        self.tab_debounce
            .schedule(async move {
                if let Err(err) = repository.save_tab(&terminal, &content).await {
                    tracing::warn!("[NotesService] Failed to save notes for {terminal}: {err}");
                }
            })
            .await;
    }

    /// Records an edit to the global notes.
    pub async fn edit_global(&self, content: impl Into<String>) {
        let repository = self.repository.clone();
        let content = content.into();
        self.global_debounce
            .schedule(async move {
                if let Err(err) = repository.save_global(&content).await {
                    tracing::warn!("[NotesService] Failed to save global notes: {err}");
                }
            })
            .await;
    }

    /// Loads a tab's notes.
    ///
    /// Returns `None` when the response is stale, i.e. the tab is no longer
    /// the active one by the time the backend answers. Callers replace their
    /// local content wholesale on `Some`; no merging.
    pub async fn load_tab(&self, terminal: &TerminalId) -> Result<Option<String>> {
        let content = self.repository.load_tab(terminal).await?;
        if !self.active.is_current(terminal).await {
            tracing::debug!("[NotesService] Dropping stale notes response for {terminal}");
            return Ok(None);
        }
        Ok(Some(content))
    }

    pub async fn load_global(&self) -> Result<String> {
        self.repository.load_global().await
    }

    /// Drops any pending tab-notes save. Called when the tab whose notes
    /// are being edited goes away.
    pub async fn cancel_pending_tab_save(&self) {
        self.tab_debounce.cancel().await;
    }
}
