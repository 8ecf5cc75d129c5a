//! Shared "which tab is active" handle.

use commandwave_core::TerminalId;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The currently active terminal tab, shared between services.
///
/// Every async completion handler that was issued on behalf of a specific
/// tab re-checks this handle before applying its result: if the user has
/// moved on, the stale result is dropped instead of clobbering the state of
/// the tab they are now looking at.
#[derive(Clone)]
pub struct ActiveTab {
    inner: Arc<RwLock<TerminalId>>,
}

impl ActiveTab {
    pub fn new(initial: TerminalId) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub async fn get(&self) -> TerminalId {
        self.inner.read().await.clone()
    }

    pub async fn set(&self, terminal: TerminalId) {
        *self.inner.write().await = terminal;
    }

    /// Whether `terminal` is still the active tab. Completion handlers call
    /// this with the id they captured at request time.
    pub async fn is_current(&self, terminal: &TerminalId) -> bool {
        *self.inner.read().await == *terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tracks_switches() {
        let active = ActiveTab::new(TerminalId::main());
        assert!(active.is_current(&TerminalId::main()).await);

        let other = TerminalId::for_port(7682);
        active.set(other.clone()).await;
        assert!(active.is_current(&other).await);
        assert!(!active.is_current(&TerminalId::main()).await);
        assert_eq!(active.get().await, other);
    }
}
