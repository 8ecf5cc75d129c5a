//! Interfaces to the external collaborators.
//!
//! The controller core never speaks HTTP itself; everything it needs from
//! the backend sits behind these traits. The infrastructure crate provides
//! reqwest-backed implementations; tests substitute in-memory mocks.

use crate::command::{CommandDraft, CommandEntry, OptionKind};
use crate::error::Result;
use crate::terminal::TerminalId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A freshly created terminal session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalHandle {
    /// ttyd port the terminal listens on.
    pub port: u16,
    /// URL the UI embeds.
    pub url: String,
}

/// One match from the server-side playbook library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybookSearchHit {
    pub filename: String,
    /// The matching line, for result display.
    pub snippet: String,
}

/// The commands/options REST API.
#[async_trait]
pub trait CommandRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<CommandEntry>>;
    async fn create(&self, draft: &CommandDraft) -> Result<()>;
    async fn update(&self, id: i64, draft: &CommandDraft) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;

    async fn os_options(&self) -> Result<Vec<String>>;
    async fn item_options(&self) -> Result<Vec<String>>;
    /// Filter tags grouped by category ("Service", "Attack Type").
    async fn filter_tags(&self) -> Result<BTreeMap<String, Vec<String>>>;
    /// Adds a value to one of the option vocabularies. An already-existing
    /// value surfaces as an `Api` error with status 409.
    async fn add_option(&self, kind: &OptionKind, name: &str) -> Result<()>;
}

/// The notes persistence API (per-tab and global plain text).
#[async_trait]
pub trait NotesRepository: Send + Sync {
    async fn load_tab(&self, terminal: &TerminalId) -> Result<String>;
    async fn save_tab(&self, terminal: &TerminalId, content: &str) -> Result<()>;
    /// Removes a tab's persisted notes; called when the tab closes.
    async fn delete_tab(&self, terminal: &TerminalId) -> Result<()>;
    async fn load_global(&self) -> Result<String>;
    async fn save_global(&self, content: &str) -> Result<()>;
}

/// The server-side playbook library (search + raw fetch).
#[async_trait]
pub trait PlaybookLibraryRepository: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<PlaybookSearchHit>>;
    /// Raw markdown of a library playbook.
    async fn fetch(&self, filename: &str) -> Result<String>;
}

/// The terminal lifecycle API.
#[async_trait]
pub trait TerminalGateway: Send + Sync {
    /// Spawns a new terminal session and returns its port and embed URL.
    async fn create(&self) -> Result<TerminalHandle>;
    /// Tears down the terminal listening on `port`.
    async fn delete(&self, port: u16) -> Result<()>;
    /// Injects a command line into the terminal listening on `port`.
    async fn send_keys(&self, port: u16, command: &str) -> Result<()>;
}
