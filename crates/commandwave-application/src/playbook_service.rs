//! Playbook import, library search, and block-level operations.

use commandwave_core::error::{CommandWaveError, Result};
use commandwave_core::gateway::{PlaybookLibraryRepository, PlaybookSearchHit};
use commandwave_core::playbook::Block;
use commandwave_core::substitution::render_marked;
use commandwave_core::{SessionStore, TerminalId};
use comrak::nodes::NodeValue;
use comrak::{Arena, Options, format_html, parse_document};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Result of an import attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ImportOutcome {
    /// The document was added (or, with `overwrite`, replaced).
    Imported { blocks: usize },
    /// A document with this filename already exists on the tab; nothing was
    /// changed. The caller prompts the user and retries with `overwrite`.
    DuplicateRequiresConfirmation,
}

/// Splits a markdown playbook into its ordered blocks.
///
/// Every fenced code block becomes [`Block::Code`] with its info-string
/// language and raw text; each run of other top-level nodes is rendered to
/// HTML once and carried as a single opaque [`Block::Text`].
pub fn parse_playbook(markdown: &str) -> Result<Vec<Block>> {
    let arena = Arena::new();
    let options = Options::default();
    let root = parse_document(&arena, markdown, &options);

    let mut blocks = Vec::new();
    let mut pending_html = String::new();

    for node in root.children() {
        let is_code = {
            let data = node.data.borrow();
            matches!(data.value, NodeValue::CodeBlock(_))
        };

        if is_code {
            if !pending_html.is_empty() {
                blocks.push(Block::text(std::mem::take(&mut pending_html)));
            }
            let data = node.data.borrow();
            if let NodeValue::CodeBlock(ref code) = data.value {
                let language = code
                    .info
                    .split_whitespace()
                    .next()
                    .unwrap_or("")
                    .to_string();
                let original = code
                    .literal
                    .strip_suffix('\n')
                    .unwrap_or(&code.literal)
                    .to_string();
                blocks.push(Block::Code {
                    language,
                    original,
                    edited: None,
                });
            }
        } else {
            let mut buffer = Vec::new();
            format_html(node, &options, &mut buffer)
                .map_err(|err| CommandWaveError::internal(format!("markdown render: {err}")))?;
            pending_html.push_str(&String::from_utf8_lossy(&buffer));
        }
    }

    if !pending_html.is_empty() {
        blocks.push(Block::text(pending_html));
    }
    Ok(blocks)
}

/// Use case for the playbooks loaded on each tab.
pub struct PlaybookService {
    store: Arc<RwLock<SessionStore>>,
    library: Arc<dyn PlaybookLibraryRepository>,
}

impl PlaybookService {
    pub fn new(
        store: Arc<RwLock<SessionStore>>,
        library: Arc<dyn PlaybookLibraryRepository>,
    ) -> Self {
        Self { store, library }
    }

    /// Imports an uploaded markdown document onto a tab.
    ///
    /// When a document with the same filename is already loaded and
    /// `overwrite` is false, nothing changes and the caller is told to
    /// confirm first.
    pub async fn import(
        &self,
        terminal: &TerminalId,
        filename: &str,
        markdown: &str,
        overwrite: bool,
    ) -> Result<ImportOutcome> {
        let blocks = parse_playbook(markdown)?;

        let mut store = self.store.write().await;
        if !overwrite && store.has_playbook(terminal, filename) {
            return Ok(ImportOutcome::DuplicateRequiresConfirmation);
        }
        let count = blocks.len();
        store.add_playbook(terminal, filename, blocks);
        tracing::info!("[PlaybookService] Imported '{filename}' onto {terminal} ({count} blocks)");
        Ok(ImportOutcome::Imported { blocks: count })
    }

    /// Searches the server-side playbook library.
    pub async fn search_library(&self, query: &str) -> Result<Vec<PlaybookSearchHit>> {
        self.library.search(query).await
    }

    /// Fetches a library playbook and imports it onto a tab.
    pub async fn import_from_library(
        &self,
        terminal: &TerminalId,
        filename: &str,
        overwrite: bool,
    ) -> Result<ImportOutcome> {
        let markdown = self.library.fetch(filename).await?;
        self.import(terminal, filename, &markdown, overwrite).await
    }

    /// Removes a document from a tab. Not an error if it was never there.
    pub async fn remove(&self, terminal: &TerminalId, filename: &str) -> bool {
        self.store.write().await.remove_playbook(terminal, filename)
    }

    /// Records an edit on a code block.
    pub async fn set_block_edit(
        &self,
        terminal: &TerminalId,
        filename: &str,
        index: usize,
        new_text: impl Into<String>,
    ) -> Result<()> {
        self.store
            .write()
            .await
            .set_block_edit(terminal, filename, index, new_text)
    }

    /// Flips a document's expanded flag; returns the new value.
    pub async fn toggle_expanded(&self, terminal: &TerminalId, filename: &str) -> Result<bool> {
        self.store.write().await.toggle_expanded(terminal, filename)
    }

    /// The template text of a code block (the edit if one exists), ready to
    /// be rendered and copied or executed.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing document or index, `TypeMismatch` for a
    /// text block.
    pub async fn block_template(
        &self,
        terminal: &TerminalId,
        filename: &str,
        index: usize,
    ) -> Result<String> {
        let store = self.store.read().await;
        let document = store
            .playbook(terminal, filename)
            .ok_or_else(|| CommandWaveError::not_found("playbook", filename))?;
        let block = document
            .blocks
            .get(index)
            .ok_or_else(|| CommandWaveError::not_found("block", format!("{filename}[{index}]")))?;
        block
            .effective_source()
            .map(str::to_string)
            .ok_or_else(|| CommandWaveError::type_mismatch(filename, index))
    }

    /// Display rendering of a code block with the tab's current variables.
    pub async fn block_preview(
        &self,
        terminal: &TerminalId,
        filename: &str,
        index: usize,
    ) -> Result<String> {
        let template = self.block_template(terminal, filename, index).await?;
        let variables = self.store.read().await.variables(terminal);
        Ok(render_marked(&template, &variables))
    }
}
