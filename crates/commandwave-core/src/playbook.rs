//! Playbook documents and their blocks.

use serde::{Deserialize, Serialize};

/// One block of an imported playbook.
///
/// Playbooks are markdown documents; at import time they are split into an
/// ordered sequence of blocks. Fenced code blocks become [`Block::Code`],
/// everything between them is rendered once and carried as opaque HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    /// Static rendered content; opaque to substitution.
    Text { html: String },
    /// A command template. `original` is the source text captured at import
    /// and never changes; `edited`, when present, overrides it for display,
    /// copy, and execute. `Some("")` is a real edit, distinct from "no edit".
    Code {
        language: String,
        original: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        edited: Option<String>,
    },
}

impl Block {
    pub fn text(html: impl Into<String>) -> Self {
        Self::Text { html: html.into() }
    }

    pub fn code(language: impl Into<String>, original: impl Into<String>) -> Self {
        Self::Code {
            language: language.into(),
            original: original.into(),
            edited: None,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Self::Code { .. })
    }

    /// The template text a code block currently shows: the edit if one
    /// exists, the original otherwise. `None` for text blocks.
    pub fn effective_source(&self) -> Option<&str> {
        match self {
            Self::Text { .. } => None,
            Self::Code {
                original, edited, ..
            } => Some(edited.as_deref().unwrap_or(original)),
        }
    }
}

/// An imported playbook: ordered blocks plus a display flag.
///
/// Documents live only in memory; closing or reloading the tab loses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybookDocument {
    /// Blocks in display order. The order is fixed at import.
    pub blocks: Vec<Block>,
    /// Whether the document is expanded in the UI. `true` on creation.
    pub expanded: bool,
}

impl PlaybookDocument {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            expanded: true,
        }
    }

    /// Number of code blocks (the executable/copyable templates).
    pub fn code_block_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_code()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_source_prefers_edit() {
        let mut block = Block::code("bash", "nmap $TargetIP");
        assert_eq!(block.effective_source(), Some("nmap $TargetIP"));

        if let Block::Code { edited, .. } = &mut block {
            *edited = Some("nmap -sV $TargetIP".to_string());
        }
        assert_eq!(block.effective_source(), Some("nmap -sV $TargetIP"));
    }

    #[test]
    fn test_empty_edit_is_a_real_edit() {
        let block = Block::Code {
            language: "bash".to_string(),
            original: "whoami".to_string(),
            edited: Some(String::new()),
        };
        assert_eq!(block.effective_source(), Some(""));
    }

    #[test]
    fn test_text_blocks_have_no_source() {
        assert_eq!(Block::text("<p>intro</p>").effective_source(), None);
    }

    #[test]
    fn test_new_documents_start_expanded() {
        let doc = PlaybookDocument::new(vec![Block::code("bash", "id")]);
        assert!(doc.expanded);
        assert_eq!(doc.code_block_count(), 1);
    }

    #[test]
    fn test_block_serde_tags_by_type() {
        let json = serde_json::to_string(&Block::text("<p>x</p>")).unwrap();
        assert_eq!(json, r#"{"type":"text","html":"<p>x</p>"}"#);

        let json = serde_json::to_string(&Block::code("bash", "id")).unwrap();
        assert_eq!(
            json,
            r#"{"type":"code","language":"bash","original":"id"}"#
        );
    }
}
