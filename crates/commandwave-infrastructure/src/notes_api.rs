//! Notes persistence API client.

use crate::dto::{AckResponse, NotePayload};
use crate::rest::RestClient;
use async_trait::async_trait;
use commandwave_core::TerminalId;
use commandwave_core::error::Result;
use commandwave_core::gateway::NotesRepository;

/// `NotesRepository` over the backend's `/api/notes` endpoints.
pub struct HttpNotesRepository {
    client: RestClient,
}

impl HttpNotesRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: RestClient::new(base_url),
        }
    }

    fn tab_path(terminal: &TerminalId) -> String {
        format!("/api/notes/tab/{terminal}")
    }
}

#[async_trait]
impl NotesRepository for HttpNotesRepository {
    async fn load_tab(&self, terminal: &TerminalId) -> Result<String> {
        let payload: NotePayload = self.client.get_json(&Self::tab_path(terminal)).await?;
        Ok(payload.content)
    }

    async fn save_tab(&self, terminal: &TerminalId, content: &str) -> Result<()> {
        let _: AckResponse = self
            .client
            .post_json(
                &Self::tab_path(terminal),
                &NotePayload {
                    content: content.to_string(),
                },
            )
            .await?;
        Ok(())
    }

    async fn delete_tab(&self, terminal: &TerminalId) -> Result<()> {
        let _: AckResponse = self.client.delete_json(&Self::tab_path(terminal)).await?;
        Ok(())
    }

    async fn load_global(&self) -> Result<String> {
        let payload: NotePayload = self.client.get_json("/api/notes/global").await?;
        Ok(payload.content)
    }

    async fn save_global(&self, content: &str) -> Result<()> {
        let _: AckResponse = self
            .client
            .post_json(
                "/api/notes/global",
                &NotePayload {
                    content: content.to_string(),
                },
            )
            .await?;
        Ok(())
    }
}
