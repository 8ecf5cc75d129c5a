//! Commands/options REST API client.

use crate::dto::{AckResponse, AddOptionRequest, OptionsResponse};
use crate::rest::RestClient;
use async_trait::async_trait;
use commandwave_core::command::{CommandDraft, CommandEntry, OptionKind};
use commandwave_core::error::Result;
use commandwave_core::gateway::CommandRepository;
use std::collections::BTreeMap;

/// `CommandRepository` over the backend's `/api/commands` and
/// `/api/options` endpoints.
pub struct HttpCommandRepository {
    client: RestClient,
}

impl HttpCommandRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: RestClient::new(base_url),
        }
    }
}

#[async_trait]
impl CommandRepository for HttpCommandRepository {
    async fn list(&self) -> Result<Vec<CommandEntry>> {
        self.client.get_json("/api/commands").await
    }

    async fn create(&self, draft: &CommandDraft) -> Result<()> {
        let _: AckResponse = self.client.post_json("/api/commands", draft).await?;
        Ok(())
    }

    async fn update(&self, id: i64, draft: &CommandDraft) -> Result<()> {
        let _: AckResponse = self
            .client
            .put_json(&format!("/api/commands/{id}"), draft)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let _: AckResponse = self
            .client
            .delete_json(&format!("/api/commands/{id}"))
            .await?;
        Ok(())
    }

    async fn os_options(&self) -> Result<Vec<String>> {
        let response: OptionsResponse = self.client.get_json("/api/options/os").await?;
        Ok(response.options)
    }

    async fn item_options(&self) -> Result<Vec<String>> {
        let response: OptionsResponse = self.client.get_json("/api/options/item").await?;
        Ok(response.options)
    }

    async fn filter_tags(&self) -> Result<BTreeMap<String, Vec<String>>> {
        self.client.get_json("/api/filter_tags").await
    }

    async fn add_option(&self, kind: &OptionKind, name: &str) -> Result<()> {
        let (path, category) = match kind {
            OptionKind::Os => ("/api/options/os", None),
            OptionKind::Item => ("/api/options/item", None),
            OptionKind::Filter { category } => ("/api/options/filter", Some(category.as_str())),
        };
        let _: AckResponse = self
            .client
            .post_json(path, &AddOptionRequest { name, category })
            .await?;
        tracing::debug!("[HttpCommandRepository] Added option '{name}' via {path}");
        Ok(())
    }
}
