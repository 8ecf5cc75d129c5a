//! Terminal lifecycle API client.

use crate::dto::{AckResponse, SendKeysRequest, TerminalCreatedResponse};
use crate::rest::RestClient;
use async_trait::async_trait;
use commandwave_core::error::{CommandWaveError, Result};
use commandwave_core::gateway::{TerminalGateway, TerminalHandle};

/// `TerminalGateway` over the backend's `/api/terminals` endpoints.
///
/// The backend owns the ttyd/tmux processes; this client only asks for
/// sessions to be created, torn down, or fed a command line.
pub struct HttpTerminalGateway {
    client: RestClient,
}

impl HttpTerminalGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: RestClient::new(base_url),
        }
    }
}

#[async_trait]
impl TerminalGateway for HttpTerminalGateway {
    async fn create(&self) -> Result<TerminalHandle> {
        let response: TerminalCreatedResponse = self
            .client
            .post_json("/api/terminals/new", &serde_json::json!({}))
            .await?;
        if !response.success {
            return Err(CommandWaveError::transport(
                response
                    .error
                    .unwrap_or_else(|| "terminal creation failed".to_string()),
            ));
        }
        tracing::info!(
            "[HttpTerminalGateway] Backend spawned terminal on port {}",
            response.port
        );
        Ok(TerminalHandle {
            port: response.port,
            url: response.url,
        })
    }

    async fn delete(&self, port: u16) -> Result<()> {
        let ack: AckResponse = self
            .client
            .delete_json(&format!("/api/terminals/{port}"))
            .await?;
        if let Some(message) = ack.failure_message() {
            return Err(CommandWaveError::transport(message));
        }
        Ok(())
    }

    async fn send_keys(&self, port: u16, command: &str) -> Result<()> {
        let ack: AckResponse = self
            .client
            .post_json("/api/terminals/sendkeys", &SendKeysRequest { port, command })
            .await?;
        if let Some(message) = ack.failure_message() {
            return Err(CommandWaveError::transport(message));
        }
        Ok(())
    }
}
