//! Shared REST plumbing for the backend gateways.

use commandwave_core::error::{CommandWaveError, Result};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Thin wrapper around `reqwest::Client` bound to the backend base URL.
///
/// Non-2xx responses become `Api { status, message }`, preferring the
/// backend's JSON `error` field over the raw body; transport failures become
/// `Api` without a status.
#[derive(Clone)]
pub(crate) struct RestClient {
    http: Client,
    base_url: String,
}

impl RestClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(Self::check(response).await?).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(Self::check(response).await?).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .http
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(Self::check(response).await?).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .http
            .delete(self.url(path))
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(Self::check(response).await?).await
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(|e| e.as_str())
                    .map(str::to_string)
            })
            .unwrap_or(body);
        Err(CommandWaveError::api(
            status.as_u16(),
            if message.is_empty() {
                status.to_string()
            } else {
                message
            },
        ))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response.json::<T>().await.map_err(|err| {
            CommandWaveError::Serialization {
                format: "JSON".to_string(),
                message: err.to_string(),
            }
        })
    }
}

fn transport_error(err: reqwest::Error) -> CommandWaveError {
    CommandWaveError::transport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = RestClient::new("http://127.0.0.1:5000/");
        assert_eq!(
            client.url("/api/commands"),
            "http://127.0.0.1:5000/api/commands"
        );
    }
}
