//! Playbook library API client.

use crate::dto::{PlaybookContentResponse, PlaybookSearchResponse};
use crate::rest::RestClient;
use async_trait::async_trait;
use commandwave_core::error::Result;
use commandwave_core::gateway::{PlaybookLibraryRepository, PlaybookSearchHit};

/// `PlaybookLibraryRepository` over the backend's `/api/playbooks`
/// endpoints.
pub struct HttpPlaybookLibraryRepository {
    client: RestClient,
}

impl HttpPlaybookLibraryRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: RestClient::new(base_url),
        }
    }
}

#[async_trait]
impl PlaybookLibraryRepository for HttpPlaybookLibraryRepository {
    async fn search(&self, query: &str) -> Result<Vec<PlaybookSearchHit>> {
        let path = format!(
            "/api/playbooks/search?q={}",
            urlencode(query)
        );
        let response: PlaybookSearchResponse = self.client.get_json(&path).await?;
        Ok(response.matches.into_iter().map(Into::into).collect())
    }

    async fn fetch(&self, filename: &str) -> Result<String> {
        let response: PlaybookContentResponse = self
            .client
            .get_json(&format!("/api/playbooks/{}", urlencode(filename)))
            .await?;
        Ok(response.content)
    }
}

/// Minimal percent-encoding for query/path components: everything but
/// unreserved characters is escaped.
fn urlencode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencode_passes_unreserved() {
        assert_eq!(urlencode("smb-recon_v2.md"), "smb-recon_v2.md");
    }

    #[test]
    fn test_urlencode_escapes_the_rest() {
        assert_eq!(urlencode("kerberos attack"), "kerberos%20attack");
        assert_eq!(urlencode("a/b?c"), "a%2Fb%3Fc");
    }
}
