//! Wire envelopes for the backend API.
//!
//! The command payloads (`CommandEntry`, `CommandDraft`) serialize with
//! their wire field names already and travel as-is; only the surrounding
//! envelopes live here.

use commandwave_core::gateway::PlaybookSearchHit;
use serde::{Deserialize, Serialize};

/// `GET /api/options/{os,item}` response.
#[derive(Debug, Deserialize)]
pub(crate) struct OptionsResponse {
    #[serde(default)]
    pub options: Vec<String>,
}

/// `POST /api/options/*` request body.
#[derive(Debug, Serialize)]
pub(crate) struct AddOptionRequest<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'a str>,
}

/// Generic `{success, message, error}` acknowledgement.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AckResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AckResponse {
    /// Folds a 2xx-but-unsuccessful acknowledgement into an error message.
    pub fn failure_message(&self) -> Option<String> {
        if self.success {
            None
        } else {
            Some(
                self.error
                    .clone()
                    .or_else(|| self.message.clone())
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            )
        }
    }
}

/// `POST /api/terminals/new` response.
#[derive(Debug, Deserialize)]
pub(crate) struct TerminalCreatedResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /api/terminals/sendkeys` request body.
#[derive(Debug, Serialize)]
pub(crate) struct SendKeysRequest<'a> {
    pub port: u16,
    pub command: &'a str,
}

/// Notes payload, both directions.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct NotePayload {
    #[serde(default)]
    pub content: String,
}

/// `GET /api/playbooks/search` response.
#[derive(Debug, Deserialize)]
pub(crate) struct PlaybookSearchResponse {
    #[serde(default)]
    pub matches: Vec<PlaybookSearchHitDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaybookSearchHitDto {
    pub filename: String,
    #[serde(default)]
    pub snippet: String,
}

impl From<PlaybookSearchHitDto> for PlaybookSearchHit {
    fn from(dto: PlaybookSearchHitDto) -> Self {
        Self {
            filename: dto.filename,
            snippet: dto.snippet,
        }
    }
}

/// `GET /api/playbooks/{filename}` response.
#[derive(Debug, Deserialize)]
pub(crate) struct PlaybookContentResponse {
    #[allow(dead_code)]
    pub filename: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use commandwave_core::command::{CommandDraft, CommandEntry};

    #[test]
    fn test_command_entry_matches_wire_shape() {
        let json = r#"{
            "id": 7,
            "command": "nmap $TargetIP",
            "description": "scan",
            "os": ["linux"],
            "items": [],
            "filters": ["Enumeration"]
        }"#;
        let entry: CommandEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.command, "nmap $TargetIP");
        assert_eq!(entry.os, vec!["linux".to_string()]);
    }

    #[test]
    fn test_command_entry_tolerates_missing_tag_lists() {
        let entry: CommandEntry =
            serde_json::from_str(r#"{"id": 1, "command": "id"}"#).unwrap();
        assert!(entry.os.is_empty());
        assert!(entry.description.is_empty());
    }

    #[test]
    fn test_draft_serializes_wire_fields() {
        let draft = CommandDraft {
            command: "id".to_string(),
            description: "whoami".to_string(),
            os: vec!["linux".to_string()],
            items: vec![],
            filters: vec![],
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["command"], "id");
        assert_eq!(value["os"][0], "linux");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_add_option_request_omits_absent_category() {
        let body = serde_json::to_string(&AddOptionRequest {
            name: "macos",
            category: None,
        })
        .unwrap();
        assert_eq!(body, r#"{"name":"macos"}"#);

        let body = serde_json::to_string(&AddOptionRequest {
            name: "RDP",
            category: Some("Service"),
        })
        .unwrap();
        assert_eq!(body, r#"{"name":"RDP","category":"Service"}"#);
    }

    #[test]
    fn test_ack_failure_prefers_error_field() {
        let ack: AckResponse =
            serde_json::from_str(r#"{"success": false, "error": "tmux session not found"}"#)
                .unwrap();
        assert_eq!(ack.failure_message().as_deref(), Some("tmux session not found"));

        let ack: AckResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(ack.failure_message().is_none());
    }

    #[test]
    fn test_playbook_hit_maps_to_domain() {
        let response: PlaybookSearchResponse = serde_json::from_str(
            r#"{"matches": [{"filename": "smb.md", "snippet": "crackmapexec smb"}]}"#,
        )
        .unwrap();
        let hit: PlaybookSearchHit = response.matches.into_iter().next().unwrap().into();
        assert_eq!(hit.filename, "smb.md");
        assert_eq!(hit.snippet, "crackmapexec smb");
    }
}
