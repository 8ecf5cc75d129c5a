//! Terminal tab identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the main terminal tab that exists from startup.
pub const MAIN_TERMINAL_ID: &str = "term-main";

/// Opaque identifier of one embedded terminal tab and its associated state.
///
/// The conventional values are `term-main` for the initial tab and
/// `term-<port>` for dynamically created tabs, where `<port>` is the ttyd
/// port the tab's terminal listens on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerminalId(String);

impl TerminalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier of the main terminal tab.
    pub fn main() -> Self {
        Self(MAIN_TERMINAL_ID.to_string())
    }

    /// Returns the identifier for a dynamically created tab on `port`.
    pub fn for_port(port: u16) -> Self {
        Self(format!("term-{port}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_main(&self) -> bool {
        self.0 == MAIN_TERMINAL_ID
    }

    /// Recovers the ttyd port from a `term-<port>` identifier.
    ///
    /// Returns `None` for the main tab (its port is configuration, not part
    /// of the identifier) and for identifiers that do not follow the
    /// `term-<port>` convention.
    pub fn port(&self) -> Option<u16> {
        self.0.strip_prefix("term-").and_then(|rest| rest.parse().ok())
    }
}

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TerminalId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TerminalId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_has_no_port() {
        assert!(TerminalId::main().is_main());
        assert_eq!(TerminalId::main().port(), None);
    }

    #[test]
    fn test_port_round_trip() {
        let id = TerminalId::for_port(7682);
        assert_eq!(id.as_str(), "term-7682");
        assert_eq!(id.port(), Some(7682));
        assert!(!id.is_main());
    }

    #[test]
    fn test_unconventional_id_has_no_port() {
        assert_eq!(TerminalId::new("scratch").port(), None);
        assert_eq!(TerminalId::new("term-abc").port(), None);
    }
}
