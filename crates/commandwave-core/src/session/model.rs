//! Session domain model.

use crate::playbook::PlaybookDocument;
use crate::variable::VariableSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// In-memory state of one terminal tab.
///
/// A session always carries a fully populated [`VariableSet`] (unassigned
/// slots read as `""`, never as missing keys) and a filename-keyed map of
/// imported playbooks. Sessions are created lazily the first time a tab is
/// referenced and destroyed when the tab closes; nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Per-tab variable bindings.
    pub variables: VariableSet,
    /// Imported playbooks, keyed by filename.
    pub playbooks: BTreeMap<String, PlaybookDocument>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::VariableSlot;

    #[test]
    fn test_new_session_has_empty_defaults() {
        let session = Session::new();
        assert!(session.variables.is_all_empty());
        assert!(session.playbooks.is_empty());
        assert_eq!(session.variables.get(VariableSlot::TargetIp), "");
    }
}
