//! Variable slots and per-tab variable bindings.
//!
//! Substitution works over a closed set of seven named slots. Each slot has a
//! wire name (the key the UI and the backend use) and a placeholder token
//! (the literal substring replaced in command templates). The set is not
//! user-extensible at this layer.

use crate::error::{CommandWaveError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the seven fixed substitution targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VariableSlot {
    #[serde(rename = "targetIP")]
    TargetIp,
    #[serde(rename = "port")]
    Port,
    #[serde(rename = "dcIP")]
    DcIp,
    #[serde(rename = "userFile")]
    UserFile,
    #[serde(rename = "passFile")]
    PassFile,
    #[serde(rename = "wordlist")]
    Wordlist,
    #[serde(rename = "controlSocket")]
    ControlSocket,
}

impl VariableSlot {
    /// All slots, in substitution order. `render_plain`/`render_marked`
    /// process slots in exactly this order.
    pub const ALL: [VariableSlot; 7] = [
        Self::TargetIp,
        Self::Port,
        Self::DcIp,
        Self::UserFile,
        Self::PassFile,
        Self::Wordlist,
        Self::ControlSocket,
    ];

    /// The wire name used by the UI and the backend (e.g. `targetIP`).
    pub fn name(self) -> &'static str {
        match self {
            Self::TargetIp => "targetIP",
            Self::Port => "port",
            Self::DcIp => "dcIP",
            Self::UserFile => "userFile",
            Self::PassFile => "passFile",
            Self::Wordlist => "wordlist",
            Self::ControlSocket => "controlSocket",
        }
    }

    /// The literal placeholder token matched in command templates.
    ///
    /// The token set is mutually prefix-distinct (no token is a prefix of
    /// another), so per-slot replacement order cannot change which text
    /// matches; a test pins this property down.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::TargetIp => "$TargetIP",
            Self::Port => "$Port",
            Self::DcIp => "$DCIP",
            Self::UserFile => "$UserFile",
            Self::PassFile => "$PassFile",
            Self::Wordlist => "$Wordlist",
            Self::ControlSocket => "$ControlSocket",
        }
    }

    /// Human-readable label for variable input fields.
    pub fn label(self) -> &'static str {
        match self {
            Self::TargetIp => "Target IP",
            Self::Port => "Port",
            Self::DcIp => "DC IP",
            Self::UserFile => "User File",
            Self::PassFile => "Pass File",
            Self::Wordlist => "Wordlist",
            Self::ControlSocket => "Control Socket",
        }
    }

    /// Resolves a wire name to its slot.
    ///
    /// # Errors
    ///
    /// Returns `InvalidVariableName` if `name` is not one of the seven
    /// recognized slot names.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.name() == name)
            .ok_or_else(|| CommandWaveError::invalid_variable_name(name))
    }
}

impl fmt::Display for VariableSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-tab variable bindings.
///
/// Every slot is always readable: slots that were never assigned read as the
/// empty string, never as an absent key. A freshly created set carries all
/// seven slots bound to `""`, so serialized sets always show the full shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableSet {
    values: BTreeMap<VariableSlot, String>,
}

impl Default for VariableSet {
    fn default() -> Self {
        let mut values = BTreeMap::new();
        for slot in VariableSlot::ALL {
            values.insert(slot, String::new());
        }
        Self { values }
    }
}

impl VariableSet {
    /// Creates a set with every slot bound to the empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to `slot`, or `""` if never assigned.
    pub fn get(&self, slot: VariableSlot) -> &str {
        self.values.get(&slot).map(String::as_str).unwrap_or("")
    }

    /// Binds `slot` to `value`, replacing any previous binding. No other
    /// slot is affected.
    pub fn set(&mut self, slot: VariableSlot, value: impl Into<String>) {
        self.values.insert(slot, value.into());
    }

    /// Returns true if no slot has a non-empty value.
    pub fn is_all_empty(&self) -> bool {
        VariableSlot::ALL.iter().all(|slot| self.get(*slot).is_empty())
    }

    /// Iterates `(slot, value)` pairs in substitution order, including
    /// empty slots.
    pub fn iter(&self) -> impl Iterator<Item = (VariableSlot, &str)> {
        VariableSlot::ALL.into_iter().map(|slot| (slot, self.get(slot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_empty() {
        let vars = VariableSet::new();
        assert!(vars.is_all_empty());
        for slot in VariableSlot::ALL {
            assert_eq!(vars.get(slot), "");
        }
    }

    #[test]
    fn test_set_leaves_other_slots_untouched() {
        let mut vars = VariableSet::new();
        vars.set(VariableSlot::Port, "8080");
        assert_eq!(vars.get(VariableSlot::Port), "8080");
        for slot in VariableSlot::ALL {
            if slot != VariableSlot::Port {
                assert_eq!(vars.get(slot), "");
            }
        }
    }

    #[test]
    fn test_from_name_resolves_all_wire_names() {
        for slot in VariableSlot::ALL {
            assert_eq!(VariableSlot::from_name(slot.name()).unwrap(), slot);
        }
    }

    #[test]
    fn test_from_name_rejects_unknown() {
        let err = VariableSlot::from_name("bogus").unwrap_err();
        assert!(err.is_invalid_variable_name());
    }

    #[test]
    fn test_placeholders_are_mutually_prefix_distinct() {
        for a in VariableSlot::ALL {
            for b in VariableSlot::ALL {
                if a != b {
                    assert!(
                        !a.placeholder().starts_with(b.placeholder()),
                        "{} is prefixed by {}",
                        a.placeholder(),
                        b.placeholder()
                    );
                }
            }
        }
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let mut vars = VariableSet::new();
        vars.set(VariableSlot::TargetIp, "10.0.0.5");
        let json = serde_json::to_string(&vars).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"targetIP":"10.0.0.5","port":"","dcIP":"","userFile":"","#,
                r#""passFile":"","wordlist":"","controlSocket":""}"#
            )
        );
    }

    #[test]
    fn test_deserializes_partial_maps() {
        // Older payloads may omit slots; reads still default to "".
        let vars: VariableSet = serde_json::from_str(r#"{"port":"445"}"#).unwrap();
        assert_eq!(vars.get(VariableSlot::Port), "445");
        assert_eq!(vars.get(VariableSlot::TargetIp), "");
    }
}
