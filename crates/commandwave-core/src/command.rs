//! The reusable command catalog: entries, tag facets, and filtering.
//!
//! Filtering reproduces the dashboard's semantics exactly: within one facet
//! a command matches if it carries *any* of the selected values, facets
//! combine with AND, and the free-text search runs case-insensitively over
//! the command text, the description, and every tag.

use serde::{Deserialize, Serialize};

/// A catalog command as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub id: i64,
    /// The command template, possibly containing placeholder tokens.
    pub command: String,
    #[serde(default)]
    pub description: String,
    /// Operating systems this command applies to.
    #[serde(default)]
    pub os: Vec<String>,
    /// Required artifacts (credentials, files, ...).
    #[serde(default)]
    pub items: Vec<String>,
    /// Service / attack-type tags.
    #[serde(default)]
    pub filters: Vec<String>,
}

/// Payload for creating or updating a catalog command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDraft {
    pub command: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub os: Vec<String>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub filters: Vec<String>,
}

/// Which option vocabulary an added value belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OptionKind {
    Os,
    Item,
    /// Filter tags carry a category ("Service" or "Attack Type").
    Filter { category: String },
}

/// The option vocabularies the dashboard offers as filter buttons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionCatalog {
    pub os: Vec<String>,
    pub items: Vec<String>,
    /// Filter tags grouped by category ("Service", "Attack Type").
    pub filter_categories: std::collections::BTreeMap<String, Vec<String>>,
}

impl OptionCatalog {
    /// Every filter tag across all categories, deduplicated, sorted.
    pub fn all_filter_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .filter_categories
            .values()
            .flatten()
            .cloned()
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }
}

/// The active catalog filter selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub os: Vec<String>,
    pub items: Vec<String>,
    pub tags: Vec<String>,
    /// Free-text search term; matched case-insensitively.
    pub search: String,
}

impl CatalogFilter {
    pub fn is_empty(&self) -> bool {
        self.os.is_empty()
            && self.items.is_empty()
            && self.tags.is_empty()
            && self.search.trim().is_empty()
    }

    /// Whether `entry` passes every active facet.
    pub fn matches(&self, entry: &CommandEntry) -> bool {
        if !self.os.is_empty() && !intersects(&entry.os, &self.os) {
            return false;
        }
        if !self.items.is_empty() && !intersects(&entry.items, &self.items) {
            return false;
        }
        if !self.tags.is_empty() && !intersects(&entry.filters, &self.tags) {
            return false;
        }

        let term = self.search.trim().to_lowercase();
        if !term.is_empty() {
            let haystack = [
                entry.command.as_str(),
                entry.description.as_str(),
            ]
            .into_iter()
            .chain(entry.os.iter().map(String::as_str))
            .chain(entry.items.iter().map(String::as_str))
            .chain(entry.filters.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
            if !haystack.contains(&term) {
                return false;
            }
        }

        true
    }
}

fn intersects(entry_values: &[String], selected: &[String]) -> bool {
    entry_values.iter().any(|value| selected.contains(value))
}

/// Applies `filter` to `commands`, preserving catalog order.
pub fn filter_commands<'a>(
    commands: &'a [CommandEntry],
    filter: &CatalogFilter,
) -> Vec<&'a CommandEntry> {
    commands.iter().filter(|entry| filter.matches(entry)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, command: &str, os: &[&str], items: &[&str], filters: &[&str]) -> CommandEntry {
        CommandEntry {
            id,
            command: command.to_string(),
            description: String::new(),
            os: os.iter().map(|s| s.to_string()).collect(),
            items: items.iter().map(|s| s.to_string()).collect(),
            filters: filters.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn catalog() -> Vec<CommandEntry> {
        vec![
            entry(
                1,
                "crackmapexec smb $TargetIP",
                &["linux"],
                &["Username", "Password"],
                &["SMB", "Enumeration"],
            ),
            entry(
                2,
                "impacket-secretsdump $TargetIP",
                &["linux"],
                &["Hash"],
                &["SMB", "Credential Access"],
            ),
            entry(3, "nltest /dclist:domain", &["windows"], &[], &["DNS"]),
        ]
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let commands = catalog();
        let filter = CatalogFilter::default();
        assert_eq!(filter_commands(&commands, &filter).len(), 3);
    }

    #[test]
    fn test_facet_matches_any_selected_value() {
        let commands = catalog();
        let filter = CatalogFilter {
            items: vec!["Password".to_string(), "Hash".to_string()],
            ..Default::default()
        };
        let visible = filter_commands(&commands, &filter);
        assert_eq!(
            visible.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_facets_combine_with_and() {
        let commands = catalog();
        let filter = CatalogFilter {
            os: vec!["linux".to_string()],
            tags: vec!["Credential Access".to_string()],
            ..Default::default()
        };
        let visible = filter_commands(&commands, &filter);
        assert_eq!(visible.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_spans_tags() {
        let commands = catalog();
        let filter = CatalogFilter {
            search: "CREDENTIAL".to_string(),
            ..Default::default()
        };
        let visible = filter_commands(&commands, &filter);
        assert_eq!(visible.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_search_matches_command_text() {
        let commands = catalog();
        let filter = CatalogFilter {
            search: "nltest".to_string(),
            ..Default::default()
        };
        let visible = filter_commands(&commands, &filter);
        assert_eq!(visible.iter().map(|c| c.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_untagged_commands_fail_active_facets() {
        let commands = catalog();
        let filter = CatalogFilter {
            items: vec!["Username".to_string()],
            ..Default::default()
        };
        // Command 3 has no items at all, so an active item facet hides it.
        let visible = filter_commands(&commands, &filter);
        assert!(visible.iter().all(|c| c.id != 3));
    }
}
