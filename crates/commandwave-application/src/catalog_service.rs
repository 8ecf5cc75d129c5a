//! The command catalog service: fetch, filter, mutate, refresh.

use commandwave_core::command::{
    CatalogFilter, CommandDraft, CommandEntry, OptionKind, OptionCatalog, filter_commands,
};
use commandwave_core::error::Result;
use commandwave_core::gateway::CommandRepository;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct CatalogState {
    commands: Vec<CommandEntry>,
    options: OptionCatalog,
    filter: CatalogFilter,
}

/// Holds the fetched command catalog plus the operator's current filter
/// selection, and forwards catalog mutations to the backend.
///
/// Mutations re-fetch afterwards so the local copy always mirrors what the
/// backend accepted, exactly like the dashboard re-fetching after every
/// successful form submit.
pub struct CommandCatalogService {
    repository: Arc<dyn CommandRepository>,
    state: RwLock<CatalogState>,
}

impl CommandCatalogService {
    pub fn new(repository: Arc<dyn CommandRepository>) -> Self {
        Self {
            repository,
            state: RwLock::new(CatalogState::default()),
        }
    }

    /// Re-fetches the command list. Returns how many commands are loaded.
    pub async fn refresh_commands(&self) -> Result<usize> {
        let commands = self.repository.list().await?;
        let count = commands.len();
        self.state.write().await.commands = commands;
        tracing::debug!("[CommandCatalogService] Loaded {count} commands");
        Ok(count)
    }

    /// Re-fetches the option vocabularies, sorted for stable display.
    pub async fn refresh_options(&self) -> Result<()> {
        let mut os = self.repository.os_options().await?;
        let mut items = self.repository.item_options().await?;
        let mut categories = self.repository.filter_tags().await?;
        os.sort();
        items.sort();
        for values in categories.values_mut() {
            values.sort();
        }

        self.state.write().await.options = OptionCatalog {
            os,
            items,
            filter_categories: categories,
        };
        Ok(())
    }

    /// The commands passing the current filter, in catalog order.
    pub async fn visible(&self) -> Vec<CommandEntry> {
        let state = self.state.read().await;
        filter_commands(&state.commands, &state.filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn command(&self, id: i64) -> Option<CommandEntry> {
        self.state
            .read()
            .await
            .commands
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
    }

    pub async fn options(&self) -> OptionCatalog {
        self.state.read().await.options.clone()
    }

    pub async fn filter(&self) -> CatalogFilter {
        self.state.read().await.filter.clone()
    }

    pub async fn set_os_filter(&self, os: Vec<String>) {
        self.state.write().await.filter.os = os;
    }

    pub async fn set_item_filter(&self, items: Vec<String>) {
        self.state.write().await.filter.items = items;
    }

    pub async fn set_tag_filter(&self, tags: Vec<String>) {
        self.state.write().await.filter.tags = tags;
    }

    pub async fn set_search(&self, term: impl Into<String>) {
        self.state.write().await.filter.search = term.into();
    }

    pub async fn clear_filter(&self) {
        self.state.write().await.filter = CatalogFilter::default();
    }

    /// Adds a command and re-fetches the catalog.
    pub async fn create(&self, draft: &CommandDraft) -> Result<usize> {
        self.repository.create(draft).await?;
        self.refresh_commands().await
    }

    /// Updates a command and re-fetches the catalog.
    pub async fn update(&self, id: i64, draft: &CommandDraft) -> Result<usize> {
        self.repository.update(id, draft).await?;
        self.refresh_commands().await
    }

    /// Deletes a command and re-fetches the catalog.
    pub async fn delete(&self, id: i64) -> Result<usize> {
        self.repository.delete(id).await?;
        self.refresh_commands().await
    }

    /// Adds a value to one of the option vocabularies and re-fetches them.
    /// A duplicate surfaces as an `Api` error with status 409.
    pub async fn add_option(&self, kind: &OptionKind, name: &str) -> Result<()> {
        self.repository.add_option(kind, name).await?;
        self.refresh_options().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use commandwave_core::CommandWaveError;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Backend stub over a plain Vec, ids assigned on insert.
    #[derive(Default)]
    struct InMemoryCommandRepository {
        commands: Mutex<Vec<CommandEntry>>,
        os: Mutex<Vec<String>>,
    }

    impl InMemoryCommandRepository {
        fn seeded() -> Self {
            let repo = Self::default();
            repo.commands.lock().unwrap().extend([
                CommandEntry {
                    id: 1,
                    command: "nmap $TargetIP".to_string(),
                    description: "port scan".to_string(),
                    os: vec!["linux".to_string()],
                    items: vec![],
                    filters: vec!["Enumeration".to_string()],
                },
                CommandEntry {
                    id: 2,
                    command: "nltest /dclist:domain".to_string(),
                    description: String::new(),
                    os: vec!["windows".to_string()],
                    items: vec![],
                    filters: vec!["DNS".to_string()],
                },
            ]);
            repo.os
                .lock()
                .unwrap()
                .extend(["windows".to_string(), "linux".to_string()]);
            repo
        }
    }

    #[async_trait]
    impl CommandRepository for InMemoryCommandRepository {
        async fn list(&self) -> Result<Vec<CommandEntry>> {
            Ok(self.commands.lock().unwrap().clone())
        }

        async fn create(&self, draft: &CommandDraft) -> Result<()> {
            let mut commands = self.commands.lock().unwrap();
            let id = commands.iter().map(|c| c.id).max().unwrap_or(0) + 1;
            commands.push(CommandEntry {
                id,
                command: draft.command.clone(),
                description: draft.description.clone(),
                os: draft.os.clone(),
                items: draft.items.clone(),
                filters: draft.filters.clone(),
            });
            Ok(())
        }

        async fn update(&self, id: i64, draft: &CommandDraft) -> Result<()> {
            let mut commands = self.commands.lock().unwrap();
            let entry = commands
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| CommandWaveError::api(404, "no such command"))?;
            entry.command = draft.command.clone();
            Ok(())
        }

        async fn delete(&self, id: i64) -> Result<()> {
            self.commands.lock().unwrap().retain(|c| c.id != id);
            Ok(())
        }

        async fn os_options(&self) -> Result<Vec<String>> {
            Ok(self.os.lock().unwrap().clone())
        }

        async fn item_options(&self) -> Result<Vec<String>> {
            Ok(vec!["Password".to_string()])
        }

        async fn filter_tags(&self) -> Result<BTreeMap<String, Vec<String>>> {
            let mut categories = BTreeMap::new();
            categories.insert(
                "Service".to_string(),
                vec!["SMB".to_string(), "DNS".to_string()],
            );
            categories.insert("Attack Type".to_string(), vec!["Enumeration".to_string()]);
            Ok(categories)
        }

        async fn add_option(&self, kind: &OptionKind, name: &str) -> Result<()> {
            match kind {
                OptionKind::Os => {
                    let mut os = self.os.lock().unwrap();
                    if os.iter().any(|existing| existing == name) {
                        return Err(CommandWaveError::api(409, "option already exists"));
                    }
                    os.push(name.to_string());
                    Ok(())
                }
                _ => Ok(()),
            }
        }
    }

    fn catalog() -> CommandCatalogService {
        CommandCatalogService::new(Arc::new(InMemoryCommandRepository::seeded()))
    }

    #[tokio::test]
    async fn test_refresh_then_filter() {
        let catalog = catalog();
        assert_eq!(catalog.refresh_commands().await.unwrap(), 2);
        assert_eq!(catalog.visible().await.len(), 2);

        catalog.set_os_filter(vec!["windows".to_string()]).await;
        let visible = catalog.visible().await;
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);

        catalog.clear_filter().await;
        assert_eq!(catalog.visible().await.len(), 2);
    }

    #[tokio::test]
    async fn test_search_composes_with_facets() {
        let catalog = catalog();
        catalog.refresh_commands().await.unwrap();

        catalog.set_os_filter(vec!["linux".to_string()]).await;
        catalog.set_search("NMAP").await;
        assert_eq!(catalog.visible().await.len(), 1);

        catalog.set_search("nltest").await;
        assert!(catalog.visible().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_refreshes_catalog() {
        let catalog = catalog();
        catalog.refresh_commands().await.unwrap();

        let count = catalog
            .create(&CommandDraft {
                command: "id".to_string(),
                description: String::new(),
                os: vec![],
                items: vec![],
                filters: vec![],
            })
            .await
            .unwrap();
        assert_eq!(count, 3);
        assert!(catalog.command(3).await.is_some());
    }

    #[tokio::test]
    async fn test_delete_refreshes_catalog() {
        let catalog = catalog();
        catalog.refresh_commands().await.unwrap();
        assert_eq!(catalog.delete(1).await.unwrap(), 1);
        assert!(catalog.command(1).await.is_none());
    }

    #[tokio::test]
    async fn test_options_are_sorted_after_refresh() {
        let catalog = catalog();
        catalog.refresh_options().await.unwrap();

        let options = catalog.options().await;
        assert_eq!(options.os, vec!["linux".to_string(), "windows".to_string()]);
        assert_eq!(
            options.filter_categories["Service"],
            vec!["DNS".to_string(), "SMB".to_string()]
        );
        assert_eq!(
            options.all_filter_tags(),
            vec![
                "DNS".to_string(),
                "Enumeration".to_string(),
                "SMB".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_duplicate_option_surfaces_conflict() {
        let catalog = catalog();
        let err = catalog
            .add_option(&OptionKind::Os, "linux")
            .await
            .unwrap_err();
        assert_eq!(err.api_status(), Some(409));

        catalog.add_option(&OptionKind::Os, "macos").await.unwrap();
        assert!(catalog.options().await.os.contains(&"macos".to_string()));
    }
}
