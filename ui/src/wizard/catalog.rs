use serde::{Deserialize, Serialize};

use super::store::WizardStore;
use crate::services::api::{ConnectionApi, TableInfo};
use crate::services::errors::{WizardError, WizardResult};
use crate::{console_debug, console_error, console_info, console_warn};

/// One selectable source table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub name: String,
    pub row_count: u64,
    pub selected: bool,
}

/// Ordered list of tables offered on the table selection step.
/// Names are unique within a catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableCatalog {
    entries: Vec<TableEntry>,
}

impl TableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from the source's table list. Duplicate names keep
    /// their first occurrence; nothing starts selected.
    pub fn from_tables(tables: Vec<TableInfo>) -> Self {
        let mut entries: Vec<TableEntry> = Vec::with_capacity(tables.len());
        for table in tables {
            if entries.iter().any(|e| e.name == table.name) {
                console_warn!("[Catalog] Dropping duplicate table entry '{}'", table.name);
                continue;
            }
            entries.push(TableEntry {
                name: table.name,
                row_count: table.row_count,
                selected: false,
            });
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TableEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Flip the selection of `name`. Returns `false` if no such table exists.
    pub fn toggle(&mut self, name: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.selected = !entry.selected;
                true
            }
            None => false,
        }
    }

    pub fn select_all(&mut self) {
        for entry in &mut self.entries {
            entry.selected = true;
        }
    }

    pub fn deselect_all(&mut self) {
        for entry in &mut self.entries {
            entry.selected = false;
        }
    }

    pub fn selected_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.name.clone())
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|e| e.selected).count()
    }

    pub fn all_selected(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(|e| e.selected)
    }

    pub fn total_selected_rows(&self) -> u64 {
        self.entries
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.row_count)
            .sum()
    }

    /// Entries whose name contains `query`, ignoring case. An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&TableEntry> {
        let query = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| query.is_empty() || e.name.to_lowercase().contains(&query))
            .collect()
    }
}

/// List the source's tables and load them into the catalog.
///
/// The previous selection is dropped. A result that arrives after a source
/// field was edited, or after the view closed, is discarded.
pub async fn load_table_catalog<S, A>(store: &S, api: &A) -> WizardResult<usize>
where
    S: WizardStore,
    A: ConnectionApi + ?Sized,
{
    let (ticket, config) = store.update(|state| state.begin_catalog_load())?;
    console_info!("[Catalog] Listing tables on {}", config.display_target());

    let outcome = api.list_tables(&config).await;

    if !store.is_live() {
        console_debug!("[Catalog] View closed before the table list arrived");
        return Err(WizardError::Discarded);
    }

    let result = store.update(|state| state.finish_catalog_load(ticket, outcome));
    match &result {
        Ok(count) => console_info!("[Catalog] Loaded {} tables", count),
        Err(WizardError::Discarded) => console_debug!("[Catalog] Stale table list dropped"),
        Err(e) => console_error!("[Catalog] Could not list tables: {}", e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(names: &[(&str, u64)]) -> Vec<TableInfo> {
        names
            .iter()
            .map(|(name, rows)| TableInfo {
                name: name.to_string(),
                row_count: *rows,
            })
            .collect()
    }

    #[test]
    fn test_toggle_flips_selection() {
        let mut catalog = TableCatalog::from_tables(tables(&[("users", 10)]));
        assert!(catalog.toggle("users"));
        assert_eq!(catalog.selected_names(), vec!["users".to_string()]);
        assert!(catalog.toggle("users"));
        assert!(catalog.selected_names().is_empty());
        assert!(!catalog.toggle("missing"));
    }

    #[test]
    fn test_duplicates_keep_first() {
        let catalog = TableCatalog::from_tables(tables(&[("a", 1), ("b", 2), ("a", 3)]));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("a").map(|e| e.row_count), Some(1));
    }

    #[test]
    fn test_select_all_and_row_totals() {
        let mut catalog = TableCatalog::from_tables(tables(&[("a", 1), ("b", 2), ("c", 4)]));
        assert!(!catalog.all_selected());
        catalog.select_all();
        assert!(catalog.all_selected());
        assert_eq!(catalog.total_selected_rows(), 7);

        catalog.toggle("b");
        assert_eq!(catalog.selected_names(), vec!["a".to_string(), "c".to_string()]);
        assert_eq!(catalog.total_selected_rows(), 5);

        catalog.deselect_all();
        assert_eq!(catalog.selected_count(), 0);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let catalog =
            TableCatalog::from_tables(tables(&[("Orders", 1), ("order_items", 2), ("users", 3)]));
        let names: Vec<&str> = catalog
            .filter(" ORDER")
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Orders", "order_items"]);
        assert_eq!(catalog.filter("").len(), 3);
    }

    #[test]
    fn test_empty_catalog_is_never_all_selected() {
        let mut catalog = TableCatalog::new();
        catalog.select_all();
        assert!(!catalog.all_selected());
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn test_load_replaces_catalog_and_selection() {
        use crate::services::api::InMemoryApi;
        use crate::services::config::WizardConfig;
        use crate::wizard::state::WizardState;
        use crate::wizard::types::{CatalogLoad, SourceField};
        use std::cell::RefCell;

        let store = RefCell::new(WizardState::new(WizardConfig::default()));
        store
            .borrow_mut()
            .set_source_field(SourceField::Host, "sql01".into());
        store.borrow_mut().load_catalog(tables(&[("stale", 1)]));
        store.borrow_mut().toggle_table("stale");

        let api = InMemoryApi::new().with_tables(tables(&[("users", 10), ("orders", 20)]));
        let count = load_table_catalog(&store, &api).await.unwrap();
        assert_eq!(count, 2);

        let state = store.borrow();
        assert_eq!(state.catalog_load(), &CatalogLoad::Loaded);
        assert!(state.catalog().get("stale").is_none());
        assert!(state.form_data().selected_tables().is_empty());
    }

    #[tokio::test]
    async fn test_failed_listing_is_reported() {
        use crate::services::api::InMemoryApi;
        use crate::services::config::WizardConfig;
        use crate::services::errors::ApiError;
        use crate::wizard::state::WizardState;
        use crate::wizard::types::{CatalogLoad, SourceField};
        use std::cell::RefCell;

        let store = RefCell::new(WizardState::new(WizardConfig::default()));
        store
            .borrow_mut()
            .set_source_field(SourceField::Host, "sql01".into());
        let api = InMemoryApi::with_sample_tables();
        api.fail_next_list_tables(ApiError::http(500, "Catalog query failed"));

        let result = load_table_catalog(&store, &api).await;
        assert!(matches!(result, Err(WizardError::Api(_))));
        assert_eq!(
            store.borrow().catalog_load(),
            &CatalogLoad::Failed("Catalog query failed".to_string())
        );

        // Retry is allowed once the first load finished
        assert!(load_table_catalog(&store, &api).await.is_ok());
    }
}
