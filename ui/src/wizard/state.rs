use super::catalog::TableCatalog;
use super::connection_tester::ConnectionTester;
use super::controller::{StepChange, WizardController};
use super::gate::{RequestGate, Ticket};
use super::submission::SubmissionHandler;
use super::types::*;
use super::validation::step_validation_message;
use crate::services::api::{
    ConnectionConfig, ConnectionTestResult, CreateMigrationRequest, Migration, TableInfo,
};
use crate::services::config::WizardConfig;
use crate::services::errors::{ApiResult, WizardError, WizardResult};
use crate::{console_debug, console_info, console_log, console_warn};

/// Everything one wizard instance owns. Created on mount, dropped on navigation.
///
/// `form_data.selected_tables` always equals the names of the selected catalog
/// entries: the catalog is only reachable mutably through methods here, and
/// each of them recomputes the projection before returning.
#[derive(Clone, Debug, PartialEq)]
pub struct WizardState {
    config: WizardConfig,
    controller: WizardController,
    form_data: FormData,
    catalog: TableCatalog,
    catalog_load: CatalogLoad,
    catalog_gate: RequestGate,
    table_filter: String,
    connection: ConnectionTester,
    submission: SubmissionHandler,
}

impl WizardState {
    pub fn new(config: WizardConfig) -> Self {
        Self {
            controller: WizardController::new(&config),
            form_data: FormData::with_target_schema(&config.default_target_schema),
            catalog: TableCatalog::new(),
            catalog_load: CatalogLoad::Idle,
            catalog_gate: RequestGate::new(),
            table_filter: String::new(),
            connection: ConnectionTester::default(),
            submission: SubmissionHandler::default(),
            config,
        }
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    pub fn form_data(&self) -> &FormData {
        &self.form_data
    }

    pub fn catalog(&self) -> &TableCatalog {
        &self.catalog
    }

    pub fn catalog_load(&self) -> &CatalogLoad {
        &self.catalog_load
    }

    pub fn table_filter(&self) -> &str {
        &self.table_filter
    }

    pub fn connection(&self) -> &ConnectionTester {
        &self.connection
    }

    pub fn submission(&self) -> &SubmissionHandler {
        &self.submission
    }

    /// Validation message for the step currently displayed
    pub fn current_step_message(&self) -> Option<String> {
        step_validation_message(self.controller.current_step(), &self.form_data)
    }

    pub fn can_submit(&self) -> bool {
        self.submission.is_enabled() && self.controller.can_submit(&self.form_data)
    }

    /// Reduces the state based on an action in-place (preserves Dioxus Signal reactivity)
    pub fn reduce_in_place(&mut self, action: WizardAction) {
        match &action {
            WizardAction::SetSourceField(SourceField::Password, _) => {
                console_log!("[Wizard] Reducing SetSourceField(Password, ..)")
            }
            other => console_log!("[Wizard] Reducing {:?}", other),
        }
        match action {
            // Step 1
            WizardAction::SetName(name) => {
                self.form_data.name = name;
            }
            WizardAction::SetDescription(description) => {
                self.form_data.description = description;
            }

            // Step 2
            WizardAction::SetSourceField(field, value) => {
                self.set_source_field(field, value);
            }

            // Step 3
            WizardAction::SetTargetProject(project) => {
                self.form_data.target_project = project;
            }
            WizardAction::SetTargetSchema(schema) => {
                self.form_data.target_schema = schema;
            }
            WizardAction::SetGenerateTests(enabled) => {
                self.form_data.generate_tests = enabled;
            }
            WizardAction::SetGenerateDocs(enabled) => {
                self.form_data.generate_docs = enabled;
            }

            // Step 4
            WizardAction::ToggleTable(name) => {
                self.toggle_table(&name);
            }
            WizardAction::SelectAllTables => {
                self.select_all_tables();
            }
            WizardAction::DeselectAllTables => {
                self.deselect_all_tables();
            }
            WizardAction::SetTableFilter(filter) => {
                self.table_filter = filter;
            }
            WizardAction::SetIncludeViews(enabled) => {
                self.form_data.include_views = enabled;
            }
            WizardAction::SetIncludeStoredProcedures(enabled) => {
                self.form_data.include_stored_procedures = enabled;
            }

            // Navigation
            WizardAction::Next => {
                self.next();
            }
            WizardAction::Previous => {
                self.previous();
            }
            WizardAction::JumpTo(step) => {
                self.jump_to(step);
            }

            WizardAction::DismissSubmitError => {
                self.submission.dismiss_error();
            }
        }
    }

    pub fn next(&mut self) -> StepChange {
        let change = self.controller.next(&self.form_data);
        match change {
            StepChange::Moved { from, to } => {
                console_info!("[Wizard] Step {} -> {}", from, to);
            }
            StepChange::Unchanged => {
                if let Some(message) = self.current_step_message() {
                    console_debug!(
                        "[Wizard] Staying on step {}: {}",
                        self.controller.current_step(),
                        message
                    );
                }
            }
        }
        change
    }

    pub fn previous(&mut self) -> StepChange {
        let change = self.controller.previous();
        if let StepChange::Moved { from, to } = change {
            console_info!("[Wizard] Back from step {} to {}", from, to);
        }
        change
    }

    pub fn jump_to(&mut self, step: u8) -> StepChange {
        let change = self.controller.jump_to(step);
        match change {
            StepChange::Moved { from, to } => console_info!("[Wizard] Jumped from step {} to {}", from, to),
            StepChange::Unchanged => console_debug!("[Wizard] Jump to step {} refused", step),
        }
        change
    }

    /// Cancel the wizard. `confirm` is asked first; if it declines, nothing
    /// changes. Returns `true` when the state was discarded and the caller
    /// should navigate away.
    pub fn cancel(&mut self, confirm: impl FnOnce(&str) -> bool) -> bool {
        if !confirm(&self.config.confirm_cancel_message) {
            console_debug!("[Wizard] Cancel not confirmed, keeping entered data");
            return false;
        }
        console_info!("[Wizard] Cancelled, discarding wizard state");
        self.discard();
        true
    }

    /// Reset to a fresh wizard. Pending requests become stale.
    pub fn discard(&mut self) {
        let mut fresh = WizardState::new(self.config.clone());
        fresh.catalog_gate = self.catalog_gate.successor();
        fresh.connection = self.connection.successor();
        fresh.submission = self.submission.successor();
        *self = fresh;
    }

    /// Drop every pending request; used when the view is torn down
    pub fn invalidate_pending(&mut self) {
        self.catalog_gate.invalidate();
        self.connection = self.connection.successor();
        self.submission = self.submission.successor();
    }

    /// Edit arbitrary form fields. The table projection is recomputed
    /// afterwards, so the closure cannot leave it out of sync.
    pub fn update_form(&mut self, f: impl FnOnce(&mut FormData)) {
        let before = self.form_data.connection_config();
        f(&mut self.form_data);
        self.sync_selected_tables();
        if self.form_data.connection_config() != before {
            self.source_changed();
        }
    }

    pub fn set_source_field(&mut self, field: SourceField, value: String) {
        let slot = match field {
            SourceField::Host => &mut self.form_data.source_host,
            SourceField::Port => &mut self.form_data.source_port,
            SourceField::Database => &mut self.form_data.source_database,
            SourceField::Username => &mut self.form_data.source_username,
            SourceField::Password => &mut self.form_data.source_password,
        };
        if *slot == value {
            return;
        }
        *slot = value;
        self.source_changed();
    }

    // Probe results and the table list describe the previous source
    fn source_changed(&mut self) {
        if self.connection.status() != ConnectionStatus::Idle || self.connection.is_testing() {
            console_debug!("[Wizard] Source changed, clearing connection test result");
        }
        self.connection.reset();

        if !self.catalog.is_empty() || self.catalog_load != CatalogLoad::Idle {
            console_debug!("[Wizard] Source changed, clearing table catalog");
        }
        self.catalog_gate.invalidate();
        self.catalog = TableCatalog::new();
        self.catalog_load = CatalogLoad::Idle;
        self.sync_selected_tables();
    }

    pub fn toggle_table(&mut self, name: &str) -> bool {
        let found = self.catalog.toggle(name);
        if !found {
            console_warn!("[Catalog] Toggle for unknown table '{}'", name);
        }
        self.sync_selected_tables();
        found
    }

    pub fn select_all_tables(&mut self) {
        self.catalog.select_all();
        self.sync_selected_tables();
    }

    pub fn deselect_all_tables(&mut self) {
        self.catalog.deselect_all();
        self.sync_selected_tables();
    }

    /// Replace the catalog with a freshly listed set of tables
    pub fn load_catalog(&mut self, tables: Vec<TableInfo>) {
        self.catalog = TableCatalog::from_tables(tables);
        self.catalog_load = CatalogLoad::Loaded;
        self.sync_selected_tables();
    }

    fn sync_selected_tables(&mut self) {
        self.form_data.selected_tables = self.catalog.selected_names();
    }

    pub fn begin_connection_test(&mut self) -> WizardResult<(Ticket, ConnectionConfig)> {
        let ticket = self.connection.begin()?;
        Ok((ticket, self.form_data.connection_config()))
    }

    pub fn finish_connection_test(
        &mut self,
        ticket: Ticket,
        outcome: ApiResult<ConnectionTestResult>,
    ) -> WizardResult<ConnectionStatus> {
        self.connection.resolve(ticket, outcome)
    }

    pub fn begin_catalog_load(&mut self) -> WizardResult<(Ticket, ConnectionConfig)> {
        let ticket = self
            .catalog_gate
            .try_begin()
            .ok_or(WizardError::CatalogLoadInFlight)?;
        self.catalog_load = CatalogLoad::Loading;
        Ok((ticket, self.form_data.connection_config()))
    }

    pub fn finish_catalog_load(
        &mut self,
        ticket: Ticket,
        outcome: ApiResult<Vec<TableInfo>>,
    ) -> WizardResult<usize> {
        if !self.catalog_gate.finish(ticket) {
            return Err(WizardError::Discarded);
        }
        match outcome {
            Ok(tables) => {
                self.load_catalog(tables);
                Ok(self.catalog.len())
            }
            Err(e) => {
                self.catalog_load = CatalogLoad::Failed(e.user_message());
                Err(e.into())
            }
        }
    }

    /// Validate and package the wizard for `POST /migrations`
    pub fn begin_submission(&mut self) -> WizardResult<(Ticket, CreateMigrationRequest)> {
        if !self.controller.is_last_step() {
            return Err(WizardError::NotOnLastStep {
                current_step: self.controller.current_step(),
            });
        }
        if !self.submission.is_enabled() {
            return Err(WizardError::SubmissionInFlight);
        }

        let last = self.controller.total_steps();
        if let Some(message) = step_validation_message(last, &self.form_data) {
            self.submission.reject(message.clone());
            return Err(WizardError::Validation {
                step: last,
                message,
            });
        }

        let ticket = self.submission.begin()?;
        Ok((ticket, self.build_request()))
    }

    pub fn finish_submission(
        &mut self,
        ticket: Ticket,
        outcome: ApiResult<Migration>,
    ) -> WizardResult<Migration> {
        self.submission.resolve(ticket, outcome)
    }

    pub fn build_request(&self) -> CreateMigrationRequest {
        let description = self.form_data.description.trim();
        CreateMigrationRequest {
            name: self.form_data.name.trim().to_string(),
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
            source: self.form_data.connection_config(),
            target: self.form_data.target_config(),
            options: self.form_data.migration_options(),
            tables: self.form_data.selected_tables.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(names: &[&str]) -> Vec<TableInfo> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| TableInfo {
                name: name.to_string(),
                row_count: i as u64 * 100,
            })
            .collect()
    }

    fn assert_projection(state: &WizardState) {
        let expected: Vec<String> = state
            .catalog()
            .entries()
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.name.clone())
            .collect();
        assert_eq!(state.form_data().selected_tables(), expected.as_slice());
    }

    #[test]
    fn test_toggle_users_twice() {
        let mut state = WizardState::new(WizardConfig::default());
        state.load_catalog(tables(&["users"]));

        state.reduce_in_place(WizardAction::ToggleTable("users".into()));
        assert!(state.catalog().get("users").unwrap().selected);
        assert_eq!(state.form_data().selected_tables(), &["users".to_string()]);

        state.reduce_in_place(WizardAction::ToggleTable("users".into()));
        assert!(state.form_data().selected_tables().is_empty());
    }

    #[test]
    fn test_projection_holds_after_every_mutation() {
        let mut state = WizardState::new(WizardConfig::default());
        state.load_catalog(tables(&["a", "b", "c", "d"]));
        assert_projection(&state);

        let actions = [
            WizardAction::ToggleTable("c".into()),
            WizardAction::ToggleTable("a".into()),
            WizardAction::SelectAllTables,
            WizardAction::ToggleTable("b".into()),
            WizardAction::ToggleTable("nope".into()),
            WizardAction::DeselectAllTables,
            WizardAction::ToggleTable("d".into()),
        ];
        for action in actions {
            state.reduce_in_place(action);
            assert_projection(&state);
        }
        assert_eq!(state.form_data().selected_tables(), &["d".to_string()]);
    }

    #[test]
    fn test_update_form_cannot_desync_projection() {
        let mut state = WizardState::new(WizardConfig::default());
        state.load_catalog(tables(&["a", "b"]));
        state.toggle_table("b");

        state.update_form(|form| {
            form.name = "Replaced".into();
            form.selected_tables.clear();
        });
        assert_projection(&state);
        assert_eq!(state.form_data().name, "Replaced");
    }

    #[test]
    fn test_empty_catalog_blocks_table_step() {
        let mut state = WizardState::new(WizardConfig::default());
        state.update_form(|form| {
            form.name = "abc".into();
            form.source_host = "h".into();
            form.source_database = "d".into();
            form.source_username = "u".into();
            form.target_project = "pp".into();
        });
        state.next();
        state.next();
        state.next();
        assert_eq!(state.controller().current_step(), 4);
        assert!(!state.can_submit());
        assert_eq!(
            state.current_step_message().as_deref(),
            Some("Select at least one table to migrate")
        );
    }

    #[test]
    fn test_previous_keeps_form_data() {
        let mut state = WizardState::new(WizardConfig::default());
        state.reduce_in_place(WizardAction::SetName("abc".into()));
        state.reduce_in_place(WizardAction::SetDescription("nightly".into()));
        state.reduce_in_place(WizardAction::Next);
        state.reduce_in_place(WizardAction::SetSourceField(SourceField::Host, "db".into()));

        let before = state.form_data().clone();
        state.reduce_in_place(WizardAction::Previous);
        state.reduce_in_place(WizardAction::Previous);
        assert_eq!(state.controller().current_step(), 1);
        assert_eq!(state.form_data(), &before);
    }

    #[test]
    fn test_cancel_requires_confirmation() {
        let mut state = WizardState::new(WizardConfig::default());
        state.reduce_in_place(WizardAction::SetName("Keep me".into()));
        state.reduce_in_place(WizardAction::Next);
        let before = state.clone();

        let mut prompt = String::new();
        assert!(!state.cancel(|message| {
            prompt = message.to_string();
            false
        }));
        assert_eq!(state, before);
        assert!(prompt.contains("All entered data will be lost"));

        assert!(state.cancel(|_| true));
        assert_eq!(state.controller().current_step(), 1);
        assert!(state.form_data().name.is_empty());
        assert_eq!(state.form_data().target_schema, "public");
    }

    #[test]
    fn test_cancel_makes_pending_results_stale() {
        let mut state = WizardState::new(WizardConfig::default());
        let (ticket, _) = state.begin_connection_test().unwrap();
        assert!(state.cancel(|_| true));

        let result = state.finish_connection_test(ticket, Ok(ConnectionTestResult::success("ok")));
        assert_eq!(result, Err(WizardError::Discarded));
        assert_eq!(state.connection().status(), ConnectionStatus::Idle);
        assert!(state.connection().can_test());
    }

    #[test]
    fn test_invalidate_pending_keeps_form_data() {
        let mut state = WizardState::new(WizardConfig::default());
        state.reduce_in_place(WizardAction::SetName("Nightly sync".into()));
        let (probe, _) = state.begin_connection_test().unwrap();
        let (listing, _) = state.begin_catalog_load().unwrap();

        state.invalidate_pending();

        assert_eq!(
            state.finish_connection_test(probe, Ok(ConnectionTestResult::success("ok"))),
            Err(WizardError::Discarded)
        );
        assert_eq!(
            state.finish_catalog_load(listing, Ok(tables(&["users"]))),
            Err(WizardError::Discarded)
        );
        assert!(state.catalog().is_empty());
        assert!(state.connection().can_test());
        assert!(state.submission().is_enabled());
        assert_eq!(state.form_data().name, "Nightly sync");
    }

    #[test]
    fn test_source_edit_clears_catalog() {
        let mut state = WizardState::new(WizardConfig::default());
        state.load_catalog(tables(&["a"]));
        state.toggle_table("a");

        // Same value: nothing to invalidate
        state.set_source_field(SourceField::Host, String::new());
        assert_eq!(state.catalog().len(), 1);

        state.set_source_field(SourceField::Host, "other".into());
        assert!(state.catalog().is_empty());
        assert_eq!(state.catalog_load(), &CatalogLoad::Idle);
        assert!(state.form_data().selected_tables().is_empty());
    }

    #[test]
    fn test_build_request_trims_and_defaults() {
        let mut state = WizardState::new(WizardConfig::default());
        state.update_form(|form| {
            form.name = "  Orders  ".into();
            form.description = "   ".into();
            form.source_host = " db ".into();
            form.target_project = "dw".into();
            form.target_schema = " ".into();
            form.generate_docs = true;
        });
        state.load_catalog(tables(&["orders", "items"]));
        state.select_all_tables();

        let request = state.build_request();
        assert_eq!(request.name, "Orders");
        assert!(request.description.is_none());
        assert_eq!(request.source.host, "db");
        assert_eq!(request.target.schema, "public");
        assert!(request.options.generate_docs);
        assert_eq!(request.tables, vec!["orders".to_string(), "items".to_string()]);
    }
}
