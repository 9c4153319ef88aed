// Core types for the migration wizard - no dioxus imports needed here
use serde::{Deserialize, Serialize};

use crate::services::api::{ConnectionConfig, MigrationOptions, TargetConfig};

/// Flat record of everything the user typed into the wizard
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    // Step 1: basic info
    pub name: String,
    pub description: String,

    // Step 2: source connection
    pub source_host: String,
    pub source_port: String,
    pub source_database: String,
    pub source_username: String,
    pub source_password: String,

    // Step 3: target configuration
    pub target_project: String,
    pub target_schema: String,
    pub generate_tests: bool,
    pub generate_docs: bool,

    // Step 4: table selection. Derived from the table catalog; only
    // `WizardState` writes it, right after every catalog mutation.
    pub(crate) selected_tables: Vec<String>,
    pub include_views: bool,
    pub include_stored_procedures: bool,
}

impl Default for FormData {
    fn default() -> Self {
        Self::with_target_schema("public")
    }
}

impl FormData {
    pub fn with_target_schema(schema: &str) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            source_host: String::new(),
            source_port: String::new(),
            source_database: String::new(),
            source_username: String::new(),
            source_password: String::new(),
            target_project: String::new(),
            target_schema: schema.to_string(),
            generate_tests: false,
            generate_docs: false,
            selected_tables: Vec::new(),
            include_views: false,
            include_stored_procedures: false,
        }
    }

    /// Names of the selected tables, in catalog order
    pub fn selected_tables(&self) -> &[String] {
        &self.selected_tables
    }

    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            host: self.source_host.trim().to_string(),
            port: self.source_port.trim().to_string(),
            database: self.source_database.trim().to_string(),
            username: self.source_username.trim().to_string(),
            password: self.source_password.clone(),
        }
    }

    pub fn target_config(&self) -> TargetConfig {
        let schema = self.target_schema.trim();
        TargetConfig {
            project: self.target_project.trim().to_string(),
            schema: if schema.is_empty() {
                "public".to_string()
            } else {
                schema.to_string()
            },
        }
    }

    pub fn migration_options(&self) -> MigrationOptions {
        MigrationOptions {
            generate_tests: self.generate_tests,
            generate_docs: self.generate_docs,
            include_views: self.include_views,
            include_stored_procedures: self.include_stored_procedures,
        }
    }
}

/// Source connection fields. Editing any of them makes earlier probe results
/// and the loaded table list meaningless.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceField {
    Host,
    Port,
    Database,
    Username,
    Password,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Idle,
    Testing,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum CatalogLoad {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded { migration_id: String },
    Failed,
}

// Action enum for synchronous state mutations. Async work (probe, table
// load, submit) goes through the drivers instead.
#[derive(Clone, Debug, PartialEq)]
pub enum WizardAction {
    // Step 1
    SetName(String),
    SetDescription(String),

    // Step 2
    SetSourceField(SourceField, String),

    // Step 3
    SetTargetProject(String),
    SetTargetSchema(String),
    SetGenerateTests(bool),
    SetGenerateDocs(bool),

    // Step 4
    ToggleTable(String),
    SelectAllTables,
    DeselectAllTables,
    SetTableFilter(String),
    SetIncludeViews(bool),
    SetIncludeStoredProcedures(bool),

    // Navigation
    Next,
    Previous,
    JumpTo(u8),

    DismissSubmitError,
}
