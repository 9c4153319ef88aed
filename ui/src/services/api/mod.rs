//! Backend collaborators
//!
//! The wizard never talks to the network directly. Every backend call goes
//! through one of these traits so the views can be handed either the real
//! [`HttpApiClient`] or the in-process [`InMemoryApi`].
//!
//! Traits are `?Send`: everything runs on the single browser thread.

pub mod http_client;
pub mod memory;
pub mod types;

use async_trait::async_trait;
use std::rc::Rc;

use crate::services::errors::ApiResult;

pub use http_client::HttpApiClient;
pub use memory::InMemoryApi;
pub use types::*;

#[async_trait(?Send)]
pub trait ConnectionApi {
    async fn create_connection(&self, config: ConnectionConfig) -> ApiResult<Connection>;

    async fn test_connection(&self, id: &str) -> ApiResult<ConnectionTestResult>;

    /// Probe a connection that has not been saved yet
    async fn test_connection_config(
        &self,
        config: &ConnectionConfig,
    ) -> ApiResult<ConnectionTestResult>;

    async fn delete_connection(&self, id: &str) -> ApiResult<()>;

    async fn list_connections(&self) -> ApiResult<Vec<Connection>>;

    /// List the tables visible through `config`
    async fn list_tables(&self, config: &ConnectionConfig) -> ApiResult<Vec<TableInfo>>;
}

#[async_trait(?Send)]
pub trait ApiKeysApi {
    async fn create_api_key(&self, request: CreateApiKeyRequest) -> ApiResult<CreatedApiKey>;

    async fn list_api_keys(&self) -> ApiResult<Vec<ApiKey>>;

    async fn toggle_api_key(&self, id: &str) -> ApiResult<ApiKeyToggle>;

    async fn delete_api_key(&self, id: &str) -> ApiResult<()>;
}

#[async_trait(?Send)]
pub trait MigrationsApi {
    async fn create_migration(&self, request: CreateMigrationRequest) -> ApiResult<Migration>;

    async fn list_migrations(&self) -> ApiResult<Vec<Migration>>;

    async fn delete_migration(&self, id: &str) -> ApiResult<()>;
}

#[async_trait(?Send)]
pub trait AccountApi {
    async fn login(&self, credentials: LoginCredentials) -> ApiResult<AuthSession>;

    async fn register(&self, profile: RegisterProfile) -> ApiResult<AuthSession>;

    async fn reset_password(&self, token: &str, new_password: &str) -> ApiResult<()>;

    /// Forget any credentials attached to later requests
    fn sign_out(&self) {}
}

/// Everything the views need from the backend
pub trait MigrationApi: ConnectionApi + ApiKeysApi + MigrationsApi + AccountApi {}

impl<T> MigrationApi for T where T: ConnectionApi + ApiKeysApi + MigrationsApi + AccountApi {}

/// Shared handle to an API implementation, passed to views as a prop.
/// Equality is identity so Dioxus only re-renders when the handle is swapped.
#[derive(Clone)]
pub struct ApiHandle(Rc<dyn MigrationApi>);

impl ApiHandle {
    pub fn new(api: impl MigrationApi + 'static) -> Self {
        Self(Rc::new(api))
    }

    pub fn api(&self) -> &dyn MigrationApi {
        self.0.as_ref()
    }
}

impl PartialEq for ApiHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for ApiHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiHandle")
    }
}
