use async_trait::async_trait;
use std::cell::{Cell, RefCell};

use super::types::*;
use super::{AccountApi, ApiKeysApi, ConnectionApi, MigrationsApi};
use crate::console_info;
use crate::services::errors::{ApiError, ApiResult};

/// In-process backend with deterministic ids.
///
/// Used as the test double for the wizard and as the demo backend selected
/// with `?api=memory`. Failures can be queued per operation.
#[derive(Default)]
pub struct InMemoryApi {
    next_id: Cell<u64>,
    tables: RefCell<Vec<TableInfo>>,
    connections: RefCell<Vec<Connection>>,
    api_keys: RefCell<Vec<ApiKey>>,
    migrations: RefCell<Vec<Migration>>,
    users: RefCell<Vec<(RegisterProfile, User)>>,
    reset_tokens: RefCell<Vec<String>>,
    unreachable_hosts: RefCell<Vec<String>>,
    fail_next_create_migration: RefCell<Option<ApiError>>,
    fail_next_list_tables: RefCell<Option<ApiError>>,
    create_migration_calls: Cell<u32>,
    connection_test_calls: Cell<u32>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose source database exposes a small sample schema
    pub fn with_sample_tables() -> Self {
        Self::new().with_tables(vec![
            TableInfo {
                name: "customers".to_string(),
                row_count: 15_230,
            },
            TableInfo {
                name: "orders".to_string(),
                row_count: 248_901,
            },
            TableInfo {
                name: "order_items".to_string(),
                row_count: 1_204_577,
            },
            TableInfo {
                name: "products".to_string(),
                row_count: 3_412,
            },
            TableInfo {
                name: "audit_log".to_string(),
                row_count: 9_877_001,
            },
        ])
    }

    pub fn with_tables(self, tables: Vec<TableInfo>) -> Self {
        *self.tables.borrow_mut() = tables;
        self
    }

    /// Connection probes against `host` report failure
    pub fn with_unreachable_host(self, host: &str) -> Self {
        self.unreachable_hosts.borrow_mut().push(host.to_string());
        self
    }

    pub fn with_reset_token(self, token: &str) -> Self {
        self.reset_tokens.borrow_mut().push(token.to_string());
        self
    }

    pub fn fail_next_create_migration(&self, error: ApiError) {
        *self.fail_next_create_migration.borrow_mut() = Some(error);
    }

    pub fn fail_next_list_tables(&self, error: ApiError) {
        *self.fail_next_list_tables.borrow_mut() = Some(error);
    }

    pub fn create_migration_calls(&self) -> u32 {
        self.create_migration_calls.get()
    }

    pub fn connection_test_calls(&self) -> u32 {
        self.connection_test_calls.get()
    }

    pub fn migrations(&self) -> Vec<Migration> {
        self.migrations.borrow().clone()
    }

    fn next_id(&self, prefix: &str) -> String {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        format!("{}-{}", prefix, id)
    }

    fn probe(&self, host: &str) -> ConnectionTestResult {
        self.connection_test_calls
            .set(self.connection_test_calls.get() + 1);

        if host.trim().is_empty() {
            ConnectionTestResult::failure("Host is required")
        } else if self.unreachable_hosts.borrow().iter().any(|h| h == host) {
            ConnectionTestResult::failure(&format!("Could not connect to {}", host))
        } else {
            ConnectionTestResult::success("Connection successful")
        }
    }
}

#[async_trait(?Send)]
impl ConnectionApi for InMemoryApi {
    async fn create_connection(&self, config: ConnectionConfig) -> ApiResult<Connection> {
        let connection = Connection {
            id: self.next_id("conn"),
            name: config.display_target(),
            host: config.host,
            database: config.database,
            created_at: None,
        };
        self.connections.borrow_mut().push(connection.clone());
        Ok(connection)
    }

    async fn test_connection(&self, id: &str) -> ApiResult<ConnectionTestResult> {
        let host = self
            .connections
            .borrow()
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.host.clone())
            .ok_or_else(|| ApiError::not_found("Connection", id))?;
        Ok(self.probe(&host))
    }

    async fn test_connection_config(
        &self,
        config: &ConnectionConfig,
    ) -> ApiResult<ConnectionTestResult> {
        Ok(self.probe(&config.host))
    }

    async fn delete_connection(&self, id: &str) -> ApiResult<()> {
        let mut connections = self.connections.borrow_mut();
        let before = connections.len();
        connections.retain(|c| c.id != id);
        if connections.len() == before {
            return Err(ApiError::not_found("Connection", id));
        }
        Ok(())
    }

    async fn list_connections(&self) -> ApiResult<Vec<Connection>> {
        Ok(self.connections.borrow().clone())
    }

    async fn list_tables(&self, config: &ConnectionConfig) -> ApiResult<Vec<TableInfo>> {
        if let Some(error) = self.fail_next_list_tables.borrow_mut().take() {
            return Err(error);
        }
        if !self.probe(&config.host).success {
            return Err(ApiError::network(format!(
                "Could not connect to {}",
                config.display_target()
            )));
        }
        Ok(self.tables.borrow().clone())
    }
}

#[async_trait(?Send)]
impl ApiKeysApi for InMemoryApi {
    async fn create_api_key(&self, request: CreateApiKeyRequest) -> ApiResult<CreatedApiKey> {
        if request.name.trim().is_empty() {
            return Err(ApiError::http(422, "API key name is required"));
        }

        let id = self.next_id("key");
        let key = format!("dm_live_{}", id.replace('-', ""));
        self.api_keys.borrow_mut().push(ApiKey {
            id,
            name: request.name.clone(),
            prefix: key.chars().take(8).collect(),
            rate_limit: request.rate_limit,
            is_active: true,
            last_used_at: None,
        });

        Ok(CreatedApiKey {
            key,
            name: request.name,
        })
    }

    async fn list_api_keys(&self) -> ApiResult<Vec<ApiKey>> {
        Ok(self.api_keys.borrow().clone())
    }

    async fn toggle_api_key(&self, id: &str) -> ApiResult<ApiKeyToggle> {
        let mut keys = self.api_keys.borrow_mut();
        let key = keys
            .iter_mut()
            .find(|k| k.id == id)
            .ok_or_else(|| ApiError::not_found("API key", id))?;
        key.is_active = !key.is_active;
        Ok(ApiKeyToggle {
            is_active: key.is_active,
        })
    }

    async fn delete_api_key(&self, id: &str) -> ApiResult<()> {
        let mut keys = self.api_keys.borrow_mut();
        let before = keys.len();
        keys.retain(|k| k.id != id);
        if keys.len() == before {
            return Err(ApiError::not_found("API key", id));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl MigrationsApi for InMemoryApi {
    async fn create_migration(&self, request: CreateMigrationRequest) -> ApiResult<Migration> {
        self.create_migration_calls
            .set(self.create_migration_calls.get() + 1);

        if let Some(error) = self.fail_next_create_migration.borrow_mut().take() {
            return Err(error);
        }

        let migration = Migration {
            id: self.next_id("mig"),
            name: request.name,
            description: request.description,
            status: MigrationStatus::Pending,
            table_count: request.tables.len() as u32,
            progress: Some(0.0),
            quality_score: None,
            created_at: None,
        };
        console_info!(
            "[Api] In-memory backend created migration {} with {} tables",
            migration.id,
            migration.table_count
        );
        self.migrations.borrow_mut().push(migration.clone());
        Ok(migration)
    }

    async fn list_migrations(&self) -> ApiResult<Vec<Migration>> {
        Ok(self.migrations.borrow().clone())
    }

    async fn delete_migration(&self, id: &str) -> ApiResult<()> {
        let mut migrations = self.migrations.borrow_mut();
        let before = migrations.len();
        migrations.retain(|m| m.id != id);
        if migrations.len() == before {
            return Err(ApiError::not_found("Migration", id));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl AccountApi for InMemoryApi {
    async fn login(&self, credentials: LoginCredentials) -> ApiResult<AuthSession> {
        let users = self.users.borrow();
        let (_, user) = users
            .iter()
            .find(|(profile, _)| {
                profile.email.eq_ignore_ascii_case(&credentials.email)
                    && profile.password == credentials.password
            })
            .ok_or_else(|| ApiError::http(401, "Invalid email or password"))?;

        Ok(AuthSession {
            token: format!("token-{}", user.id),
            user: user.clone(),
        })
    }

    async fn register(&self, profile: RegisterProfile) -> ApiResult<AuthSession> {
        if self
            .users
            .borrow()
            .iter()
            .any(|(existing, _)| existing.email.eq_ignore_ascii_case(&profile.email))
        {
            return Err(ApiError::http(409, "An account with this email already exists"));
        }

        let user = User {
            id: self.next_id("user"),
            name: profile.name.clone(),
            email: profile.email.clone(),
        };
        self.users.borrow_mut().push((profile, user.clone()));

        Ok(AuthSession {
            token: format!("token-{}", user.id),
            user,
        })
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> ApiResult<()> {
        if new_password.chars().count() < 8 {
            return Err(ApiError::http(
                422,
                "Password must be at least 8 characters",
            ));
        }
        let mut tokens = self.reset_tokens.borrow_mut();
        let before = tokens.len();
        tokens.retain(|t| t != token);
        if tokens.len() == before {
            return Err(ApiError::http(400, "Reset link is invalid or has expired"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_api_key_lifecycle() {
        let api = InMemoryApi::new();
        let created = api
            .create_api_key(CreateApiKeyRequest {
                name: "ci".to_string(),
                rate_limit: 100,
            })
            .await
            .unwrap();
        assert_eq!(created.name, "ci");

        let keys = api.list_api_keys().await.unwrap();
        assert_eq!(keys.len(), 1);
        assert!(created.key.starts_with(&keys[0].prefix));

        let toggled = api.toggle_api_key(&keys[0].id).await.unwrap();
        assert!(!toggled.is_active);

        api.delete_api_key(&keys[0].id).await.unwrap();
        assert!(api.list_api_keys().await.unwrap().is_empty());
        assert!(matches!(
            api.delete_api_key(&keys[0].id).await,
            Err(ApiError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_connection_probe_respects_unreachable_hosts() {
        let api = InMemoryApi::new().with_unreachable_host("10.0.0.9");
        let saved = api
            .create_connection(ConnectionConfig {
                host: "10.0.0.9".to_string(),
                database: "erp".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let result = api.test_connection(&saved.id).await.unwrap();
        assert!(!result.success);
        assert_eq!(api.connection_test_calls(), 1);

        api.delete_connection(&saved.id).await.unwrap();
        assert!(api.list_connections().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let api = InMemoryApi::new();
        let profile = RegisterProfile {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            password: "correct horse".to_string(),
            company: None,
        };
        let registered = api.register(profile.clone()).await.unwrap();
        assert!(api.register(profile).await.is_err());

        let session = api
            .login(LoginCredentials {
                email: "SAM@example.com".to_string(),
                password: "correct horse".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(session.user, registered.user);

        let denied = api
            .login(LoginCredentials {
                email: "sam@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;
        assert!(denied.is_err());
    }

    #[tokio::test]
    async fn test_reset_password_consumes_token() {
        let api = InMemoryApi::new().with_reset_token("abc");
        assert!(api.reset_password("abc", "short").await.is_err());
        api.reset_password("abc", "long enough").await.unwrap();
        assert!(api.reset_password("abc", "long enough").await.is_err());
    }
}
