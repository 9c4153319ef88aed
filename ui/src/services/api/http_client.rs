use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use tracing::{error, info, instrument};

use super::types::*;
use super::{AccountApi, ApiKeysApi, ConnectionApi, MigrationsApi};
use crate::services::config::ApiConfig;
use crate::services::errors::{ApiError, ApiResult};

/// REST/JSON client for the migration backend
pub struct HttpApiClient {
    http_client: Client,
    config: ApiConfig,
    token: RefCell<Option<String>>,
}

impl HttpApiClient {
    pub fn new(config: ApiConfig) -> Self {
        let http_client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .unwrap_or_else(|e| {
                error!("Failed to build configured HTTP client, using defaults: {}", e);
                Client::new()
            });

        Self {
            http_client,
            config,
            token: RefCell::new(None),
        }
    }

    /// Attach a previously stored session token
    pub fn with_token(self, token: Option<String>) -> Self {
        *self.token.borrow_mut() = token;
        self
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http_client
            .request(method, self.config.endpoint(path))
            .header("Accept", "application/json");

        match self.token.borrow().as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, path: &str, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await.map_err(|e| {
            error!("Request failed before a response arrived: {}", e);
            ApiError::network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let failure = failure_from_response(path, status.as_u16(), &body);
        error!("{} failed: {}", path, failure);
        Err(failure)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(path, self.request(Method::GET, path)).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .send(path, self.request(method, path).json(body))
            .await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(&self, method: Method, path: &str) -> ApiResult<()> {
        self.send(path, self.request(method, path)).await?;
        Ok(())
    }
}

/// Sign-in routes answer 401 for rejected credentials, not for an expired session
fn is_credentials_route(path: &str) -> bool {
    path.starts_with("/auth/")
}

fn failure_from_response(path: &str, status: u16, body: &str) -> ApiError {
    if status == 401 && !is_credentials_route(path) {
        return ApiError::Unauthorized;
    }
    ApiError::http(status, error_message_from_body(body))
}

/// Pull a human-readable message out of an error body.
/// Backends answer with `{"message": ...}` or `{"error": ...}`; anything else is used verbatim.
fn error_message_from_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value["message"]
            .as_str()
            .or_else(|| value["error"].as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| body.trim().to_string()),
        Err(_) => body.trim().to_string(),
    }
}

#[async_trait(?Send)]
impl ConnectionApi for HttpApiClient {
    #[instrument(skip(self, config), fields(target = %config.display_target()), err)]
    async fn create_connection(&self, config: ConnectionConfig) -> ApiResult<Connection> {
        self.send_json(Method::POST, "/connections", &config).await
    }

    #[instrument(skip(self), err)]
    async fn test_connection(&self, id: &str) -> ApiResult<ConnectionTestResult> {
        self.send_json(
            Method::POST,
            &format!("/connections/{}/test", id),
            &serde_json::json!({}),
        )
        .await
    }

    #[instrument(skip(self, config), fields(target = %config.display_target()), err)]
    async fn test_connection_config(
        &self,
        config: &ConnectionConfig,
    ) -> ApiResult<ConnectionTestResult> {
        let result: ConnectionTestResult = self
            .send_json(Method::POST, "/connections/test", config)
            .await?;
        info!("Connection probe finished: success={}", result.success);
        Ok(result)
    }

    #[instrument(skip(self), err)]
    async fn delete_connection(&self, id: &str) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &format!("/connections/{}", id))
            .await
    }

    #[instrument(skip(self), err)]
    async fn list_connections(&self) -> ApiResult<Vec<Connection>> {
        self.get_json("/connections").await
    }

    #[instrument(skip(self, config), fields(target = %config.display_target()), err)]
    async fn list_tables(&self, config: &ConnectionConfig) -> ApiResult<Vec<TableInfo>> {
        let tables: Vec<TableInfo> = self
            .send_json(Method::POST, "/connections/tables", config)
            .await?;
        info!("Source reported {} tables", tables.len());
        Ok(tables)
    }
}

#[async_trait(?Send)]
impl ApiKeysApi for HttpApiClient {
    #[instrument(skip(self), err)]
    async fn create_api_key(&self, request: CreateApiKeyRequest) -> ApiResult<CreatedApiKey> {
        self.send_json(Method::POST, "/api-keys", &request).await
    }

    #[instrument(skip(self), err)]
    async fn list_api_keys(&self) -> ApiResult<Vec<ApiKey>> {
        self.get_json("/api-keys").await
    }

    #[instrument(skip(self), err)]
    async fn toggle_api_key(&self, id: &str) -> ApiResult<ApiKeyToggle> {
        self.send_json(
            Method::PATCH,
            &format!("/api-keys/{}/toggle", id),
            &serde_json::json!({}),
        )
        .await
    }

    #[instrument(skip(self), err)]
    async fn delete_api_key(&self, id: &str) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &format!("/api-keys/{}", id))
            .await
    }
}

#[async_trait(?Send)]
impl MigrationsApi for HttpApiClient {
    #[instrument(skip(self, request), fields(name = %request.name, tables = request.tables.len()), err)]
    async fn create_migration(&self, request: CreateMigrationRequest) -> ApiResult<Migration> {
        let migration: Migration = self
            .send_json(Method::POST, "/migrations", &request)
            .await?;
        info!("Created migration {}", migration.id);
        Ok(migration)
    }

    #[instrument(skip(self), err)]
    async fn list_migrations(&self) -> ApiResult<Vec<Migration>> {
        self.get_json("/migrations").await
    }

    #[instrument(skip(self), err)]
    async fn delete_migration(&self, id: &str) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &format!("/migrations/{}", id))
            .await
    }
}

#[async_trait(?Send)]
impl AccountApi for HttpApiClient {
    #[instrument(skip(self, credentials), fields(email = %credentials.email), err)]
    async fn login(&self, credentials: LoginCredentials) -> ApiResult<AuthSession> {
        let session: AuthSession = self
            .send_json(Method::POST, "/auth/login", &credentials)
            .await?;
        self.set_token(Some(session.token.clone()));
        Ok(session)
    }

    #[instrument(skip(self, profile), fields(email = %profile.email), err)]
    async fn register(&self, profile: RegisterProfile) -> ApiResult<AuthSession> {
        let session: AuthSession = self
            .send_json(Method::POST, "/auth/register", &profile)
            .await?;
        self.set_token(Some(session.token.clone()));
        Ok(session)
    }

    #[instrument(skip(self, token, new_password), err)]
    async fn reset_password(&self, token: &str, new_password: &str) -> ApiResult<()> {
        let request = ResetPasswordRequest {
            token: token.to_string(),
            new_password: new_password.to_string(),
        };
        let path = "/auth/reset-password";
        self.send(path, self.request(Method::POST, path).json(&request))
            .await?;
        Ok(())
    }

    fn sign_out(&self) {
        info!("Clearing session token");
        self.set_token(None);
    }
}
