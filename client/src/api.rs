//! Typed HTTP client for the user endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use user_directory_common::{
    ApiResponse, ListUsersParams, NewUser, PaginatedResponse, Pagination, User, UserPatch,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Operations the hooks need from the backend.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn list_users(&self, params: &ListUsersParams) -> Result<PaginatedResponse<User>>;

    async fn get_user(&self, id: i64) -> Result<User>;

    async fn create_user(&self, new_user: &NewUser) -> Result<User>;

    async fn update_user(&self, id: i64, patch: &UserPatch) -> Result<User>;

    async fn delete_user(&self, id: i64) -> Result<User>;
}

/// Client for the `/api/users` endpoints.
#[derive(Debug, Clone)]
pub struct UsersClient {
    http_client: Client,
    base_url: String,
}

impl UsersClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http_client: Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(http_client, &config.base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}/api/users", self.base_url)
    }

    fn user_url(&self, id: i64) -> String {
        format!("{}/api/users/{}", self.base_url, id)
    }

    /// Send a request and decode the body, turning error envelopes and
    /// non-success statuses into `ClientError::Api`.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            tracing::debug!(status = %status.as_u16(), "API request failed: {}", message);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Unwrap the `data` of a single-record envelope.
    async fn send_record(&self, request: RequestBuilder, fallback: &str) -> Result<User> {
        let envelope: ApiResponse<User> = self.send(request).await?;
        if !envelope.success {
            return Err(ClientError::Api {
                status: 200,
                message: envelope.error.unwrap_or_else(|| fallback.to_string()),
            });
        }
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("missing data".to_string()))
    }
}

/// List body as received. A failed list carries `error` instead of a page.
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<Vec<User>>,
    #[serde(default)]
    pagination: Option<Pagination>,
    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
impl UserApi for UsersClient {
    async fn list_users(&self, params: &ListUsersParams) -> Result<PaginatedResponse<User>> {
        let request = self.http_client.get(self.users_url()).query(&params.to_query());
        let envelope: ListEnvelope = self.send(request).await?;
        if !envelope.success {
            return Err(ClientError::Api {
                status: 200,
                message: envelope
                    .error
                    .unwrap_or_else(|| "Failed to load users".to_string()),
            });
        }
        match (envelope.data, envelope.pagination) {
            (Some(data), Some(pagination)) => Ok(PaginatedResponse::new(data, pagination)),
            _ => Err(ClientError::InvalidResponse(
                "missing data or pagination".to_string(),
            )),
        }
    }

    async fn get_user(&self, id: i64) -> Result<User> {
        let request = self.http_client.get(self.user_url(id));
        self.send_record(request, "Failed to load user").await
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<User> {
        let request = self.http_client.post(self.users_url()).json(new_user);
        self.send_record(request, "Failed to create user").await
    }

    async fn update_user(&self, id: i64, patch: &UserPatch) -> Result<User> {
        let request = self.http_client.put(self.user_url(id)).json(patch);
        self.send_record(request, "Failed to update user").await
    }

    async fn delete_user(&self, id: i64) -> Result<User> {
        let request = self.http_client.delete(self.user_url(id));
        self.send_record(request, "Failed to delete user").await
    }
}
