//! HTTP implementation of the platform API.

use crate::api::{ApiError, DashboardApi};
use crate::models::{CurriculumSummaryItem, FollowStats, UserProfile};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Connection settings for [`HttpApiClient`].
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    /// Bearer token sent with every request, if any.
    pub token: Option<String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_seconds: 10,
            token: None,
        }
    }
}

/// REST client for the curriculum platform.
pub struct HttpApiClient {
    config: ApiClientConfig,
    http_client: reqwest::Client,
}

impl HttpApiClient {
    /// Create a client for the given base URL.
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ApiError::Request(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Issue a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, u32)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let mut request = self.http_client.get(&url).query(query);
        if let Some(ref token) = self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.config.timeout_seconds)
            } else if e.is_connect() {
                ApiError::Connect(self.config.base_url.clone())
            } else {
                ApiError::Request(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_page(&self, path: &str, page: u32, page_size: u32) -> Result<Value, ApiError> {
        self.get_json(path, &[("page", page), ("items_per_page", page_size)])
            .await
    }
}

#[async_trait]
impl DashboardApi for HttpApiClient {
    async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        self.get_json("/users/me", &[]).await
    }

    async fn list_curriculums(&self, page: u32, page_size: u32) -> Result<Value, ApiError> {
        self.get_page("/curriculums", page, page_size).await
    }

    async fn get_curriculum_by_id(&self, id: &str) -> Result<CurriculumSummaryItem, ApiError> {
        self.get_json(&format!("/curriculums/{}", id), &[]).await
    }

    async fn list_summaries(&self, page: u32, page_size: u32) -> Result<Value, ApiError> {
        self.get_page("/summaries/me", page, page_size).await
    }

    async fn list_feedback(&self, page: u32, page_size: u32) -> Result<Value, ApiError> {
        self.get_page("/feedbacks/me", page, page_size).await
    }

    async fn get_follow_stats(&self, user_id: &str) -> Result<FollowStats, ApiError> {
        self.get_json(&format!("/users/{}/follow-stats", user_id), &[])
            .await
    }
}
