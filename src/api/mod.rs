//! Platform API access.
//!
//! The aggregation engine talks to the remote platform only through the
//! [`DashboardApi`] trait; [`HttpApiClient`] is the `reqwest` implementation.

pub mod client;
pub mod error;
#[cfg(test)]
pub mod fake;

pub use client::{ApiClientConfig, HttpApiClient};
pub use error::ApiError;

use crate::models::{CurriculumSummaryItem, FollowStats, UserProfile};
use async_trait::async_trait;
use serde_json::Value;

/// Remote operations consumed by the dashboard.
///
/// List operations hand back raw JSON: the server may wrap items in an
/// envelope or send a bare array, and that is resolved by the normalizer.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn get_profile(&self) -> Result<UserProfile, ApiError>;

    async fn list_curriculums(&self, page: u32, page_size: u32) -> Result<Value, ApiError>;

    async fn get_curriculum_by_id(&self, id: &str) -> Result<CurriculumSummaryItem, ApiError>;

    async fn list_summaries(&self, page: u32, page_size: u32) -> Result<Value, ApiError>;

    async fn list_feedback(&self, page: u32, page_size: u32) -> Result<Value, ApiError>;

    async fn get_follow_stats(&self, user_id: &str) -> Result<FollowStats, ApiError>;
}
