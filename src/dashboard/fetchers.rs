//! Per-source fetchers.
//!
//! Each fetcher wraps exactly one remote call. A failure or timeout is
//! logged and replaced by the source's default; it never reaches the caller.

use crate::api::{ApiError, DashboardApi};
use crate::dashboard::normalizer::{normalize, Page};
use crate::dashboard::DashboardSettings;
use crate::models::{
    CurriculumSummaryItem, FeedbackItem, FollowStats, Source, SourceOutcome, SummaryItem,
    UserProfile,
};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// A source value together with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub value: T,
    pub outcome: SourceOutcome,
}

impl<T> Fetched<T> {
    fn loaded(value: T) -> Self {
        Self {
            value,
            outcome: SourceOutcome::Loaded,
        }
    }

    fn defaulted(value: T) -> Self {
        Self {
            value,
            outcome: SourceOutcome::Defaulted,
        }
    }
}

/// Run `call` under `timeout`, falling back to `default` on any failure.
pub async fn fetch_with_default<T, F>(
    source: Source,
    timeout: Duration,
    call: F,
    default: T,
) -> Fetched<T>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => {
            debug!(%source, "source loaded");
            Fetched::loaded(value)
        }
        Ok(Err(e)) => {
            warn!(%source, "source unavailable, using default: {}", e);
            Fetched::defaulted(default)
        }
        Err(_) => {
            warn!(
                %source,
                "source timed out after {}ms, using default",
                timeout.as_millis()
            );
            Fetched::defaulted(default)
        }
    }
}

pub async fn fetch_profile(
    api: &dyn DashboardApi,
    settings: &DashboardSettings,
) -> Fetched<UserProfile> {
    fetch_with_default(
        Source::Profile,
        settings.call_timeout,
        api.get_profile(),
        UserProfile::default(),
    )
    .await
}

/// First page of curriculums, trimmed to the recent limit.
pub async fn fetch_curriculums(
    api: &dyn DashboardApi,
    settings: &DashboardSettings,
) -> Fetched<Page<CurriculumSummaryItem>> {
    let call = async {
        let raw = api
            .list_curriculums(1, settings.curriculum_page_size)
            .await?;
        let page: Page<CurriculumSummaryItem> = normalize(Some(&raw), "curriculums");
        Ok::<_, ApiError>(page.truncated(settings.recent_items()))
    };
    fetch_with_default(Source::Curriculums, settings.call_timeout, call, Page::empty()).await
}

/// First page of summaries, trimmed to the recent limit. Titles are not
/// resolved here.
pub async fn fetch_summaries(
    api: &dyn DashboardApi,
    settings: &DashboardSettings,
) -> Fetched<Page<SummaryItem>> {
    let call = async {
        let raw = api.list_summaries(1, settings.summary_page_size).await?;
        let page: Page<SummaryItem> = normalize(Some(&raw), "summaries");
        Ok::<_, ApiError>(page.truncated(settings.recent_items()))
    };
    fetch_with_default(Source::Summaries, settings.call_timeout, call, Page::empty()).await
}

/// All feedback on the first page; only count and scores are used.
pub async fn fetch_feedback(
    api: &dyn DashboardApi,
    settings: &DashboardSettings,
) -> Fetched<Vec<FeedbackItem>> {
    let call = async {
        let raw = api.list_feedback(1, settings.feedback_page_size).await?;
        let page: Page<FeedbackItem> = normalize(Some(&raw), "feedbacks");
        Ok::<_, ApiError>(page.items)
    };
    fetch_with_default(Source::Feedback, settings.call_timeout, call, Vec::new()).await
}

pub async fn fetch_follow_stats(
    api: &dyn DashboardApi,
    settings: &DashboardSettings,
    user_id: &str,
) -> Fetched<FollowStats> {
    fetch_with_default(
        Source::FollowStats,
        settings.call_timeout,
        api.get_follow_stats(user_id),
        FollowStats::default(),
    )
    .await
}
