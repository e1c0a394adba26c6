//! Dashboard aggregation.
//!
//! One run issues the five source fetches concurrently, waits for all of
//! them, resolves summary titles against the fetched curriculums and then
//! assembles the stats. A run either completes with best-effort data or is
//! rejected up front because no user is signed in.

use crate::api::DashboardApi;
use crate::dashboard::fetchers::{
    fetch_curriculums, fetch_feedback, fetch_follow_stats, fetch_profile, fetch_summaries,
};
use crate::dashboard::titles::TitleResolver;
use crate::dashboard::{DashboardError, DashboardSettings};
use crate::models::{average_score, Dashboard, DashboardStats, Source, SourceReport};
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Loads the dashboard from a [`DashboardApi`].
pub struct Aggregator {
    api: Arc<dyn DashboardApi>,
    settings: DashboardSettings,
}

impl Aggregator {
    pub fn new(api: Arc<dyn DashboardApi>, settings: DashboardSettings) -> Self {
        Self { api, settings }
    }

    /// Load the dashboard for the signed-in user.
    ///
    /// Returns [`DashboardError::AuthenticationRequired`] without issuing
    /// any request when `current_user_id` is missing or blank. Otherwise
    /// always completes: failed sources contribute their defaults.
    pub async fn load_dashboard(
        &self,
        current_user_id: Option<&str>,
    ) -> Result<Dashboard, DashboardError> {
        let user_id = match current_user_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => {
                info!("no signed-in user, dashboard requires authentication");
                return Err(DashboardError::AuthenticationRequired);
            }
        };

        info!("Loading dashboard for user {}", user_id);
        let api = self.api.as_ref();
        let settings = &self.settings;

        let (profile, curriculums, summaries, feedback, follow) = tokio::join!(
            fetch_profile(api, settings),
            fetch_curriculums(api, settings),
            fetch_summaries(api, settings),
            fetch_feedback(api, settings),
            fetch_follow_stats(api, settings, user_id),
        );

        let mut sources = SourceReport::default();
        sources.record(Source::Profile, profile.outcome);
        sources.record(Source::Curriculums, curriculums.outcome);
        sources.record(Source::Summaries, summaries.outcome);
        sources.record(Source::Feedback, feedback.outcome);
        sources.record(Source::FollowStats, follow.outcome);

        let curriculums = curriculums.value;
        let summaries = summaries.value;

        let resolver = TitleResolver::new(api, &curriculums.items, settings.call_timeout);
        let recent_summaries = join_all(
            summaries
                .items
                .into_iter()
                .map(|summary| resolver.enrich(summary)),
        )
        .await;
        debug!("Resolved titles for {} summaries", recent_summaries.len());

        let feedback = feedback.value;
        let stats = DashboardStats {
            curriculum_count: curriculums.total_count,
            summary_count: summaries.total_count,
            feedback_count: feedback.len() as u64,
            avg_score: average_score(&feedback),
            followers_count: follow.value.followers_count,
            following_count: follow.value.following_count,
            recent_curriculums: curriculums.items,
            recent_summaries,
        };

        info!(
            "Dashboard loaded: {} curriculums, {} summaries, {} feedback, {} sources defaulted",
            stats.curriculum_count,
            stats.summary_count,
            stats.feedback_count,
            sources.defaulted().len()
        );

        Ok(Dashboard {
            profile: profile.value,
            stats,
            sources,
            loaded_at: Utc::now(),
        })
    }

    /// Like [`Aggregator::load_dashboard`], abandoning the run when `cancel`
    /// fires. In-flight requests are dropped and nothing partial is returned.
    pub async fn load_dashboard_cancellable(
        &self,
        current_user_id: Option<&str>,
        cancel: CancellationToken,
    ) -> Result<Dashboard, DashboardError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("dashboard load cancelled");
                Err(DashboardError::Cancelled)
            }
            result = self.load_dashboard(current_user_id) => result,
        }
    }
}
