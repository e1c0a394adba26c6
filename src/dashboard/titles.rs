//! Curriculum title resolution for summaries.
//!
//! Tiers, first match wins:
//! 1. the title embedded in the summary
//! 2. the curriculums already fetched in this run
//! 3. a single remote lookup by curriculum id
//! 4. a "Week N study" placeholder

use crate::api::DashboardApi;
use crate::models::{CurriculumSummaryItem, SummaryItem};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Placeholder title for a summary whose curriculum cannot be resolved.
pub fn placeholder_title(week_number: u32) -> String {
    format!("Week {} study", week_number)
}

/// Resolves curriculum titles against a read-only cache and the API.
pub struct TitleResolver<'a> {
    api: &'a dyn DashboardApi,
    cache: HashMap<&'a str, &'a str>,
    timeout: Duration,
}

impl<'a> TitleResolver<'a> {
    pub fn new(
        api: &'a dyn DashboardApi,
        curriculums: &'a [CurriculumSummaryItem],
        timeout: Duration,
    ) -> Self {
        let cache = curriculums
            .iter()
            .filter(|c| !c.title.trim().is_empty())
            .map(|c| (c.id.as_str(), c.title.as_str()))
            .collect();

        Self {
            api,
            cache,
            timeout,
        }
    }

    /// Return a non-empty curriculum title for `summary`.
    pub async fn resolve(&self, summary: &SummaryItem) -> String {
        if let Some(title) = summary.embedded_title() {
            return title.to_string();
        }

        if let Some(title) = self.cache.get(summary.curriculum_id.as_str()) {
            return title.to_string();
        }

        if let Some(title) = self.lookup(&summary.curriculum_id).await {
            return title;
        }

        debug!(
            summary_id = %summary.id,
            curriculum_id = %summary.curriculum_id,
            "curriculum title lookup failed, using placeholder"
        );
        placeholder_title(summary.week_number)
    }

    /// Return `summary` with its curriculum title filled in.
    pub async fn enrich(&self, mut summary: SummaryItem) -> SummaryItem {
        let title = self.resolve(&summary).await;
        summary.curriculum_title = Some(title);
        summary
    }

    async fn lookup(&self, curriculum_id: &str) -> Option<String> {
        if curriculum_id.trim().is_empty() {
            return None;
        }

        match tokio::time::timeout(self.timeout, self.api.get_curriculum_by_id(curriculum_id))
            .await
        {
            Ok(Ok(curriculum)) if !curriculum.title.trim().is_empty() => Some(curriculum.title),
            Ok(Ok(_)) => None,
            Ok(Err(e)) => {
                debug!(curriculum_id, "curriculum lookup failed: {}", e);
                None
            }
            Err(_) => {
                debug!(curriculum_id, "curriculum lookup timed out");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{curriculum, FakeApi, Reply};

    fn summary(curriculum_id: &str, title: Option<&str>, week_number: u32) -> SummaryItem {
        SummaryItem {
            id: format!("s-{}-{}", curriculum_id, week_number),
            curriculum_id: curriculum_id.to_string(),
            curriculum_title: title.map(String::from),
            week_number,
            created_at: "2024-05-02".to_string(),
        }
    }

    fn cache() -> Vec<CurriculumSummaryItem> {
        vec![curriculum("c1", "Cached One"), curriculum("c2", "Cached Two")]
    }

    #[tokio::test]
    async fn test_embedded_title_wins_over_cache() {
        let api = FakeApi::healthy();
        let curriculums = cache();
        let resolver = TitleResolver::new(&api, &curriculums, Duration::from_secs(1));

        let title = resolver.resolve(&summary("c1", Some("X"), 1)).await;

        assert_eq!(title, "X");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cache_hit_skips_remote_lookup() {
        let api = FakeApi::healthy();
        let curriculums = cache();
        let resolver = TitleResolver::new(&api, &curriculums, Duration::from_secs(1));

        let title = resolver.resolve(&summary("c2", None, 2)).await;

        assert_eq!(title, "Cached Two");
        assert!(api.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_blank_embedded_title_falls_through() {
        let api = FakeApi::healthy();
        let curriculums = cache();
        let resolver = TitleResolver::new(&api, &curriculums, Duration::from_secs(1));

        let title = resolver.resolve(&summary("c1", Some("  "), 1)).await;

        assert_eq!(title, "Cached One");
    }

    #[tokio::test]
    async fn test_remote_lookup_on_cache_miss() {
        let api = FakeApi::healthy();
        let curriculums = cache();
        let resolver = TitleResolver::new(&api, &curriculums, Duration::from_secs(1));

        let title = resolver.resolve(&summary("c9", None, 3)).await;

        assert_eq!(title, "Remote Course");
        assert_eq!(api.lookups(), vec!["c9".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_lookup_uses_placeholder() {
        let api = FakeApi::healthy();
        let resolver = TitleResolver::new(&api, &[], Duration::from_secs(1));

        let title = resolver.resolve(&summary("missing", None, 4)).await;

        assert_eq!(title, "Week 4 study");
        assert_eq!(api.lookups(), vec!["missing".to_string()]);
    }

    #[tokio::test]
    async fn test_blank_remote_title_uses_placeholder() {
        let mut api = FakeApi::healthy();
        api.by_id
            .insert("c7".to_string(), Reply::Ok(curriculum("c7", "")));
        let resolver = TitleResolver::new(&api, &[], Duration::from_secs(1));

        let title = resolver.resolve(&summary("c7", None, 2)).await;

        assert_eq!(title, "Week 2 study");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_lookup_times_out_to_placeholder() {
        let mut api = FakeApi::healthy();
        api.by_id.insert("slow".to_string(), Reply::Stall);
        let resolver = TitleResolver::new(&api, &[], Duration::from_secs(5));

        let title = resolver.resolve(&summary("slow", None, 6)).await;

        assert_eq!(title, "Week 6 study");
    }

    #[tokio::test]
    async fn test_empty_curriculum_id_skips_lookup() {
        let api = FakeApi::healthy();
        let resolver = TitleResolver::new(&api, &[], Duration::from_secs(1));

        let title = resolver.resolve(&summary("", None, 1)).await;

        assert_eq!(title, "Week 1 study");
        assert!(api.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_enrich_sets_title() {
        let api = FakeApi::healthy();
        let curriculums = cache();
        let resolver = TitleResolver::new(&api, &curriculums, Duration::from_secs(1));

        let enriched = resolver.enrich(summary("c1", None, 1)).await;

        assert_eq!(enriched.curriculum_title.as_deref(), Some("Cached One"));
    }
}
