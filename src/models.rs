//! Data models for the dashboard.
//!
//! This module contains the records returned by the platform API and the
//! view-model assembled from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name shown when the profile cannot be loaded.
pub const DEFAULT_PROFILE_NAME: &str = "user";

/// Profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Email address (empty when unknown).
    #[serde(default)]
    pub email: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.to_string(),
            email: String::new(),
        }
    }
}

/// Trimmed projection of a curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumSummaryItem {
    /// Curriculum identifier.
    pub id: String,
    /// Curriculum title.
    pub title: String,
    /// Planned length in weeks.
    #[serde(default)]
    pub total_weeks: u32,
    /// Creation timestamp as sent by the server.
    #[serde(default)]
    pub created_at: String,
}

/// A weekly learning summary written by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    /// Summary identifier.
    pub id: String,
    /// Curriculum this summary belongs to.
    #[serde(default)]
    pub curriculum_id: String,
    /// Title of the owning curriculum, if the server embedded it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curriculum_title: Option<String>,
    /// Week of the curriculum the summary covers (1-indexed).
    #[serde(default)]
    pub week_number: u32,
    /// Creation timestamp as sent by the server.
    #[serde(default)]
    pub created_at: String,
}

impl SummaryItem {
    /// Returns the embedded curriculum title when it carries text.
    pub fn embedded_title(&self) -> Option<&str> {
        self.curriculum_title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// AI-generated feedback on a summary. Only the score is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    #[serde(default, deserialize_with = "score_or_zero")]
    pub score: f64,
}

fn score_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let score: Option<f64> = Option::deserialize(deserializer)?;
    Ok(score.unwrap_or(0.0))
}

/// Follower counts for a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowStats {
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default, alias = "followees_count")]
    pub following_count: u64,
}

/// The dashboard data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Profile,
    Curriculums,
    Summaries,
    Feedback,
    FollowStats,
}

impl Source {
    /// All sources in the order they are reported.
    pub const ALL: [Source; 5] = [
        Source::Profile,
        Source::Curriculums,
        Source::Summaries,
        Source::Feedback,
        Source::FollowStats,
    ];
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Profile => write!(f, "profile"),
            Source::Curriculums => write!(f, "curriculums"),
            Source::Summaries => write!(f, "summaries"),
            Source::Feedback => write!(f, "feedback"),
            Source::FollowStats => write!(f, "follow stats"),
        }
    }
}

/// How a source resolved during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOutcome {
    /// The remote call succeeded.
    Loaded,
    /// The remote call failed or timed out; the default was used.
    Defaulted,
}

/// Per-source outcomes of one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    pub outcomes: Vec<(Source, SourceOutcome)>,
}

impl SourceReport {
    pub fn record(&mut self, source: Source, outcome: SourceOutcome) {
        self.outcomes.push((source, outcome));
    }

    /// Sources that fell back to their default.
    pub fn defaulted(&self) -> Vec<Source> {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == SourceOutcome::Defaulted)
            .map(|(s, _)| *s)
            .collect()
    }

    pub fn outcome(&self, source: Source) -> Option<SourceOutcome> {
        self.outcomes
            .iter()
            .find(|(s, _)| *s == source)
            .map(|(_, o)| *o)
    }
}

/// Aggregated statistics shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub curriculum_count: u64,
    pub summary_count: u64,
    pub feedback_count: u64,
    /// Mean feedback score, `None` when there is no feedback.
    pub avg_score: Option<f64>,
    pub followers_count: u64,
    pub following_count: u64,
    pub recent_curriculums: Vec<CurriculumSummaryItem>,
    /// Recent summaries, each with a resolved curriculum title.
    pub recent_summaries: Vec<SummaryItem>,
}

impl DashboardStats {
    /// Curriculums plus summaries.
    pub fn total_activity(&self) -> u64 {
        self.curriculum_count.saturating_add(self.summary_count)
    }
}

/// Mean of the feedback scores, or `None` for an empty list.
pub fn average_score(feedback: &[FeedbackItem]) -> Option<f64> {
    if feedback.is_empty() {
        return None;
    }
    let sum: f64 = feedback.iter().map(|f| f.score).sum();
    Some(sum / feedback.len() as f64)
}

/// The complete result of one dashboard load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub profile: UserProfile,
    pub stats: DashboardStats,
    pub sources: SourceReport,
    pub loaded_at: DateTime<Utc>,
}
