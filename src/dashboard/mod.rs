//! Dashboard aggregation and enrichment.
//!
//! Gathers the five dashboard sources concurrently, degrades each failing
//! source to its default, resolves curriculum titles for summaries and
//! assembles the final [`crate::models::Dashboard`].

pub mod aggregator;
pub mod fetchers;
pub mod normalizer;
pub mod titles;

pub use aggregator::Aggregator;

use std::time::Duration;
use thiserror::Error;

/// Most recent curriculums and summaries a dashboard ever shows.
pub const MAX_RECENT_ITEMS: usize = 3;

/// Tunables for one aggregation run.
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    /// Upper bound for every individual remote call.
    pub call_timeout: Duration,
    /// How many recent curriculums and summaries are kept, never more
    /// than [`MAX_RECENT_ITEMS`].
    pub recent_limit: usize,
    pub curriculum_page_size: u32,
    pub summary_page_size: u32,
    pub feedback_page_size: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(10),
            recent_limit: MAX_RECENT_ITEMS,
            curriculum_page_size: 5,
            summary_page_size: 5,
            feedback_page_size: 100,
        }
    }
}

impl DashboardSettings {
    /// Effective recent-list length.
    pub fn recent_items(&self) -> usize {
        self.recent_limit.min(MAX_RECENT_ITEMS)
    }
}

/// Reasons a dashboard load produces no dashboard at all.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardError {
    /// No signed-in user; the caller should prompt for authentication.
    #[error("authentication required")]
    AuthenticationRequired,

    /// The load was cancelled before it completed.
    #[error("dashboard load cancelled")]
    Cancelled,
}
