//! In-memory [`DashboardApi`] for tests.

use crate::api::{ApiError, DashboardApi};
use crate::models::{CurriculumSummaryItem, FollowStats, UserProfile};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// How a faked endpoint answers.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Fail,
    /// Never answers.
    Stall,
}

impl<T: Clone> Reply<T> {
    async fn answer(&self, endpoint: &str) -> Result<T, ApiError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Fail => Err(ApiError::Status {
                status: 503,
                body: format!("{} unavailable", endpoint),
            }),
            Reply::Stall => std::future::pending().await,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Profile,
    Curriculums { page: u32, page_size: u32 },
    CurriculumById(String),
    Summaries { page: u32, page_size: u32 },
    Feedback { page: u32, page_size: u32 },
    FollowStats(String),
}

pub struct FakeApi {
    pub profile: Reply<UserProfile>,
    pub curriculums: Reply<Value>,
    pub summaries: Reply<Value>,
    pub feedback: Reply<Value>,
    pub follow_stats: Reply<FollowStats>,
    /// Curriculums reachable by id; unknown ids answer 404.
    pub by_id: HashMap<String, Reply<CurriculumSummaryItem>>,
    calls: Mutex<Vec<Call>>,
}

pub fn curriculum(id: &str, title: &str) -> CurriculumSummaryItem {
    CurriculumSummaryItem {
        id: id.to_string(),
        title: title.to_string(),
        total_weeks: 8,
        created_at: "2024-05-01T09:00:00".to_string(),
    }
}

impl FakeApi {
    /// Every source answers with realistic data.
    ///
    /// Summaries: `s1` embeds its title, `s2` belongs to cached curriculum
    /// `c2`, `s3` belongs to `c9` which only the by-id lookup knows.
    pub fn healthy() -> Self {
        let curriculums: Vec<CurriculumSummaryItem> = (1..=5)
            .map(|n| curriculum(&format!("c{}", n), &format!("Course {}", n)))
            .collect();

        let summaries = json!({
            "total_count": 9,
            "summaries": [
                {"id": "s1", "curriculum_id": "c1", "curriculum_title": "Embedded Title", "week_number": 1, "created_at": "2024-05-02"},
                {"id": "s2", "curriculum_id": "c2", "week_number": 2, "created_at": "2024-05-03"},
                {"id": "s3", "curriculum_id": "c9", "curriculum_title": "", "week_number": 3, "created_at": "2024-05-04"},
                {"id": "s4", "curriculum_id": "c3", "week_number": 4, "created_at": "2024-05-05"},
                {"id": "s5", "curriculum_id": "c4", "week_number": 5, "created_at": "2024-05-06"}
            ]
        });

        let mut by_id = HashMap::new();
        by_id.insert("c9".to_string(), Reply::Ok(curriculum("c9", "Remote Course")));

        Self {
            profile: Reply::Ok(UserProfile {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            }),
            curriculums: Reply::Ok(json!({"total_count": 7, "curriculums": curriculums})),
            summaries: Reply::Ok(summaries),
            feedback: Reply::Ok(json!([{"score": 6}, {"score": 8}, {"score": 10}])),
            follow_stats: Reply::Ok(FollowStats {
                followers_count: 12,
                following_count: 4,
            }),
            by_id,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CurriculumById(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    fn log(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        self.log(Call::Profile);
        self.profile.answer("profile").await
    }

    async fn list_curriculums(&self, page: u32, page_size: u32) -> Result<Value, ApiError> {
        self.log(Call::Curriculums { page, page_size });
        self.curriculums.answer("curriculums").await
    }

    async fn get_curriculum_by_id(&self, id: &str) -> Result<CurriculumSummaryItem, ApiError> {
        self.log(Call::CurriculumById(id.to_string()));
        match self.by_id.get(id) {
            Some(reply) => reply.answer("curriculum").await,
            None => Err(ApiError::Status {
                status: 404,
                body: format!("curriculum {} not found", id),
            }),
        }
    }

    async fn list_summaries(&self, page: u32, page_size: u32) -> Result<Value, ApiError> {
        self.log(Call::Summaries { page, page_size });
        self.summaries.answer("summaries").await
    }

    async fn list_feedback(&self, page: u32, page_size: u32) -> Result<Value, ApiError> {
        self.log(Call::Feedback { page, page_size });
        self.feedback.answer("feedback").await
    }

    async fn get_follow_stats(&self, user_id: &str) -> Result<FollowStats, ApiError> {
        self.log(Call::FollowStats(user_id.to_string()));
        self.follow_stats.answer("follow stats").await
    }
}
