//! Dashboard rendering.
//!
//! This module renders a loaded [`Dashboard`] as Markdown or JSON.

use crate::models::{
    CurriculumSummaryItem, Dashboard, DashboardStats, Source, SourceOutcome, SourceReport,
    SummaryItem,
};
use anyhow::Result;

/// Generate the Markdown dashboard.
pub fn generate_markdown_report(dashboard: &Dashboard) -> String {
    let mut output = String::new();

    // Greeting
    output.push_str(&format!("# Welcome back, {}\n\n", dashboard.profile.name));
    if !dashboard.profile.email.is_empty() {
        output.push_str(&format!("_{}_\n\n", dashboard.profile.email));
    }

    output.push_str(&generate_stats_section(&dashboard.stats));
    output.push_str(&generate_curriculums_section(
        &dashboard.stats.recent_curriculums,
    ));
    output.push_str(&generate_summaries_section(&dashboard.stats.recent_summaries));
    output.push_str(&generate_sources_section(&dashboard.sources));

    // Footer
    output.push_str("---\n\n");
    output.push_str(&format!(
        "*Loaded {}*\n",
        dashboard.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

/// Generate the statistics table.
fn generate_stats_section(stats: &DashboardStats) -> String {
    let mut section = String::new();

    section.push_str("## Statistics\n\n");
    section.push_str("| Curriculums | Summaries | Feedback | Avg Score | Followers | Following | Total Activity |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} | {} | {} | {} |\n\n",
        stats.curriculum_count,
        stats.summary_count,
        stats.feedback_count,
        format_score(stats.avg_score),
        stats.followers_count,
        stats.following_count,
        stats.total_activity()
    ));

    section
}

fn format_score(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{:.1}", score),
        None => "-".to_string(),
    }
}

fn generate_curriculums_section(curriculums: &[CurriculumSummaryItem]) -> String {
    let mut section = String::new();

    section.push_str("## Recent Curriculums\n\n");
    if curriculums.is_empty() {
        section.push_str("No curriculums yet.\n\n");
        return section;
    }

    for curriculum in curriculums {
        section.push_str(&format!(
            "- **{}** ({} weeks)\n",
            curriculum.title, curriculum.total_weeks
        ));
    }
    section.push('\n');

    section
}

fn generate_summaries_section(summaries: &[SummaryItem]) -> String {
    let mut section = String::new();

    section.push_str("## Recent Summaries\n\n");
    if summaries.is_empty() {
        section.push_str("No summaries yet.\n\n");
        return section;
    }

    for summary in summaries {
        section.push_str(&format!(
            "- **{}** (Week {})\n",
            summary.curriculum_title.as_deref().unwrap_or_default(),
            summary.week_number
        ));
    }
    section.push('\n');

    section
}

/// List sources that fell back to defaults. Empty when all loaded.
fn generate_sources_section(sources: &SourceReport) -> String {
    let names: Vec<String> = Source::ALL
        .iter()
        .filter(|s| sources.outcome(**s) == Some(SourceOutcome::Defaulted))
        .map(|s| s.to_string())
        .collect();
    if names.is_empty() {
        return String::new();
    }

    format!(
        "> Some data could not be loaded and is shown as empty: {}\n\n",
        names.join(", ")
    )
}

/// Generate the JSON dashboard.
pub fn generate_json_report(dashboard: &Dashboard) -> Result<String> {
    serde_json::to_string_pretty(dashboard).map_err(Into::into)
}
