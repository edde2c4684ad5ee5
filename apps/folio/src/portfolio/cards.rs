use serde::{Deserialize, Serialize};

use super::dates::format_date_range;
use super::status::ProjectStatus;

/// The subset of a personal project entry the card header needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub title: String,
    /// Missing status means the project predates status tracking.
    #[serde(default)]
    pub status: ProjectStatus,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCardView {
    pub id: String,
    pub title: String,
    pub status: ProjectStatus,
    pub status_label: &'static str,
    /// `aria-label` for the badge.
    pub status_aria_label: String,
    pub date_range: String,
}

pub fn project_card(project: &ProjectSummary) -> ProjectCardView {
    let label = project.status.label();
    ProjectCardView {
        id: project.id.clone(),
        title: project.title.clone(),
        status: project.status,
        status_label: label,
        status_aria_label: format!("Project status: {label}"),
        date_range: format_date_range(&project.start_date, project.end_date.as_deref()),
    }
}
