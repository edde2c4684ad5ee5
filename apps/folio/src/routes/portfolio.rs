//! Axum route handlers for project card display data.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::portfolio::{project_card, ProjectCardView, ProjectSummary};

/// Upper bound on projects per request.
pub const MAX_PROJECTS: usize = 500;

#[derive(Debug, Deserialize)]
pub struct ProjectCardsRequest {
    pub projects: Vec<ProjectSummary>,
}

#[derive(Debug, Serialize)]
pub struct ProjectCardsResponse {
    pub cards: Vec<ProjectCardView>,
}

/// POST /api/v1/portfolio/cards
///
/// Normalizes status badges and date lines for a batch of project entries,
/// preserving input order.
pub async fn handle_project_cards(
    Json(payload): Json<ProjectCardsRequest>,
) -> Result<Json<ProjectCardsResponse>, AppError> {
    if payload.projects.len() > MAX_PROJECTS {
        return Err(AppError::Validation(format!(
            "at most {MAX_PROJECTS} projects per request, got {}",
            payload.projects.len()
        )));
    }
    if let Some(project) = payload.projects.iter().find(|p| p.start_date.trim().is_empty()) {
        return Err(AppError::Validation(format!(
            "project '{}' has no start date",
            project.id
        )));
    }

    let cards = payload.projects.iter().map(project_card).collect();
    Ok(Json(ProjectCardsResponse { cards }))
}
