//! Axum route handlers for the navigation API.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::nav::{
    run_simulation, NavConfig, NavLink, SimulationReport, SimulationRequest, MOBILE_MENU_ID,
};
use crate::state::AppState;

/// Everything the hydrating client needs to wire up the header.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavManifestResponse {
    pub links: Vec<NavLink>,
    #[serde(flatten)]
    pub config: NavConfig,
    pub mobile_menu_id: &'static str,
    pub resume_url: String,
}

/// GET /api/v1/nav
pub async fn handle_get_nav(State(state): State<AppState>) -> Json<NavManifestResponse> {
    Json(NavManifestResponse {
        links: state.links.to_vec(),
        config: state.config.nav,
        mobile_menu_id: MOBILE_MENU_ID,
        resume_url: state.config.resume_url.clone(),
    })
}

/// POST /api/v1/nav/simulate
///
/// Replays a scripted navigation session headlessly and returns every
/// intermediate state. The run is synchronous, so it goes to the blocking pool.
pub async fn handle_simulate(
    State(state): State<AppState>,
    Json(request): Json<SimulationRequest>,
) -> Result<Json<SimulationReport>, AppError> {
    let links = Arc::clone(&state.links);
    let config = state.config.nav;
    let resume_url = state.config.resume_url.clone();

    let report = tokio::task::spawn_blocking(move || {
        run_simulation(request, &links, &config, &resume_url)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("simulation task failed: {e}")))??;

    Ok(Json(report))
}
