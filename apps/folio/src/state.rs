use std::sync::Arc;

use crate::config::Config;
use crate::nav::NavLink;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Immutable for the lifetime of the process; shared with every simulation.
    pub links: Arc<[NavLink]>,
}

impl AppState {
    pub fn new(config: Config, links: Vec<NavLink>) -> Self {
        Self {
            config,
            links: links.into(),
        }
    }
}
