//! Smooth Scroll Dispatcher — moves the viewport to a registered section.

use tracing::debug;

use crate::nav::geometry::SectionLocator;
use crate::nav::window::{ScrollRequest, Window};

/// Pixels subtracted from a section's top so the fixed header does not cover its heading.
pub const DEFAULT_HEADER_CLEARANCE: f64 = 80.0;

#[derive(Debug, Clone)]
pub struct ScrollDispatcher {
    section_ids: Vec<String>,
    header_clearance: f64,
}

impl ScrollDispatcher {
    pub fn new(section_ids: Vec<String>, header_clearance: f64) -> Self {
        Self {
            section_ids,
            header_clearance,
        }
    }

    /// The request that would bring `target_id` under the header, if it is
    /// registered and present in the document.
    pub fn request_for(&self, locator: &dyn SectionLocator, target_id: &str) -> Option<ScrollRequest> {
        if !self.section_ids.iter().any(|id| id == target_id) {
            return None;
        }
        let bounds = locator.find(target_id)?;
        Some(ScrollRequest::smooth(bounds.top - self.header_clearance))
    }

    /// Fire-and-forget: issues the scroll and returns what was issued.
    /// Unknown or absent targets are silent no-ops.
    pub fn dispatch(
        &self,
        locator: &dyn SectionLocator,
        window: &dyn Window,
        target_id: &str,
    ) -> Option<ScrollRequest> {
        let Some(request) = self.request_for(locator, target_id) else {
            debug!(target_id, "scroll target not found; ignoring");
            return None;
        };
        debug!(target_id, top = request.top, "dispatching smooth scroll");
        window.scroll_to(request);
        Some(request)
    }
}
