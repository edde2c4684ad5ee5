//! Scroll Position Tracker — maps the current scroll offset to the active section.
//!
//! # Algorithm
//! 1. `probe = scroll_offset + probe_offset` (clears the fixed header).
//! 2. Walk sections in document order, skipping ids the locator cannot find.
//! 3. The first section whose `[top, top + height)` contains the probe wins.
//! 4. No match leaves the previous active section in place (sticky at page extremes).

use crate::nav::geometry::SectionLocator;

/// Probe offset added to the scroll position before testing containment.
pub const DEFAULT_PROBE_OFFSET: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct ScrollTracker {
    section_ids: Vec<String>,
    probe_offset: f64,
}

impl ScrollTracker {
    pub fn new(section_ids: Vec<String>, probe_offset: f64) -> Self {
        Self {
            section_ids,
            probe_offset,
        }
    }

    pub fn probe(&self, scroll_offset: f64) -> f64 {
        scroll_offset + self.probe_offset
    }

    /// The section containing the probe for this scroll offset, if any.
    pub fn section_at(&self, locator: &dyn SectionLocator, scroll_offset: f64) -> Option<&str> {
        let probe = self.probe(scroll_offset);
        self.section_ids
            .iter()
            .find(|id| locator.find(id).is_some_and(|b| b.contains(probe)))
            .map(String::as_str)
    }

    /// Applies the sticky policy: returns the new active section, or `None` when
    /// `current` should be kept as is.
    pub fn next_active(
        &self,
        locator: &dyn SectionLocator,
        scroll_offset: f64,
        current: Option<&str>,
    ) -> Option<String> {
        match self.section_at(locator, scroll_offset) {
            Some(id) if current != Some(id) => Some(id.to_string()),
            _ => None,
        }
    }
}
