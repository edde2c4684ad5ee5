//! Page-level interactions outside the link bar: header shadow, logo scroll-to-top,
//! hero shortcuts, skip link, and the resume download trigger.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::nav::controller::LinkEvent;
use crate::nav::events::{ScrollEventHub, Subscription};
use crate::nav::geometry::SectionLocator;
use crate::nav::window::{ScrollRequest, Window};

/// Focus target of the skip link.
pub const MAIN_CONTENT_ID: &str = "main-content";

pub const DEFAULT_RESUME_URL: &str = "/resume.pdf";

// ────────────────────────────────────────────────────────────────────────────
// Header scrolled state
// ────────────────────────────────────────────────────────────────────────────

/// Tracks whether the page has scrolled far enough for the header to lift.
///
/// Starts flat and only updates on scroll events.
pub struct HeaderTracker {
    scrolled: Rc<Cell<bool>>,
    subscription: Option<Subscription>,
}

impl HeaderTracker {
    pub fn mount(window: Rc<dyn Window>, hub: &ScrollEventHub, threshold: f64) -> Self {
        let scrolled = Rc::new(Cell::new(false));
        let subscription = {
            let scrolled = Rc::downgrade(&scrolled);
            hub.subscribe(move || {
                if let Some(scrolled) = scrolled.upgrade() {
                    scrolled.set(window.scroll_offset() > threshold);
                }
            })
        };
        Self {
            scrolled,
            subscription: Some(subscription),
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled.get()
    }

    pub fn dispose(&mut self) {
        self.subscription.take();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// One-shot page actions
// ────────────────────────────────────────────────────────────────────────────

/// Hero call-to-action buttons that jump to a fixed section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shortcut {
    ViewWork,
    Contact,
    ScrollDown,
}

impl Shortcut {
    pub fn target_id(self) -> &'static str {
        match self {
            Shortcut::ViewWork => "work-projects",
            Shortcut::Contact => "contact",
            Shortcut::ScrollDown => "about",
        }
    }
}

pub struct PageActions {
    locator: Rc<dyn SectionLocator>,
    window: Rc<dyn Window>,
    resume_url: String,
}

impl PageActions {
    pub fn new(
        locator: Rc<dyn SectionLocator>,
        window: Rc<dyn Window>,
        resume_url: impl Into<String>,
    ) -> Self {
        Self {
            locator,
            window,
            resume_url: resume_url.into(),
        }
    }

    pub fn scroll_to_top(&self) -> ScrollRequest {
        let request = ScrollRequest::smooth(0.0);
        self.window.scroll_to(request);
        request
    }

    /// `scrollIntoView`: aligns the section top with the viewport top, no header
    /// clearance. Absent sections are a no-op.
    pub fn scroll_into_view(&self, id: &str) -> Option<ScrollRequest> {
        let bounds = self.locator.find(id)?;
        let request = ScrollRequest::smooth(bounds.top);
        self.window.scroll_to(request);
        Some(request)
    }

    pub fn shortcut(&self, shortcut: Shortcut) -> Option<ScrollRequest> {
        self.scroll_into_view(shortcut.target_id())
    }

    /// Skip link: move focus into the main landmark and bring it into view.
    /// Returns `false` when the page has no main landmark.
    pub fn skip_to_content(&self, event: &mut LinkEvent) -> bool {
        event.prevent_default();
        if self.locator.find(MAIN_CONTENT_ID).is_none() {
            return false;
        }
        self.window.focus(MAIN_CONTENT_ID);
        self.scroll_into_view(MAIN_CONTENT_ID);
        true
    }

    /// Opens the resume in a new tab; the server answers with the PDF.
    pub fn download_resume(&self) {
        debug!(url = %self.resume_url, "opening resume");
        self.window.open(&self.resume_url, "_blank");
    }
}
