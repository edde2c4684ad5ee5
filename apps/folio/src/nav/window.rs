//! Platform capability: the browser window as seen by the navigation core.
//!
//! Scrolling is fire-and-forget. The platform animates `Smooth` requests on its
//! own and a newer request supersedes an in-flight one; nothing here waits for
//! completion.

use std::cell::{Cell, RefCell};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

impl ScrollRequest {
    /// Smooth scroll to a document offset, clamped at the page top.
    pub fn smooth(top: f64) -> Self {
        Self {
            top: top.max(0.0),
            behavior: ScrollBehavior::Smooth,
        }
    }
}

/// Everything the core can ask of its host window.
pub trait Window {
    /// Current vertical scroll offset of the document.
    fn scroll_offset(&self) -> f64;

    fn scroll_to(&self, request: ScrollRequest);

    /// Moves keyboard focus to the element with this id.
    fn focus(&self, id: &str);

    /// Opens `url` in the named browsing context (`_blank` for a new tab).
    fn open(&self, url: &str, target: &str);
}

/// A request observed by [`RecordingWindow`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlatformRequest {
    Scroll { top: f64, behavior: ScrollBehavior },
    Focus { id: String },
    Open { url: String, target: String },
}

/// Headless window: the scroll offset is set explicitly and every request is
/// recorded instead of animated.
#[derive(Debug, Default)]
pub struct RecordingWindow {
    offset: Cell<f64>,
    requests: RefCell<Vec<PlatformRequest>>,
}

impl RecordingWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_offset(offset: f64) -> Self {
        let window = Self::new();
        window.set_scroll_offset(offset);
        window
    }

    /// Moves the viewport. Callers dispatch the scroll event themselves.
    pub fn set_scroll_offset(&self, offset: f64) {
        self.offset.set(offset.max(0.0));
    }

    /// Drains the requests recorded so far.
    pub fn take_requests(&self) -> Vec<PlatformRequest> {
        std::mem::take(&mut *self.requests.borrow_mut())
    }
}

#[cfg(test)]
impl RecordingWindow {
    pub fn requests(&self) -> Vec<PlatformRequest> {
        self.requests.borrow().clone()
    }

    pub fn scroll_requests(&self) -> Vec<ScrollRequest> {
        self.requests
            .borrow()
            .iter()
            .filter_map(|r| match r {
                PlatformRequest::Scroll { top, behavior } => Some(ScrollRequest {
                    top: *top,
                    behavior: *behavior,
                }),
                _ => None,
            })
            .collect()
    }
}

impl Window for RecordingWindow {
    fn scroll_offset(&self) -> f64 {
        self.offset.get()
    }

    fn scroll_to(&self, request: ScrollRequest) {
        self.requests.borrow_mut().push(PlatformRequest::Scroll {
            top: request.top,
            behavior: request.behavior,
        });
    }

    fn focus(&self, id: &str) {
        self.requests
            .borrow_mut()
            .push(PlatformRequest::Focus { id: id.to_string() });
    }

    fn open(&self, url: &str, target: &str) {
        self.requests.borrow_mut().push(PlatformRequest::Open {
            url: url.to_string(),
            target: target.to_string(),
        });
    }
}
