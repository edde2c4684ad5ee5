//! Section geometry and the locator capability the tracker and dispatcher read it through.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Document-space vertical extent of a rendered section, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Half-open containment: `[top, top + height)`.
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// Resolves a section identifier to its current bounds.
///
/// Bounds are read on demand at every call; implementations must not cache
/// them across layout changes. `None` means the section is not in the document.
pub trait SectionLocator {
    fn find(&self, id: &str) -> Option<SectionBounds>;
}

impl<L: SectionLocator + ?Sized> SectionLocator for &L {
    fn find(&self, id: &str) -> Option<SectionBounds> {
        (**self).find(id)
    }
}

/// In-memory locator for headless hosts and tests.
///
/// Interior mutability lets a layout change be applied while the controller
/// holds a shared handle, the same way the document reflows under a mounted view.
#[derive(Debug, Default)]
pub struct StaticLayout {
    sections: RefCell<HashMap<String, SectionBounds>>,
}

impl StaticLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sections<'a>(sections: impl IntoIterator<Item = (&'a str, SectionBounds)>) -> Self {
        let layout = Self::new();
        for (id, bounds) in sections {
            layout.place(id, bounds);
        }
        layout
    }

    /// Inserts or moves a section.
    pub fn place(&self, id: &str, bounds: SectionBounds) {
        self.sections.borrow_mut().insert(id.to_string(), bounds);
    }

    pub fn remove(&self, id: &str) -> Option<SectionBounds> {
        self.sections.borrow_mut().remove(id)
    }
}

impl SectionLocator for StaticLayout {
    fn find(&self, id: &str) -> Option<SectionBounds> {
        self.sections.borrow().get(id).copied()
    }
}
