//! Headless navigation sessions.
//!
//! Builds a page out of a [`StaticLayout`] and a [`RecordingWindow`], mounts the
//! navigation controller and header tracker against a fresh event hub, and
//! replays a scripted sequence of user and layout events. Each step records the
//! resulting state and the platform requests it produced.
//!
//! Pure and synchronous; the HTTP handler runs it on a blocking thread.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::nav::actions::{HeaderTracker, PageActions, Shortcut, MAIN_CONTENT_ID};
use crate::nav::controller::{
    Key, LinkEvent, LinkView, MenuToggleView, NavConfig, NavSnapshot, NavigationController,
};
use crate::nav::events::ScrollEventHub;
use crate::nav::geometry::{SectionBounds, StaticLayout};
use crate::nav::links::{validate_links, ManifestError, NavLink};
use crate::nav::window::{PlatformRequest, RecordingWindow, Window};

pub const MAX_EVENTS: usize = 10_000;

// ────────────────────────────────────────────────────────────────────────────
// Script
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct PlacedSection {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptedEvent {
    /// Viewport moved; a scroll event is delivered.
    Scroll { offset: f64 },
    Click { target: String },
    /// Keydown on a focused link, `key` as in `KeyboardEvent.key`.
    Key { target: String, key: String },
    ToggleMenu,
    /// Section inserted or reflowed. No scroll event is delivered.
    Place { id: String, top: f64, height: f64 },
    Remove { id: String },
    ScrollToTop,
    Shortcut { shortcut: Shortcut },
    SkipToContent,
    DownloadResume,
    Unmount,
}

impl ScriptedEvent {
    fn kind(&self) -> &'static str {
        match self {
            ScriptedEvent::Scroll { .. } => "scroll",
            ScriptedEvent::Click { .. } => "click",
            ScriptedEvent::Key { .. } => "key",
            ScriptedEvent::ToggleMenu => "toggle_menu",
            ScriptedEvent::Place { .. } => "place",
            ScriptedEvent::Remove { .. } => "remove",
            ScriptedEvent::ScrollToTop => "scroll_to_top",
            ScriptedEvent::Shortcut { .. } => "shortcut",
            ScriptedEvent::SkipToContent => "skip_to_content",
            ScriptedEvent::DownloadResume => "download_resume",
            ScriptedEvent::Unmount => "unmount",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub sections: Vec<PlacedSection>,
    #[serde(default)]
    pub initial_offset: f64,
    /// Overrides the site's link set for this session.
    #[serde(default)]
    pub links: Option<Vec<NavLink>>,
    pub events: Vec<ScriptedEvent>,
}

// ────────────────────────────────────────────────────────────────────────────
// Report
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    #[serde(flatten)]
    pub nav: NavSnapshot,
    pub header_scrolled: bool,
    pub scroll_offset: f64,
    pub listeners: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStep {
    pub index: usize,
    pub event: &'static str,
    /// `None` for events that are not link activations or that hit an unmounted page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_prevented: Option<bool>,
    pub requests: Vec<PlatformRequest>,
    pub state: PageSnapshot,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub initial: PageSnapshot,
    pub steps: Vec<SimulationStep>,
    pub links: Vec<LinkView>,
    pub menu_toggle: MenuToggleView,
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("script has {count} events; at most {max} are allowed")]
    TooManyEvents { count: usize, max: usize },

    #[error("section '{id}' has invalid geometry (top={top}, height={height})")]
    InvalidGeometry { id: String, top: f64, height: f64 },

    #[error("scroll offset {0} is not a finite number")]
    InvalidOffset(f64),

    #[error("invalid link set: {0}")]
    Links(#[from] ManifestError),
}

// ────────────────────────────────────────────────────────────────────────────
// Runner
// ────────────────────────────────────────────────────────────────────────────

struct Page {
    layout: Rc<StaticLayout>,
    window: Rc<RecordingWindow>,
    hub: ScrollEventHub,
    nav: NavigationController,
    header: HeaderTracker,
    actions: PageActions,
}

impl Page {
    fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            nav: self.nav.snapshot(),
            header_scrolled: self.header.is_scrolled(),
            scroll_offset: self.window.scroll_offset(),
            listeners: self.hub.listener_count(),
        }
    }

    fn mounted(&self) -> bool {
        self.nav.is_mounted()
    }

    /// Applies one event; returns `default_prevented` for link activations.
    fn apply(&mut self, event: &ScriptedEvent) -> Option<bool> {
        match event {
            ScriptedEvent::Scroll { offset } => {
                self.window.set_scroll_offset(*offset);
                self.hub.dispatch();
                None
            }
            ScriptedEvent::Place { id, top, height } => {
                self.layout.place(id, SectionBounds::new(*top, *height));
                None
            }
            ScriptedEvent::Remove { id } => {
                self.layout.remove(id);
                None
            }
            ScriptedEvent::Unmount => {
                self.nav.dispose();
                self.header.dispose();
                None
            }
            _ if !self.mounted() => None,
            ScriptedEvent::Click { target } => {
                let mut link_event = LinkEvent::new(target.as_str());
                self.nav.activate(&mut link_event);
                Some(link_event.default_prevented())
            }
            ScriptedEvent::Key { target, key } => {
                let mut link_event = LinkEvent::new(target.as_str());
                self.nav.handle_key(&mut link_event, Key::from_dom(key));
                Some(link_event.default_prevented())
            }
            ScriptedEvent::ToggleMenu => {
                self.nav.toggle_menu();
                None
            }
            ScriptedEvent::ScrollToTop => {
                self.actions.scroll_to_top();
                None
            }
            ScriptedEvent::Shortcut { shortcut } => {
                self.actions.shortcut(*shortcut);
                None
            }
            ScriptedEvent::SkipToContent => {
                let mut link_event = LinkEvent::new(MAIN_CONTENT_ID);
                self.actions.skip_to_content(&mut link_event);
                Some(link_event.default_prevented())
            }
            ScriptedEvent::DownloadResume => {
                self.actions.download_resume();
                None
            }
        }
    }
}

fn check_geometry(id: &str, top: f64, height: f64) -> Result<(), SimulationError> {
    if top.is_finite() && height.is_finite() && height >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidGeometry {
            id: id.to_string(),
            top,
            height,
        })
    }
}

fn check_offset(offset: f64) -> Result<(), SimulationError> {
    if offset.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::InvalidOffset(offset))
    }
}

/// Rejects scripts the runner would not replay faithfully.
pub fn validate_request(request: &SimulationRequest) -> Result<(), SimulationError> {
    if request.events.len() > MAX_EVENTS {
        return Err(SimulationError::TooManyEvents {
            count: request.events.len(),
            max: MAX_EVENTS,
        });
    }
    check_offset(request.initial_offset)?;
    for section in &request.sections {
        check_geometry(&section.id, section.top, section.height)?;
    }
    for event in &request.events {
        match event {
            ScriptedEvent::Scroll { offset } => check_offset(*offset)?,
            ScriptedEvent::Place { id, top, height } => check_geometry(id, *top, *height)?,
            _ => {}
        }
    }
    Ok(())
}

/// Replays `request` against a freshly mounted page.
pub fn run_simulation(
    request: SimulationRequest,
    site_links: &[NavLink],
    config: &NavConfig,
    resume_url: &str,
) -> Result<SimulationReport, SimulationError> {
    validate_request(&request)?;
    let links = match request.links {
        Some(links) => validate_links(links)?,
        None => site_links.to_vec(),
    };

    let layout = Rc::new(StaticLayout::with_sections(
        request
            .sections
            .iter()
            .map(|s| (s.id.as_str(), SectionBounds::new(s.top, s.height))),
    ));
    let window = Rc::new(RecordingWindow::at_offset(request.initial_offset));
    let hub = ScrollEventHub::new();

    let nav = NavigationController::mount(links, layout.clone(), window.clone(), &hub, config);
    let header = HeaderTracker::mount(window.clone(), &hub, config.scrolled_threshold);
    let actions = PageActions::new(layout.clone(), window.clone(), resume_url);

    let mut page = Page {
        layout,
        window,
        hub,
        nav,
        header,
        actions,
    };

    let initial = page.snapshot();
    let mut steps = Vec::with_capacity(request.events.len());
    for (index, event) in request.events.iter().enumerate() {
        let default_prevented = page.apply(event);
        steps.push(SimulationStep {
            index,
            event: event.kind(),
            default_prevented,
            requests: page.window.take_requests(),
            state: page.snapshot(),
        });
    }

    debug!(steps = steps.len(), "navigation simulation finished");
    Ok(SimulationReport {
        initial,
        steps,
        links: page.nav.links_view(),
        menu_toggle: page.nav.menu_toggle(),
    })
}
