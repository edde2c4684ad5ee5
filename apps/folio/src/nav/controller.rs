//! Navigation State Controller — the interaction surface of the header navigation.
//!
//! Owns two orthogonal pieces of state:
//! - the active section, written only by the scroll tracker (sticky, may be `None`
//!   until the first match)
//! - the mobile menu flag, flipped by the hamburger control and forced closed by
//!   every link activation
//!
//! Scrolling never closes the menu. The scroll listener is registered at
//! [`NavigationController::mount`] and removed by [`NavigationController::dispose`]
//! or on drop.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::nav::dispatcher::{ScrollDispatcher, DEFAULT_HEADER_CLEARANCE};
use crate::nav::events::{ScrollEventHub, Subscription};
use crate::nav::geometry::SectionLocator;
use crate::nav::links::NavLink;
use crate::nav::tracker::{ScrollTracker, DEFAULT_PROBE_OFFSET};
use crate::nav::window::{ScrollRequest, Window};

/// DOM id of the collapsible menu the hamburger control points at.
pub const MOBILE_MENU_ID: &str = "mobile-menu";

/// Scroll offset past which the header is drawn as "scrolled".
pub const DEFAULT_SCROLLED_THRESHOLD: f64 = 20.0;

/// Pixel constants shared by the tracker, dispatcher and header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavConfig {
    pub probe_offset: f64,
    pub header_clearance: f64,
    pub scrolled_threshold: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            probe_offset: DEFAULT_PROBE_OFFSET,
            header_clearance: DEFAULT_HEADER_CLEARANCE,
            scrolled_threshold: DEFAULT_SCROLLED_THRESHOLD,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Input events
// ────────────────────────────────────────────────────────────────────────────

/// Keyboard key as reported by `KeyboardEvent.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Other,
}

impl Key {
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            " " | "Space" | "Spacebar" => Key::Space,
            _ => Key::Other,
        }
    }

    /// Enter and Space on a focused link behave exactly like a click.
    pub fn activates_link(self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

/// A click or keypress on a navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEvent {
    target_id: String,
    default_prevented: bool,
}

impl LinkEvent {
    pub fn new(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            default_prevented: false,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Suppresses the browser's instant anchor jump.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

// ────────────────────────────────────────────────────────────────────────────
// View-model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkView {
    pub label: String,
    pub href: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_current: Option<&'static str>,
}

/// Accessible state of the hamburger control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuToggleView {
    pub expanded: bool,
    pub label: &'static str,
    pub controls: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavSnapshot {
    pub active_section: Option<String>,
    pub menu_open: bool,
    pub revision: u64,
    pub mounted: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Controller
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct NavState {
    active_section: Option<String>,
    menu_open: bool,
    /// Bumped on every active-section change; a renderer redraws when it moves.
    revision: u64,
}

pub struct NavigationController {
    links: Vec<NavLink>,
    state: Rc<RefCell<NavState>>,
    tracker: Rc<ScrollTracker>,
    locator: Rc<dyn SectionLocator>,
    window: Rc<dyn Window>,
    dispatcher: ScrollDispatcher,
    subscription: Option<Subscription>,
}

impl NavigationController {
    /// Registers the scroll listener and runs the initial tracking pass.
    pub fn mount(
        links: Vec<NavLink>,
        locator: Rc<dyn SectionLocator>,
        window: Rc<dyn Window>,
        hub: &ScrollEventHub,
        config: &NavConfig,
    ) -> Self {
        let ids: Vec<String> = links.iter().map(|l| l.target_id.clone()).collect();
        let tracker = Rc::new(ScrollTracker::new(ids.clone(), config.probe_offset));
        let dispatcher = ScrollDispatcher::new(ids, config.header_clearance);
        let state = Rc::new(RefCell::new(NavState::default()));

        let subscription = {
            let state = Rc::downgrade(&state);
            let tracker = Rc::clone(&tracker);
            let locator = Rc::clone(&locator);
            let window = Rc::clone(&window);
            hub.subscribe(move || {
                if let Some(state) = state.upgrade() {
                    track(&tracker, locator.as_ref(), window.as_ref(), &state);
                }
            })
        };

        let controller = Self {
            links,
            state,
            tracker,
            locator,
            window,
            dispatcher,
            subscription: Some(subscription),
        };
        controller.refresh();
        debug!(links = controller.links.len(), "navigation mounted");
        controller
    }

    /// Re-runs the tracker against the current scroll offset.
    pub fn refresh(&self) {
        track(
            &self.tracker,
            self.locator.as_ref(),
            self.window.as_ref(),
            &self.state,
        );
    }

    /// Link click (or keyboard activation): prevent the anchor jump, smooth
    /// scroll to the target, close the menu. Returns the issued scroll, if any.
    pub fn activate(&self, event: &mut LinkEvent) -> Option<ScrollRequest> {
        event.prevent_default();
        let issued = self.dispatcher.dispatch(
            self.locator.as_ref(),
            self.window.as_ref(),
            event.target_id(),
        );
        self.state.borrow_mut().menu_open = false;
        issued
    }

    /// Keydown on a focused link. Returns `true` when the key was handled.
    pub fn handle_key(&self, event: &mut LinkEvent, key: Key) -> bool {
        if !key.activates_link() {
            return false;
        }
        self.activate(event);
        true
    }

    /// Flips the mobile menu and returns the new state.
    pub fn toggle_menu(&self) -> bool {
        let mut state = self.state.borrow_mut();
        state.menu_open = !state.menu_open;
        state.menu_open
    }

    /// Removes the scroll listener. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.subscription.take().is_some() {
            debug!("navigation disposed");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn active_section(&self) -> Option<String> {
        self.state.borrow().active_section.clone()
    }

    pub fn is_menu_open(&self) -> bool {
        self.state.borrow().menu_open
    }

    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    pub fn links_view(&self) -> Vec<LinkView> {
        let state = self.state.borrow();
        self.links
            .iter()
            .map(|link| {
                let active = state.active_section.as_deref() == Some(link.target_id.as_str());
                LinkView {
                    label: link.label.clone(),
                    href: link.href(),
                    active,
                    aria_current: active.then_some("page"),
                }
            })
            .collect()
    }

    pub fn menu_toggle(&self) -> MenuToggleView {
        let expanded = self.is_menu_open();
        MenuToggleView {
            expanded,
            label: if expanded { "Close menu" } else { "Open menu" },
            controls: MOBILE_MENU_ID,
        }
    }

    pub fn snapshot(&self) -> NavSnapshot {
        NavSnapshot {
            active_section: self.active_section(),
            menu_open: self.is_menu_open(),
            revision: self.revision(),
            mounted: self.is_mounted(),
        }
    }
}

fn track(
    tracker: &ScrollTracker,
    locator: &dyn SectionLocator,
    window: &dyn Window,
    state: &RefCell<NavState>,
) {
    let current = state.borrow().active_section.clone();
    let Some(next) = tracker.next_active(locator, window.scroll_offset(), current.as_deref())
    else {
        return;
    };

    debug!(from = ?current, to = %next, "active section changed");
    let mut state = state.borrow_mut();
    state.active_section = Some(next);
    state.revision += 1;
}
