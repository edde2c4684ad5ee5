//! Scroll-event delivery.
//!
//! The hub stands in for `window.addEventListener("scroll", ..)`. Registration
//! returns a [`Subscription`]; dropping it removes the listener, so a mounted
//! view cannot outlive its handler and repeated mount/unmount never
//! accumulates listeners.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Single-threaded scroll-event source. Cloning yields another handle to the same hub.
#[derive(Clone, Default)]
pub struct ScrollEventHub {
    inner: Rc<RefCell<HubInner>>,
}

impl ScrollEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        Subscription {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Delivers one scroll event to every live listener, in registration order.
    pub fn dispatch(&self) {
        // Snapshot first: a listener may subscribe or unsubscribe re-entrantly.
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl std::fmt::Debug for ScrollEventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollEventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Live listener registration. Removed from the hub on drop.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    hub: Weak<RefCell<HubInner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
