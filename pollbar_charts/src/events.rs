// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport-wide resize and scroll listeners with a scoped lifetime.
//!
//! Every mounted widget subscribes on its own and receives a [`Subscription`];
//! dropping it (when the widget unmounts) removes the listener. Listeners of
//! different widgets never see each other's state.
//!
//! Scroll events follow capture/bubble semantics: a scroll inside a nested
//! scrollable container only reaches [`Phase::Capture`] listeners, while a
//! document scroll reaches both phases.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

/// The kind of a [`ViewportEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The viewport was resized.
    Resize,
    /// Something scrolled.
    Scroll,
}

/// The phase a listener is registered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Runs for events from anywhere in the page, before bubbling listeners.
    Capture,
    /// Runs only for events that reach the document.
    Bubble,
}

/// What scrolled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollOrigin {
    /// The document itself.
    Document,
    /// A scrollable container nested in the page.
    Nested,
}

/// An event delivered to viewport listeners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportEvent {
    /// New viewport size in pixels.
    Resize {
        /// Viewport width.
        width: f64,
        /// Viewport height.
        height: f64,
    },
    /// A scroll happened.
    Scroll {
        /// Where it happened.
        origin: ScrollOrigin,
    },
}

impl ViewportEvent {
    /// The event's kind.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Resize { .. } => EventKind::Resize,
            Self::Scroll { .. } => EventKind::Scroll,
        }
    }

    fn reaches(&self, phase: Phase) -> bool {
        match (self, phase) {
            (_, Phase::Capture) => true,
            (Self::Scroll { origin }, Phase::Bubble) => *origin == ScrollOrigin::Document,
            (Self::Resize { .. }, Phase::Bubble) => true,
        }
    }
}

type Callback = Rc<RefCell<Box<dyn FnMut(&ViewportEvent)>>>;

struct Listener {
    id: u64,
    kind: EventKind,
    phase: Phase,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<Listener>,
}

/// The viewport's listener registry.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct ViewportEvents {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for ViewportEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportEvents")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

impl ViewportEvents {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for events of `kind` in `phase`.
    ///
    /// The listener stays registered until the returned [`Subscription`] is dropped.
    #[must_use = "dropping the subscription removes the listener immediately"]
    pub fn subscribe(
        &self,
        kind: EventKind,
        phase: Phase,
        callback: impl FnMut(&ViewportEvent) + 'static,
    ) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push(Listener {
            id,
            kind,
            phase,
            callback: Rc::new(RefCell::new(Box::new(callback))),
        });
        tracing::trace!(id, ?kind, ?phase, "viewport listener added");
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// The number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Delivers `event` to every listener it reaches: capture listeners first,
    /// then bubbling ones, each in registration order.
    ///
    /// Listeners may subscribe or unsubscribe while being called; such changes
    /// take effect from the next dispatch. A listener that is already running
    /// (re-entrant dispatch) is skipped. Returns the number of listeners called.
    pub fn dispatch(&self, event: &ViewportEvent) -> usize {
        let kind = event.kind();
        let targets: Vec<Callback> = {
            let registry = self.registry.borrow();
            [Phase::Capture, Phase::Bubble]
                .into_iter()
                .filter(|&phase| event.reaches(phase))
                .flat_map(|phase| {
                    registry
                        .listeners
                        .iter()
                        .filter(move |l| l.kind == kind && l.phase == phase)
                        .map(|l| Rc::clone(&l.callback))
                })
                .collect()
        };

        let mut called = 0;
        for callback in targets {
            if let Ok(mut callback) = callback.try_borrow_mut() {
                callback(event);
                called += 1;
            }
        }
        called
    }
}

/// Keeps a viewport listener registered; dropping it removes the listener.
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Subscription {
    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|r| r.borrow().listeners.iter().any(|l| l.id == self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let removed = {
            let mut registry = registry.borrow_mut();
            let index = registry.listeners.iter().position(|l| l.id == self.id);
            index.map(|i| registry.listeners.remove(i))
        };
        // The callback may own further subscriptions; drop it with the registry released.
        if let Some(listener) = removed {
            tracing::trace!(id = listener.id, "viewport listener removed");
            drop(listener);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use core::cell::Cell;

    use super::*;

    const NESTED: ViewportEvent = ViewportEvent::Scroll {
        origin: ScrollOrigin::Nested,
    };
    const DOCUMENT: ViewportEvent = ViewportEvent::Scroll {
        origin: ScrollOrigin::Document,
    };

    fn counter(
        events: &ViewportEvents,
        kind: EventKind,
        phase: Phase,
    ) -> (Rc<Cell<u32>>, Subscription) {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = events.subscribe(kind, phase, move |_| h.set(h.get() + 1));
        (hits, sub)
    }

    #[test]
    fn dropping_the_subscription_unsubscribes() {
        let events = ViewportEvents::new();
        let (hits, sub) = counter(&events, EventKind::Scroll, Phase::Capture);
        assert_eq!(events.listener_count(), 1);
        assert!(sub.is_active());

        events.dispatch(&DOCUMENT);
        drop(sub);
        events.dispatch(&DOCUMENT);
        assert_eq!(hits.get(), 1);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn nested_scroll_only_reaches_capture_listeners() {
        let events = ViewportEvents::new();
        let (capture, _c) = counter(&events, EventKind::Scroll, Phase::Capture);
        let (bubble, _b) = counter(&events, EventKind::Scroll, Phase::Bubble);

        assert_eq!(events.dispatch(&NESTED), 1);
        assert_eq!(events.dispatch(&DOCUMENT), 2);
        assert_eq!(capture.get(), 2);
        assert_eq!(bubble.get(), 1);
    }

    #[test]
    fn kinds_are_filtered() {
        let events = ViewportEvents::new();
        let (resizes, _r) = counter(&events, EventKind::Resize, Phase::Bubble);
        let (scrolls, _s) = counter(&events, EventKind::Scroll, Phase::Capture);
        events.dispatch(&ViewportEvent::Resize {
            width: 640.0,
            height: 480.0,
        });
        assert_eq!((resizes.get(), scrolls.get()), (1, 0));
    }

    #[test]
    fn widgets_are_independent() {
        let events = ViewportEvents::new();
        let (a, sub_a) = counter(&events, EventKind::Scroll, Phase::Capture);
        let (b, _sub_b) = counter(&events, EventKind::Scroll, Phase::Capture);
        events.dispatch(&NESTED);
        drop(sub_a);
        events.dispatch(&NESTED);
        assert_eq!((a.get(), b.get()), (1, 2));
    }

    #[test]
    fn capture_runs_before_bubble() {
        let events = ViewportEvents::new();
        let order = Rc::new(RefCell::new(vec![]));
        let o = Rc::clone(&order);
        let _b = events.subscribe(EventKind::Scroll, Phase::Bubble, move |_| {
            o.borrow_mut().push(Phase::Bubble);
        });
        let o = Rc::clone(&order);
        let _c = events.subscribe(EventKind::Scroll, Phase::Capture, move |_| {
            o.borrow_mut().push(Phase::Capture);
        });
        events.dispatch(&DOCUMENT);
        assert_eq!(*order.borrow(), [Phase::Capture, Phase::Bubble]);
    }

    #[test]
    fn subscription_outliving_the_registry_is_inert() {
        let events = ViewportEvents::new();
        let (_hits, sub) = counter(&events, EventKind::Resize, Phase::Capture);
        drop(events);
        assert!(!sub.is_active());
        drop(sub);
    }
}
