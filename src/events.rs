//! Listener registry with RAII subscription handles.
//!
//! Window events are fanned out to whoever subscribed. Dropping the returned
//! [`Subscription`] detaches the listener, so a sketch that goes away takes its
//! pointer and resize handlers with it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Host events a sketch reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SketchEvent {
    /// Cursor position in physical pixels, origin top-left
    PointerMoved { x: f32, y: f32 },
    /// New surface size in physical pixels
    Resized { width: u32, height: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PointerMove,
    Resize,
}

impl SketchEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SketchEvent::PointerMoved { .. } => EventKind::PointerMove,
            SketchEvent::Resized { .. } => EventKind::Resize,
        }
    }
}

struct Listener {
    kind: EventKind,
    active: Rc<Cell<bool>>,
    callback: Box<dyn FnMut(&SketchEvent)>,
}

/// Single-threaded event fan-out
#[derive(Default)]
pub struct EventHub {
    listeners: RefCell<Vec<Listener>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for events of `kind`; it stays attached until the
    /// returned handle is dropped
    #[must_use = "dropping the subscription detaches the listener"]
    pub fn subscribe<F>(&self, kind: EventKind, callback: F) -> Subscription
    where
        F: FnMut(&SketchEvent) + 'static,
    {
        let active = Rc::new(Cell::new(true));
        self.listeners.borrow_mut().push(Listener {
            kind,
            active: active.clone(),
            callback: Box::new(callback),
        });
        Subscription { active }
    }

    /// Deliver `event` to every live listener of its kind. Listeners whose
    /// handle has been dropped are pruned here.
    pub fn dispatch(&self, event: &SketchEvent) {
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|listener| listener.active.get());

        let kind = event.kind();
        for listener in listeners.iter_mut() {
            if listener.kind == kind && listener.active.get() {
                (listener.callback)(event);
            }
        }
    }

    /// Live listeners of `kind`
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|listener| listener.kind == kind && listener.active.get())
            .count()
    }
}

/// Handle for an attached listener
#[derive(Debug)]
pub struct Subscription {
    active: Rc<Cell<bool>>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Detach now instead of on drop
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_reaches_matching_kind_only() {
        let hub = EventHub::new();
        let pointer_hits = Rc::new(Cell::new(0));
        let resize_hits = Rc::new(Cell::new(0));

        let p = pointer_hits.clone();
        let _pointer = hub.subscribe(EventKind::PointerMove, move |_| p.set(p.get() + 1));
        let r = resize_hits.clone();
        let _resize = hub.subscribe(EventKind::Resize, move |_| r.set(r.get() + 1));

        hub.dispatch(&SketchEvent::PointerMoved { x: 1.0, y: 2.0 });
        hub.dispatch(&SketchEvent::PointerMoved { x: 3.0, y: 4.0 });
        hub.dispatch(&SketchEvent::Resized { width: 10, height: 10 });

        assert_eq!(pointer_hits.get(), 2);
        assert_eq!(resize_hits.get(), 1);
    }

    #[test]
    fn test_dropping_subscription_detaches_listener() {
        let hub = EventHub::new();
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        let subscription = hub.subscribe(EventKind::Resize, move |_| h.set(h.get() + 1));
        assert_eq!(hub.listener_count(EventKind::Resize), 1);

        drop(subscription);
        assert_eq!(hub.listener_count(EventKind::Resize), 0);

        hub.dispatch(&SketchEvent::Resized { width: 1, height: 1 });
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_cancel_detaches_listener() {
        let hub = EventHub::new();
        let subscription = hub.subscribe(EventKind::PointerMove, |_| {});
        assert!(subscription.is_active());
        subscription.cancel();
        assert_eq!(hub.listener_count(EventKind::PointerMove), 0);
    }

    #[test]
    fn test_listener_receives_payload() {
        let hub = EventHub::new();
        let last = Rc::new(Cell::new((0u32, 0u32)));
        let l = last.clone();
        let _subscription = hub.subscribe(EventKind::Resize, move |event| {
            if let SketchEvent::Resized { width, height } = *event {
                l.set((width, height));
            }
        });

        hub.dispatch(&SketchEvent::Resized { width: 1280, height: 720 });
        assert_eq!(last.get(), (1280, 720));
    }
}
