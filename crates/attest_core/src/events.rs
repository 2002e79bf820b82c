//! Event dispatch system
//!
//! Pointer and viewport events routed to listeners registered per target.
//! Registration hands back a [`Subscription`]; dropping it removes the
//! listener, so a widget that keeps its subscriptions alongside its state
//! leaves nothing behind when it unmounts.

use crate::geometry::Viewport;
use crate::sync::lock;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::sync::{Arc, Mutex, Weak};

/// Event type identifier
pub type EventType = u32;

/// Target id used for window-level (viewport) events
pub const WINDOW: u64 = 0;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const CLICK: EventType = 6;
    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: u64,
    pub data: EventData,
    pub timestamp: u64,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    /// Pointer position in page coordinates
    Pointer { x: f32, y: f32 },
    /// Viewport after a scroll or resize
    Viewport(Viewport),
    None,
}

impl Event {
    pub fn new(event_type: EventType, target: u64, data: EventData) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    /// Window-level scroll event
    pub fn scroll(viewport: Viewport) -> Self {
        Self::new(event_types::SCROLL, WINDOW, EventData::Viewport(viewport))
    }

    /// Window-level resize event
    pub fn resize(viewport: Viewport) -> Self {
        Self::new(event_types::RESIZE, WINDOW, EventData::Viewport(viewport))
    }

    pub fn pointer(event_type: EventType, target: u64, x: f32, y: f32) -> Self {
        Self::new(event_type, target, EventData::Pointer { x, y })
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// The viewport carried by scroll/resize events
    pub fn viewport(&self) -> Option<Viewport> {
        match self.data {
            EventData::Viewport(vp) => Some(vp),
            _ => None,
        }
    }
}

/// Event handler function type
pub type EventHandler = Arc<dyn Fn(&Event) + Send + Sync>;

new_key_type! {
    /// Identifier of a registered handler
    pub struct HandlerId;
}

struct HandlerEntry {
    key: (u64, EventType),
    handler: EventHandler,
}

#[derive(Default)]
struct DispatcherInner {
    handlers: SlotMap<HandlerId, HandlerEntry>,
    routes: FxHashMap<(u64, EventType), SmallVec<[HandlerId; 2]>>,
}

impl DispatcherInner {
    fn remove(&mut self, id: HandlerId) {
        let Some(entry) = self.handlers.remove(id) else {
            return;
        };
        if let Some(route) = self.routes.get_mut(&entry.key) {
            route.retain(|h| *h != id);
            if route.is_empty() {
                self.routes.remove(&entry.key);
            }
        }
    }
}

/// Dispatches events to registered handlers
///
/// Cloning yields another handle to the same handler table.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    inner: Arc<Mutex<DispatcherInner>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler for a target and event type
    #[must_use = "the handler is removed when the subscription is dropped"]
    pub fn register<F>(&self, target: u64, event_type: EventType, handler: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let mut inner = lock(&self.inner);
        let key = (target, event_type);
        let id = inner.handlers.insert(HandlerEntry {
            key,
            handler: Arc::new(handler),
        });
        inner.routes.entry(key).or_default().push(id);

        Subscription {
            ids: SmallVec::from_elem(id, 1),
            dispatcher: Arc::downgrade(&self.inner),
        }
    }

    /// Register one handler for several event types on the same target
    #[must_use = "the handlers are removed when the subscription is dropped"]
    pub fn register_many<F>(
        &self,
        target: u64,
        event_types: &[EventType],
        handler: F,
    ) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let handler: EventHandler = Arc::new(handler);
        let mut inner = lock(&self.inner);
        let mut ids = SmallVec::new();
        for &event_type in event_types {
            let key = (target, event_type);
            let id = inner.handlers.insert(HandlerEntry {
                key,
                handler: handler.clone(),
            });
            inner.routes.entry(key).or_default().push(id);
            ids.push(id);
        }

        Subscription {
            ids,
            dispatcher: Arc::downgrade(&self.inner),
        }
    }

    /// Dispatch an event to all registered handlers
    ///
    /// Handlers run without the table locked, so they may register or drop
    /// subscriptions themselves.
    pub fn dispatch(&self, event: &mut Event) {
        let handlers: SmallVec<[EventHandler; 4]> = {
            let inner = lock(&self.inner);
            match inner.routes.get(&(event.target, event.event_type)) {
                Some(route) => route
                    .iter()
                    .filter_map(|id| inner.handlers.get(*id).map(|e| e.handler.clone()))
                    .collect(),
                None => return,
            }
        };

        for handler in handlers {
            if event.propagation_stopped {
                break;
            }
            handler(event);
        }
    }

    /// Number of live handlers across all targets
    pub fn handler_count(&self) -> usize {
        lock(&self.inner).handlers.len()
    }
}

/// Keeps handlers registered; dropping it unregisters them
pub struct Subscription {
    ids: SmallVec<[HandlerId; 2]>,
    dispatcher: Weak<Mutex<DispatcherInner>>,
}

impl Subscription {
    /// Number of handlers held by this subscription
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(dispatcher) = self.dispatcher.upgrade() {
            let mut inner = lock(&dispatcher);
            for id in self.ids.drain(..) {
                inner.remove(id);
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("handlers", &self.ids.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::event_types::*;
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_dispatch_reaches_matching_target_only() {
        let dispatcher = EventDispatcher::new();
        let hits = Arc::new(AtomicU32::new(0));
        let counter = hits.clone();
        let _sub = dispatcher.register(7, POINTER_MOVE, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        dispatcher.dispatch(&mut Event::pointer(POINTER_MOVE, 7, 1.0, 1.0));
        dispatcher.dispatch(&mut Event::pointer(POINTER_MOVE, 8, 1.0, 1.0));
        dispatcher.dispatch(&mut Event::pointer(POINTER_LEAVE, 7, 1.0, 1.0));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropping_subscription_unregisters() {
        let dispatcher = EventDispatcher::new();
        let sub = dispatcher.register_many(WINDOW, &[SCROLL, RESIZE], |_| {});
        assert_eq!(sub.len(), 2);
        assert_eq!(dispatcher.handler_count(), 2);

        drop(sub);
        assert_eq!(dispatcher.handler_count(), 0);
    }

    #[test]
    fn test_stop_propagation() {
        let dispatcher = EventDispatcher::new();
        let hits = Arc::new(AtomicU32::new(0));
        let first = hits.clone();
        let second = hits.clone();
        let _a = dispatcher.register(1, CLICK, move |_| {
            first.fetch_add(1, Ordering::SeqCst);
        });
        let _b = dispatcher.register(1, CLICK, move |_| {
            second.fetch_add(1, Ordering::SeqCst);
        });

        let mut event = Event::new(CLICK, 1, EventData::None);
        event.stop_propagation();
        dispatcher.dispatch(&mut event);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        dispatcher.dispatch(&mut Event::new(CLICK, 1, EventData::None));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_subscription_outliving_dispatcher_is_harmless() {
        let dispatcher = EventDispatcher::new();
        let sub = dispatcher.register(WINDOW, SCROLL, |_| {});
        drop(dispatcher);
        drop(sub);
    }
}
