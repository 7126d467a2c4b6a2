use std::sync::Arc;
use parking_lot::Mutex;
use ahash::AHashMap;

/// Dashboard-wide event bus
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<std::any::TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Common dashboard events
pub mod events {
    use super::Event;

    /// A view moved to another page
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct PageChanged {
        pub view_name: String,
        pub from_page: usize,
        pub to_page: usize,
        pub total_pages: usize,
    }

    /// A view changed its page size
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct PageSizeChanged {
        pub view_name: String,
        pub items_per_page: usize,
    }

    /// A view's page vanished after its dataset shrank
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct PageAutoCorrected {
        pub view_name: String,
        pub stale_page: usize,
        pub total_pages: usize,
    }

    /// A remote table snapshot arrived
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DatasetLoaded {
        pub table: String,
        pub row_count: usize,
    }

    /// A remote table could not be fetched
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DatasetLoadFailed {
        pub table: String,
        pub error: String,
    }

    // Implement Event trait for all event types
    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        PageChanged,
        PageSizeChanged,
        PageAutoCorrected,
        DatasetLoaded,
        DatasetLoadFailed
    );
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_default().push(handler);
    }

    /// Publish an event
    ///
    /// Handlers run without the lock held, so they may publish or subscribe
    /// on the same bus. While an event type is being dispatched its own
    /// handlers are out of the map and do not see nested events of that type.
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = std::any::TypeId::of::<E>();
        let mut event_handlers = match self.handlers.lock().get_mut(&type_id) {
            Some(event_handlers) => std::mem::take(event_handlers),
            None => return,
        };

        for handler in event_handlers.iter_mut() {
            handler.handle(&event);
        }

        // Put the handlers back ahead of any subscribed while they ran
        let mut handlers = self.handlers.lock();
        let slot = handlers.entry(type_id).or_default();
        event_handlers.append(slot);
        *slot = event_handlers;
    }

    /// Number of handlers registered for an event type
    pub fn handler_count<E: Event>(&self) -> usize {
        let type_id = std::any::TypeId::of::<E>();
        self.handlers.lock().get(&type_id).map_or(0, Vec::len)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper struct for creating event handlers from closures
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::events::{PageChanged, DatasetLoaded};

    #[test]
    fn test_publish_reaches_matching_subscribers() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bus.subscribe::<PageChanged>(handler_from_fn(move |event| {
            if let Some(change) = event.as_any().downcast_ref::<PageChanged>() {
                sink.lock().push(change.to_page);
            }
        }));

        bus.publish(PageChanged {
            view_name: "Clients".to_string(),
            from_page: 1,
            to_page: 2,
            total_pages: 3,
        });
        bus.publish(DatasetLoaded {
            table: "deudores".to_string(),
            row_count: 25,
        });

        assert_eq!(*seen.lock(), vec![2]);
        assert_eq!(bus.handler_count::<PageChanged>(), 1);
        assert_eq!(bus.handler_count::<DatasetLoaded>(), 0);
    }

    #[test]
    fn test_handler_can_publish_and_subscribe() {
        let bus = Arc::new(EventBus::new());
        let pages = Arc::new(Mutex::new(Vec::new()));

        let sink = pages.clone();
        bus.subscribe::<PageChanged>(handler_from_fn(move |event| {
            if let Some(change) = event.as_any().downcast_ref::<PageChanged>() {
                sink.lock().push(change.to_page);
            }
        }));

        let inner = bus.clone();
        bus.subscribe::<DatasetLoaded>(handler_from_fn(move |event| {
            if let Some(loaded) = event.as_any().downcast_ref::<DatasetLoaded>() {
                inner.publish(PageChanged {
                    view_name: loaded.table.clone(),
                    from_page: 3,
                    to_page: 1,
                    total_pages: 1,
                });
                inner.subscribe::<DatasetLoaded>(handler_from_fn(|_| {}));
            }
        }));

        bus.publish(DatasetLoaded {
            table: "deudores".to_string(),
            row_count: 5,
        });

        assert_eq!(*pages.lock(), vec![1]);
        // The original handler stays first, the one added meanwhile follows
        assert_eq!(bus.handler_count::<DatasetLoaded>(), 2);

        bus.publish(DatasetLoaded {
            table: "deudores".to_string(),
            row_count: 5,
        });
        assert_eq!(*pages.lock(), vec![1, 1]);
        assert_eq!(bus.handler_count::<DatasetLoaded>(), 3);
    }
}
