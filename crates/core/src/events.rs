//! Typed synchronous publish/subscribe
//!
//! An event registry is a struct holding one [`EventChannel`] per event; each
//! event is a marker type implementing [`Event`] that names its payload and
//! locates its channel. [`EventEmitter::emit`] runs every handler in
//! registration order before returning. Handlers are not isolated: a panic in
//! one propagates to the emitter.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

type Handler<P> = Arc<dyn Fn(&P) + Send + Sync>;

/// Handle returned by [`EventEmitter::on`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Ordered handler list for one event
pub struct EventChannel<P> {
    handlers: RwLock<Vec<(ListenerId, Handler<P>)>>,
}

impl<P> EventChannel<P> {
    pub fn new() -> Self {
        Self { handlers: RwLock::new(Vec::new()) }
    }

    fn subscribe(&self, id: ListenerId, handler: Handler<P>) {
        self.handlers.write().push((id, handler));
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    /// Invoke every handler with `payload`; returns how many ran.
    ///
    /// The handler list is snapshotted first so handlers may subscribe or
    /// unsubscribe without deadlocking.
    fn dispatch(&self, payload: &P) -> usize {
        let snapshot: Vec<Handler<P>> =
            self.handlers.read().iter().map(|(_, handler)| Arc::clone(handler)).collect();
        for handler in &snapshot {
            handler(payload);
        }
        snapshot.len()
    }

    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }
}

impl<P> Default for EventChannel<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for EventChannel<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel").field("listeners", &self.len()).finish()
    }
}

/// An event declared on registry `R`
pub trait Event<R> {
    type Payload;

    /// Wire-style event name, e.g. `statusUpdate`.
    const NAME: &'static str;

    fn channel(registry: &R) -> &EventChannel<Self::Payload>;
}

/// Typed `on` / `off` / `emit` over a registry of channels
pub struct EventEmitter<R> {
    registry: R,
    next_id: AtomicU64,
}

impl<R: Default> EventEmitter<R> {
    pub fn new() -> Self {
        Self { registry: R::default(), next_id: AtomicU64::new(1) }
    }
}

impl<R: Default> Default for EventEmitter<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> EventEmitter<R> {
    /// Register `handler` for event `E`.
    pub fn on<E, F>(&self, handler: F) -> ListenerId
    where
        E: Event<R>,
        F: Fn(&E::Payload) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        E::channel(&self.registry).subscribe(id, Arc::new(handler));
        trace!(event = E::NAME, listener = %id, "listener registered");
        id
    }

    /// Remove a handler; `false` when `id` was not registered for `E`.
    pub fn off<E: Event<R>>(&self, id: ListenerId) -> bool {
        E::channel(&self.registry).unsubscribe(id)
    }

    /// Synchronously deliver `payload` to every handler of `E`.
    pub fn emit<E: Event<R>>(&self, payload: &E::Payload) -> usize {
        let delivered = E::channel(&self.registry).dispatch(payload);
        trace!(event = E::NAME, delivered, "event emitted");
        delivered
    }

    pub fn listener_count<E: Event<R>>(&self) -> usize {
        E::channel(&self.registry).len()
    }
}

impl<R: fmt::Debug> fmt::Debug for EventEmitter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter").field("registry", &self.registry).finish()
    }
}

/// Declare an event registry struct together with its event marker types.
///
/// ```rust
/// use squarecloud_core::{define_events, EventEmitter};
///
/// define_events! {
///     pub struct DemoEvents {
///         pinged: Pinged("pinged") => u32,
///     }
/// }
///
/// let emitter = EventEmitter::<DemoEvents>::new();
/// emitter.on::<Pinged, _>(|n| assert_eq!(*n, 3));
/// assert_eq!(emitter.emit::<Pinged>(&3), 1);
/// ```
#[macro_export]
macro_rules! define_events {
    (
        $(#[$meta:meta])*
        $vis:vis struct $registry:ident {
            $($field:ident : $event:ident ( $name:literal ) => $payload:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        $vis struct $registry {
            $($field: $crate::events::EventChannel<$payload>,)+
        }

        $(
            #[doc = concat!("The `", $name, "` event")]
            #[derive(Debug, Clone, Copy)]
            $vis struct $event;

            impl $crate::events::Event<$registry> for $event {
                type Payload = $payload;

                const NAME: &'static str = $name;

                fn channel(registry: &$registry) -> &$crate::events::EventChannel<$payload> {
                    &registry.$field
                }
            }
        )+
    };
}
