//! Navigator event types and subscription surface
//!
//! Events form a closed, typed set: one enum variant per event name instead
//! of string keys with untyped handlers, so handler signatures are checked at
//! compile time. Adding an event class means adding a variant here; the
//! navigator gives no event any special-cased behavior beyond dispatch.
//!
//! The only event today is [`UrlChanging`], the cancellable transition
//! descriptor delivered to listeners before a navigation commits.

use crate::route::RouteRef;
use std::fmt;
use std::sync::Arc;

/// Event classes understood by the navigator
///
/// Used as the subscription key: handlers are registered against a kind and
/// invoked, in registration order, for every event of that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Fired before a navigation commits; any listener may cancel it
    UrlChanging,
}

/// Transition descriptor for a pending navigation
///
/// Listeners receive this mutably and may set `cancelled`. Once set, later
/// listeners still run - there is no short-circuit - and the navigation
/// commits nothing.
///
/// # Example
///
/// ```
/// use hash_navigator::{EventKind, NavigatorEvent, UrlChanging};
///
/// let mut event: NavigatorEvent<()> = NavigatorEvent::UrlChanging(UrlChanging::new(None, None));
/// assert_eq!(event.kind(), EventKind::UrlChanging);
///
/// if let NavigatorEvent::UrlChanging(transition) = &mut event {
///     transition.cancel();
///     assert!(transition.cancelled);
/// }
/// ```
pub struct UrlChanging<V> {
    /// Set by any listener to veto the navigation
    pub cancelled: bool,
    /// The resolution being navigated away from (absent before the first
    /// committed navigation)
    pub source: Option<RouteRef<V>>,
    /// The resolution being navigated to; absent when no route matched the
    /// destination path, which is still announced so listeners can handle
    /// unknown routes
    pub destination: Option<RouteRef<V>>,
}

impl<V> UrlChanging<V> {
    /// Create a descriptor for a transition from `source` to `destination`
    pub fn new(source: Option<RouteRef<V>>, destination: Option<RouteRef<V>>) -> Self {
        Self {
            cancelled: false,
            source,
            destination,
        }
    }

    /// Veto the pending navigation
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }
}

impl<V> fmt::Debug for UrlChanging<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlChanging")
            .field("cancelled", &self.cancelled)
            .field("source", &self.source.as_ref().map(|r| r.path()))
            .field("destination", &self.destination.as_ref().map(|r| r.path()))
            .finish()
    }
}

/// Closed set of navigator events
#[derive(Debug)]
pub enum NavigatorEvent<V> {
    /// Pre-navigation transition descriptor
    UrlChanging(UrlChanging<V>),
}

impl<V> NavigatorEvent<V> {
    /// The event class this event belongs to
    pub fn kind(&self) -> EventKind {
        match self {
            Self::UrlChanging(_) => EventKind::UrlChanging,
        }
    }
}

/// Handler invoked synchronously with a mutable view of the event
///
/// Handlers are shared so callers can keep a clone for later removal;
/// removal compares by `Arc::ptr_eq`.
pub type EventHandler<V> = Arc<dyn Fn(&mut NavigatorEvent<V>) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;

    #[test]
    fn test_event_kind() {
        let event: NavigatorEvent<()> = NavigatorEvent::UrlChanging(UrlChanging::new(None, None));
        assert_eq!(event.kind(), EventKind::UrlChanging);
    }

    #[test]
    fn test_cancel_sets_flag() {
        let mut transition: UrlChanging<()> = UrlChanging::new(None, None);
        assert!(!transition.cancelled);

        transition.cancel();
        assert!(transition.cancelled);
    }

    #[test]
    fn test_debug_shows_paths_not_payloads() {
        struct Opaque;
        let destination = Route::new("/users/:id", Opaque).shared();
        let transition = UrlChanging::new(None, Some(destination));

        let rendered = format!("{:?}", transition);
        assert!(rendered.contains("/users/:id"));
    }
}
