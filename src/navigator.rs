//! Navigator: route registry, path resolution, and the navigation state machine
//!
//! The [`Navigator`] owns the ordered route table, the single current
//! resolution, the registered slots, and the event listeners. Every public
//! operation runs to completion synchronously; there is no internal
//! parallelism, no queued work, and no locking - the navigator is entered by
//! one logical caller at a time.
//!
//! A navigation is a short synchronous state machine: resolve the destination,
//! announce the cancellable [`UrlChanging`] descriptor to listeners, and -
//! unless some listener cancelled - commit by updating the current resolution,
//! notifying every slot, and (for push navigations) writing one history entry
//! through the injected host.

#[cfg(feature = "cache")]
use crate::cache::ResolutionCache;
use crate::events::{EventHandler, EventKind, NavigatorEvent, UrlChanging};
use crate::host::{normalize_path, HostEnvironment, MemoryHost};
use crate::params::RouteParams;
use crate::route::{Route, RouteRef};
use crate::slot::SlotHandle;
use crate::{debug_log, trace_log, warn_log};
use std::collections::HashMap;
use std::sync::Arc;

/// The navigation engine root
///
/// Generic over the opaque view payload `V` and the injected host
/// environment `H`. The payload is never inspected; it is only handed to
/// slots as part of the resolution.
///
/// # Example
///
/// ```
/// use hash_navigator::{Navigator, Route};
///
/// let mut navigator: Navigator<&str> = Navigator::in_memory();
/// navigator.add_route(Route::new("/", "home"));
/// navigator.add_route(Route::new("/users/:id", "user"));
///
/// navigator.navigate("/users/7");
/// assert_eq!(navigator.current().map(|r| *r.view()), Some("user"));
/// ```
pub struct Navigator<V, H = MemoryHost> {
    /// Registered routes; insertion order is the only precedence rule
    routes: Vec<RouteRef<V>>,
    /// The route matching the most recently committed path
    current: Option<RouteRef<V>>,
    /// Registered display slots, in registration order
    slots: Vec<SlotHandle<V>>,
    /// Event handlers per event class, in registration order
    listeners: HashMap<EventKind, Vec<EventHandler<V>>>,
    /// Injected host environment (address source + history sink)
    host: H,
    /// Next history uniqueness token
    next_token: u64,
    #[cfg(feature = "cache")]
    cache: ResolutionCache<V>,
}

impl<V> Navigator<V, MemoryHost> {
    /// Create a navigator backed by an in-memory host positioned at `/`
    pub fn in_memory() -> Self {
        Self::new(MemoryHost::new())
    }
}

impl<V, H: HostEnvironment> Navigator<V, H> {
    /// Create a navigator with an injected host environment
    ///
    /// No resolution exists yet: the route table is empty, so the current
    /// resolution is computed lazily on the first route registration.
    pub fn new(host: H) -> Self {
        Self {
            routes: Vec::new(),
            current: None,
            slots: Vec::new(),
            listeners: HashMap::new(),
            host,
            next_token: 1,
            #[cfg(feature = "cache")]
            cache: ResolutionCache::new(),
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a single route, returning the shared handle
    ///
    /// The handle is what identity-based operations (`remove_routes`) work
    /// with, so callers that intend to unregister should keep it.
    pub fn add_route(&mut self, route: Route<V>) -> RouteRef<V> {
        let route = route.shared();
        self.add_routes(vec![route.clone()]);
        route
    }

    /// Register routes, appended in the given order
    ///
    /// Later-registered routes only win when no earlier route matches, so
    /// more specific routes must be registered before more general ones.
    /// If no current resolution exists yet, one is computed immediately from
    /// the host's observed path.
    pub fn add_routes(&mut self, routes: Vec<RouteRef<V>>) {
        for route in routes {
            trace_log!("Registering route '{}'", route.path());
            self.routes.push(route);
        }
        #[cfg(feature = "cache")]
        self.cache.clear();

        if self.current.is_none() {
            let path = self.observed_path();
            self.current = self.resolve_tracked(&ensure_trailing_slash(&path));
        }
    }

    /// Unregister routes by identity
    ///
    /// Removing a route that is not registered is a no-op for that route.
    /// Removing the route that is the current resolution does not clear the
    /// current resolution; the stale handle is retained until the next
    /// committed navigation.
    pub fn remove_routes(&mut self, routes: &[RouteRef<V>]) {
        for route in routes {
            self.routes.retain(|registered| !Arc::ptr_eq(registered, route));
        }
        #[cfg(feature = "cache")]
        self.cache.clear();
    }

    /// Register a display slot
    ///
    /// The slot is synchronously handed the current resolution, computing
    /// one from the host's observed path on demand, so a late-mounted slot
    /// never renders blank.
    pub fn add_slot(&mut self, slot: SlotHandle<V>) {
        if self.current.is_none() {
            let path = self.observed_path();
            self.current = self.resolve_tracked(&ensure_trailing_slash(&path));
        }
        slot.resolution_changed(self.current.as_ref());
        self.slots.push(slot);
    }

    /// Unregister a slot by identity
    pub fn remove_slot(&mut self, slot: &SlotHandle<V>) {
        self.slots.retain(|registered| !Arc::ptr_eq(registered, slot));
    }

    // ========================================================================
    // Event subscription
    // ========================================================================

    /// Subscribe a handler to an event class
    ///
    /// Handlers for the same class run in registration order.
    pub fn add_listener(&mut self, kind: EventKind, handler: EventHandler<V>) {
        self.listeners.entry(kind).or_default().push(handler);
    }

    /// Unsubscribe a handler by identity
    pub fn remove_listener(&mut self, kind: EventKind, handler: &EventHandler<V>) {
        if let Some(handlers) = self.listeners.get_mut(&kind) {
            handlers.retain(|registered| !Arc::ptr_eq(registered, handler));
        }
    }

    /// Subscribe to the pre-navigation event with a plain closure
    ///
    /// Returns the handler handle to pass to `remove_listener` later.
    ///
    /// # Example
    ///
    /// ```
    /// use hash_navigator::Navigator;
    ///
    /// let mut navigator: Navigator<()> = Navigator::in_memory();
    /// let handle = navigator.on_url_changing(|transition| {
    ///     if transition.destination.is_none() {
    ///         transition.cancel();
    ///     }
    /// });
    /// ```
    pub fn on_url_changing<F>(&mut self, f: F) -> EventHandler<V>
    where
        F: Fn(&mut UrlChanging<V>) + Send + Sync + 'static,
    {
        let handler: EventHandler<V> = Arc::new(move |event| {
            let NavigatorEvent::UrlChanging(transition) = event;
            f(transition);
        });
        self.add_listener(EventKind::UrlChanging, handler.clone());
        handler
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve a path to the first registered route that matches it
    ///
    /// The path is normalized by appending a trailing slash if missing, then
    /// the route table is scanned in registration order. Returns `None` when
    /// nothing matches; that is a signal, not a failure - callers wanting a
    /// graceful not-found presentation register a catch-all route last.
    pub fn resolve(&self, path: &str) -> Option<RouteRef<V>> {
        self.scan(&ensure_trailing_slash(path))
    }

    /// Compute the merged parameters for a path under a given resolution
    ///
    /// Re-runs the match and shallow-merges the route's static metadata with
    /// the freshly extracted parameters; parameters win on key collision.
    /// An empty extraction is treated as absent, and `None` is returned only
    /// when both metadata and parameters are absent.
    pub fn current_params(&self, path: &str, route: &RouteRef<V>) -> Option<RouteParams> {
        let normalized = ensure_trailing_slash(path);
        let extracted = route.matches(&normalized).filter(|params| !params.is_empty());

        match (route.metadata(), extracted) {
            (None, None) => None,
            (None, Some(params)) => Some(params),
            (Some(meta), None) => Some(RouteParams::from_map(meta.clone())),
            (Some(meta), Some(params)) => {
                let mut merged = meta.clone();
                for (key, value) in params.iter() {
                    merged.insert(key.clone(), value.clone());
                }
                Some(RouteParams::from_map(merged))
            }
        }
    }

    /// The route matching the most recently committed path, if any
    pub fn current(&self) -> Option<&RouteRef<V>> {
        self.current.as_ref()
    }

    /// All registered routes, in precedence order
    pub fn routes(&self) -> &[RouteRef<V>] {
        &self.routes
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Navigate to a url, pushing a history entry on commit
    pub fn navigate(&mut self, url: &str) {
        self.navigate_with(url, true);
    }

    /// Navigate to a url with explicit history behavior
    ///
    /// The destination is resolved (possibly to nothing - an unmatched
    /// destination is still announced so listeners can handle unknown
    /// routes), the `UrlChanging` descriptor is delivered to every listener
    /// in order with no short-circuit on cancel, and an uncancelled
    /// transition commits: current resolution, slot notification in
    /// registration order, and - when `push_history` - one history entry
    /// keyed by a monotonically distinct token. A cancelled transition
    /// mutates nothing.
    pub fn navigate_with(&mut self, url: &str, push_history: bool) {
        let normalized = ensure_trailing_slash(url);
        let destination = self.resolve_tracked(&normalized);
        if destination.is_none() {
            warn_log!("No route matched '{}'", normalized);
        }

        let mut event =
            NavigatorEvent::UrlChanging(UrlChanging::new(self.current.clone(), destination));
        self.dispatch(&mut event);

        let NavigatorEvent::UrlChanging(transition) = event;
        if transition.cancelled {
            debug_log!("Navigation to '{}' cancelled by listener", normalized);
            return;
        }

        self.current = transition.destination;
        for slot in &self.slots {
            slot.resolution_changed(self.current.as_ref());
        }

        if push_history {
            let token = self.next_token;
            self.next_token += 1;
            self.host.push_state(token, &normalized);
        }
        debug_log!("Committed navigation to '{}'", normalized);
    }

    /// Re-enter the state machine for a host-initiated history change
    ///
    /// Back/forward transitions were already recorded by the host, so no
    /// history entry is pushed. The raw fragment is normalized (hash strip,
    /// lowercase, `/` fallback) before resolution.
    pub fn handle_history_change(&mut self, raw_path: &str) {
        self.navigate_with(&normalize_path(raw_path), false);
    }

    // ========================================================================
    // Host access
    // ========================================================================

    /// The injected host environment
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host environment
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Resolution cache statistics
    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> &crate::cache::CacheStats {
        self.cache.stats()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// The host's current path, normalized for resolution
    fn observed_path(&self) -> String {
        normalize_path(&self.host.current_path())
    }

    /// Deliver an event to every registered handler of its class, in order
    fn dispatch(&self, event: &mut NavigatorEvent<V>) {
        if let Some(handlers) = self.listeners.get(&event.kind()) {
            for handler in handlers {
                handler(event);
            }
        }
    }

    /// First-match-wins linear scan over the route table
    fn scan(&self, normalized: &str) -> Option<RouteRef<V>> {
        self.routes
            .iter()
            .find(|route| route.matches(normalized).is_some())
            .cloned()
    }

    /// Resolution with cache bookkeeping; only successful matches are cached
    fn resolve_tracked(&mut self, normalized: &str) -> Option<RouteRef<V>> {
        #[cfg(feature = "cache")]
        if let Some(route) = self.cache.get(normalized) {
            return Some(route);
        }

        let found = self.scan(normalized);

        #[cfg(feature = "cache")]
        if let Some(route) = &found {
            self.cache.put(normalized.to_string(), route.clone());
        }

        found
    }
}

impl<V> Default for Navigator<V, MemoryHost> {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Append a trailing slash if missing
///
/// Resolution-time counterpart of the pattern trim rule: patterns and
/// candidate paths both end up slash-terminated before trimming, so
/// "/about" and "/about/" resolve identically.
fn ensure_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::slot_fn;
    use std::sync::Mutex;

    fn recording_slot(log: Arc<Mutex<Vec<Option<String>>>>) -> SlotHandle<&'static str> {
        Arc::new(slot_fn(move |resolution: Option<&RouteRef<&'static str>>| {
            log.lock()
                .unwrap()
                .push(resolution.map(|r| r.path().to_string()));
        }))
    }

    #[test]
    fn test_trailing_slash_normalization() {
        assert_eq!(ensure_trailing_slash("/about"), "/about/");
        assert_eq!(ensure_trailing_slash("/about/"), "/about/");
        assert_eq!(ensure_trailing_slash("/"), "/");
    }

    #[test]
    fn test_resolution_first_match_wins() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        let general = navigator.add_route(Route::new("/user/:id", "general"));
        let _specific = navigator.add_route(Route::new("/user/:id/:name", "specific"));

        // "/user/1/" has one payload segment: only the general route fits
        let resolved = navigator.resolve("/user/1/").unwrap();
        assert!(Arc::ptr_eq(&resolved, &general));

        // Registration order decides between structurally equivalent routes
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        let first = navigator.add_route(Route::new("/dup/:a", "first"));
        let _second = navigator.add_route(Route::new("/dup/:b", "second"));
        let resolved = navigator.resolve("/dup/x").unwrap();
        assert!(Arc::ptr_eq(&resolved, &first));
    }

    #[test]
    fn test_resolution_none_when_unmatched() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        navigator.add_route(Route::new("/about", "about"));

        assert!(navigator.resolve("/missing").is_none());
    }

    #[test]
    fn test_registration_bootstraps_current_resolution() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        assert!(navigator.current().is_none());

        // Host sits at "/" before any navigation
        let root = navigator.add_route(Route::new("/", "home"));
        assert!(Arc::ptr_eq(navigator.current().unwrap(), &root));
    }

    #[test]
    fn test_navigate_commits_state_slots_and_history() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        navigator.add_route(Route::new("/", "home"));
        let about = navigator.add_route(Route::new("/about", "about"));

        let log = Arc::new(Mutex::new(Vec::new()));
        navigator.add_slot(recording_slot(log.clone()));
        log.lock().unwrap().clear(); // Drop the registration delivery

        navigator.navigate("/about/");

        assert!(Arc::ptr_eq(navigator.current().unwrap(), &about));
        assert_eq!(*log.lock().unwrap(), vec![Some("/about".to_string())]);
        assert_eq!(navigator.host().len(), 2);
        assert_eq!(navigator.host().current_path(), "/about/");
    }

    #[test]
    fn test_cancelled_navigation_mutates_nothing() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        let home = navigator.add_route(Route::new("/", "home"));
        navigator.add_route(Route::new("/about", "about"));

        let log = Arc::new(Mutex::new(Vec::new()));
        navigator.add_slot(recording_slot(log.clone()));
        log.lock().unwrap().clear();

        navigator.on_url_changing(|transition| transition.cancel());
        navigator.navigate("/about");

        assert!(Arc::ptr_eq(navigator.current().unwrap(), &home));
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(navigator.host().len(), 1);
    }

    #[test]
    fn test_cancel_does_not_short_circuit_later_listeners() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        navigator.add_route(Route::new("/about", "about"));

        let order = Arc::new(Mutex::new(Vec::new()));

        let first = order.clone();
        navigator.on_url_changing(move |transition| {
            first.lock().unwrap().push("first");
            transition.cancel();
        });

        let second = order.clone();
        navigator.on_url_changing(move |transition| {
            second.lock().unwrap().push("second");
            assert!(transition.cancelled);
        });

        navigator.navigate("/about");
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_unmatched_destination_is_announced_and_committed() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        navigator.add_route(Route::new("/", "home"));

        let announced = Arc::new(Mutex::new(Vec::new()));
        let sink = announced.clone();
        navigator.on_url_changing(move |transition| {
            sink.lock()
                .unwrap()
                .push(transition.destination.as_ref().map(|r| r.path().to_string()));
        });

        navigator.navigate("/nowhere");

        assert_eq!(*announced.lock().unwrap(), vec![None]);
        // No implicit fallback: the commit carries the absent destination
        assert!(navigator.current().is_none());
    }

    #[test]
    fn test_listener_removal_by_identity() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        navigator.add_route(Route::new("/about", "about"));

        let handle = navigator.on_url_changing(|transition| transition.cancel());
        navigator.remove_listener(EventKind::UrlChanging, &handle);

        navigator.navigate("/about");
        assert!(navigator.current().is_some());
    }

    #[test]
    fn test_late_slot_registration_gets_current_resolution() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        navigator.add_route(Route::new("/", "home"));
        navigator.add_route(Route::new("/about", "about"));
        navigator.navigate("/about");

        let log = Arc::new(Mutex::new(Vec::new()));
        navigator.add_slot(recording_slot(log.clone()));

        assert_eq!(*log.lock().unwrap(), vec![Some("/about".to_string())]);
    }

    #[test]
    fn test_slot_registration_computes_resolution_on_demand() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        navigator.add_route(Route::new("/", "home"));

        // Force the lazy path: no resolution committed yet after construction
        let log = Arc::new(Mutex::new(Vec::new()));
        navigator.add_slot(recording_slot(log.clone()));

        assert_eq!(*log.lock().unwrap(), vec![Some("/".to_string())]);
    }

    #[test]
    fn test_slot_removal_by_identity() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        navigator.add_route(Route::new("/", "home"));
        navigator.add_route(Route::new("/about", "about"));

        let log = Arc::new(Mutex::new(Vec::new()));
        let slot = recording_slot(log.clone());
        navigator.add_slot(slot.clone());
        navigator.remove_slot(&slot);
        log.lock().unwrap().clear();

        navigator.navigate("/about");
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_slots_notified_in_registration_order() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        navigator.add_route(Route::new("/about", "about"));

        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in ["a", "b", "c"] {
            let sink = order.clone();
            navigator.add_slot(Arc::new(slot_fn(
                move |_: Option<&RouteRef<&'static str>>| {
                    sink.lock().unwrap().push(tag);
                },
            )));
        }
        order.lock().unwrap().clear(); // Registration deliveries

        navigator.navigate("/about");
        assert_eq!(*order.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_removing_current_route_keeps_stale_resolution() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        navigator.add_route(Route::new("/", "home"));
        let about = navigator.add_route(Route::new("/about", "about"));

        navigator.navigate("/about");
        navigator.remove_routes(&[about.clone()]);

        // Stale handle retained until the next committed navigation
        assert!(Arc::ptr_eq(navigator.current().unwrap(), &about));
        assert_eq!(navigator.routes().len(), 1);

        navigator.navigate("/");
        assert_eq!(navigator.current().unwrap().path(), "/");
    }

    #[test]
    fn test_remove_unregistered_route_is_noop() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        navigator.add_route(Route::new("/", "home"));

        let stranger = Route::new("/other", "other").shared();
        navigator.remove_routes(&[stranger]);
        assert_eq!(navigator.routes().len(), 1);
    }

    #[test]
    fn test_history_change_does_not_push() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        navigator.add_route(Route::new("/", "home"));
        navigator.add_route(Route::new("/about", "about"));

        navigator.navigate("/about");
        assert_eq!(navigator.host().len(), 2);

        // Host-driven back: replay without a new entry
        let back = navigator.host_mut().back().map(str::to_string).unwrap();
        navigator.handle_history_change(&back);

        assert_eq!(navigator.host().len(), 2);
        assert_eq!(navigator.current().unwrap().path(), "/");
    }

    #[test]
    fn test_history_change_normalizes_hash_fragments() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        navigator.add_route(Route::new("/about", "about"));

        navigator.handle_history_change("#/About");
        assert_eq!(navigator.current().unwrap().path(), "/about");
    }

    #[test]
    fn test_history_tokens_are_distinct() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        navigator.add_route(Route::new("/a", "a"));
        navigator.add_route(Route::new("/b", "b"));

        navigator.navigate("/a");
        navigator.navigate("/b");

        let tokens: Vec<u64> = navigator.host().entries().iter().map(|e| e.token).collect();
        assert_eq!(tokens.len(), 3);
        assert!(tokens.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_current_params_merges_meta_and_params() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        let route = navigator.add_route(
            Route::new("/users/:id", "user")
                .meta("title", "User")
                .meta("id", "meta-id"),
        );

        let params = navigator.current_params("/users/7", &route).unwrap();
        // Extracted parameters win on collision, metadata fills the rest
        assert_eq!(params.get("id"), Some(&"7".to_string()));
        assert_eq!(params.get("title"), Some(&"User".to_string()));
    }

    #[test]
    fn test_current_params_empty_extraction_is_absent() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        let plain = navigator.add_route(Route::new("/about", "about"));

        // No metadata and a zero-parameter match: absent, not an empty map
        assert!(navigator.current_params("/about", &plain).is_none());

        let with_meta = navigator.add_route(Route::new("/help", "help").meta("title", "Help"));
        let params = navigator.current_params("/help", &with_meta).unwrap();
        assert_eq!(params.get("title"), Some(&"Help".to_string()));
    }

    #[cfg(feature = "cache")]
    #[test]
    fn test_repeated_navigation_hits_cache() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        navigator.add_route(Route::new("/", "home"));
        navigator.add_route(Route::new("/about", "about"));

        navigator.navigate("/about");
        navigator.navigate("/about");

        assert!(navigator.cache_stats().hits >= 1);
    }

    #[cfg(feature = "cache")]
    #[test]
    fn test_registration_invalidates_cache() {
        let mut navigator: Navigator<&str> = Navigator::in_memory();
        navigator.add_route(Route::new("/users/:id", "general"));
        navigator.navigate("/users/7");

        // A new route table must not serve stale resolutions
        navigator.add_route(Route::new("/extra", "extra"));
        assert!(navigator.cache_stats().invalidations >= 1);
    }
}
