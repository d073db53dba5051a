//! Route definition
//!
//! A [`Route`] binds a compiled [`Pattern`] to an opaque view payload and
//! optional static metadata. The navigator never inspects, invokes, or
//! compares the payload; it only hands it back to slots when the route
//! becomes the current resolution.

use crate::params::RouteParams;
use crate::pattern::Pattern;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared route handle.
///
/// Routes are registered, resolved, and unregistered through `Arc<Route<V>>`
/// so that identity comparison (`Arc::ptr_eq`) is well defined. Two routes
/// registered from the same path template are still distinct handles.
pub type RouteRef<V> = Arc<Route<V>>;

/// A registered route: pattern, view payload, and optional metadata
///
/// # Example
///
/// ```
/// use hash_navigator::Route;
///
/// let route = Route::new("/users/:id", "user-page")
///     .meta("title", "User");
///
/// assert_eq!(route.path(), "/users/:id");
/// assert_eq!(route.view(), &"user-page");
/// assert!(route.matches("/users/7").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Route<V> {
    /// Compiled path template
    pattern: Pattern,
    /// Opaque payload delivered to slots on match
    view: V,
    /// Static key/value data merged into extracted parameters at resolution
    /// time; absent is distinct from an empty map
    meta: Option<HashMap<String, String>>,
}

impl<V> Route<V> {
    /// Create a route from a path template and a view payload
    pub fn new(path: impl Into<String>, view: V) -> Self {
        Self {
            pattern: Pattern::compile(path),
            view,
            meta: None,
        }
    }

    /// Add a metadata entry (builder style)
    ///
    /// Metadata is static data attached to the route. At resolution time it
    /// is overlaid by freshly extracted parameters, which win on key
    /// collision.
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replace the metadata map wholesale
    pub fn with_meta(mut self, meta: HashMap<String, String>) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Wrap this route in the shared handle used for registration
    pub fn shared(self) -> RouteRef<V> {
        Arc::new(self)
    }

    /// The path template this route was registered with
    pub fn path(&self) -> &str {
        self.pattern.raw()
    }

    /// The compiled pattern
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The opaque view payload
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The static metadata, if any was attached
    pub fn metadata(&self) -> Option<&HashMap<String, String>> {
        self.meta.as_ref()
    }

    /// Match a concrete path against this route's pattern
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        self.pattern.matches(path)
    }
}
