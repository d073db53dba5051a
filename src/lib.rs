//! # Hash Navigator
//!
//! A client-side navigation engine for hash-addressed applications:
//!
//! - **Pattern Matching** - Segment-by-segment path templates with named
//!   parameters and percent-decoding
//! - **Registry** - Ordered route table with first-match-wins resolution
//! - **Navigation State Machine** - History-synchronized transitions with a
//!   cancellable pre-navigation event
//! - **Slots** - Display regions that are pushed the active resolution
//! - **Injected Host** - Address and history access behind a port, so the
//!   whole engine runs deterministically without a browser
//!
//! # Quick Start
//!
//! ```
//! use hash_navigator::{slot_fn, Navigator, Route, RouteRef};
//! use std::sync::Arc;
//!
//! let mut navigator: Navigator<&str> = Navigator::in_memory();
//! navigator.add_route(Route::new("/", "home-view"));
//! navigator.add_route(Route::new("/users/:id", "user-view").meta("title", "User"));
//!
//! navigator.add_slot(Arc::new(slot_fn(|resolution: Option<&RouteRef<&str>>| {
//!     if let Some(route) = resolution {
//!         // hand route.view() to the rendering layer
//!         let _ = route.view();
//!     }
//! })));
//!
//! navigator.navigate("/users/7");
//! assert_eq!(navigator.current().map(|r| *r.view()), Some("user-view"));
//! ```
//!
//! # Cancellation
//!
//! Every navigation announces a [`UrlChanging`] descriptor to its listeners
//! before anything is committed. Any listener may cancel; a cancelled
//! navigation leaves the resolution, the slots, and the history untouched:
//!
//! ```
//! use hash_navigator::{Navigator, Route};
//!
//! let mut navigator: Navigator<&str> = Navigator::in_memory();
//! navigator.add_route(Route::new("/", "home"));
//! navigator.add_route(Route::new("/admin", "admin"));
//!
//! navigator.on_url_changing(|transition| {
//!     if transition.destination.as_ref().map(|r| r.path()) == Some("/admin") {
//!         transition.cancel();
//!     }
//! });
//!
//! navigator.navigate("/admin");
//! assert_eq!(navigator.current().map(|r| *r.view()), Some("home"));
//! ```
//!
//! # Host Environment
//!
//! The navigator reads the current address and writes history entries through
//! the [`HostEnvironment`] port supplied at construction. [`MemoryHost`]
//! implements it with an in-process linear history stack; a browser embedding
//! would implement it over the location hash, feeding back/forward
//! notifications into [`Navigator::handle_history_change`].
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)
//! - `cache` (default) - LRU cache for route resolution

#![doc(html_root_url = "https://docs.rs/hash-navigator/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Cache (optional)
#[cfg(feature = "cache")]
pub mod cache;

// Core routing modules
pub mod events;
pub mod host;
pub mod navigator;
pub mod params;
pub mod pattern;
pub mod route;
pub mod slot;

// Re-export main types for convenient access
#[cfg(feature = "cache")]
pub use cache::{CacheStats, ResolutionCache};
pub use events::{EventHandler, EventKind, NavigatorEvent, UrlChanging};
pub use host::{normalize_path, HistoryEntry, HostEnvironment, MemoryHost};
pub use navigator::Navigator;
pub use params::RouteParams;
pub use pattern::{Pattern, Segment};
pub use route::{Route, RouteRef};
pub use slot::{slot_fn, FnSlot, RouteSlot, SlotHandle};
