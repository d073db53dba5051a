//! Display slots
//!
//! A slot is a registered collaborator that renders whatever resolution it is
//! handed. The navigator pushes the current resolution to every slot when a
//! navigation commits, and to a newly registered slot immediately, so a
//! late-mounted slot never renders blank. What a slot does with the
//! resolution (mounting a component, updating a view region) is outside the
//! core's scope.
//!
//! # Example
//!
//! ```
//! use hash_navigator::{slot_fn, RouteSlot};
//!
//! let slot = slot_fn(|resolution: Option<&std::sync::Arc<hash_navigator::Route<&str>>>| {
//!     match resolution {
//!         Some(route) => println!("render {}", route.view()),
//!         None => println!("nothing to render"),
//!     }
//! });
//!
//! slot.resolution_changed(None);
//! ```

use crate::route::RouteRef;
use std::sync::Arc;

/// A display region that receives resolution changes
///
/// Delivery is synchronous callback invocation, not a scheduled task; a slot
/// that panics propagates to the navigation caller and aborts delivery to
/// the remaining slots.
pub trait RouteSlot<V>: Send + Sync {
    /// Called with the new current resolution after a committed navigation,
    /// and once at registration with whatever is current then
    fn resolution_changed(&self, resolution: Option<&RouteRef<V>>);

    /// Slot name for debugging
    fn name(&self) -> &str {
        "RouteSlot"
    }
}

/// Shared slot handle
///
/// Slots are registered and removed by identity (`Arc::ptr_eq`), so callers
/// keep a clone of the handle they registered.
pub type SlotHandle<V> = Arc<dyn RouteSlot<V>>;

/// Helper to create a slot from a closure
pub fn slot_fn<V, F>(f: F) -> FnSlot<F>
where
    F: Fn(Option<&RouteRef<V>>) + Send + Sync,
{
    FnSlot { f }
}

/// Slot created from a closure
pub struct FnSlot<F> {
    f: F,
}

impl<V, F> RouteSlot<V> for FnSlot<F>
where
    F: Fn(Option<&RouteRef<V>>) + Send + Sync,
{
    fn resolution_changed(&self, resolution: Option<&RouteRef<V>>) {
        (self.f)(resolution);
    }
}
