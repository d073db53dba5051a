//! Basic navigation demo
//!
//! Registers a small route table, attaches a printing slot and a vetoing
//! listener, and drives a few navigations through the in-memory host.
//!
//! Run with: `cargo run --example basic_navigation`

use hash_navigator::{slot_fn, Navigator, Route, RouteRef};
use std::sync::Arc;

fn main() {
    env_logger::init();

    let mut navigator: Navigator<&str> = Navigator::in_memory();
    navigator.add_route(Route::new("/", "home-view"));
    navigator.add_route(Route::new("/users", "user-list-view"));
    navigator.add_route(Route::new("/users/:id", "user-view").meta("title", "User"));

    navigator.add_slot(Arc::new(slot_fn(|resolution: Option<&RouteRef<&str>>| {
        match resolution {
            Some(route) => println!("[slot] rendering {}", route.view()),
            None => println!("[slot] nothing matched, rendering blank"),
        }
    })));

    println!("--- navigate to /users/7 ---");
    navigator.navigate("/users/7");
    if let Some(route) = navigator.current() {
        if let Some(params) = navigator.current_params("/users/7", route) {
            println!("[demo] params: id={:?} title={:?}", params.get("id"), params.get("title"));
        }
    }

    println!("--- veto navigation away from the user page ---");
    let veto = navigator.on_url_changing(|transition| {
        if transition.source.as_ref().map(|r| r.path()) == Some("/users/:id") {
            println!("[listener] cancelling transition");
            transition.cancel();
        }
    });
    navigator.navigate("/users");

    println!("--- remove the veto and retry ---");
    navigator.remove_listener(hash_navigator::EventKind::UrlChanging, &veto);
    navigator.navigate("/users");

    println!("--- host-driven back navigation ---");
    if let Some(path) = navigator.host_mut().back().map(str::to_string) {
        navigator.handle_history_change(&path);
    }

    println!("[demo] history entries: {:?}", navigator.host().entries());
}
