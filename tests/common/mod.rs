//! Shared fixtures for the integration tests.
//!
//! Routes mirror the Travel Link client: plan pages, the home page, and the
//! four account pages that can be opened as overlays.

#![allow(dead_code)]

use gpui::{div, IntoElement, ParentElement, TestAppContext};
use std::sync::Arc;
use travellink_navigator::*;

/// Leaf route rendering a label.
pub fn page(path: &str) -> Route {
    let label = path.to_string();
    Route::new(path, move |_, _, _| div().child(label.clone()).into_any_element())
}

/// Modal-capable leaf route.
pub fn modal_page(path: &str) -> Route {
    page(path).modal()
}

/// Parent route with plain leaf children.
pub fn parent_with_children(path: &str, children: &[&str]) -> Route {
    let children: Vec<Arc<Route>> = children.iter().map(|c| Arc::new(page(c))).collect();
    page(path).children(children)
}

/// The Travel Link route table.
pub fn travel_link_routes(router: &mut GlobalRouter) {
    router.add_route(page("/"));
    router.add_route(page("/home"));
    router.add_route(page("/plans"));
    router.add_route(page("/plan/:id").name("plan"));
    router.add_route(page("/faq"));
    router.add_route(modal_page("/login").name("login"));
    router.add_route(modal_page("/signup").name("signup"));
    router.add_route(modal_page("/forgot-password"));
    router.add_route(modal_page("/findusername"));
}

/// Install the Travel Link router.
pub fn init_travel_link(cx: &mut TestAppContext) {
    cx.update(|cx| init_router(cx, travel_link_routes));
}

/// Path rendered by the page layer.
pub fn page_path(cx: &mut TestAppContext) -> String {
    cx.read(|cx| cx.router().layers().page_location.path().to_string())
}

/// Path rendered inside the overlay, if one is open.
pub fn overlay_path(cx: &mut TestAppContext) -> Option<String> {
    cx.read(|cx| {
        cx.router()
            .layers()
            .overlay
            .as_ref()
            .map(|overlay| overlay.location.path().to_string())
    })
}

/// Path of the leaf route matched for the page layer.
pub fn page_route(cx: &mut TestAppContext) -> Option<String> {
    cx.read(|cx| {
        cx.router()
            .layers()
            .page
            .leaf()
            .map(|entry| entry.route.config.path.clone())
    })
}

pub fn is_scroll_locked(cx: &mut TestAppContext) -> bool {
    cx.read(|cx| cx.router().scroll_lock().is_locked())
}

/// Assert that route parameters contain the expected key-value pair.
pub fn assert_param_equals(params: &RouteParams, key: &str, expected: &str) {
    assert_eq!(
        params.get(key).map(String::as_str),
        Some(expected),
        "parameter '{key}'"
    );
}
