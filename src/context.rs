//! Router context integration for GPUI.
//!
//! - [`GlobalRouter`]: the router stored as a GPUI `Global`. It owns the
//!   history, the route tree, and the [`ModalLayers`] resolved for the current
//!   location, and runs every navigation through the guard pipeline.
//! - [`Navigator`]: static helpers (`Navigator::push`, `Navigator::open_modal`,
//!   `Navigator::dismiss_modal`, …) that update the router through `cx` and
//!   refresh windows.
//! - [`NavigatorHandle`]: returned by [`Navigator::of`] for chained calls.
//!
//! ```ignore
//! use travellink_navigator::{init_router, Route};
//!
//! init_router(cx, |router| {
//!     router.add_route(Route::view("/plans", plan_list));
//!     router.add_route(Route::modal_component("/login", LoginPage::new));
//!     router.set_fallback_route("/home");
//! });
//! ```
//!
//! # Modal sessions
//!
//! [`GlobalRouter::open_modal`] pushes the target with an intent built by
//! [`NavigationIntent::modal_from`]: opened over the current page, or chained
//! with the background copied when a modal is already open. Each navigation
//! re-resolves the layers and takes or releases the page scroll lock to
//! match. [`GlobalRouter::dismiss_modal`] returns to the background of the
//! session.

use crate::error::{NavigationError, NavigationResult};
#[cfg(feature = "guard")]
use crate::guards::NavigationAction;
use crate::location::{trim_slashes, Location, NavigationIntent};
use crate::modal::{resolve_layers, ModalLayers};
use crate::resolve::{resolve_match_stack, MatchStack};
use crate::route::NamedRouteRegistry;
use crate::scroll_lock::{ScrollLock, ScrollLockGuard};
use crate::{debug_log, info_log, IntoRoute, Route, RouteParams, RouterState};
use gpui::{AnyView, App, BorrowAppContext, Global};
use std::borrow::BorrowMut;
use std::collections::HashMap;
#[cfg(feature = "guard")]
use std::sync::Arc;

/// Maximum redirect depth to prevent infinite redirect loops.
const MAX_REDIRECT_DEPTH: usize = 5;

// ============================================================================
// NavigationRequest
// ============================================================================

/// Navigation passed to guards.
///
/// ```
/// use travellink_navigator::NavigationRequest;
///
/// let request = NavigationRequest::new("/admin".to_string());
/// assert_eq!(request.to, "/admin");
/// assert!(!request.modal);
/// ```
pub struct NavigationRequest {
    pub from: Option<String>,
    pub to: String,
    /// Params of the target route, when it resolves.
    pub params: RouteParams,
    /// Target would be shown as an overlay.
    pub modal: bool,
}

impl NavigationRequest {
    pub fn new(to: String) -> Self {
        Self {
            from: None,
            to,
            params: RouteParams::new(),
            modal: false,
        }
    }

    pub fn with_from(to: String, from: String) -> Self {
        Self {
            from: Some(from),
            ..Self::new(to)
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: RouteParams) -> Self {
        self.params = params;
        self
    }
}

impl std::fmt::Debug for NavigationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationRequest")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("modal", &self.modal)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// GlobalRouter
// ============================================================================

/// Router state shared by every window.
pub struct GlobalRouter {
    state: RouterState,
    /// Page and overlay layers for the current location, resolved once per
    /// navigation.
    layers: ModalLayers,
    named_routes: NamedRouteRegistry,
    /// Entities created by `Route::component()` and `Route::modal_component()`.
    /// Kept across navigations so a page under an overlay keeps its state.
    component_cache: HashMap<String, AnyView>,
    /// Owned by the router, not by any `RouterView`. Closing the window that
    /// shows the overlay keeps it locked until the next navigation or
    /// `teardown_router`.
    scroll_lock: ScrollLock,
    /// Held while `layers` carries an overlay.
    overlay_hold: Option<ScrollLockGuard>,
    /// Target of `dismiss_modal` when there is nowhere to go back to.
    fallback_route: String,
}

impl GlobalRouter {
    pub fn new() -> Self {
        Self {
            state: RouterState::new(),
            layers: ModalLayers::default(),
            named_routes: NamedRouteRegistry::new(),
            component_cache: HashMap::new(),
            scroll_lock: ScrollLock::new(),
            overlay_hold: None,
            fallback_route: "/".to_string(),
        }
    }

    /// Register a route (and the names of its children) and re-resolve.
    pub fn add_route(&mut self, route: Route) {
        self.register_names(&route, "");
        info_log!(
            "Registered route '{}'{}",
            route.config.path,
            if route.is_modal() { " (modal)" } else { "" }
        );
        self.state.add_route(route);
        self.refresh_layers();
    }

    fn register_names(&mut self, route: &Route, parent: &str) {
        let full = join_paths(parent, &route.config.path);
        if let Some(name) = &route.config.name {
            debug_log!("Route name '{}' → '{}'", name, full);
            self.named_routes.register(name.clone(), full.clone());
        }
        for child in route.get_children() {
            self.register_names(child, &full);
        }
    }

    /// Set where `dismiss_modal` goes when history cannot help. Default `/`.
    pub fn set_fallback_route(&mut self, path: impl Into<String>) {
        self.fallback_route = path.into();
    }

    pub fn fallback_route(&self) -> &str {
        &self.fallback_route
    }

    /// Re-resolve the layers for the current location.
    fn refresh_layers(&mut self) {
        self.layers = resolve_layers(self.state.routes(), self.state.current_location());
        self.sync_scroll_lock();
    }

    fn sync_scroll_lock(&mut self) {
        match (self.layers.has_overlay(), self.overlay_hold.is_some()) {
            (true, false) => {
                debug_log!("Overlay mounted, page scroll locked");
                self.overlay_hold = Some(self.scroll_lock.acquire());
            }
            (false, true) => {
                debug_log!("Overlay unmounted, page scroll released");
                self.overlay_hold = None;
            }
            _ => {}
        }
    }

    // ========================================================================
    // Navigation pipeline
    // ========================================================================

    /// Push a plain page navigation.
    pub fn push(&mut self, path: String, cx: &App) -> NavigationResult {
        self.navigate(Location::new(path), cx, NavigateOp::Push, 0)
    }

    /// Push a location with its attached state.
    pub fn push_location(&mut self, location: Location, cx: &App) -> NavigationResult {
        self.navigate(location, cx, NavigateOp::Push, 0)
    }

    /// Replace the current entry with a plain page navigation.
    pub fn replace(&mut self, path: String, cx: &App) -> NavigationResult {
        self.navigate(Location::new(path), cx, NavigateOp::Replace, 0)
    }

    pub fn replace_location(&mut self, location: Location, cx: &App) -> NavigationResult {
        self.navigate(location, cx, NavigateOp::Replace, 0)
    }

    /// Open `path` as a modal from the current location.
    ///
    /// From a page this starts a modal session over it. From a modal the
    /// session's background is carried over unchanged.
    pub fn open_modal(&mut self, path: String, cx: &App) -> NavigationResult {
        let intent = if self.layers.has_overlay() {
            NavigationIntent::modal_from(self.current_location())
        } else {
            NavigationIntent::open_over(&self.layers.page_location)
        };
        self.push_location(Location::with_intent(path, intent), cx)
    }

    /// Go back one entry, checking guards on the target.
    pub fn back(&mut self, cx: &App) -> Option<NavigationResult> {
        self.back_by(1, cx)
    }

    /// Go back `steps` entries. `None` if history is too short.
    pub fn back_by(&mut self, steps: usize, cx: &App) -> Option<NavigationResult> {
        if steps == 0 {
            return None;
        }
        let target = self.state.peek_back(steps)?.clone();
        Some(self.navigate(target, cx, NavigateOp::Back(steps), 0))
    }

    pub fn forward(&mut self, cx: &App) -> Option<NavigationResult> {
        let target = self.state.peek_forward()?.clone();
        Some(self.navigate(target, cx, NavigateOp::Forward, 0))
    }

    /// Close the overlay and return to the page underneath.
    ///
    /// In a modal session, history is rewound past every entry of the session
    /// when the entry before it is the background; otherwise the current entry
    /// is replaced with the background. Outside a session this goes back one
    /// entry, or replaces the current entry with the fallback route when there
    /// is no history.
    pub fn dismiss_modal(&mut self, cx: &App) -> NavigationResult {
        let current = self.current_location().clone();
        let background = self
            .layers
            .overlay
            .as_ref()
            .and_then(|_| current.background());

        let Some(background) = background else {
            if let Some(result) = self.back(cx) {
                return result;
            }
            info_log!(
                "Nothing to go back to from '{}', using fallback '{}'",
                current.path(),
                self.fallback_route
            );
            let fallback = Location::new(self.fallback_route.clone());
            return self.replace_location(fallback, cx);
        };

        let mut steps = 1;
        while self
            .state
            .peek_back(steps)
            .is_some_and(|entry| entry.same_session(&current))
        {
            steps += 1;
        }

        if self.state.peek_back(steps) == Some(background) {
            info_log!("Dismissing '{}', back {} entries", current, steps);
            if let Some(result) = self.back_by(steps, cx) {
                return result;
            }
        }

        info_log!(
            "Dismissing '{}', background not in history, replacing",
            current
        );
        self.replace_location(background.clone(), cx)
    }

    fn navigate(
        &mut self,
        location: Location,
        cx: &App,
        op: NavigateOp,
        redirect_depth: usize,
    ) -> NavigationResult {
        if redirect_depth >= MAX_REDIRECT_DEPTH {
            crate::error_log!(
                "Redirect loop detected (depth {}) navigating to '{}'",
                redirect_depth,
                location.path()
            );
            return NavigationResult::Blocked {
                reason: format!(
                    "Redirect loop detected (depth {redirect_depth}): target '{}'",
                    location.path()
                ),
                redirect: None,
            };
        }

        let from = self.current_path().to_string();
        info_log!("Navigation {:?}: '{}' → '{}'", op, from, location);

        let target = resolve_match_stack(self.state.routes(), location.path());
        let mut request = NavigationRequest::with_from(location.path().to_string(), from)
            .with_params(target.params());
        request.modal = location.is_modal();

        #[cfg(feature = "guard")]
        {
            match self.run_guards(cx, &request) {
                NavigationAction::Continue => {}
                NavigationAction::Deny { reason } => {
                    crate::warn_log!("Navigation to '{}' blocked: {}", location.path(), reason);
                    return NavigationResult::Blocked {
                        reason,
                        redirect: None,
                    };
                }
                NavigationAction::Redirect { to, reason } => {
                    debug_log!(
                        "Guard redirecting '{}' → '{}': {:?}",
                        location.path(),
                        to,
                        reason
                    );
                    let keeps_overlay = resolve_match_stack(self.state.routes(), &to)
                        .leaf()
                        .is_some_and(|entry| entry.route.is_modal());
                    let redirected = match location.intent() {
                        Some(intent) if keeps_overlay => Location::with_intent(to, intent.clone()),
                        _ => Location::new(to),
                    };
                    return self.navigate(redirected, cx, NavigateOp::Push, redirect_depth + 1);
                }
            }
        }
        #[cfg(not(feature = "guard"))]
        let _ = cx;

        // A modal intent that cannot produce an overlay is not kept in history,
        // so later modal links capture the page actually shown.
        let location = if location.intent().is_some_and(|intent| intent.modal)
            && !resolve_layers(self.state.routes(), &location).has_overlay()
        {
            debug_log!("'{}' renders as a page, dropping its modal intent", location.path());
            location.without_intent()
        } else {
            location
        };

        let event = match op {
            NavigateOp::Push => Some(self.state.push(location)),
            NavigateOp::Replace => Some(self.state.replace(location)),
            NavigateOp::Back(steps) => self.state.back_by(steps),
            NavigateOp::Forward => self.state.forward(),
        };
        let Some(event) = event else {
            return NavigationResult::Error(NavigationError::HistoryExhausted);
        };

        self.refresh_layers();

        info_log!(
            "Navigation complete: '{}' (page depth {}, overlay: {})",
            event.to,
            self.layers.page.len(),
            self.layers.has_overlay()
        );

        let path = event.to.path().to_string();
        if self.layers.page.is_empty() && !self.layers.has_overlay() {
            NavigationResult::NotFound { path }
        } else {
            NavigationResult::Success { path }
        }
    }

    /// Run guards of every route on the way to the target, highest priority first.
    #[cfg(feature = "guard")]
    fn run_guards(&self, cx: &App, request: &NavigationRequest) -> NavigationAction {
        let path = trim_slashes(&request.to);
        let mut guards: Vec<&dyn crate::guards::RouteGuard> = Vec::new();

        for route in self.state.routes() {
            walk_matching_routes(route, path, "", &mut |r| {
                for guard in &r.guards {
                    guards.push(guard.as_ref());
                }
            });
        }
        guards.sort_by_key(|guard| std::cmp::Reverse(guard.priority()));

        debug_log!("Collected {} guards for '{}'", guards.len(), request.to);

        for guard in guards {
            let result = guard.check(cx, request);
            crate::trace_log!(
                "Guard '{}' (priority {}) → {:?}",
                guard.name(),
                guard.priority(),
                result
            );
            if !result.is_continue() {
                return result;
            }
        }

        NavigationAction::Continue
    }

    // ========================================================================
    // Named routes
    // ========================================================================

    /// Push the route registered under `name`.
    pub fn push_named(&mut self, name: &str, params: &RouteParams, cx: &App) -> NavigationResult {
        match self.named_routes.url_for(name, params) {
            Some(url) => {
                debug_log!("Named route '{}' resolved to '{}'", name, url);
                self.push(url, cx)
            }
            None => {
                crate::warn_log!("Cannot build URL for named route '{}'", name);
                NavigationResult::Error(NavigationError::UnknownNamedRoute {
                    name: name.to_string(),
                })
            }
        }
    }

    pub fn url_for(&self, name: &str, params: &RouteParams) -> Option<String> {
        self.named_routes.url_for(name, params)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn current_location(&self) -> &Location {
        self.state.current_location()
    }

    pub fn current_path(&self) -> &str {
        self.state.current_path()
    }

    /// Page and overlay layers for the current location.
    pub fn layers(&self) -> &ModalLayers {
        &self.layers
    }

    /// Route chain rendered in the page layer.
    pub fn match_stack(&self) -> &MatchStack {
        &self.layers.page
    }

    /// `true` while the overlay layer is shown.
    pub fn has_overlay(&self) -> bool {
        self.layers.has_overlay()
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }

    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.state.can_go_forward()
    }

    pub fn state(&self) -> &RouterState {
        &self.state
    }

    // ========================================================================
    // Component cache
    // ========================================================================

    pub fn get_cached_component(&self, key: &str) -> Option<&AnyView> {
        self.component_cache.get(key)
    }

    pub fn cache_component(&mut self, key: String, view: AnyView) {
        self.component_cache.insert(key, view);
    }
}

impl Default for GlobalRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Global for GlobalRouter {}

fn join_paths(parent: &str, child: &str) -> String {
    let parent = trim_slashes(parent);
    let child = trim_slashes(child);
    match (parent.is_empty(), child.is_empty()) {
        (true, _) => format!("/{child}"),
        (false, true) => format!("/{parent}"),
        (false, false) => format!("/{parent}/{child}"),
    }
}

// ============================================================================
// Guard collection
// ============================================================================

/// Call `visitor` on each route whose accumulated path is a prefix of
/// `target_path`, descending into children.
#[cfg(feature = "guard")]
fn walk_matching_routes<'a>(
    route: &'a Arc<Route>,
    target_path: &str,
    accumulated: &str,
    visitor: &mut dyn FnMut(&'a Route),
) {
    let route_path = trim_slashes(&route.config.path);
    let full = match (accumulated.is_empty(), route_path.is_empty()) {
        (true, _) => route_path.to_string(),
        (false, true) => accumulated.to_string(),
        (false, false) => format!("{accumulated}/{route_path}"),
    };

    if !full.is_empty() && !path_matches_prefix(target_path, &full) {
        return;
    }

    visitor(route);

    for child in route.get_children() {
        walk_matching_routes(child, target_path, &full, visitor);
    }
}

/// `true` if `prefix` matches the leading segments of `path` (`:param` matches any).
#[cfg(feature = "guard")]
fn path_matches_prefix(path: &str, prefix: &str) -> bool {
    let path_segs: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let prefix_segs: Vec<&str> = prefix.split('/').filter(|s| !s.is_empty()).collect();

    if path_segs.len() < prefix_segs.len() {
        return false;
    }

    path_segs
        .iter()
        .zip(&prefix_segs)
        .all(|(segment, pattern)| pattern.starts_with(':') || segment == pattern)
}

#[derive(Debug, Clone, Copy)]
enum NavigateOp {
    Push,
    Replace,
    Back(usize),
    Forward,
}

// ============================================================================
// UseRouter / init
// ============================================================================

/// Access the global router from `App`.
pub trait UseRouter {
    fn router(&self) -> &GlobalRouter;

    fn update_router<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut GlobalRouter, &mut App) -> R;
}

impl UseRouter for App {
    fn router(&self) -> &GlobalRouter {
        self.global::<GlobalRouter>()
    }

    fn update_router<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut GlobalRouter, &mut App) -> R,
    {
        self.update_global(f)
    }
}

/// Install the global router, configured by `configure`.
pub fn init_router<F>(cx: &mut App, configure: F)
where
    F: FnOnce(&mut GlobalRouter),
{
    let mut router = GlobalRouter::new();
    configure(&mut router);
    cx.set_global(router);
}

/// Remove the global router. Releases the scroll lock if an overlay was open.
pub fn teardown_router(cx: &mut App) {
    if cx.has_global::<GlobalRouter>() {
        let router = cx.remove_global::<GlobalRouter>();
        info_log!("Router torn down at '{}'", router.current_location());
    }
}

// ============================================================================
// NavigatorHandle
// ============================================================================

/// Handle returned by [`Navigator::of`] for chained navigation.
///
/// ```ignore
/// Navigator::of(cx).push("/plans").open_modal("/signup");
/// ```
pub struct NavigatorHandle<'a, C: BorrowAppContext> {
    cx: &'a mut C,
}

impl<C: BorrowAppContext + BorrowMut<App>> NavigatorHandle<'_, C> {
    pub fn push(self, route: impl IntoRoute) -> Self {
        Navigator::push(self.cx, route);
        self
    }

    pub fn replace(self, route: impl IntoRoute) -> Self {
        Navigator::replace(self.cx, route);
        self
    }

    pub fn open_modal(self, route: impl IntoRoute) -> Self {
        Navigator::open_modal(self.cx, route);
        self
    }

    pub fn dismiss_modal(self) -> Self {
        Navigator::dismiss_modal(self.cx);
        self
    }

    pub fn pop(self) -> Self {
        Navigator::pop(self.cx);
        self
    }

    pub fn forward(self) -> Self {
        Navigator::forward(self.cx);
        self
    }
}

// ============================================================================
// Navigator
// ============================================================================

/// Navigation helpers that update the global router and refresh windows.
///
/// ```ignore
/// use travellink_navigator::Navigator;
///
/// Navigator::push(cx, "/plans");
/// Navigator::open_modal(cx, "/login");   // overlay over /plans
/// Navigator::open_modal(cx, "/signup");  // still over /plans
/// Navigator::dismiss_modal(cx);          // back to /plans
/// ```
pub struct Navigator;

impl Navigator {
    pub fn of<C: BorrowAppContext + BorrowMut<App>>(cx: &mut C) -> NavigatorHandle<'_, C> {
        NavigatorHandle { cx }
    }

    fn update<R>(
        cx: &mut (impl BorrowAppContext + BorrowMut<App>),
        f: impl FnOnce(&mut GlobalRouter, &App) -> R,
    ) -> R {
        let result = cx.update_global::<GlobalRouter, _>(|router, cx| {
            let app: &App = cx.borrow_mut();
            f(router, app)
        });
        cx.borrow_mut().refresh_windows();
        result
    }

    /// Navigate to a page.
    pub fn push(
        cx: &mut (impl BorrowAppContext + BorrowMut<App>),
        route: impl IntoRoute,
    ) -> NavigationResult {
        let descriptor = route.into_route();
        Self::update(cx, |router, cx| router.push(descriptor.path, cx))
    }

    /// Navigate to a location, keeping its state.
    pub fn push_location(
        cx: &mut (impl BorrowAppContext + BorrowMut<App>),
        location: Location,
    ) -> NavigationResult {
        Self::update(cx, |router, cx| router.push_location(location, cx))
    }

    /// Replace the current entry.
    pub fn replace(
        cx: &mut (impl BorrowAppContext + BorrowMut<App>),
        route: impl IntoRoute,
    ) -> NavigationResult {
        let descriptor = route.into_route();
        Self::update(cx, |router, cx| router.replace(descriptor.path, cx))
    }

    /// Open a modal route over the current page, or chain from the open modal.
    pub fn open_modal(
        cx: &mut (impl BorrowAppContext + BorrowMut<App>),
        route: impl IntoRoute,
    ) -> NavigationResult {
        let descriptor = route.into_route();
        Self::update(cx, |router, cx| router.open_modal(descriptor.path, cx))
    }

    /// Close the overlay. See [`GlobalRouter::dismiss_modal`].
    pub fn dismiss_modal(cx: &mut (impl BorrowAppContext + BorrowMut<App>)) -> NavigationResult {
        Self::update(cx, GlobalRouter::dismiss_modal)
    }

    /// Go back one entry. `None` at the start of history.
    pub fn pop(cx: &mut (impl BorrowAppContext + BorrowMut<App>)) -> Option<NavigationResult> {
        Self::update(cx, GlobalRouter::back)
    }

    /// Alias for [`pop`](Navigator::pop).
    pub fn back(cx: &mut (impl BorrowAppContext + BorrowMut<App>)) -> Option<NavigationResult> {
        Self::pop(cx)
    }

    pub fn forward(cx: &mut (impl BorrowAppContext + BorrowMut<App>)) -> Option<NavigationResult> {
        Self::update(cx, GlobalRouter::forward)
    }

    pub fn current_path(cx: &App) -> String {
        cx.global::<GlobalRouter>().current_path().to_string()
    }

    pub fn current_location(cx: &App) -> Location {
        cx.global::<GlobalRouter>().current_location().clone()
    }

    /// `true` while the overlay layer is shown.
    pub fn is_modal_open(cx: &App) -> bool {
        cx.try_global::<GlobalRouter>()
            .is_some_and(GlobalRouter::has_overlay)
    }

    pub fn can_pop(cx: &App) -> bool {
        cx.global::<GlobalRouter>().can_go_back()
    }

    pub fn can_go_back(cx: &App) -> bool {
        Self::can_pop(cx)
    }

    pub fn can_go_forward(cx: &App) -> bool {
        cx.global::<GlobalRouter>().can_go_forward()
    }

    /// Navigate to a named route.
    pub fn push_named(
        cx: &mut (impl BorrowAppContext + BorrowMut<App>),
        name: &str,
        params: &RouteParams,
    ) -> NavigationResult {
        Self::update(cx, |router, cx| router.push_named(name, params, cx))
    }

    pub fn url_for(cx: &App, name: &str, params: &RouteParams) -> Option<String> {
        cx.global::<GlobalRouter>().url_for(name, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpui::{IntoElement, TestAppContext};

    fn page(path: &str) -> Route {
        Route::new(path, |_, _cx, _params| gpui::div().into_any_element())
    }

    #[gpui::test]
    fn test_nav_push(cx: &mut TestAppContext) {
        cx.update(|cx| {
            init_router(cx, |router| {
                router.add_route(page("/"));
                router.add_route(page("/plans"));
                router.add_route(page("/plan/:id"));
            });
        });

        assert_eq!(cx.read(Navigator::current_path), "/");

        cx.update(|cx| Navigator::push(cx, "/plans"));
        assert_eq!(cx.read(Navigator::current_path), "/plans");

        let result = cx.update(|cx| Navigator::push(cx, "/plan/12"));
        assert!(result.is_success());
        assert_eq!(cx.read(Navigator::current_path), "/plan/12");
    }

    #[gpui::test]
    fn test_nav_back_forward(cx: &mut TestAppContext) {
        cx.update(|cx| {
            init_router(cx, |router| {
                router.add_route(page("/"));
                router.add_route(page("/about"));
                router.add_route(page("/faq"));
            });
        });

        cx.update(|cx| {
            Navigator::push(cx, "/about");
            Navigator::push(cx, "/faq");
        });
        assert!(cx.read(Navigator::can_pop));

        cx.update(|cx| Navigator::pop(cx));
        assert_eq!(cx.read(Navigator::current_path), "/about");
        assert!(cx.read(Navigator::can_go_forward));

        cx.update(|cx| Navigator::forward(cx));
        assert_eq!(cx.read(Navigator::current_path), "/faq");
        assert!(!cx.read(Navigator::can_go_forward));
    }

    #[gpui::test]
    fn test_pop_at_start_is_none(cx: &mut TestAppContext) {
        cx.update(|cx| init_router(cx, |router| router.add_route(page("/"))));
        assert!(cx.update(|cx| Navigator::pop(cx)).is_none());
        assert!(!cx.read(Navigator::can_go_back));
    }

    #[gpui::test]
    fn test_unmatched_path_is_not_found(cx: &mut TestAppContext) {
        cx.update(|cx| init_router(cx, |router| router.add_route(page("/"))));
        let result = cx.update(|cx| Navigator::push(cx, "/nowhere"));
        assert!(result.is_not_found());
        assert_eq!(cx.read(Navigator::current_path), "/nowhere");
    }

    #[gpui::test]
    fn test_navigator_of_style(cx: &mut TestAppContext) {
        cx.update(|cx| {
            init_router(cx, |router| {
                router.add_route(page("/"));
                router.add_route(page("/home"));
                router.add_route(page("/contact"));
            });
        });

        cx.update(|cx| {
            Navigator::of(cx).push("/home").push("/contact").pop();
        });
        assert_eq!(cx.read(Navigator::current_path), "/home");

        cx.update(|cx| {
            Navigator::of(cx).replace("/contact");
        });
        assert_eq!(cx.read(Navigator::current_path), "/contact");

        cx.update(|cx| {
            Navigator::of(cx).pop();
        });
        assert_eq!(cx.read(Navigator::current_path), "/");
    }

    #[gpui::test]
    fn test_named_child_route(cx: &mut TestAppContext) {
        cx.update(|cx| {
            init_router(cx, |router| {
                router.add_route(page("/"));
                router.add_route(
                    page("/plans/:id").child(page("apply").name("plan-apply").into()),
                );
            });
        });

        let params: RouteParams = [("id", "5")].into_iter().collect();
        assert_eq!(
            cx.read(|cx| Navigator::url_for(cx, "plan-apply", &params)),
            Some("/plans/5/apply".to_string())
        );

        cx.update(|cx| Navigator::push_named(cx, "plan-apply", &params));
        assert_eq!(cx.read(Navigator::current_path), "/plans/5/apply");

        let result = cx.update(|cx| Navigator::push_named(cx, "missing", &params));
        assert!(result.is_error());
    }

    #[gpui::test]
    fn test_teardown_router(cx: &mut TestAppContext) {
        cx.update(|cx| init_router(cx, |router| router.add_route(page("/"))));
        cx.update(teardown_router);
        assert!(!cx.read(Navigator::is_modal_open));
        cx.update(teardown_router);
    }

    // ========================================================================
    // Guards
    // ========================================================================

    #[gpui::test]
    #[cfg(feature = "guard")]
    fn test_guard_redirects(cx: &mut TestAppContext) {
        use crate::AuthGuard;

        cx.update(|cx| {
            init_router(cx, |router| {
                router.add_route(page("/"));
                router.add_route(page("/PlanList").guard(AuthGuard::new(|_| false, "/login")));
                router.add_route(page("/login"));
            });
        });

        cx.update(|cx| Navigator::push(cx, "/PlanList"));
        assert_eq!(cx.read(Navigator::current_path), "/login");
    }

    #[gpui::test]
    #[cfg(feature = "guard")]
    fn test_guard_denies(cx: &mut TestAppContext) {
        use crate::guard_fn;

        cx.update(|cx| {
            init_router(cx, |router| {
                router.add_route(page("/"));
                router.add_route(
                    page("/admin").guard(guard_fn(|_, _| NavigationAction::deny("No access"))),
                );
            });
        });

        let result = cx.update(|cx| Navigator::push(cx, "/admin"));
        assert!(result.is_blocked());
        assert_eq!(cx.read(Navigator::current_path), "/");
    }

    #[gpui::test]
    #[cfg(feature = "guard")]
    fn test_parent_guard_blocks_child(cx: &mut TestAppContext) {
        use crate::AuthGuard;

        cx.update(|cx| {
            init_router(cx, |router| {
                router.add_route(page("/"));
                router.add_route(
                    page("/plan/:id")
                        .guard(AuthGuard::new(|_| false, "/login"))
                        .child(page("participants").into()),
                );
                router.add_route(page("/login"));
            });
        });

        cx.update(|cx| Navigator::push(cx, "/plan/3/participants"));
        assert_eq!(cx.read(Navigator::current_path), "/login");
    }

    #[gpui::test]
    #[cfg(feature = "guard")]
    fn test_redirect_loop_protection(cx: &mut TestAppContext) {
        use crate::guard_fn;

        cx.update(|cx| {
            init_router(cx, |router| {
                router.add_route(page("/"));
                router.add_route(page("/a").guard(guard_fn(|_, _| NavigationAction::redirect("/b"))));
                router.add_route(page("/b").guard(guard_fn(|_, _| NavigationAction::redirect("/a"))));
            });
        });

        let result = cx.update(|cx| Navigator::push(cx, "/a"));
        assert!(result.is_blocked());
        assert_eq!(cx.read(Navigator::current_path), "/");
    }

    #[test]
    #[cfg(feature = "guard")]
    fn test_path_matches_prefix() {
        assert!(path_matches_prefix("plan/3", "plan/:id"));
        assert!(path_matches_prefix("plan/3/participants", "plan/:id"));
        assert!(!path_matches_prefix("plans", "plan/:id"));
        assert!(!path_matches_prefix("other", "admin"));
    }

    #[test]
    fn test_join_paths() {
        assert_eq!(join_paths("", "/"), "/");
        assert_eq!(join_paths("/", "home"), "/home");
        assert_eq!(join_paths("/plans/:id", "apply"), "/plans/:id/apply");
        assert_eq!(join_paths("/admin", ""), "/admin");
    }
}
