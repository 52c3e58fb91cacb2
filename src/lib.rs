//! # travellink-navigator
//!
//! Navigation for the Travel Link desktop client, built on [GPUI](https://gpui.rs).
//!
//! Besides ordinary history navigation with nested routes, parameters, named
//! routes and guards, the router supports **background-preserving modals**:
//! routes such as `/login` or `/signup` can be opened as an overlay card on top
//! of the page that was visible before, which stays rendered underneath.
//!
//! ```ignore
//! use gpui::*;
//! use travellink_navigator::*;
//!
//! init_router(cx, |router| {
//!     router.add_route(Route::view("/plans", plan_list));
//!     router.add_route(Route::modal_component("/login", LoginPage::new));
//!     router.add_route(Route::modal_component("/signup", SignupPage::new).overlay_width(px(560.)));
//! });
//!
//! Navigator::push(cx, "/plans");
//! Navigator::open_modal(cx, "/signup");  // /plans stays visible, scroll locked
//! Navigator::open_modal(cx, "/login");   // overlay replaced, still over /plans
//! Navigator::dismiss_modal(cx);          // back to /plans, scroll released
//! ```
//!
//! Opening `/login` with no modal intent (a typed URL, a restored session,
//! a plain [`Navigator::push`]) renders it as an ordinary full page.
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`location`] | [`Location`], [`NavigationIntent`], path normalization |
//! | [`route`] | [`Route`] builders, [`EmbeddablePage`], named routes |
//! | [`resolve`] | route tree → [`MatchStack`] |
//! | [`modal`] | page/overlay layer resolution, dismissal rules |
//! | [`context`] | [`GlobalRouter`], [`Navigator`] |
//! | [`widgets`] | [`RouterView`], outlets, links |
//! | [`guards`] | [`RouteGuard`] and built-in guards (feature `guard`) |
//! | [`session`] | [`SessionContext`] global |
//!
//! # Features
//!
//! - `log` (default) / `tracing`: logging backend, see [`logging`].
//! - `guard` (default): route guards.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod context;
pub mod error;
#[cfg(feature = "guard")]
pub mod guards;
pub mod location;
pub mod logging;
pub mod modal;
pub mod params;
pub mod resolve;
pub mod route;
pub mod scroll_lock;
pub mod session;
pub mod state;
pub mod widgets;

pub use context::{
    init_router, teardown_router, GlobalRouter, NavigationRequest, Navigator, NavigatorHandle,
    UseRouter,
};
pub use error::{NavigationError, NavigationResult};
#[cfg(feature = "guard")]
pub use guards::{guard_fn, AuthGuard, NavigationAction, NotGuard, RoleGuard, RouteGuard};
pub use location::{normalize_path, Location, NavigationIntent};
pub use modal::{is_dismiss_key, resolve_layers, ModalLayers, OverlayHit, OverlayLayer};
pub use params::RouteParams;
pub use resolve::{resolve_match_stack, MatchEntry, MatchStack};
pub use route::{EmbeddablePage, NamedRouteRegistry, Presentation, Route, RouteConfig};
pub use scroll_lock::{ScrollLock, ScrollLockGuard};
pub use session::{init_session, sign_in, sign_out, teardown_session, SessionContext, SessionUser};
pub use state::RouterState;
pub use widgets::{
    handle_overlay_hit, handle_overlay_key, modal_link, render_router_outlet, router_link,
    router_outlet, router_view, ModalLink, RouterLink, RouterOutlet, RouterView,
};

/// Direction of a history change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    Forward,
    Back,
    Replace,
}

/// History change reported by [`RouterState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChangeEvent {
    pub from: Option<Location>,
    pub to: Location,
    pub direction: NavigationDirection,
}

/// Navigation target accepted by [`Navigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: String,
}

/// Anything that can name a navigation target.
pub trait IntoRoute {
    fn into_route(self) -> RouteDescriptor;
}

impl IntoRoute for &str {
    fn into_route(self) -> RouteDescriptor {
        RouteDescriptor {
            path: self.to_string(),
        }
    }
}

impl IntoRoute for String {
    fn into_route(self) -> RouteDescriptor {
        RouteDescriptor { path: self }
    }
}

impl IntoRoute for &String {
    fn into_route(self) -> RouteDescriptor {
        RouteDescriptor { path: self.clone() }
    }
}

impl IntoRoute for gpui::SharedString {
    fn into_route(self) -> RouteDescriptor {
        RouteDescriptor {
            path: self.to_string(),
        }
    }
}
