//! Route definitions.
//!
//! A [`Route`] pairs a path pattern with a builder that produces the page
//! element. Routes come in three flavours:
//!
//! - [`Route::new`] / [`Route::view`]: stateless builders called on every render.
//! - [`Route::component`]: a stateful GPUI entity, created once and cached by
//!   the router so its state survives navigation.
//! - [`Route::modal_component`]: a stateful page that can be shown both as a
//!   full page and inside the modal overlay. The page type must implement
//!   [`EmbeddablePage`].
//!
//! Any route can be made modal-capable with [`Route::modal`]. A modal-capable
//! route is rendered as an overlay only when it is reached with a modal
//! [`NavigationIntent`](crate::NavigationIntent); direct entry renders it as a
//! normal page.
//!
//! ```ignore
//! use travellink_navigator::{init_router, Route};
//!
//! init_router(cx, |router| {
//!     router.add_route(Route::view("/plans", plan_list).name("plans"));
//!     router.add_route(Route::modal_component("/login", LoginPage::new).name("login"));
//!     router.add_route(
//!         Route::modal_component("/signup", SignupPage::new).overlay_width(px(560.)),
//!     );
//! });
//! ```

use crate::context::GlobalRouter;
#[cfg(feature = "guard")]
use crate::guards::RouteGuard;
use crate::location::trim_slashes;
use crate::RouteParams;
use gpui::{
    AnyElement, AnyView, App, AppContext, BorrowAppContext, Entity, IntoElement, Pixels, Render,
    Window,
};
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Function that renders a route.
pub type RouteBuilder = Arc<dyn Fn(&mut Window, &mut App, &RouteParams) -> AnyElement + Send + Sync>;

// ============================================================================
// Presentation
// ============================================================================

/// Where a route is being rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Presentation {
    /// The page layer, as a normal full page.
    #[default]
    Page,
    /// Inside the modal overlay card.
    Overlay,
}

thread_local! {
    static PRESENTATION: Cell<Presentation> = const { Cell::new(Presentation::Page) };
}

/// Presentation of the route builder currently running.
pub fn current_presentation() -> Presentation {
    PRESENTATION.with(Cell::get)
}

/// Run `f` with [`current_presentation`] set to `presentation`.
///
/// The previous value is restored afterwards.
pub fn with_presentation<R>(presentation: Presentation, f: impl FnOnce() -> R) -> R {
    let previous = PRESENTATION.with(|p| p.replace(presentation));
    let result = f();
    PRESENTATION.with(|p| p.set(previous));
    result
}

/// A page that can be rendered both as a full page and inside the overlay.
///
/// Implementors must not assume they own the window: no window-level key
/// bindings, no full-window backgrounds, no navigation on mount. The router
/// tells the page how it is presented before each render so it can, for
/// example, hide its own header while embedded in the overlay card.
pub trait EmbeddablePage: Render {
    /// Called with the presentation the page is about to render in.
    fn set_presentation(&mut self, presentation: Presentation);
}

// ============================================================================
// Route
// ============================================================================

/// Static configuration of a route.
#[derive(Debug, Clone, Default)]
pub struct RouteConfig {
    /// Path pattern, e.g. `/plan/:id` or a relative child path like `participants`.
    pub path: String,
    /// Optional name for URL generation.
    pub name: Option<String>,
    /// Route may be presented as an overlay.
    pub modal: bool,
    /// Width of the overlay card. `None` uses the overlay default.
    pub overlay_width: Option<Pixels>,
    /// Show the close control in the overlay card.
    pub show_close: bool,
}

/// A single route with its builder, children, and guards.
pub struct Route {
    pub config: RouteConfig,
    builder: Option<RouteBuilder>,
    pub children: Vec<Arc<Route>>,
    #[cfg(feature = "guard")]
    pub guards: Vec<Box<dyn RouteGuard>>,
}

impl Route {
    /// Create a route from a builder receiving window, app, and params.
    pub fn new<F>(path: impl Into<String>, builder: F) -> Self
    where
        F: Fn(&mut Window, &mut App, &RouteParams) -> AnyElement + Send + Sync + 'static,
    {
        Self {
            config: RouteConfig {
                path: path.into(),
                show_close: true,
                ..RouteConfig::default()
            },
            builder: Some(Arc::new(builder)),
            children: Vec::new(),
            #[cfg(feature = "guard")]
            guards: Vec::new(),
        }
    }

    /// Create a route from a builder that needs no context.
    pub fn view<F>(path: impl Into<String>, view: F) -> Self
    where
        F: Fn() -> AnyElement + Send + Sync + 'static,
    {
        Self::new(path, move |_, _, _| view())
    }

    /// Create a route backed by a cached stateful entity.
    pub fn component<T, F>(path: impl Into<String>, ctor: F) -> Self
    where
        T: Render,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let path = path.into();
        let key = format!("component:{path}");
        Self::new(path, move |_, cx, _| {
            cached_component(cx, &key, &ctor).into_any_element()
        })
    }

    /// Create a modal-capable route backed by an [`EmbeddablePage`].
    ///
    /// The page is cached separately for each presentation, so the same route
    /// can sit in the page layer and in the overlay at once.
    pub fn modal_component<T, F>(path: impl Into<String>, ctor: F) -> Self
    where
        T: EmbeddablePage,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let path = path.into();
        let page_key = format!("component:{path}");
        let overlay_key = format!("overlay:{path}");
        Self::new(path, move |_, cx, _| {
            let presentation = current_presentation();
            let key = match presentation {
                Presentation::Page => &page_key,
                Presentation::Overlay => &overlay_key,
            };
            let entity = cached_component(cx, key, &ctor);
            entity.update(cx, |page, _| page.set_presentation(presentation));
            entity.into_any_element()
        })
        .modal()
    }

    /// Mark this route as modal-capable.
    #[must_use]
    pub fn modal(mut self) -> Self {
        self.config.modal = true;
        self
    }

    /// Set the overlay card width used when presented as a modal.
    #[must_use]
    pub fn overlay_width(mut self, width: Pixels) -> Self {
        self.config.overlay_width = Some(width);
        self
    }

    /// Hide the close control of the overlay card.
    ///
    /// Escape and backdrop clicks still dismiss.
    #[must_use]
    pub fn without_close_button(mut self) -> Self {
        self.config.show_close = false;
        self
    }

    /// Set a name for URL generation.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    /// Add a child route.
    #[must_use]
    pub fn child(mut self, child: Arc<Route>) -> Self {
        self.children.push(child);
        self
    }

    /// Add several child routes.
    #[must_use]
    pub fn children(mut self, children: Vec<Arc<Route>>) -> Self {
        self.children.extend(children);
        self
    }

    /// Attach a guard checked before navigating to this route or any child.
    #[cfg(feature = "guard")]
    #[must_use]
    pub fn guard(mut self, guard: impl RouteGuard) -> Self {
        self.guards.push(Box::new(guard));
        self
    }

    /// Child routes.
    pub fn get_children(&self) -> &[Arc<Route>] {
        &self.children
    }

    /// `true` when the route is modal-capable.
    pub fn is_modal(&self) -> bool {
        self.config.modal
    }

    /// Render the route. Returns `None` for routes without a builder.
    pub fn build(
        &self,
        window: &mut Window,
        cx: &mut App,
        params: &RouteParams,
    ) -> Option<AnyElement> {
        self.builder
            .as_ref()
            .map(|builder| builder(window, cx, params))
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.config.path)
            .field("name", &self.config.name)
            .field("modal", &self.config.modal)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

/// Get the cached entity for `key`, creating it with `ctor` on first use.
fn cached_component<T, F>(cx: &mut App, key: &str, ctor: &F) -> Entity<T>
where
    T: Render,
    F: Fn() -> T,
{
    let cached = cx
        .try_global::<GlobalRouter>()
        .and_then(|router| router.get_cached_component(key))
        .cloned();
    if let Some(view) = cached {
        if let Ok(entity) = view.downcast::<T>() {
            return entity;
        }
    }

    let entity = cx.new(|_| ctor());
    if cx.has_global::<GlobalRouter>() {
        let view: AnyView = entity.clone().into();
        cx.update_global::<GlobalRouter, _>(|router, _| {
            router.cache_component(key.to_string(), view);
        });
    }
    entity
}

// ============================================================================
// Named routes
// ============================================================================

/// Registry mapping route names to path patterns.
#[derive(Debug, Clone, Default)]
pub struct NamedRouteRegistry {
    routes: HashMap<String, String>,
}

impl NamedRouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` for `pattern`. A later registration wins.
    pub fn register(&mut self, name: String, pattern: String) {
        self.routes.insert(name, pattern);
    }

    /// Pattern registered under `name`.
    pub fn pattern(&self, name: &str) -> Option<&str> {
        self.routes.get(name).map(String::as_str)
    }

    /// Build a URL for `name`, substituting `:param` segments from `params`.
    ///
    /// Returns `None` if the name is unknown or a parameter is missing.
    pub fn url_for(&self, name: &str, params: &RouteParams) -> Option<String> {
        let pattern = self.routes.get(name)?;
        let mut segments = Vec::new();
        for segment in trim_slashes(pattern).split('/').filter(|s| !s.is_empty()) {
            match segment.strip_prefix(':') {
                Some(param) => segments.push(params.get(param)?.clone()),
                None => segments.push(segment.to_string()),
            }
        }
        Some(format!("/{}", segments.join("/")))
    }
}
