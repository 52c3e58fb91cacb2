//! Router widgets.
//!
//! - [`RouterView`]: the window root. Renders the page layer and, while a
//!   modal session is active, the overlay layer on top of it.
//! - [`RouterOutlet`] / [`router_outlet`] / [`render_router_outlet`]:
//!   render the child route at the next nesting depth.
//! - [`RouterLink`] / [`router_link`]: push a page on click.
//! - [`ModalLink`] / [`modal_link`]: open a modal route on click, over the
//!   current page or chained from the open modal.
//!
//! # Layers
//!
//! ```text
//! RouterView (focus, Escape)
//! ├── page layer     match_stack[0] → outlets read [1], [2], …
//! └── deferred overlay
//!     └── backdrop   click → dismiss, wheel consumed
//!         └── card   click contained, optional close control
//!             └── overlay route (Presentation::Overlay)
//! ```
//!
//! The page layer stops scrolling while the router holds the scroll lock.

use crate::context::GlobalRouter;
use crate::modal::{is_dismiss_key, OverlayHit};
use crate::resolve::{
    current_outlet_depth, enter_outlet, reset_outlet_depth, set_parent_depth,
};
use crate::route::{current_presentation, with_presentation, Presentation};
use crate::{debug_log, trace_log, Navigator};
use gpui::prelude::FluentBuilder;
use gpui::*;
use std::sync::Arc;

type NotFoundBuilder = Arc<dyn Fn(&str) -> AnyElement>;

// ============================================================================
// Overlay input
// ============================================================================

/// Handle a key press while the router view has focus.
///
/// Returns `true` if the key dismissed the overlay.
pub fn handle_overlay_key(key: &str, cx: &mut App) -> bool {
    if !is_dismiss_key(key) || !Navigator::is_modal_open(cx) {
        return false;
    }
    debug_log!("Overlay dismissed by '{}'", key);
    Navigator::dismiss_modal(cx);
    true
}

/// Handle a click on part of the overlay.
///
/// Returns `true` if the click dismissed the overlay.
pub fn handle_overlay_hit(hit: OverlayHit, cx: &mut App) -> bool {
    if !hit.dismisses() || !Navigator::is_modal_open(cx) {
        return false;
    }
    debug_log!("Overlay dismissed by {:?}", hit);
    Navigator::dismiss_modal(cx);
    true
}

// ============================================================================
// RouterOutlet
// ============================================================================

/// Entity outlet rendering the matched route one level below its parent.
///
/// Depth and presentation are captured when the outlet is created inside its
/// parent's route builder. GPUI renders the entity later, after the parent
/// layer has moved on, so the thread-local markers are not read at render time.
#[derive(Clone)]
pub struct RouterOutlet {
    depth: usize,
    presentation: Presentation,
}

impl RouterOutlet {
    pub fn new() -> Self {
        Self {
            depth: current_outlet_depth().map_or(0, |parent| parent + 1),
            presentation: current_presentation(),
        }
    }

    /// Depth of the match stack entry this outlet renders.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Default for RouterOutlet {
    fn default() -> Self {
        Self::new()
    }
}

/// Cached [`RouterOutlet`] keyed by `key`, persisted across renders.
///
/// Call it from a route builder so the outlet is created while its parent's
/// depth is current.
pub fn router_outlet(window: &mut Window, cx: &mut App, key: impl Into<String>) -> impl IntoElement {
    window
        .use_keyed_state(ElementId::Name(key.into().into()), cx, |_, _| {
            RouterOutlet::new()
        })
        .clone()
}

impl Render for RouterOutlet {
    fn render(&mut self, window: &mut Window, cx: &mut Context<'_, Self>) -> impl IntoElement {
        set_parent_depth(self.depth);
        render_at_depth(self.depth, self.presentation, window, cx)
    }
}

/// Functional outlet: renders the route one level below the current parent.
pub fn render_router_outlet(window: &mut Window, cx: &mut App) -> AnyElement {
    let depth = enter_outlet();
    render_at_depth(depth, current_presentation(), window, cx)
}

fn render_at_depth(
    depth: usize,
    presentation: Presentation,
    window: &mut Window,
    cx: &mut App,
) -> AnyElement {
    let resolved = {
        let Some(router) = cx.try_global::<GlobalRouter>() else {
            trace_log!("Outlet: no global router");
            return div().into_any_element();
        };

        let stack = router
            .layers()
            .stack_for(presentation == Presentation::Overlay);
        let Some(entry) = stack.at_depth(depth) else {
            trace_log!(
                "Outlet depth {}: nothing matched (stack len {})",
                depth,
                stack.len()
            );
            return div().into_any_element();
        };

        debug_log!(
            "Outlet depth {} ({:?}): rendering '{}'",
            depth,
            presentation,
            entry.route.config.path
        );
        (Arc::clone(&entry.route), entry.params.clone())
    };

    let (route, params) = resolved;
    with_presentation(presentation, || route.build(window, cx, &params))
        .unwrap_or_else(|| div().into_any_element())
}

// ============================================================================
// RouterView
// ============================================================================

/// Window root rendering the page layer and the modal overlay.
///
/// ```ignore
/// cx.open_window(WindowOptions::default(), |_, cx| cx.new(RouterView::new))?;
/// ```
pub struct RouterView {
    focus_handle: FocusHandle,
    not_found: Option<NotFoundBuilder>,
}

impl RouterView {
    pub fn new(cx: &mut App) -> Self {
        Self {
            focus_handle: cx.focus_handle(),
            not_found: None,
        }
    }

    /// Replace the built-in "page not found" screen.
    #[must_use]
    pub fn not_found(mut self, builder: impl Fn(&str) -> AnyElement + 'static) -> Self {
        self.not_found = Some(Arc::new(builder));
        self
    }
}

impl Focusable for RouterView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for RouterView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<'_, Self>) -> impl IntoElement {
        let (has_overlay, scroll_locked) = cx
            .try_global::<GlobalRouter>()
            .map_or((false, false), |router| {
                (router.has_overlay(), router.scroll_lock().is_locked())
            });

        if has_overlay && !self.focus_handle.contains_focused(window, cx) {
            self.focus_handle.focus(window);
        }

        let page = render_page_layer(self.not_found.clone(), window, cx);
        let overlay = if has_overlay {
            render_overlay_layer(window, cx)
        } else {
            None
        };

        div()
            .id("router-view")
            .key_context("RouterView")
            .track_focus(&self.focus_handle)
            .relative()
            .size_full()
            .on_key_down(cx.listener(|_this, event: &KeyDownEvent, _window, cx| {
                if handle_overlay_key(&event.keystroke.key, cx) {
                    cx.stop_propagation();
                }
            }))
            .child(
                div()
                    .id("page-layer")
                    .size_full()
                    .map(|layer| {
                        if scroll_locked {
                            layer.overflow_hidden()
                        } else {
                            layer.overflow_y_scroll()
                        }
                    })
                    .child(page),
            )
            .children(overlay)
    }
}

/// Render the page layer: the root entry of the page stack.
///
/// An empty stack renders the not-found page, unless an overlay is open, in
/// which case the layer stays blank.
pub fn router_view(window: &mut Window, cx: &mut App) -> AnyElement {
    render_page_layer(None, window, cx)
}

fn render_page_layer(
    not_found: Option<NotFoundBuilder>,
    window: &mut Window,
    cx: &mut App,
) -> AnyElement {
    reset_outlet_depth();

    let resolved = {
        let Some(router) = cx.try_global::<GlobalRouter>() else {
            return div().child("No router configured").into_any_element();
        };
        let layers = router.layers();

        match layers.page.root() {
            Some(root) => (Arc::clone(&root.route), root.params.clone()),
            None if layers.has_overlay() => return div().into_any_element(),
            None => {
                let path = layers.page_location.path();
                return match not_found {
                    Some(builder) => builder(path),
                    None => default_not_found_page(path).into_any_element(),
                };
            }
        }
    };

    let (route, params) = resolved;
    enter_outlet();

    with_presentation(Presentation::Page, || route.build(window, cx, &params))
        .unwrap_or_else(|| div().into_any_element())
}

fn render_overlay_layer(window: &mut Window, cx: &mut App) -> Option<AnyElement> {
    let (route, params, depth, width, show_close) = {
        let router = cx.try_global::<GlobalRouter>()?;
        let overlay = router.layers().overlay.as_ref()?;
        let entry = overlay.entry()?;
        (
            Arc::clone(&entry.route),
            entry.params.clone(),
            entry.depth,
            overlay.width(),
            overlay.show_close(),
        )
    };

    reset_outlet_depth();
    set_parent_depth(depth);
    let content = with_presentation(Presentation::Overlay, || route.build(window, cx, &params))
        .unwrap_or_else(|| div().into_any_element());

    Some(overlay_frame(content, width, show_close).into_any_element())
}

fn overlay_frame(content: AnyElement, width: Pixels, show_close: bool) -> impl IntoElement {
    let card = div()
        .id("modal-card")
        .relative()
        .w(width)
        .max_h(relative(0.9))
        .overflow_y_scroll()
        .p_6()
        .rounded_lg()
        .bg(rgb(0xffffff))
        .shadow_lg()
        .on_click(|_, _, cx| cx.stop_propagation())
        .when(show_close, |card| {
            card.child(
                div()
                    .id("modal-close")
                    .absolute()
                    .top_2()
                    .right_3()
                    .cursor_pointer()
                    .text_color(rgb(0x666666))
                    .hover(|this| this.text_color(rgb(0x111111)))
                    .child("✕")
                    .on_click(|_, _, cx| {
                        cx.stop_propagation();
                        handle_overlay_hit(OverlayHit::CloseButton, cx);
                    }),
            )
        })
        .child(content);

    deferred(
        div()
            .id("modal-backdrop")
            .absolute()
            .inset_0()
            .flex()
            .items_center()
            .justify_center()
            .bg(hsla(0.0, 0.0, 0.0, 0.5))
            .occlude()
            .on_scroll_wheel(|_, _, cx| {
                cx.stop_propagation();
            })
            .on_click(|_, _, cx| {
                handle_overlay_hit(OverlayHit::Backdrop, cx);
            })
            .child(card),
    )
    .with_priority(1)
}

// ============================================================================
// Links
// ============================================================================

/// Link that pushes a page on click.
///
/// ```ignore
/// RouterLink::new("/plans")
///     .child("My plans")
///     .active_class(|div| div.text_color(gpui::rgb(0x2196f3)))
///     .build(cx)
/// ```
pub struct RouterLink {
    path: SharedString,
    active_class: Option<Box<dyn Fn(Div) -> Div>>,
    children: Vec<AnyElement>,
}

impl RouterLink {
    pub fn new(path: impl Into<SharedString>) -> Self {
        Self {
            path: path.into(),
            active_class: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn child(mut self, child: impl IntoElement) -> Self {
        self.children.push(child.into_any_element());
        self
    }

    /// Styling applied when the link's path is current.
    #[must_use]
    pub fn active_class(mut self, style: impl Fn(Div) -> Div + 'static) -> Self {
        self.active_class = Some(Box::new(style));
        self
    }

    pub fn build(self, cx: &App) -> Div {
        let path = self.path;
        let is_active = is_current(cx, &path);

        let mut link = div()
            .cursor_pointer()
            .on_mouse_down(MouseButton::Left, move |_event, _window, cx| {
                Navigator::push(cx, path.clone());
            });

        if is_active {
            if let Some(active_fn) = self.active_class {
                link = active_fn(link);
            }
        }

        link.children(self.children)
    }
}

/// Text link with built-in active colour.
pub fn router_link(
    cx: &App,
    path: impl Into<SharedString>,
    label: impl Into<SharedString>,
) -> Div {
    let path: SharedString = path.into();
    let label: SharedString = label.into();
    let is_active = is_current(cx, &path);

    RouterLink::new(path)
        .child(label)
        .build(cx)
        .text_color(if is_active {
            rgb(0x2196f3)
        } else {
            rgb(0x333333)
        })
        .hover(|this| this.text_color(rgb(0x2196f3)))
}

fn is_current(cx: &App, path: &str) -> bool {
    cx.try_global::<GlobalRouter>()
        .is_some_and(|router| router.current_path() == path)
}

/// Link that opens a modal route on click.
///
/// On a page the current location becomes the background. Inside an overlay
/// the link chains: the overlay is replaced and the background is kept.
pub struct ModalLink {
    path: SharedString,
    children: Vec<AnyElement>,
}

impl ModalLink {
    pub fn new(path: impl Into<SharedString>) -> Self {
        Self {
            path: path.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn child(mut self, child: impl IntoElement) -> Self {
        self.children.push(child.into_any_element());
        self
    }

    pub fn build(self) -> Div {
        let path = self.path;
        div()
            .cursor_pointer()
            .on_mouse_down(MouseButton::Left, move |_event, _window, cx| {
                Navigator::open_modal(cx, path.clone());
            })
            .children(self.children)
    }
}

/// Text link opening a modal route.
pub fn modal_link(path: impl Into<SharedString>, label: impl Into<SharedString>) -> Div {
    let label: SharedString = label.into();
    ModalLink::new(path)
        .child(label)
        .build()
        .text_color(rgb(0x2196f3))
        .hover(|this| this.text_color(rgb(0x1565c0)))
}

// ============================================================================
// Built-in pages
// ============================================================================

fn default_not_found_page(path: &str) -> impl IntoElement {
    div()
        .flex()
        .flex_col()
        .items_center()
        .justify_center()
        .size_full()
        .p_8()
        .gap_4()
        .child(
            div()
                .text_2xl()
                .font_weight(FontWeight::BOLD)
                .child("Page not found"),
        )
        .child(
            div()
                .text_color(rgb(0x666666))
                .child(format!("No route matches {path}")),
        )
}

#[cfg(test)]
mod tests {
    use super::{is_current, ModalLink, RouterLink, RouterOutlet};
    use crate::resolve::{reset_outlet_depth, set_parent_depth};
    use crate::route::{with_presentation, Presentation};
    use crate::{init_router, Navigator, Route};
    use gpui::{div, IntoElement, TestAppContext};

    #[test]
    fn test_outlet_captures_depth_and_presentation() {
        reset_outlet_depth();
        assert_eq!(RouterOutlet::new().depth(), 0);

        set_parent_depth(1);
        let outlet = with_presentation(Presentation::Overlay, RouterOutlet::new);
        assert_eq!(outlet.depth(), 2);
        assert_eq!(outlet.presentation, Presentation::Overlay);
        reset_outlet_depth();
    }

    #[gpui::test]
    fn test_is_current_follows_router(cx: &mut TestAppContext) {
        cx.update(|cx| {
            assert!(!is_current(cx, "/"));
            init_router(cx, |router| {
                router.add_route(Route::view("/plans", || div().into_any_element()));
            });
            Navigator::push(cx, "/plans");
            assert!(is_current(cx, "/plans"));
            assert!(!is_current(cx, "/faq"));
        });
    }

    #[test]
    fn test_links_keep_path() {
        assert_eq!(RouterLink::new("/faq").path.as_ref(), "/faq");
        assert_eq!(ModalLink::new("/login").path.as_ref(), "/login");
    }
}
