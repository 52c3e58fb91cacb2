//! Modal layer resolution.
//!
//! For every navigation the router decides what the window shows:
//!
//! ```text
//! Page-only             Page + Overlay
//! ┌──────────────┐      ┌──────────────┐
//! │ /plans       │      │ /plans       │ ← page layer (background)
//! │              │      │   ┌──────┐   │
//! │              │      │   │/login│   │ ← overlay layer (modal route)
//! │              │      │   └──────┘   │
//! └──────────────┘      └──────────────┘
//! ```
//!
//! The overlay state is entered only when the current [`Location`] is part of
//! a modal session *and* its path resolves to a modal-capable route. Anything
//! else, including a modal route reached by direct entry, is page-only.
//!
//! Dismissal is driven by [`OverlayHit`]: clicks on the backdrop or the close
//! control dismiss, clicks inside the card do not. Escape dismisses as well
//! (see [`is_dismiss_key`]).

use crate::location::Location;
use crate::resolve::{resolve_match_stack, MatchEntry, MatchStack};
use crate::route::Route;
use gpui::{px, Pixels};
use std::sync::Arc;

/// Card width in pixels used when a modal route does not set one.
pub const DEFAULT_OVERLAY_WIDTH: f32 = 420.;

/// The overlay part of [`ModalLayers`].
#[derive(Debug, Clone)]
pub struct OverlayLayer {
    /// Location the overlay was opened with.
    pub location: Location,
    /// Full match stack of the modal path. Its leaf is the overlay content.
    pub stack: MatchStack,
}

impl OverlayLayer {
    /// Entry rendered inside the card.
    pub fn entry(&self) -> Option<&MatchEntry> {
        self.stack.leaf()
    }

    /// Route rendered inside the card.
    pub fn route(&self) -> Option<&Arc<Route>> {
        self.entry().map(|entry| &entry.route)
    }

    /// Width of the card.
    pub fn width(&self) -> Pixels {
        self.route()
            .and_then(|route| route.config.overlay_width)
            .unwrap_or(px(DEFAULT_OVERLAY_WIDTH))
    }

    /// Whether the card shows a close control.
    pub fn show_close(&self) -> bool {
        self.route().map_or(true, |route| route.config.show_close)
    }
}

/// What the window renders for the current location.
#[derive(Debug, Clone, Default)]
pub struct ModalLayers {
    /// Location the page layer was resolved from.
    pub page_location: Location,
    /// Route chain of the page layer. Empty means nothing matched.
    pub page: MatchStack,
    /// Present only in the Page + Overlay state.
    pub overlay: Option<OverlayLayer>,
}

impl ModalLayers {
    /// `true` in the Page + Overlay state.
    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Stack a renderer should read for the given layer.
    pub fn stack_for(&self, overlay: bool) -> &MatchStack {
        match (&self.overlay, overlay) {
            (Some(layer), true) => &layer.stack,
            _ => &self.page,
        }
    }
}

/// Resolve the page and overlay layers for `location`.
pub fn resolve_layers(routes: &[Arc<Route>], location: &Location) -> ModalLayers {
    let target = resolve_match_stack(routes, location.path());

    let Some(background) = location.background() else {
        if location.intent().is_some_and(|intent| intent.modal) {
            crate::warn_log!(
                "Modal navigation to '{}' has no background, rendering as a page",
                location.path()
            );
        }
        return page_only(location, target);
    };

    let targets_modal_route = target.leaf().is_some_and(|entry| entry.route.is_modal());
    if !targets_modal_route {
        crate::warn_log!(
            "'{}' is not a modal route, ignoring background '{}'",
            location.path(),
            background.path()
        );
        return page_only(location, target);
    }

    let page = resolve_match_stack(routes, background.path());
    if page.is_empty() {
        crate::warn_log!(
            "Background '{}' matches no route, page layer left blank",
            background.path()
        );
    }

    crate::debug_log!("Layers: page '{}' + overlay '{}'", background.path(), location.path());

    ModalLayers {
        page_location: background.clone(),
        page,
        overlay: Some(OverlayLayer {
            location: location.clone(),
            stack: target,
        }),
    }
}

fn page_only(location: &Location, stack: MatchStack) -> ModalLayers {
    crate::debug_log!("Layers: page '{}'", location.path());
    ModalLayers {
        page_location: location.clone(),
        page: stack,
        overlay: None,
    }
}

/// Where a pointer press landed within the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayHit {
    /// Outside the card.
    Backdrop,
    /// Inside the card, including the embedded page.
    Card,
    /// The close control.
    CloseButton,
}

impl OverlayHit {
    /// `true` if a press here dismisses the overlay.
    pub fn dismisses(self) -> bool {
        !matches!(self, OverlayHit::Card)
    }
}

/// `true` for the key that dismisses the overlay.
pub fn is_dismiss_key(key: &str) -> bool {
    key == "escape"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NavigationIntent;
    use gpui::{div, IntoElement};

    fn routes() -> Vec<Arc<Route>> {
        vec![
            Arc::new(Route::view("/plans", || div().into_any_element())),
            Arc::new(Route::view("/login", || div().into_any_element()).modal()),
            Arc::new(
                Route::view("/signup", || div().into_any_element())
                    .modal()
                    .overlay_width(px(560.))
                    .without_close_button(),
            ),
        ]
    }

    #[test]
    fn test_direct_entry_is_page_only() {
        let layers = resolve_layers(&routes(), &Location::new("/login"));
        assert!(!layers.has_overlay());
        assert_eq!(layers.page.route_paths(), vec!["/login"]);
    }

    #[test]
    fn test_modal_session_uses_background() {
        let plans = Location::new("/plans");
        let signup = Location::with_intent("/signup", NavigationIntent::open_over(&plans));
        let layers = resolve_layers(&routes(), &signup);

        assert_eq!(layers.page_location, plans);
        assert_eq!(layers.page.route_paths(), vec!["/plans"]);
        let overlay = layers.overlay.as_ref().map(|o| (o.width(), o.show_close()));
        assert_eq!(overlay, Some((px(560.), false)));
    }

    #[test]
    fn test_background_on_page_route_is_ignored() {
        let intent = NavigationIntent::open_over(&Location::new("/login"));
        let layers = resolve_layers(&routes(), &Location::with_intent("/plans", intent));
        assert!(!layers.has_overlay());
        assert_eq!(layers.page_location.path(), "/plans");
    }

    #[test]
    fn test_unknown_background_leaves_page_blank() {
        let intent = NavigationIntent::open_over(&Location::new("/gone"));
        let layers = resolve_layers(&routes(), &Location::with_intent("/login", intent));
        assert!(layers.page.is_empty());
        assert!(layers.has_overlay());
        assert_eq!(layers.overlay.map(|o| o.width()), Some(px(DEFAULT_OVERLAY_WIDTH)));
    }

    #[test]
    fn test_overlay_hits() {
        assert!(OverlayHit::Backdrop.dismisses());
        assert!(OverlayHit::CloseButton.dismisses());
        assert!(!OverlayHit::Card.dismisses());
        assert!(is_dismiss_key("escape"));
        assert!(!is_dismiss_key("enter"));
    }
}
