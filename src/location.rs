//! Locations and navigation intents.
//!
//! A [`Location`] is one entry of the navigation history: a normalized path plus
//! an optional [`NavigationIntent`] attached by whoever pushed it. The intent is
//! what turns an ordinary navigation into a modal one:
//!
//! ```text
//! /plans                       ← page, no intent
//! /signup  {modal, bg=/plans}  ← opened from the page
//! /login   {modal, bg=/plans}  ← chained from /signup, background copied
//! ```
//!
//! The background is captured once, when a page opens the first modal of a
//! session, and then copied verbatim by every modal-to-modal link. A modal is
//! never a valid background.
//!
//! # Example
//!
//! ```
//! use travellink_navigator::{Location, NavigationIntent};
//!
//! let plans = Location::new("/plans");
//! let signup = Location::with_intent("/signup", NavigationIntent::modal_from(&plans));
//! let login = Location::with_intent("/login", NavigationIntent::modal_from(&signup));
//!
//! assert_eq!(login.background().map(Location::path), Some("/plans"));
//! ```

use std::borrow::Cow;
use std::fmt;

/// Normalize a path for consistent comparison.
///
/// Ensures a leading slash and no trailing slash (except for the root).
/// Returns `Cow<str>` so already-normalized paths are not reallocated.
///
/// # Examples
///
/// ```
/// use travellink_navigator::normalize_path;
///
/// assert_eq!(normalize_path("/plans"), "/plans");
/// assert_eq!(normalize_path("plans/"), "/plans");
/// assert_eq!(normalize_path("//"), "/");
/// assert_eq!(normalize_path(""), "/");
/// ```
#[must_use]
pub fn normalize_path(path: &'_ str) -> Cow<'_, str> {
    if path.is_empty() {
        return Cow::Borrowed("/");
    }
    if path == "/" {
        return Cow::Borrowed(path);
    }
    if path.starts_with('/') && !path.ends_with('/') && !path.contains("//") {
        return Cow::Borrowed(path);
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", segments.join("/")))
    }
}

/// Strip leading and trailing slashes from a route path.
#[inline]
pub(crate) fn trim_slashes(path: &str) -> &str {
    path.trim_start_matches('/').trim_end_matches('/')
}

// ============================================================================
// NavigationIntent
// ============================================================================

/// State attached to a navigation describing how the target should be shown.
///
/// `modal = true` asks for the target to be rendered as an overlay on top of
/// `background`. Without a background the flag is ignored and the target renders
/// as a normal page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationIntent {
    /// Render the target as an overlay.
    pub modal: bool,
    /// Location kept rendered underneath the overlay.
    pub background: Option<Box<Location>>,
}

impl NavigationIntent {
    /// Intent for a plain page navigation.
    pub fn page() -> Self {
        Self::default()
    }

    /// Open a modal on top of `page`, capturing it as the session background.
    ///
    /// `page` is stored verbatim, including its own state.
    pub fn open_over(page: &Location) -> Self {
        Self {
            modal: true,
            background: Some(Box::new(page.clone())),
        }
    }

    /// Chain from the modal at `current` to another modal.
    ///
    /// The background of `current` is copied unchanged. Returns `None` when
    /// `current` is not part of a modal session.
    pub fn chain_from(current: &Location) -> Option<Self> {
        current.background().map(|background| Self {
            modal: true,
            background: Some(Box::new(background.clone())),
        })
    }

    /// Intent for an "open modal" control rendered at `current`.
    ///
    /// Chains when `current` is itself a modal, otherwise opens over it.
    pub fn modal_from(current: &Location) -> Self {
        Self::chain_from(current).unwrap_or_else(|| Self::open_over(current))
    }
}

// ============================================================================
// Location
// ============================================================================

/// One entry in the navigation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    state: Option<NavigationIntent>,
}

impl Location {
    /// Location for `path` with no attached state.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            path: normalize_path(&path).into_owned(),
            state: None,
        }
    }

    /// Location for `path` carrying `intent`.
    pub fn with_intent(path: impl Into<String>, intent: NavigationIntent) -> Self {
        Self {
            state: Some(intent),
            ..Self::new(path)
        }
    }

    /// Root location (`/`).
    pub fn root() -> Self {
        Self::new("/")
    }

    /// Normalized path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Attached intent, if any.
    pub fn intent(&self) -> Option<&NavigationIntent> {
        self.state.as_ref()
    }

    /// `true` when this location asks to be an overlay and knows its background.
    pub fn is_modal(&self) -> bool {
        self.background().is_some()
    }

    /// Background of the modal session this location belongs to.
    ///
    /// `None` unless the modal flag is set and a background is present.
    pub fn background(&self) -> Option<&Location> {
        self.state
            .as_ref()
            .filter(|intent| intent.modal)
            .and_then(|intent| intent.background.as_deref())
    }

    /// Copy of this location with its state dropped.
    #[must_use]
    pub fn without_intent(&self) -> Self {
        Self {
            path: self.path.clone(),
            state: None,
        }
    }

    /// `true` when both locations belong to the same modal session.
    pub fn same_session(&self, other: &Location) -> bool {
        match (self.background(), other.background()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.background() {
            Some(background) => write!(f, "{} (over {})", self.path, background.path),
            None => f.write_str(&self.path),
        }
    }
}

impl From<&str> for Location {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for Location {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_slashes() {
        assert_eq!(normalize_path("//plans//42/"), "/plans/42");
        assert_eq!(normalize_path("home"), "/home");
        assert!(matches!(normalize_path("/home"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_plain_location_is_not_modal() {
        let location = Location::new("/login");
        assert!(!location.is_modal());
        assert!(location.background().is_none());
        assert_eq!(location.to_string(), "/login");
    }

    #[test]
    fn test_modal_flag_without_background_is_ignored() {
        let intent = NavigationIntent {
            modal: true,
            background: None,
        };
        let location = Location::with_intent("/login", intent);
        assert!(!location.is_modal());
    }

    #[test]
    fn test_background_without_modal_flag_is_ignored() {
        let intent = NavigationIntent {
            modal: false,
            background: Some(Box::new(Location::new("/plans"))),
        };
        assert!(Location::with_intent("/login", intent).background().is_none());
    }

    #[test]
    fn test_open_over_captures_page_verbatim() {
        let page = Location::new("/plans");
        let signup = Location::with_intent("/signup", NavigationIntent::open_over(&page));
        assert_eq!(signup.background(), Some(&page));
        assert_eq!(signup.to_string(), "/signup (over /plans)");
    }

    #[test]
    fn test_chain_from_page_is_none() {
        assert!(NavigationIntent::chain_from(&Location::new("/plans")).is_none());
    }

    #[test]
    fn test_modal_from_chains_three_levels() {
        let page = Location::new("/plans");
        let login = Location::with_intent("/login", NavigationIntent::modal_from(&page));
        let signup = Location::with_intent("/signup", NavigationIntent::modal_from(&login));
        let forgot =
            Location::with_intent("/forgot-password", NavigationIntent::modal_from(&signup));

        for modal in [&login, &signup, &forgot] {
            assert_eq!(modal.background(), Some(&page));
        }
        assert!(login.same_session(&forgot));
        assert!(!page.same_session(&login));
    }

    #[test]
    fn test_without_intent() {
        let page = Location::new("/plans");
        let login = Location::with_intent("/login", NavigationIntent::open_over(&page));
        assert_eq!(login.without_intent(), Location::new("/login"));
    }
}
