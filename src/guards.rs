//! Route guards.
//!
//! Guards run **before** a navigation is applied and decide whether it
//! continues, is denied, or is redirected. They are synchronous: GPUI runs on
//! a single thread and guards only read state already held in globals.
//!
//! | Guard | Purpose | Priority |
//! |-------|---------|----------|
//! | [`AuthGuard`] | requires a signed-in user | 100 |
//! | [`RoleGuard`] | requires a role (e.g. `admin`) | 90 |
//! | [`NotGuard`] | inverts another guard (e.g. guest-only pages) | inner |
//!
//! Guards on a parent route also protect its children. The first
//! non-[`Continue`](NavigationAction::Continue) result wins.
//!
//! A redirect keeps the modal intent of the original navigation, so a guarded
//! modal link that redirects to `/login` opens the login overlay over the same
//! background.
//!
//! ```no_run
//! use gpui::IntoElement;
//! use travellink_navigator::{AuthGuard, NotGuard, RoleGuard, Route};
//!
//! Route::new("/admin", |_, _cx, _params| gpui::div().into_any_element())
//!     .guard(AuthGuard::session("/login"))
//!     .guard(RoleGuard::admin(Some("/home")));
//!
//! Route::new("/signup", |_, _cx, _params| gpui::div().into_any_element())
//!     .modal()
//!     .guard(NotGuard::new(AuthGuard::session("/home")));
//! ```

use crate::session::SessionContext;
use crate::NavigationRequest;
use gpui::App;

// ============================================================================
// NavigationAction
// ============================================================================

/// Decision returned by a guard.
///
/// ```
/// use travellink_navigator::NavigationAction;
///
/// let action = NavigationAction::deny("Admins only");
/// assert!(action.is_deny());
///
/// let action = NavigationAction::redirect("/login");
/// assert_eq!(action.redirect_path(), Some("/login"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    Continue,
    Deny {
        reason: String,
    },
    Redirect {
        to: String,
        reason: Option<String>,
    },
}

impl NavigationAction {
    pub fn deny(reason: impl Into<String>) -> Self {
        Self::Deny {
            reason: reason.into(),
        }
    }

    pub fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            reason: None,
        }
    }

    pub fn redirect_with_reason(to: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            reason: Some(reason.into()),
        }
    }

    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    pub fn is_deny(&self) -> bool {
        matches!(self, Self::Deny { .. })
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            Self::Redirect { to, .. } => Some(to),
            _ => None,
        }
    }
}

// ============================================================================
// RouteGuard trait
// ============================================================================

/// Access check attached to a route with [`Route::guard`](crate::Route::guard).
///
/// ```no_run
/// use travellink_navigator::{NavigationAction, NavigationRequest, RouteGuard};
///
/// struct NoModalEntry;
///
/// impl RouteGuard for NoModalEntry {
///     fn check(&self, _cx: &gpui::App, request: &NavigationRequest) -> NavigationAction {
///         if request.modal {
///             NavigationAction::deny("Only reachable as a page")
///         } else {
///             NavigationAction::Continue
///         }
///     }
/// }
/// ```
pub trait RouteGuard: Send + Sync + 'static {
    fn check(&self, cx: &App, request: &NavigationRequest) -> NavigationAction;

    /// Name used in log messages.
    fn name(&self) -> &'static str {
        "RouteGuard"
    }

    /// Higher runs first.
    fn priority(&self) -> i32 {
        0
    }
}

/// Create a guard from a closure.
pub const fn guard_fn<F>(f: F) -> FnGuard<F>
where
    F: Fn(&App, &NavigationRequest) -> NavigationAction + Send + Sync + 'static,
{
    FnGuard { f }
}

/// Guard created by [`guard_fn`].
pub struct FnGuard<F> {
    f: F,
}

impl<F> RouteGuard for FnGuard<F>
where
    F: Fn(&App, &NavigationRequest) -> NavigationAction + Send + Sync + 'static,
{
    fn check(&self, cx: &App, request: &NavigationRequest) -> NavigationAction {
        (self.f)(cx, request)
    }
}

// ============================================================================
// AuthGuard
// ============================================================================

pub type AuthCheckFn = Box<dyn Fn(&App) -> bool + Send + Sync>;

/// Redirects when the check function reports no signed-in user.
pub struct AuthGuard {
    check_fn: AuthCheckFn,
    redirect_path: String,
}

impl AuthGuard {
    pub fn new<F>(check_fn: F, redirect_path: impl Into<String>) -> Self
    where
        F: Fn(&App) -> bool + Send + Sync + 'static,
    {
        Self {
            check_fn: Box::new(check_fn),
            redirect_path: redirect_path.into(),
        }
    }

    /// Guard backed by the [`SessionContext`] global.
    pub fn session(redirect_path: impl Into<String>) -> Self {
        Self::new(SessionContext::is_signed_in, redirect_path)
    }
}

impl RouteGuard for AuthGuard {
    fn check(&self, cx: &App, _request: &NavigationRequest) -> NavigationAction {
        if (self.check_fn)(cx) {
            NavigationAction::Continue
        } else {
            NavigationAction::redirect_with_reason(&self.redirect_path, "Sign in required")
        }
    }

    fn name(&self) -> &'static str {
        "AuthGuard"
    }

    fn priority(&self) -> i32 {
        100
    }
}

// ============================================================================
// RoleGuard
// ============================================================================

pub type RoleExtractorFn = Box<dyn Fn(&App) -> Option<String> + Send + Sync>;

/// Requires the current user to hold a role.
pub struct RoleGuard {
    role_extractor: RoleExtractorFn,
    required_role: String,
    redirect_path: Option<String>,
}

impl RoleGuard {
    pub fn new<F>(
        role_extractor: F,
        required_role: impl Into<String>,
        redirect_path: Option<impl Into<String>>,
    ) -> Self
    where
        F: Fn(&App) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            role_extractor: Box::new(role_extractor),
            required_role: required_role.into(),
            redirect_path: redirect_path.map(Into::into),
        }
    }

    /// Admin-only guard backed by the [`SessionContext`] global.
    ///
    /// Denies without a redirect when `redirect_path` is `None`.
    pub fn admin(redirect_path: Option<impl Into<String>>) -> Self {
        Self::new(SessionContext::role, "admin", redirect_path)
    }
}

impl RouteGuard for RoleGuard {
    fn check(&self, cx: &App, _request: &NavigationRequest) -> NavigationAction {
        let has_role = (self.role_extractor)(cx).is_some_and(|role| role == self.required_role);

        if has_role {
            NavigationAction::Continue
        } else if let Some(redirect) = &self.redirect_path {
            NavigationAction::redirect_with_reason(
                redirect,
                format!("Requires '{}' role", self.required_role),
            )
        } else {
            NavigationAction::deny(format!("Missing required role: {}", self.required_role))
        }
    }

    fn name(&self) -> &'static str {
        "RoleGuard"
    }

    fn priority(&self) -> i32 {
        90
    }
}

// ============================================================================
// NotGuard
// ============================================================================

/// Inverts a guard: `Continue` becomes `Deny`, a denial or redirect becomes
/// `Continue`.
///
/// `NotGuard::new(AuthGuard::session(..))` admits guests only.
pub struct NotGuard {
    guard: Box<dyn RouteGuard>,
}

impl NotGuard {
    pub fn new<G: RouteGuard>(guard: G) -> Self {
        Self {
            guard: Box::new(guard),
        }
    }
}

impl RouteGuard for NotGuard {
    fn check(&self, cx: &App, request: &NavigationRequest) -> NavigationAction {
        match self.guard.check(cx, request) {
            NavigationAction::Continue => {
                NavigationAction::deny(format!("Not allowed while {} passes", self.guard.name()))
            }
            NavigationAction::Deny { .. } | NavigationAction::Redirect { .. } => {
                NavigationAction::Continue
            }
        }
    }

    fn name(&self) -> &'static str {
        "NotGuard"
    }

    fn priority(&self) -> i32 {
        self.guard.priority()
    }
}
