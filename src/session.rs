//! Signed-in user, shared across the app.
//!
//! The session is a GPUI global with four explicit access points:
//! [`init_session`], [`sign_in`], [`sign_out`], and [`teardown_session`].
//! Credential checks and persistence are the caller's business. The session
//! only records who is signed in so headers and guards can read it.
//!
//! ```ignore
//! use travellink_navigator::{sign_in, SessionContext, SessionUser};
//!
//! sign_in(cx, SessionUser::admin("mina"));
//! assert!(SessionContext::is_admin(cx));
//! ```

use gpui::{App, BorrowAppContext, Global};

/// User recorded by [`sign_in`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub username: String,
    pub is_admin: bool,
}

impl SessionUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            is_admin: false,
        }
    }

    pub fn admin(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            is_admin: true,
        }
    }

    /// Role name checked by role guards.
    pub fn role(&self) -> &'static str {
        if self.is_admin {
            "admin"
        } else {
            "user"
        }
    }
}

/// Global holding the current user, if any.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    user: Option<SessionUser>,
}

impl Global for SessionContext {}

impl SessionContext {
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Current user. `None` when signed out or the session is not initialized.
    pub fn current(cx: &App) -> Option<&SessionUser> {
        cx.try_global::<SessionContext>()
            .and_then(SessionContext::user)
    }

    pub fn is_signed_in(cx: &App) -> bool {
        Self::current(cx).is_some()
    }

    pub fn is_admin(cx: &App) -> bool {
        Self::current(cx).is_some_and(|user| user.is_admin)
    }

    pub fn username(cx: &App) -> Option<String> {
        Self::current(cx).map(|user| user.username.clone())
    }

    pub fn role(cx: &App) -> Option<String> {
        Self::current(cx).map(|user| user.role().to_string())
    }
}

/// Install an empty session unless one already exists.
pub fn init_session(cx: &mut App) {
    if !cx.has_global::<SessionContext>() {
        cx.set_global(SessionContext::default());
    }
}

/// Record `user` as signed in and refresh windows.
pub fn sign_in(cx: &mut App, user: SessionUser) {
    crate::info_log!("Signed in as '{}' ({})", user.username, user.role());
    cx.set_global(SessionContext { user: Some(user) });
    cx.refresh_windows();
}

/// Forget the current user. Does nothing without a session.
pub fn sign_out(cx: &mut App) {
    if !cx.has_global::<SessionContext>() {
        return;
    }
    cx.update_global::<SessionContext, _>(|session, _| {
        if let Some(user) = session.user.take() {
            crate::info_log!("Signed out '{}'", user.username);
        }
    });
    cx.refresh_windows();
}

/// Remove the session global entirely.
pub fn teardown_session(cx: &mut App) {
    if cx.has_global::<SessionContext>() {
        cx.remove_global::<SessionContext>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpui::TestAppContext;

    #[gpui::test]
    fn test_sign_in_and_out(cx: &mut TestAppContext) {
        cx.update(init_session);
        assert!(!cx.read(SessionContext::is_signed_in));

        cx.update(|cx| sign_in(cx, SessionUser::new("joon")));
        assert_eq!(cx.read(SessionContext::username), Some("joon".to_string()));
        assert!(!cx.read(SessionContext::is_admin));

        cx.update(sign_out);
        assert!(!cx.read(SessionContext::is_signed_in));
    }

    #[gpui::test]
    fn test_teardown_without_session(cx: &mut TestAppContext) {
        cx.update(teardown_session);
        cx.update(sign_out);
        assert_eq!(cx.read(SessionContext::role), None);

        cx.update(|cx| sign_in(cx, SessionUser::admin("mina")));
        assert_eq!(cx.read(SessionContext::role), Some("admin".to_string()));
        cx.update(teardown_session);
        assert!(!cx.read(SessionContext::is_signed_in));
    }
}
