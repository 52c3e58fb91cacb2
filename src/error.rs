//! Navigation outcomes and errors.
//!
//! - [`NavigationResult`]: the outcome of every navigation call
//!   (`Success`, `NotFound`, `Blocked`, `Error`).
//! - [`NavigationError`]: detailed failure, implements [`std::error::Error`].
//!
//! Degraded modal sessions (a missing background, the modal flag on a page
//! route) are not errors: the router logs them and renders the page layer only.
//!
//! ```
//! use travellink_navigator::NavigationResult;
//!
//! let result = NavigationResult::Success { path: "/plans".into() };
//! assert!(result.is_success());
//!
//! let blocked = NavigationResult::Blocked {
//!     reason: "Sign in required".into(),
//!     redirect: Some("/login".into()),
//! };
//! assert_eq!(blocked.redirect_path(), Some("/login"));
//! ```

use std::fmt;

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationResult {
    /// Navigation completed; `path` is now current.
    Success { path: String },
    /// No route matches `path`. History was still updated.
    NotFound { path: String },
    /// A guard stopped the navigation.
    Blocked {
        reason: String,
        redirect: Option<String>,
    },
    /// Navigation failed.
    Error(NavigationError),
}

/// Detailed navigation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    RouteNotFound { path: String },
    GuardBlocked { reason: String },
    /// No route registered under this name, or a `:param` was missing.
    UnknownNamedRoute { name: String },
    /// There is no history entry to go to.
    HistoryExhausted,
    NavigationFailed { message: String },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::RouteNotFound { path } => write!(f, "Route not found: {path}"),
            NavigationError::GuardBlocked { reason } => write!(f, "Navigation blocked: {reason}"),
            NavigationError::UnknownNamedRoute { name } => {
                write!(f, "Cannot build URL for route '{name}'")
            }
            NavigationError::HistoryExhausted => f.write_str("No history entry to navigate to"),
            NavigationError::NavigationFailed { message } => {
                write!(f, "Navigation failed: {message}")
            }
        }
    }
}

impl std::error::Error for NavigationError {}

impl NavigationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, NavigationResult::Success { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, NavigationResult::NotFound { .. })
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, NavigationResult::Blocked { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, NavigationResult::Error(_))
    }

    /// Redirect target of a blocked navigation.
    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            NavigationResult::Blocked {
                redirect: Some(path),
                ..
            } => Some(path),
            _ => None,
        }
    }

    /// Convert into a `Result`, turning `NotFound` and `Blocked` into errors.
    pub fn into_result(self) -> Result<String, NavigationError> {
        match self {
            NavigationResult::Success { path } => Ok(path),
            NavigationResult::NotFound { path } => Err(NavigationError::RouteNotFound { path }),
            NavigationResult::Blocked { reason, .. } => {
                Err(NavigationError::GuardBlocked { reason })
            }
            NavigationResult::Error(error) => Err(error),
        }
    }
}

impl From<NavigationError> for NavigationResult {
    fn from(error: NavigationError) -> Self {
        NavigationResult::Error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_result_success() {
        let result = NavigationResult::Success {
            path: "/plans".to_string(),
        };
        assert!(result.is_success());
        assert!(!result.is_not_found());
        assert!(!result.is_blocked());
        assert!(!result.is_error());
    }

    #[test]
    fn test_blocked_into_result() {
        let result = NavigationResult::Blocked {
            reason: "Admins only".to_string(),
            redirect: None,
        };
        assert_eq!(
            result.into_result(),
            Err(NavigationError::GuardBlocked {
                reason: "Admins only".to_string()
            })
        );
    }

    #[test]
    fn test_navigation_error_display() {
        let error = NavigationError::RouteNotFound {
            path: "/nowhere".to_string(),
        };
        assert_eq!(error.to_string(), "Route not found: /nowhere");
        assert_eq!(
            NavigationError::HistoryExhausted.to_string(),
            "No history entry to navigate to"
        );
    }
}
