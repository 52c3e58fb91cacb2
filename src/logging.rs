//! Logging facade.
//!
//! The navigator never calls a logging crate directly. Every message goes
//! through one of the macros below, which forward to [`log`](https://docs.rs/log)
//! or [`tracing`](https://docs.rs/tracing) depending on the enabled feature.
//! Enable at most one of the two.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! With neither feature enabled the macros expand to nothing.
//!
//! Levels used by the router:
//!
//! - `info_log!`: a navigation started or completed, a modal opened or closed.
//! - `debug_log!`: layer resolution, guard decisions, outlet rendering.
//! - `trace_log!`: per-guard and per-frame detail.
//! - `warn_log!`: a modal session was degraded (missing background, not a
//!   modal route) or a navigation was denied.
//! - `error_log!`: redirect loops.
//!
//! ```ignore
//! use travellink_navigator::{debug_log, warn_log};
//!
//! debug_log!("Resolved '{}' into {} levels", path, stack.len());
//! warn_log!("Background '{}' does not resolve", background.path());
//! ```

/// Emit a **trace**-level message through the configured backend.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    };
}

/// Emit a **debug**-level message through the configured backend.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
    };
}

/// Emit an **info**-level message through the configured backend.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!($($arg)*);
        #[cfg(feature = "log")]
        ::log::info!($($arg)*);
    };
}

/// Emit a **warn**-level message through the configured backend.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!($($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
    };
}

/// Emit an **error**-level message through the configured backend.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!($($arg)*);
        #[cfg(feature = "log")]
        ::log::error!($($arg)*);
    };
}
