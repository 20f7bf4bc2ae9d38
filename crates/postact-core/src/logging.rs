//! Logging macros for postact.
//!
//! Thin wrappers over `tracing` so that every crate in the workspace logs
//! through one surface. Callers do not need a direct `tracing` dependency.
//!
//! ## Macro Overview
//!
//! | Macro | Feature Required | Level |
//! |-------|------------------|-------|
//! | `debug_log!` | `debug-hooks` | `DEBUG` |
//! | `info_log!` | None | `INFO` |
//! | `warn_log!` | None | `WARN` |
//! | `error_log!` | None | `ERROR` |
//!
//! ## Example
//!
//! ```ignore
//! use postact_core::{debug_log, warn_log};
//!
//! // Only compiled in with the `debug-hooks` feature
//! debug_log!("spliced region {}", id);
//!
//! warn_log!("dropping handler attribute {}", name);
//! ```

/// Logs a debug message (requires the `debug-hooks` feature)
///
/// Compiles to a no-op without the feature.
#[macro_export]
#[cfg(feature = "debug-hooks")]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::debug!($($arg)*);
	}};
}

/// No-op debug_log when the `debug-hooks` feature is disabled
#[macro_export]
#[cfg(not(feature = "debug-hooks"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs an info message
#[macro_export]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::info!($($arg)*);
	}};
}

/// Logs a warning message
///
/// # Example
///
/// ```ignore
/// warn_log!("style declaration cannot be placed as a child");
/// ```
#[macro_export]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::warn!($($arg)*);
	}};
}

/// Logs an error message
#[macro_export]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::error!($($arg)*);
	}};
}
