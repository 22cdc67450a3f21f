//! Logging facilities for Editable Grid.
//!
//! Editable Grid uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("editable_grid=debug")
//!     .init();
//! ```
//!
//! The target constants below can be used in filter directives to narrow
//! output to one subsystem.

/// Target names for log filtering.
pub mod targets {
    /// Grid facade target (mount, load orchestration).
    pub const GRID: &str = "editable_grid::grid";
    /// Grid model target (cell writes, resets).
    pub const MODEL: &str = "editable_grid::model";
    /// Metadata loader target (document parsing).
    pub const LOADER: &str = "editable_grid::loader";
    /// Table renderer target.
    pub const RENDER: &str = "editable_grid::render";
    /// Interaction controller target (clicks, edit transitions).
    pub const CONTROLLER: &str = "editable_grid::controller";
    /// Document transport target.
    pub const TRANSPORT: &str = "editable_grid::transport";
    /// Host document target (in-memory document, notices).
    pub const HOST: &str = "editable_grid::host";
    /// Timing spans.
    pub const PERF: &str = "editable_grid::perf";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "editable_grid_core::signal";
}

/// A guard that keeps a performance span entered until dropped.
///
/// ```
/// use editable_grid_core::logging::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("render_table");
///     // ... timed work ...
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Wrappers around the `tracing` macros with a consistent grid target.
#[macro_export]
macro_rules! grid_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: $crate::logging::targets::GRID, $($arg)*)
    };
}

#[macro_export]
macro_rules! grid_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: $crate::logging::targets::GRID, $($arg)*)
    };
}

#[macro_export]
macro_rules! grid_info {
    ($($arg:tt)*) => {
        tracing::info!(target: $crate::logging::targets::GRID, $($arg)*)
    };
}

#[macro_export]
macro_rules! grid_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: $crate::logging::targets::GRID, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_share_prefix() {
        for target in [
            targets::GRID,
            targets::MODEL,
            targets::LOADER,
            targets::RENDER,
            targets::CONTROLLER,
            targets::TRANSPORT,
            targets::HOST,
            targets::PERF,
        ] {
            assert!(target.starts_with("editable_grid::"), "{target}");
        }
    }

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
        grid_debug!("inside perf span");
    }
}
