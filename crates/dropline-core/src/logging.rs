#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros. Without it, macros of the same names are exported at the crate root
//! and expand to nothing (spans expand to [`NoopSpan`]), so call sites read
//! `use dropline_core::{debug, warn};` in both configurations.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace, trace_span, warn};

/// Stand-in for `tracing::Span` when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Mirrors `tracing::Span::entered`.
    #[inline]
    #[must_use]
    pub const fn entered(self) -> Self {
        self
    }

    /// Mirrors `tracing::Span::in_scope`.
    #[inline]
    pub fn in_scope<F: FnOnce() -> T, T>(&self, f: F) -> T {
        f()
    }
}

/// Discards a `trace!` event.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {{}};
}

/// Discards a `debug!` event.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}

/// Discards a `warn!` event.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{}};
}

/// Returns a [`NoopSpan`](crate::logging::NoopSpan) in place of a trace span.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace_span {
    ($($arg:tt)*) => {
        $crate::logging::NoopSpan
    };
}

/// Returns a [`NoopSpan`](crate::logging::NoopSpan) in place of a debug span.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug_span {
    ($($arg:tt)*) => {
        $crate::logging::NoopSpan
    };
}

#[cfg(all(test, not(feature = "tracing")))]
mod tests {
    #[test]
    fn noop_macros_expand_in_statement_and_span_position() {
        let value = 7_u16;
        crate::trace!(value, "trace");
        crate::debug!(value = value, "debug {}", value);
        crate::warn!("warn");
        let span = crate::debug_span!("dropline.test", value).entered();
        assert_eq!(span.in_scope(|| value + 1), 8);
        let _ = crate::trace_span!("dropline.test");
    }
}
