#![deny(missing_docs)]
//! Shared logging utilities for the listing sorter workspace.
//!
//! This crate provides the `listing_*` logging macros used across the codebase,
//! a per-thread counter of classification passes, and a minimal test
//! initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Number of processing passes the engine has started on this thread.
    static PASS: Cell<u64> = const { Cell::new(0) };
}

/// Records the number of the processing pass currently running on this thread.
pub fn set_pass(pass: u64) {
    PASS.with(|v| v.set(pass));
}

/// Returns the processing pass currently running on this thread, or 0 before
/// the first pass.
pub fn current_pass() -> u64 {
    PASS.with(|v| v.get())
}

/// Advances the pass counter and returns the new pass number.
pub fn next_pass() -> u64 {
    PASS.with(|v| {
        let next = v.get().wrapping_add(1);
        v.set(next);
        next
    })
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! listing_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! listing_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! listing_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! listing_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! listing_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Logs an info-level message prefixed with the current pass number.
#[macro_export]
macro_rules! listing_pass_info {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        log::info!(concat!("[pass {}] ", $fmt), $crate::current_pass() $(, $arg)*);
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
