#![deny(missing_docs)]
//! Shared logging utilities for the scout workspace.
//!
//! This crate provides the `scout_*` logging macros used across the codebase,
//! a scoped per-thread task context that the macros prefix onto each line, and a
//! minimal test initializer for the global logger.

use std::cell::RefCell;
use std::marker::PhantomData;

thread_local! {
    /// Task id of the search job currently handled on this thread, if any.
    static TASK_CONTEXT: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Tags log lines on this thread with `task_id` until the returned guard is
/// dropped, which restores the previous tag.
///
/// The tag is thread-local. Do not hold the guard across an `.await`: on a
/// multi-thread runtime the task may resume on another thread. The guard is
/// `!Send`, so a spawned future that holds it over an await will not compile.
pub fn enter_task(task_id: &str) -> TaskScope {
    let previous = TASK_CONTEXT.with(|ctx| ctx.replace(Some(task_id.to_owned())));
    TaskScope {
        previous,
        _not_send: PhantomData,
    }
}

/// Guard returned by [`enter_task`].
#[must_use = "the task tag is removed as soon as the guard is dropped"]
pub struct TaskScope {
    previous: Option<String>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        TASK_CONTEXT.with(|ctx| *ctx.borrow_mut() = previous);
    }
}

/// Retrieves the task id tagged on the current thread.
/// Returns `None` outside of [`enter_task`] scopes.
pub fn task_context() -> Option<String> {
    TASK_CONTEXT.with(|ctx| ctx.borrow().clone())
}

#[doc(hidden)]
#[macro_export]
macro_rules! __scout_log {
    ($level:ident, $($arg:tt)*) => {{
        match $crate::task_context() {
            Some(task) => log::$level!("[task {}] {}", task, format_args!($($arg)*)),
            None => log::$level!($($arg)*),
        }
    }};
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! scout_trace {
    ($($arg:tt)*) => {{
        $crate::__scout_log!(trace, $($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! scout_info {
    ($($arg:tt)*) => {{
        $crate::__scout_log!(info, $($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! scout_debug {
    ($($arg:tt)*) => {{
        $crate::__scout_log!(debug, $($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! scout_warn {
    ($($arg:tt)*) => {{
        $crate::__scout_log!(warn, $($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! scout_error {
    ($($arg:tt)*) => {{
        $crate::__scout_log!(error, $($arg)*);
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
