//! Log callback channel.
//!
//! The crate never writes diagnostics anywhere on its own. A host that wants
//! them installs a callback and routes messages to its logger of choice.

use std::sync::{Arc, Mutex, OnceLock};

/// Log level for diagnostic callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type LogCallback = Arc<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global log callback, replacing any previous one.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    let mut guard = log_callback()
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    *guard = Some(Arc::new(callback));
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    let mut guard = log_callback()
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    *guard = None;
}

/// The installed callback. The lock is released before the callback runs.
fn current_callback() -> Option<LogCallback> {
    log_callback()
        .lock()
        .ok()
        .and_then(|guard| guard.as_ref().map(Arc::clone))
}

/// Emit a log message to the registered callback, if any.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Some(callback) = current_callback() {
        callback(level, message);
    }
}

/// Emit a lazily formatted log message.
///
/// The message is only built when a callback is installed.
pub(crate) fn emit_log_with(level: LogLevel, message: impl FnOnce() -> String) {
    if let Some(callback) = current_callback() {
        callback(level, &message());
    }
}
