//! # loggin
//! Process-wide leveled logger with console, file and custom sinks.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! loggin = "0.1.0"
//! ```
//!
//! ```rust
//! use loggin::{InitGlobal, Severity, logger_config};
//!
//! let _guard = logger_config()
//!     .with_level(Severity::Debug)
//!     .init_global();
//! loggin::log_info!("Hello, {}!", "world");
//! // guard closes owned file sinks when dropped
//! ```
//!
//! ## Multi-threaded logging
//! Install a lock adapter so that sinks sharing resources with other code are
//! serialized with it.
//! ```rust
//! use std::sync::Arc;
//! use loggin::{InitGlobal, MutexLock, logger_config};
//!
//! let _guard = logger_config().init_global();
//! loggin::set_lock(Some(Arc::new(MutexLock::new())));
//!
//! let handles: Vec<_> = (0..3).map(|i| {
//!     std::thread::spawn(move || {
//!         for n in 0..5 {
//!             loggin::log_warn!("thread {i} message {n}");
//!         }
//!     })
//! }).collect();
//! for h in handles { h.join().unwrap(); }
//! ```
//!
//! ## Logging to files
//! Files opened by path are appended to and closed at cleanup.
//!
//! ```rust
//! use loggin::{InitGlobal, Severity, logger_config};
//!
//! let path = std::env::temp_dir().join("loggin_doc_app.log");
//! std::fs::remove_file(&path).ok();
//! let guard = logger_config()
//!     .no_console() // disable the default console sink if needed
//!     .init_global();
//! loggin::register_file_path(&path, Severity::Info).expect("Unable to open log file");
//!
//! loggin::log_info!("Hello, world!");
//! drop(guard);
//! assert!(std::fs::read_to_string(&path).unwrap().ends_with("Hello, world!\n"));
//! ```

mod bridge;
#[macro_use]
mod macros;

use std::{
    fmt,
    path::Path,
    sync::{Arc, LazyLock},
};

pub use bridge::init_log_bridge;
pub use loggin_core::{
    DEFAULT_LEVEL, Error, Event, LockAdapter, LogSink, Logger, LoggerBuilder, LoggerConfig,
    LoggerDefaults, MAX_SINKS, MutexLock, NoLock, Output, OutputFn, Result, Severity, Site,
    SlotHandle, Stream, UNKNOWN_LEVEL, format_console, format_file, level_to_string,
    string_to_level,
};

/// The process-wide logger, with defaults read from `LOGGIN_*` variables.
static GLOBAL_LOGGER: LazyLock<Logger> = LazyLock::new(|| LoggerBuilder::from_env().build());

/// Returns the process-wide logger.
pub fn global() -> &'static Logger {
    &GLOBAL_LOGGER
}

/// Guard that tears the global logger down when dropped.
/// Hold this guard for the lifetime of your logging session.
pub struct LoggerGuard {
    _private: (),
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        cleanup();
    }
}

/// Initialization of the global logger from a [`LoggerBuilder`].
pub trait InitGlobal {
    /// Re-initializes the global logger with these defaults.
    /// Returns a guard that will clean it up when dropped.
    #[must_use = "LoggerGuard must be kept alive to keep logging. Do \"let _guard = logger_config().init_global();\""]
    fn init_global(self) -> LoggerGuard;
}

impl InitGlobal for LoggerBuilder {
    fn init_global(self) -> LoggerGuard {
        global().reset(self.defaults());
        LoggerGuard { _private: () }
    }
}

/// Returns a [`LoggerBuilder`] seeded from the `LOGGIN_*` environment variables.
pub fn logger_config() -> LoggerBuilder {
    LoggerBuilder::from_env()
}

/// Initializes the global logger. Does nothing if already initialized.
pub fn init() {
    global().init()
}

/// Closes owned file sinks and resets the global logger.
pub fn cleanup() {
    global().cleanup()
}

pub fn is_initialized() -> bool {
    global().is_initialized()
}

pub fn set_level(level: Severity) {
    global().set_level(level)
}

pub fn set_quiet(quiet: bool) {
    global().set_quiet(quiet)
}

pub fn set_colors(use_colors: bool) {
    global().set_colors(use_colors)
}

pub fn set_show_file_line(show: bool) {
    global().set_show_file_line(show)
}

pub fn set_show_function(show: bool) {
    global().set_show_function(show)
}

pub fn set_lock(adapter: Option<Arc<dyn LockAdapter>>) {
    global().set_lock(adapter)
}

pub fn register_console_sink(min_level: Severity) -> Result<SlotHandle> {
    global().register_console_sink(min_level)
}

pub fn register_file_sink(file: Option<Stream>, min_level: Severity) -> Result<SlotHandle> {
    global().register_file_sink(file, min_level)
}

pub fn register_file_path<P: AsRef<Path>>(path: P, min_level: Severity) -> Result<SlotHandle> {
    global().register_file_path(path, min_level)
}

pub fn register_sink<C: Send + 'static>(
    output: Option<OutputFn<C>>,
    context: C,
    min_level: Severity,
) -> Result<SlotHandle> {
    global().register_sink(output, context, min_level)
}

pub fn add_sink<S: LogSink + 'static>(sink: S, min_level: Severity) -> Result<SlotHandle> {
    global().add_sink(sink, min_level)
}

/// Logs through the global logger. Prefer the level macros, which fill in the site.
pub fn log(level: Severity, site: Site<'_>, args: fmt::Arguments<'_>) {
    global().log(level, site, args)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    // The global logger is shared by every test of this binary.
    static SERIAL: Mutex<()> = Mutex::new(());

    fn counting_sink(min_level: Severity) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        add_sink(
            move |_: &Event<'_>| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            min_level,
        )
        .unwrap();
        count
    }

    #[test]
    fn test_global_lifecycle() {
        let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        let guard = LoggerBuilder::default().no_console().init_global();
        assert!(is_initialized());
        let count = counting_sink(Severity::Trace);
        set_level(Severity::Warn);
        log_info!("ignored");
        log_error!("counted");
        assert_eq!(count.load(Ordering::SeqCst), 1);
        set_quiet(true);
        log_fatal!("ignored");
        assert_eq!(count.load(Ordering::SeqCst), 1);
        drop(guard);
        assert!(!is_initialized());
        assert_eq!(global().sink_count(), 0);
    }

    #[test]
    fn test_global_invalid_registration() {
        let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        let _guard = LoggerBuilder::default().no_console().init_global();
        assert!(matches!(
            register_file_sink(None, Severity::Info),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            register_sink::<u8>(None, 0, Severity::Info),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(global().sink_count(), 0);
    }

    #[test]
    fn test_log_bridge() {
        let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        let _guard = LoggerBuilder::default()
            .no_console()
            .with_level(Severity::Debug)
            .init_global();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&seen);
        add_sink(
            move |event: &Event<'_>| {
                recorded
                    .lock()
                    .unwrap()
                    .push((event.level, event.message.to_string()))
            },
            Severity::Trace,
        )
        .unwrap();
        init_log_bridge().unwrap();
        ::log::trace!("too low");
        ::log::debug!("from the log crate: {}", 42);
        ::log::error!("failure");
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (Severity::Debug, "from the log crate: 42".to_string()),
                (Severity::Error, "failure".to_string()),
            ]
        );
        assert!(init_log_bridge().is_err());

        assert!(::log::log_enabled!(::log::Level::Error));
        assert!(!::log::log_enabled!(::log::Level::Trace));
        set_quiet(true);
        assert!(!::log::log_enabled!(::log::Level::Error));
    }
}
