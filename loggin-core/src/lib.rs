//! # loggin-core
//! Core of loggin: a leveled dispatcher fanning log events out to registered sinks.
//!
//! ```rust
//! use loggin_core::{Event, Severity, Site, logger_config};
//!
//! let logger = logger_config().no_console().build();
//! logger
//!     .add_sink(|event: &Event<'_>| assert_eq!(event.message, "disk at 91%"), Severity::Warn)
//!     .unwrap();
//! logger.log(Severity::Warn, Site::new(file!(), "main", line!()), format_args!("disk at {}%", 91));
//! logger.cleanup();
//! ```

mod config;
mod error;
mod event;
mod format;
mod level;
mod lock;
mod logger;
mod sink;

pub use config::{LOGGIN_ENV, LoggerConfig, LoggerDefaults, LogginEnv};
pub use error::{Error, Result};
pub use event::{Event, Site};
pub use format::{format_console, format_file, level_color};
pub use level::{DEFAULT_LEVEL, Severity, UNKNOWN_LEVEL, level_to_string, string_to_level};
pub use lock::{LockAdapter, MutexLock, NoLock};
pub use logger::{Logger, LoggerBuilder, logger_config};
pub use sink::{LogSink, MAX_SINKS, Output, OutputFn, Sink, SinkTable, SlotHandle, Stream};
