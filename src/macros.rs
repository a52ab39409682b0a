//! Level macros filling in the call site.
//!
//! Each macro logs through the global logger, or through any [`Logger`](crate::Logger)
//! given with the `logger:` prefix:
//!
//! ```rust
//! let logger = loggin::logger_config().no_console().build();
//! loggin::log_warn!(logger: &logger, "retrying in {}s", 5);
//! ```

/// Name of the enclosing function, closures skipped.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = name.strip_suffix("::f").unwrap_or(name);
        name.rsplit("::")
            .find(|segment| *segment != "{{closure}}")
            .unwrap_or(name)
    }};
}

/// Logs at an explicit [`Severity`](crate::Severity).
#[macro_export]
macro_rules! log_at {
    (logger: $logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            $crate::Site::new(file!(), $crate::__function_name!(), line!()),
            format_args!($($arg)+),
        )
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $crate::global(), $level, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_trace {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log_at!(logger: $logger, $crate::Severity::Trace, $($arg)+) };
    ($($arg:tt)+) => { $crate::log_at!($crate::Severity::Trace, $($arg)+) };
}

#[macro_export]
macro_rules! log_debug {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log_at!(logger: $logger, $crate::Severity::Debug, $($arg)+) };
    ($($arg:tt)+) => { $crate::log_at!($crate::Severity::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! log_info {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log_at!(logger: $logger, $crate::Severity::Info, $($arg)+) };
    ($($arg:tt)+) => { $crate::log_at!($crate::Severity::Info, $($arg)+) };
}

#[macro_export]
macro_rules! log_warn {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log_at!(logger: $logger, $crate::Severity::Warn, $($arg)+) };
    ($($arg:tt)+) => { $crate::log_at!($crate::Severity::Warn, $($arg)+) };
}

#[macro_export]
macro_rules! log_error {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log_at!(logger: $logger, $crate::Severity::Error, $($arg)+) };
    ($($arg:tt)+) => { $crate::log_at!($crate::Severity::Error, $($arg)+) };
}

#[macro_export]
macro_rules! log_fatal {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log_at!(logger: $logger, $crate::Severity::Fatal, $($arg)+) };
    ($($arg:tt)+) => { $crate::log_at!($crate::Severity::Fatal, $($arg)+) };
}
