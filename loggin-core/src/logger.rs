use std::{
    borrow::Cow,
    fmt,
    fs::File,
    io::BufWriter,
    path::Path,
    sync::{Arc, Mutex, PoisonError, RwLock},
};

use chrono::Local;

use crate::{
    config::{LoggerConfig, LoggerDefaults},
    error::{Error, Result},
    event::{Event, Site},
    level::Severity,
    lock::{AdapterGuard, LockAdapter, NoLock},
    sink::{LogSink, Output, OutputFn, SinkTable, SlotHandle, Stream, WithContext},
};

struct State {
    defaults: LoggerDefaults,
    initialized: bool,
    config: LoggerConfig,
    sinks: SinkTable,
}

impl State {
    fn new(defaults: LoggerDefaults) -> Self {
        Self {
            defaults,
            initialized: false,
            config: defaults.config,
            sinks: SinkTable::new(),
        }
    }

    fn ensure_init(&mut self) {
        if self.initialized {
            return;
        }
        self.config = self.defaults.config;
        if let Some(level) = self.defaults.console_level {
            // the table is empty here, so the first slot is always free
            self.sinks
                .register(Output::Console(Stream::Stderr), level)
                .ok();
        }
        self.initialized = true;
    }

    fn teardown(&mut self) {
        self.sinks.clear();
        self.config = self.defaults.config;
        self.initialized = false;
    }
}

/// A dispatcher with its own configuration and sink table.
///
/// A logger starts uninitialized. [`Logger::init`] applies its defaults and
/// installs the default console sink; every other operation initializes it
/// on first use. [`Logger::cleanup`] closes owned file sinks and returns it to
/// the uninitialized state, after which it can be initialized again.
///
/// Every operation runs inside one critical section: the installed
/// [`LockAdapter`] is acquired first, then the internal state lock. Sinks run
/// inside that section, so a sink must not log through the same logger.
pub struct Logger {
    adapter: RwLock<Arc<dyn LockAdapter>>,
    state: Mutex<State>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Logger")
            .field("initialized", &state.initialized)
            .field("config", &state.config)
            .field("sinks", &state.sinks)
            .finish()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self::with_defaults(LoggerDefaults::default())
    }

    pub fn with_defaults(defaults: LoggerDefaults) -> Self {
        Self {
            adapter: RwLock::new(Arc::new(NoLock)),
            state: Mutex::new(State::new(defaults)),
        }
    }

    fn critical<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let adapter = self
            .adapter
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let _held = AdapterGuard::acquire(adapter);
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Empties the table, restores the default config and removes the adapter.
    fn teardown(&self, state: &mut State) {
        state.teardown();
        *self.adapter.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(NoLock);
    }

    fn configure(&self, f: impl FnOnce(&mut LoggerConfig)) {
        self.critical(|state| {
            state.ensure_init();
            f(&mut state.config);
        })
    }

    /// Applies the defaults and installs the default console sink.
    /// Does nothing if already initialized.
    pub fn init(&self) {
        self.critical(State::ensure_init)
    }

    /// Closes owned file sinks, deactivates every sink, removes the lock
    /// adapter and returns to the uninitialized state. Does nothing if not
    /// initialized.
    pub fn cleanup(&self) {
        self.critical(|state| {
            if !state.initialized {
                return;
            }
            self.teardown(state);
        })
    }

    /// Tears down as [`Logger::cleanup`] does, replaces the defaults, then
    /// initializes again.
    pub fn reset(&self, defaults: LoggerDefaults) {
        self.critical(|state| {
            self.teardown(state);
            state.defaults = defaults;
            state.ensure_init();
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.critical(|state| state.initialized)
    }

    /// Snapshot of the live configuration.
    pub fn config(&self) -> LoggerConfig {
        self.critical(|state| state.config)
    }

    pub fn level(&self) -> Severity {
        self.config().level
    }

    /// Number of active sinks.
    pub fn sink_count(&self) -> usize {
        self.critical(|state| state.sinks.len())
    }

    pub fn set_level(&self, level: Severity) {
        self.configure(|config| config.level = level)
    }

    pub fn set_quiet(&self, quiet: bool) {
        self.configure(|config| config.quiet = quiet)
    }

    pub fn set_colors(&self, use_colors: bool) {
        self.configure(|config| config.use_colors = use_colors)
    }

    pub fn set_show_file_line(&self, show: bool) {
        self.configure(|config| config.show_file_line = show)
    }

    pub fn set_show_function(&self, show: bool) {
        self.configure(|config| config.show_function = show)
    }

    /// Installs `adapter`, or removes the current one with `None`.
    ///
    /// The swap happens under the previously installed adapter, which is also
    /// the one released afterwards.
    pub fn set_lock(&self, adapter: Option<Arc<dyn LockAdapter>>) {
        let adapter = adapter.unwrap_or_else(|| Arc::new(NoLock));
        self.critical(|state| {
            state.ensure_init();
            *self.adapter.write().unwrap_or_else(PoisonError::into_inner) = adapter;
        })
    }

    /// Claims the first free slot for `output`.
    pub fn register(&self, output: Output, min_level: Severity) -> Result<SlotHandle> {
        self.critical(|state| {
            state.ensure_init();
            state.sinks.register(output, min_level)
        })
    }

    /// Registers an output procedure together with the context it receives.
    pub fn register_sink<C: Send + 'static>(
        &self,
        output: Option<OutputFn<C>>,
        context: C,
        min_level: Severity,
    ) -> Result<SlotHandle> {
        let output = output.ok_or(Error::InvalidArgument("output procedure is required"))?;
        self.register(
            Output::Custom(Box::new(WithContext { output, context })),
            min_level,
        )
    }

    /// Registers any [`LogSink`], closures included.
    pub fn add_sink<S: LogSink + 'static>(&self, sink: S, min_level: Severity) -> Result<SlotHandle> {
        self.register(Output::Custom(Box::new(sink)), min_level)
    }

    /// Registers console output on standard error.
    pub fn register_console_sink(&self, min_level: Severity) -> Result<SlotHandle> {
        self.register_console_sink_to(Stream::Stderr, min_level)
    }

    /// Registers console formatting on another stream.
    pub fn register_console_sink_to(&self, stream: Stream, min_level: Severity) -> Result<SlotHandle> {
        self.register(Output::Console(stream), min_level)
    }

    /// Registers file output on `file`. Owned streams are closed at cleanup;
    /// [`Stream::Stdout`] and [`Stream::Stderr`] never are.
    pub fn register_file_sink(&self, file: Option<Stream>, min_level: Severity) -> Result<SlotHandle> {
        let file = file.ok_or(Error::InvalidArgument("file stream is required"))?;
        self.register(Output::File(file), min_level)
    }

    /// Opens `path` for appending, creating it if needed, and registers it as
    /// an owned file sink.
    pub fn register_file_path<P: AsRef<Path>>(
        &self,
        path: P,
        min_level: Severity,
    ) -> Result<SlotHandle> {
        let file = File::options().create(true).append(true).open(path)?;
        self.register_file_sink(Some(Stream::owned(BufWriter::new(file))), min_level)
    }

    /// Dispatches one event.
    ///
    /// Nothing happens when quiet is set or `level` is below the configured
    /// level. Otherwise the message is rendered once, a single timestamp is
    /// taken, and every sink whose threshold admits `level` runs in
    /// registration order before this returns.
    pub fn log(&self, level: Severity, site: Site<'_>, args: fmt::Arguments<'_>) {
        self.critical(|state| {
            state.ensure_init();
            let config = state.config;
            if config.quiet || level < config.level {
                return;
            }
            let time = Local::now();
            let message = match args.as_str() {
                Some(message) => Cow::Borrowed(message),
                None => Cow::Owned(args.to_string()),
            };
            let event = Event {
                level,
                file: site.file,
                function: site.function,
                line: site.line,
                message: &message,
                time,
                config: &config,
            };
            state.sinks.dispatch(&event);
        })
    }
}

/// Builder for the defaults a [`Logger`] initializes with.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggerBuilder {
    defaults: LoggerDefaults,
}

impl LoggerBuilder {
    /// Starts from the `LOGGIN_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            defaults: LoggerDefaults {
                config: LoggerConfig::from_env(),
                ..Default::default()
            },
        }
    }

    fn with_config(self, f: impl FnOnce(&mut LoggerConfig)) -> Self {
        let mut defaults = self.defaults;
        f(&mut defaults.config);
        Self { defaults }
    }

    /// Sets the minimum level
    pub fn with_level(self, level: Severity) -> Self {
        self.with_config(|config| config.level = level)
    }
    /// Suppress all output
    pub fn quiet(self) -> Self {
        self.with_config(|config| config.quiet = true)
    }
    pub fn with_colors(self, yes: bool) -> Self {
        self.with_config(|config| config.use_colors = yes)
    }
    pub fn no_colors(self) -> Self {
        self.with_colors(false)
    }
    pub fn show_file_line(self, yes: bool) -> Self {
        self.with_config(|config| config.show_file_line = yes)
    }
    pub fn show_function(self, yes: bool) -> Self {
        self.with_config(|config| config.show_function = yes)
    }
    /// Do not install the default console sink
    pub fn no_console(self) -> Self {
        Self {
            defaults: LoggerDefaults {
                console_level: None,
                ..self.defaults
            },
        }
    }
    /// Threshold of the default console sink
    pub fn with_console_level(self, level: Severity) -> Self {
        Self {
            defaults: LoggerDefaults {
                console_level: Some(level),
                ..self.defaults
            },
        }
    }

    pub fn defaults(&self) -> LoggerDefaults {
        self.defaults
    }

    /// Builds an uninitialized logger carrying these defaults.
    pub fn build(self) -> Logger {
        Logger::with_defaults(self.defaults)
    }
}

/// Returns a default [`LoggerBuilder`].
pub fn logger_config() -> LoggerBuilder {
    LoggerBuilder::default()
}
