use std::{
    fmt,
    fs::File,
    io::{self, Write},
    panic::{AssertUnwindSafe, catch_unwind},
};

use crate::{
    error::{Error, Result},
    event::Event,
    format::{format_console, format_file},
    level::Severity,
};

/// Number of sink slots in a table.
pub const MAX_SINKS: usize = 16;

/// A user-defined output procedure.
pub trait LogSink: Send {
    fn write(&mut self, event: &Event<'_>);
}

impl<F> LogSink for F
where
    F: FnMut(&Event<'_>) + Send,
{
    fn write(&mut self, event: &Event<'_>) {
        self(event)
    }
}

/// Output procedure taking an opaque per-sink context.
pub type OutputFn<C> = fn(&Event<'_>, &mut C);

pub(crate) struct WithContext<C> {
    pub(crate) output: OutputFn<C>,
    pub(crate) context: C,
}

impl<C: Send> LogSink for WithContext<C> {
    fn write(&mut self, event: &Event<'_>) {
        (self.output)(event, &mut self.context)
    }
}

/// A writable destination for the built-in sinks.
pub enum Stream {
    /// Standard output, never closed by the logger.
    Stdout,
    /// Standard error, never closed by the logger.
    Stderr,
    /// A writer owned by the logger, flushed and closed at cleanup.
    Owned(Box<dyn Write + Send>),
}

impl Stream {
    pub fn owned<W: Write + Send + 'static>(writer: W) -> Self {
        Stream::Owned(Box::new(writer))
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Stream::Owned(_))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self {
            Stream::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{line}")?;
                out.flush()
            }
            Stream::Stderr => {
                let mut err = io::stderr().lock();
                writeln!(err, "{line}")?;
                err.flush()
            }
            Stream::Owned(writer) => {
                writeln!(writer, "{line}")?;
                writer.flush()
            }
        }
    }

    fn close(self) {
        if let Stream::Owned(mut writer) = self {
            writer.flush().ok();
        }
    }
}

impl From<File> for Stream {
    fn from(file: File) -> Self {
        Stream::owned(file)
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Stdout => f.write_str("Stdout"),
            Stream::Stderr => f.write_str("Stderr"),
            Stream::Owned(_) => f.write_str("Owned(..)"),
        }
    }
}

/// What a sink does with an event.
pub enum Output {
    /// Console formatting, colored when enabled.
    Console(Stream),
    /// File formatting, never colored.
    File(Stream),
    Custom(Box<dyn LogSink>),
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Console(stream) => f.debug_tuple("Console").field(stream).finish(),
            Output::File(stream) => f.debug_tuple("File").field(stream).finish(),
            Output::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// An active entry of the sink table.
#[derive(Debug)]
pub struct Sink {
    output: Output,
    min_level: Severity,
}

impl Sink {
    pub fn min_level(&self) -> Severity {
        self.min_level
    }

    /// Whether cleanup closes this sink's stream.
    pub fn owns_stream(&self) -> bool {
        match &self.output {
            Output::Console(stream) | Output::File(stream) => stream.is_owned(),
            Output::Custom(_) => false,
        }
    }

    fn emit(&mut self, event: &Event<'_>) {
        // Write failures belong to the sink and are not reported.
        match &mut self.output {
            Output::Console(stream) => {
                stream.write_line(&format_console(event)).ok();
            }
            Output::File(stream) => {
                stream.write_line(&format_file(event)).ok();
            }
            Output::Custom(sink) => sink.write(event),
        }
    }

    fn close(self) {
        match self.output {
            Output::Console(stream) | Output::File(stream) => stream.close(),
            Output::Custom(_) => {}
        }
    }
}

/// Index of the slot claimed by a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotHandle(usize);

impl SlotHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Fixed-capacity, registration-ordered sink slots.
///
/// Slots are never freed individually; [`SinkTable::clear`] empties them all.
pub struct SinkTable {
    slots: [Option<Sink>; MAX_SINKS],
}

impl Default for SinkTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SinkTable {
    pub fn new() -> Self {
        Self {
            slots: [const { None }; MAX_SINKS],
        }
    }

    /// Claims the lowest free slot. The table is untouched on failure.
    pub fn register(&mut self, output: Output, min_level: Severity) -> Result<SlotHandle> {
        let (index, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| slot.is_none())
            .ok_or(Error::Capacity {
                capacity: MAX_SINKS,
            })?;
        *slot = Some(Sink { output, min_level });
        Ok(SlotHandle(index))
    }

    pub fn get(&self, handle: SlotHandle) -> Option<&Sink> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs every sink whose threshold admits `event.level`, in slot order.
    ///
    /// A panicking sink is contained; the sinks after it still run.
    pub fn dispatch(&mut self, event: &Event<'_>) {
        for sink in self.slots.iter_mut().flatten() {
            if event.level >= sink.min_level {
                catch_unwind(AssertUnwindSafe(|| sink.emit(event))).ok();
            }
        }
    }

    /// Deactivates every slot, flushing and closing owned streams.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if let Some(sink) = slot.take() {
                sink.close();
            }
        }
    }
}

impl fmt::Debug for SinkTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.slots.iter().flatten()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    };

    use chrono::Local;

    use super::*;
    use crate::config::LoggerConfig;

    fn event<'a>(level: Severity, config: &'a LoggerConfig) -> Event<'a> {
        Event {
            level,
            file: "sink.rs",
            function: "test",
            line: 1,
            message: "hello",
            time: Local::now(),
            config,
        }
    }

    fn counter(count: &Arc<AtomicUsize>) -> Output {
        let count = Arc::clone(count);
        Output::Custom(Box::new(move |_: &Event<'_>| {
            count.fetch_add(1, Ordering::SeqCst);
        }))
    }

    struct CloseFlag(Arc<AtomicBool>);

    impl Write for CloseFlag {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for CloseFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_capacity() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut table = SinkTable::new();
        for i in 0..MAX_SINKS {
            assert_eq!(
                table.register(counter(&count), Severity::Trace).unwrap().index(),
                i
            );
        }
        let err = table.register(counter(&count), Severity::Trace).unwrap_err();
        assert!(matches!(err, Error::Capacity { capacity: 16 }));
        assert_eq!(table.len(), MAX_SINKS);
    }

    #[test]
    fn test_per_sink_threshold() {
        let config = LoggerConfig::default();
        let low = Arc::new(AtomicUsize::new(0));
        let high = Arc::new(AtomicUsize::new(0));
        let mut table = SinkTable::new();
        table.register(counter(&low), Severity::Debug).unwrap();
        table.register(counter(&high), Severity::Error).unwrap();
        table.dispatch(&event(Severity::Info, &config));
        table.dispatch(&event(Severity::Error, &config));
        table.dispatch(&event(Severity::Trace, &config));
        assert_eq!(low.load(Ordering::SeqCst), 2);
        assert_eq!(high.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let config = LoggerConfig::default();
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut table = SinkTable::new();
        for i in 0..3 {
            let order = Arc::clone(&order);
            table
                .register(
                    Output::Custom(Box::new(move |_: &Event<'_>| {
                        order.lock().unwrap().push(i)
                    })),
                    Severity::Trace,
                )
                .unwrap();
        }
        table.dispatch(&event(Severity::Info, &config));
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_context_sink() {
        fn record(event: &Event<'_>, seen: &mut Arc<Mutex<Vec<String>>>) {
            seen.lock().unwrap().push(event.message.to_string());
        }
        let config = LoggerConfig::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut table = SinkTable::new();
        let sink = WithContext {
            output: record as OutputFn<_>,
            context: Arc::clone(&seen),
        };
        table
            .register(Output::Custom(Box::new(sink)), Severity::Trace)
            .unwrap();
        table.dispatch(&event(Severity::Info, &config));
        assert_eq!(*seen.lock().unwrap(), vec!["hello".to_string()]);
    }

    #[test]
    fn test_clear_closes_owned_streams_only() {
        let closed = Arc::new(AtomicBool::new(false));
        let mut table = SinkTable::new();
        let owned = table
            .register(
                Output::File(Stream::owned(CloseFlag(Arc::clone(&closed)))),
                Severity::Trace,
            )
            .unwrap();
        let standard = table
            .register(Output::File(Stream::Stderr), Severity::Trace)
            .unwrap();
        assert!(table.get(owned).unwrap().owns_stream());
        assert!(!table.get(standard).unwrap().owns_stream());
        assert!(!closed.load(Ordering::SeqCst));
        table.clear();
        assert!(closed.load(Ordering::SeqCst));
        assert!(table.is_empty());
        // slots are reusable after a full clear
        let handle = table
            .register(Output::Console(Stream::Stderr), Severity::Trace)
            .unwrap();
        assert_eq!(handle.index(), 0);
    }

    #[test]
    fn test_console_owned_stream_is_closed() {
        let closed = Arc::new(AtomicBool::new(false));
        let mut table = SinkTable::new();
        let handle = table
            .register(
                Output::Console(Stream::owned(CloseFlag(Arc::clone(&closed)))),
                Severity::Trace,
            )
            .unwrap();
        let custom = table
            .register(counter(&Arc::new(AtomicUsize::new(0))), Severity::Trace)
            .unwrap();
        assert!(table.get(handle).unwrap().owns_stream());
        assert!(!table.get(custom).unwrap().owns_stream());
        table.clear();
        assert!(closed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_panicking_sink_does_not_stop_dispatch() {
        let config = LoggerConfig::default();
        let count = Arc::new(AtomicUsize::new(0));
        let mut table = SinkTable::new();
        table
            .register(
                Output::Custom(Box::new(|_: &Event<'_>| panic!("sink failure"))),
                Severity::Trace,
            )
            .unwrap();
        table.register(counter(&count), Severity::Trace).unwrap();
        table.dispatch(&event(Severity::Info, &config));
        table.dispatch(&event(Severity::Warn, &config));
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(table.len(), 2);
    }
}
