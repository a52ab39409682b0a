use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::{Severity, Site, global};

/// Forwards records from the `log` crate macros to the global logger.
struct LogBridge;

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let config = global().config();
        !config.quiet && Severity::from(metadata.level()) >= config.level
    }

    fn log(&self, record: &Record) {
        let site = Site::new(
            record.file().unwrap_or("<unknown>"),
            record.module_path().unwrap_or(record.target()),
            record.line().unwrap_or(0),
        );
        global().log(record.level().into(), site, *record.args());
    }

    fn flush(&self) {}
}

/// Routes `log::info!` and friends into the global logger.
///
/// Fails if another `log` implementation is already installed.
pub fn init_log_bridge() -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(LogBridge))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
