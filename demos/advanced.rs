use std::{sync::Arc, thread, time::Duration};

use loggin::{Event, InitGlobal, MutexLock, Severity, Stream, log_error, log_info, log_warn};

/// `[TIMESTAMP] LEVEL: MESSAGE`
fn custom_output(event: &Event<'_>, prefix: &mut String) {
    println!(
        "{prefix}[{}] {}: {}",
        event.time.format("%Y-%m-%d %H:%M:%S"),
        event.level,
        event.message
    );
}

fn main() {
    let _guard = loggin::logger_config()
        .show_function(true)
        .with_console_level(Severity::Info)
        .init_global();

    loggin::register_sink(
        Some(custom_output as loggin::OutputFn<String>),
        String::from("custom "),
        Severity::Warn,
    )
    .expect("Unable to add custom output");
    loggin::register_file_sink(Some(Stream::Stdout), Severity::Error)
        .expect("Unable to add stdout file output");

    log_info!("Only the console sink sees this");
    log_warn!("Console and custom sinks see this");
    log_error!("Every sink sees this");

    loggin::set_lock(Some(Arc::new(MutexLock::new())));
    let handles: Vec<_> = (1..=3)
        .map(|id| {
            thread::spawn(move || {
                for n in 1..=5 {
                    log_info!("Thread {id}: message {n}");
                    thread::sleep(Duration::from_millis(10));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Logging thread panicked");
    }

    for name in ["trace", "ERROR", "Warn", "bogus"] {
        log_info!("{name:?} parses as {}", loggin::string_to_level(name));
    }
}
