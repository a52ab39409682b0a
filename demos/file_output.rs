use loggin::{Severity, log_debug, log_error, log_info, log_warn};

fn main() {
    let path = std::env::temp_dir().join("loggin_example.log");
    std::fs::remove_file(&path).ok();

    loggin::init();
    if let Err(err) = loggin::register_file_path(&path, Severity::Trace) {
        log_error!("Failed to add file output: {err}");
        return;
    }
    println!("Logging to both console and {}", path.display());

    log_info!("Application started");
    log_debug!("Debug information: {}", "some debug data");
    log_warn!("This is a warning message");
    log_error!("An error occurred: {}", "file not found");

    loggin::set_level(Severity::Warn);
    log_info!("This info message does not reach the file");
    log_warn!("This warning reaches the file");
    loggin::set_level(Severity::Trace);

    log_info!("Application shutting down");
    // flushes and closes the file
    loggin::cleanup();

    match std::fs::read_to_string(&path) {
        Ok(contents) => print!("\n--- {} ---\n{contents}", path.display()),
        Err(err) => eprintln!("Unable to read {}: {err}", path.display()),
    }
}
