use loggin::{Severity, log_debug, log_error, log_fatal, log_info, log_trace, log_warn};

fn main() {
    loggin::init();

    log_trace!("Trace message, hidden at the default level");
    log_debug!("Debug message, hidden at the default level");
    log_info!("Application started");
    log_warn!("Disk usage at {}%", 87);
    log_error!("Failed to open {}", "config.toml");
    log_fatal!("Unrecoverable state");

    loggin::set_level(Severity::Trace);
    loggin::set_show_function(true);
    log_trace!("Trace is visible now");
    log_debug!("Level names: {} {}", Severity::Debug, loggin::level_to_string(9));

    loggin::set_colors(false);
    loggin::set_show_file_line(false);
    log_info!("Plain output without file and line");

    loggin::set_quiet(true);
    log_error!("Quiet mode swallows this");
    loggin::set_quiet(false);

    loggin::cleanup();
}
