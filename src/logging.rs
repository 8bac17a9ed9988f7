use std::panic;
use std::path::Path;
use tracing::error;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "crt-token-panel.log";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to create log file: {0}")]
    File(#[from] std::io::Error),
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("Logger already initialized: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Build the filter for `directives`; an empty string means `info`.
pub fn build_filter(directives: &str) -> Result<EnvFilter, LoggingError> {
    let directives = match directives.trim() {
        "" => "info",
        other => other,
    };
    Ok(EnvFilter::try_new(directives)?)
}

/// Send logs to `<log_dir>/crt-token-panel.log` and record panics there.
pub fn initialize_logger(directives: &str, log_dir: &Path) -> Result<(), LoggingError> {
    let log_file = std::fs::File::create(log_dir.join(LOG_FILE_NAME))?;
    let filter = build_filter(directives)?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Log panics
    let default_panic_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let payload = panic_info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("unknown");

        let location = panic_info
            .location()
            .unwrap_or_else(|| panic::Location::caller());

        error!(
            location = tracing::field::display(location),
            "Panic occurred: {}", message
        );

        default_panic_hook(panic_info);
    }));

    tracing::info!(filter = directives, "Logger initialized successfully");
    Ok(())
}
