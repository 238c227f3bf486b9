use crate::config::WizardConfig;

pub const LOG_TARGET_STARTUP: &str = "booking_wizard::startup";

/// Initialize tracing with file rotation
///
/// Logs are written to `<config dir>/BookingWizard/logs/`, one file per day
/// (`booking-wizard.YYYY-MM-DD.log`), when `log_to_file` is set.
///
/// Log output:
/// - Debug builds: stderr + file
/// - Release builds: file only
///
/// The filter comes from `RUST_LOG` when set, otherwise from the config.
pub fn initialize_tracing(config: &WizardConfig) {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = WizardConfig::log_dir();
    let file_layer = if config.log_to_file {
        match std::fs::create_dir_all(&log_dir) {
            Ok(()) => {
                let file_appender = rolling::daily(&log_dir, "booking-wizard.log");
                Some(
                    fmt::layer()
                        .with_writer(file_appender)
                        .with_ansi(false)
                        .with_target(true)
                        .with_line_number(true),
                )
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log directory: {}", e);
                None
            }
        }
    } else {
        None
    };

    // Prompts own stdout, so the console layer writes to stderr
    let console_layer = cfg!(debug_assertions).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });

    let logging_to_file = file_layer.is_some();
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    if logging_to_file {
        tracing::info!(target: LOG_TARGET_STARTUP, "Log directory: {}", log_dir.display());
    }
}

pub fn log_runtime_environment(config: &WizardConfig) {
    tracing::info!(
        target: LOG_TARGET_STARTUP,
        "Starting booking wizard v{} on {} ({})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    tracing::debug!(
        target: LOG_TARGET_STARTUP,
        transition_ms = config.transition_ms,
        tick_ms = config.tick_ms,
        "Wizard configuration"
    );
}
