// Logging configuration for BasicCustomHUD

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use super::config::LoggingSettings;

// Keep the guards alive for the lifetime of the program
static LOG_GUARD: OnceLock<Vec<WorkerGuard>> = OnceLock::new();

/// Resolve the configured log file against `base_dir`. `None` when file logging is off.
pub fn log_file_path(settings: &LoggingSettings, base_dir: &Path) -> Option<PathBuf> {
    let configured = settings.log_file.trim();
    if configured.is_empty() {
        return None;
    }

    let path = PathBuf::from(configured);
    if path.is_absolute() {
        Some(path)
    } else {
        Some(base_dir.join(path))
    }
}

/// Build the level filter: INFO by default, DEBUG for this crate when `debug` is set
pub fn build_filter(debug: bool) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    if !debug {
        return filter;
    }
    match "basic_custom_hud=debug".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Initialize logging with optional console and file outputs.
///
/// Does nothing if a global subscriber is already installed (the host may own one).
pub fn init_logging(settings: &LoggingSettings, base_dir: &Path, debug: bool) {
    let mut guards = Vec::new();

    // Create file layer if path is provided
    let file_layer = log_file_path(settings, base_dir).and_then(|path| {
        let parent = path.parent()?;
        let file_name = path.file_name()?.to_str()?;

        let file_appender = tracing_appender::rolling::never(parent, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        guards.push(guard);

        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false),
        )
    });

    // Create console layer if enabled
    let console_layer = if settings.console {
        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);

        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false),
        )
    } else {
        None
    };

    let installed = tracing_subscriber::registry()
        .with(build_filter(debug))
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .is_ok();

    // Store guards to keep logging alive
    if installed {
        let _ = LOG_GUARD.set(guards);
    }
}
