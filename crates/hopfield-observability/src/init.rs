// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console output goes to stderr so that command output on stdout (JSON
//! results) stays machine-readable.

use std::path::Path;
#[cfg(feature = "file-logging")]
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingSettings};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps background log writers alive; drop flushes them
#[derive(Default)]
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    #[cfg(feature = "file-logging")]
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder holding the log file, when file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        #[cfg(feature = "file-logging")]
        {
            self.log_dir.as_deref()
        }
        #[cfg(not(feature = "file-logging"))]
        {
            None
        }
    }
}

/// `EnvFilter` directives for the settings and flags
///
/// `RUST_LOG`, when set, takes precedence over both.
pub fn filter_directives(settings: &LoggingSettings, debug_flags: &CrateDebugFlags) -> String {
    match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => directives,
        _ => debug_flags.filter_with_default(&settings.level.to_ascii_lowercase()),
    }
}

fn build_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .with_context(|| format!("Invalid log filter directives: {}", directives))
}

#[cfg(feature = "file-logging")]
struct FileLayer {
    layer: BoxedLayer,
    guard: tracing_appender::non_blocking::WorkerGuard,
    run_folder: PathBuf,
}

/// JSON layer writing to `{base_dir}/run_{YYYYmmdd_HHMMSS}/hopfield.log`
#[cfg(feature = "file-logging")]
fn file_layer(base_dir: &Path, directives: &str) -> Result<FileLayer> {
    let run_folder = base_dir.join(format!(
        "run_{}",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    ));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    let appender = tracing_appender::rolling::daily(&run_folder, "hopfield.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .with_filter(build_filter(directives)?)
        .boxed();

    Ok(FileLayer {
        layer,
        guard,
        run_folder,
    })
}

/// Install the global subscriber
///
/// Layers:
/// - console (`text` or `json`) filtered by level and debug flags
/// - with `file-logging` and `settings.log_dir`: JSON file under
///   `{log_dir}/run_{YYYYmmdd_HHMMSS}/hopfield.log`, rolled daily
///
/// # Errors
/// Fails on bad filter directives, an unwritable log directory, or when a
/// global subscriber is already installed.
pub fn init_logging(
    settings: &LoggingSettings,
    debug_flags: &CrateDebugFlags,
) -> Result<LoggingGuard> {
    let directives = filter_directives(settings, debug_flags);
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer = match settings.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(build_filter(&directives)?)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .with_filter(build_filter(&directives)?)
            .boxed(),
    };
    layers.push(console_layer);

    #[allow(unused_mut)]
    let mut guard = LoggingGuard::default();

    #[cfg(feature = "file-logging")]
    if let Some(base_dir) = &settings.log_dir {
        let file = file_layer(base_dir, &directives)?;
        layers.push(file.layer);
        guard._file_guard = Some(file.guard);
        guard.log_dir = Some(file.run_folder);
    }
    #[cfg(not(feature = "file-logging"))]
    if let Some(base_dir) = &settings.log_dir {
        eprintln!(
            "log_dir {} ignored: built without the file-logging feature",
            base_dir.display()
        );
    }

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    tracing::debug!(filter = %directives, "Logging initialized");
    Ok(guard)
}
