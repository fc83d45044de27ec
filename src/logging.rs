//! Tracing subscriber setup used by the command line tool.

use std::{env, sync::OnceLock};

use tracing_appender::{
    non_blocking,
    non_blocking::NonBlocking,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{fmt, time::ChronoLocal, writer::MakeWriterExt},
};

use crate::error::AppError;

/// Guard to ensure buffered logs are flushed on shutdown.
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(debug: bool) -> &'static str {
    if debug { "info,riftscout=debug" } else { "info" }
}

pub fn init(debug: bool) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(false)
        .with_ansi(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    let result = if let Ok(dir) = env::var("LOG_DIR") {
        let stderr = std::io::stderr.with_max_level(tracing::Level::INFO);
        let writer = stderr.and(init_file_writer(&dir)?);

        builder.with_writer(writer).try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|err| AppError::Config(format!("failed to install logger: {err}")))?;

    tracing::debug!("logger initialized");
    Ok(())
}

fn init_file_writer(dir: &str) -> Result<NonBlocking, AppError> {
    let max_files = env::var("LOG_MAX_FILES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok());

    let mut file_builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("riftscout.log");

    if let Some(n) = max_files {
        file_builder = file_builder.max_log_files(n);
    }

    let file_appender = file_builder
        .build(dir)
        .map_err(|err| AppError::Config(format!("failed to create log file in {dir}: {err}")))?;

    let (file_writer, guard) = non_blocking(file_appender);

    // A second initialisation keeps the first guard alive.
    let _ = LOG_GUARD.set(guard);

    Ok(file_writer)
}
