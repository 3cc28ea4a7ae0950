// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_LEVEL_ENV: &str = "HBT_LOG_LEVEL";
const DEFAULT_LEVEL: &str = "warn";

/// Routes tracing output to a fresh file under the data directory. The
/// returned guard flushes pending lines when dropped, so hold it until exit.
pub fn init_logging() -> Result<(PathBuf, WorkerGuard)> {
    let log_dir = log_directory()?;
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("create log directory {}", log_dir.display()))?;

    let path = log_file_path(&log_dir, OffsetDateTime::now_utc().unix_timestamp());
    let file = fs::File::create(&path)
        .with_context(|| format!("create log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    tracing_subscriber::registry()
        .with(build_log_filter(std::env::var(LOG_LEVEL_ENV).ok().as_deref()))
        .with(file_layer)
        .try_init()
        .context("install tracing subscriber")?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok((path, guard))
}

fn build_log_filter(raw: Option<&str>) -> EnvFilter {
    let level = raw.and_then(normalize_log_level).unwrap_or(DEFAULT_LEVEL);
    EnvFilter::new(level)
}

fn normalize_log_level(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" => Some("error"),
        "off" => Some("off"),
        _ => None,
    }
}

fn log_directory() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow!("cannot resolve local data directory for logs"))?;
    Ok(data_dir.join(hbt_db::APP_NAME).join("logs"))
}

fn log_file_path(log_dir: &Path, unix_seconds: i64) -> PathBuf {
    log_dir.join(format!("hbt-{unix_seconds}.log"))
}
