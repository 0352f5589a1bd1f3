use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use fern::colors::{Color, ColoredLevelConfig};
use thiserror::Error;

use raven_filesystem::{FileSystem, NativeFileSystem};

pub use log::LevelFilter as LevelFilter;

lazy_static::lazy_static! {
    static ref GLOBAL_MUTE_MODULE_NAMES: HashSet<&'static str> = HashSet::from([
        // one line per spawned face task
        "raven_thread::task_group",
    ]);
}

const TIME_FORMAT: &str = "[%Y-%m-%d][%H:%M:%S]";

#[derive(Debug, Error)]
#[error("Unknown log level {0:?}! (please choose from trace, debug, info, warn, error)")]
pub struct LogLevelParseError(String);

/// Parse a log level name, case insensitive.
pub fn parse_level(level: &str) -> Result<LevelFilter, LogLevelParseError> {
    match level.to_lowercase().trim() {
        "trace" => Ok(LevelFilter::Trace),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        _ => Err(LogLevelParseError(level.to_owned())),
    }
}

/// Log configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LevelFilter,
    /// Also write uncolored lines into this file, truncated on open.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            file: None,
        }
    }
}

/// Initialize the global logger. Fails if called twice in one process.
pub fn init_log(config: LogConfig) -> anyhow::Result<()> {
    if let Some(file) = &config.file {
        if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
            NativeFileSystem.create_directory(parent)?;
        }
    }

    setup_logger(&config).context("Failed to initialize log module!")?;

    log::trace!("log initialized!");
    Ok(())
}

#[inline]
fn is_muted(target: &str) -> bool {
    GLOBAL_MUTE_MODULE_NAMES.contains(target)
}

fn setup_logger(config: &LogConfig) -> anyhow::Result<()> {
    // setup colors
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Magenta)
        .info(Color::Cyan)
        .warn(Color::Yellow)
        .error(Color::Red);

    // standard output dispatch, for trace, debug and info messages.
    let stdout = fern::Dispatch::new()
        .filter(|meta| meta.level() > log::Level::Warn && !is_muted(meta.target()))
        .chain(std::io::stdout());

    // standard error dispatch, for warn and error messages.
    let stderr = fern::Dispatch::new()
        .level(LevelFilter::Warn)
        .filter(|meta| !is_muted(meta.target()))
        .chain(std::io::stderr());

    // console output with the colors
    let console_output = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format(TIME_FORMAT),
                record.target(),
                colors.color(record.level()),
                message
            ))
        })
        .chain(stdout)
        .chain(stderr);

    let mut dispatch = fern::Dispatch::new()
        .level(config.level) // setup base log level from user
        .chain(console_output);

    if let Some(path) = &config.file {
        dispatch = dispatch.chain(file_output(path)?);
    }

    dispatch.apply()?;
    Ok(())
}

fn file_output(path: &Path) -> anyhow::Result<fern::Dispatch> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    Ok(fern::Dispatch::new()
        .filter(|meta| !is_muted(meta.target()))
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format(TIME_FORMAT),
                record.target(),
                record.level(),
                message
            ))
        })
        .chain(file))
}
