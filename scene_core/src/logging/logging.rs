// scene_core/src/logging/logging.rs
use crate::storage::host_config::HostConfig;
use crate::constants::*;
use flexi_logger::Cleanup;
use flexi_logger::Criterion;
use flexi_logger::DeferredNow;
use flexi_logger::Duplicate;
use flexi_logger::FileSpec;
use flexi_logger::FlexiLoggerError;
use flexi_logger::Logger;
use flexi_logger::LoggerHandle;
use flexi_logger::Naming;
use flexi_logger::WriteMode;
use once_cell::sync::Lazy;
use std::sync::Mutex;
use std::io::Write;
use log::Record;

// Global mutable buffer that stores the most recent message.
pub static LAST_LOG: Lazy<Mutex<String>> = Lazy::new(|| Mutex::new(String::new()));

/// Logs through the `log` facade and keeps the message in `LAST_LOG`
/// so scripts can read it back.
#[macro_export]
macro_rules! host_log {
    ($lvl:expr, $($arg:tt)*) => {{
        let msg = format!($($arg)*);
        $crate::log::log!($lvl, "{}", msg);
        if let Ok(mut buf) = $crate::logging::logging::LAST_LOG.lock() {
            *buf = msg;
        }
    }};
}

#[macro_export]
macro_rules! host_info  { ($($arg:tt)*) => { $crate::host_log!($crate::log::Level::Info,  $($arg)*) }; }

#[macro_export]
macro_rules! host_warn  { ($($arg:tt)*) => { $crate::host_log!($crate::log::Level::Warn,  $($arg)*) }; }

#[macro_export]
macro_rules! host_error { ($($arg:tt)*) => { $crate::host_log!($crate::log::Level::Error, $($arg)*) }; }

#[macro_export]
macro_rules! host_debug { ($($arg:tt)*) => { $crate::host_log!($crate::log::Level::Debug, $($arg)*) }; }

/// Returns a copy of the most recent host log message.
pub fn last_log() -> String {
    LAST_LOG.lock().map(|buf| buf.clone()).unwrap_or_default()
}

/// Initializes the rotating file logger described by `config`.
/// Warnings and errors are duplicated to stderr.
pub fn init_file_logger(config: &HostConfig) -> Result<LoggerHandle, FlexiLoggerError> {
    let log_dir = config.log_dir();

    let file_spec = FileSpec::default()
        .directory(&log_dir)
        .basename(LOG_BASENAME)
        .suffix("log");

    let handle = Logger::try_with_str(&config.log_level)?
        .log_to_file(file_spec)
        .duplicate_to_stderr(Duplicate::Warn)
        .format(host_formatter)
        .rotate(
            Criterion::Size(LOG_ROTATE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(LOG_KEEP_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .start()?;

    host_info!("Log dir: {}.", log_dir.display());
    Ok(handle)
}

/// Initializes a logger that only writes to stderr.
pub fn init_stderr_logger(level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_str(level)?
        .log_to_stderr()
        .format(host_formatter)
        .start()
}

fn host_formatter(
    write: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record
) -> std::io::Result<()> {
    write!(
        write,
        "{} {:5} [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.module_path().unwrap_or("<unknown>"),
        &record.args()
    )
}

