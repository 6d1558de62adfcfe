//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::LogLevel;

use crate::config::{Config, LoggingConfig};
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup. An unknown level
/// falls back to `info` with a warning.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    let level = config.level.parse::<LogLevel>().unwrap_or_else(|e| {
        eprintln!("[WARN] {e}, using info");
        LogLevel::Info
    });
    writer::init(
        level,
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
    )
}

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Announce the listening address on stdout, whatever the log targets are
pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("Server running on http://{addr}");

    log_debug(&format!("Log level: {}", config.logging.level));
    match config.server.workers {
        Some(workers) => log_debug(&format!("Worker threads: {workers}")),
        None => log_debug("Worker threads: CPU cores"),
    }
    if config.logging.access_log {
        log_debug(&format!("Access log format: {}", config.logging.access_log_format));
    }
    if let Some(ref path) = config.logging.access_log_file {
        log_debug(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        log_debug(&format!("Error log: {path}"));
    }
    if let Some(max) = config.performance.max_connections {
        log_debug(&format!("Max connections: {max}"));
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    log_debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    match writer::get() {
        Some(w) => w.write_warning(&format!("[WARN] {message}")),
        None => eprintln!("[WARN] {message}"),
    }
}

pub fn log_info(message: &str) {
    write_info(&format!("[INFO] {message}"));
}

pub fn log_debug(message: &str) {
    if let Some(w) = writer::get() {
        w.write_debug(&format!("[DEBUG] {message}"));
    }
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    let line = entry.format(format);
    match writer::get() {
        Some(w) => w.write_access(&line),
        None => println!("{line}"),
    }
}

pub fn log_shutdown_started(active: usize) {
    log_info(&format!("Shutdown requested, {active} connection(s) in flight"));
}

pub fn log_shutdown_complete() {
    log_info("Server stopped");
}
