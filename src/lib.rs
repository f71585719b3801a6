//! Pass Arrows
//!
//! Estimates inaccurate-pass arrows from match-centre pass map screenshots
//! and writes them as percent-of-pitch coordinates per match.

pub mod config;
pub mod detection;
pub mod diagnostics;
pub mod paths;
pub mod report;

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let log_path = paths::get_logs_dir().join("pass_arrows.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}
