//! Configuration module for the attendance backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the student roster CSV file
    pub roster_path: PathBuf,
    /// Path to the attendance history JSON file
    pub history_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AddrParseError> {
        dotenvy::dotenv().ok();

        let roster_path = env::var("ATTENDANCE_ROSTER_PATH")
            .unwrap_or_else(|_| "./data/students.csv".to_string())
            .into();

        let history_path = env::var("ATTENDANCE_HISTORY_PATH")
            .unwrap_or_else(|_| "./data/attendance.json".to_string())
            .into();

        let bind_addr = env::var("ATTENDANCE_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5000".to_string())
            .parse()?;

        let log_level = env::var("ATTENDANCE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            roster_path,
            history_path,
            bind_addr,
            log_level,
        })
    }
}
