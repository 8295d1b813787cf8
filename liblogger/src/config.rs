/*
 * Logger configuration
 *
 * Reads the [logging] table of the application TOML file:
 * - type: where records go (console or file)
 * - threshold: lowest severity that is written
 * - file_path / log_folder: target of the file output
 * - force_flush: flush after every record
 *
 * A missing file yields the console defaults so that a host without any
 * configuration still gets log output.
 */

use serde::{Deserialize, Serialize};
use std::fs;

/// Log severity levels, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

// Case-insensitive, accepts "warning" as an alias of "warn"
impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(serde::de::Error::unknown_variant(
                &s,
                &["debug", "info", "warn", "warning", "error"],
            )),
        }
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Supported output destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogType {
    Console,
    File,
}

impl<'de> Deserialize<'de> for LogType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "console" => Ok(LogType::Console),
            "file" => Ok(LogType::File),
            _ => Err(serde::de::Error::unknown_variant(&s, &["console", "file"])),
        }
    }
}

/// Configuration for the logger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Type of output (console, file)
    #[serde(rename = "type")]
    pub log_type: LogType,

    /// Minimum log level to record
    pub threshold: LogLevel,

    /// File name (or path) for file-based logging
    #[serde(default)]
    pub file_path: Option<String>,

    /// Folder for log files, joined in front of `file_path`
    #[serde(default)]
    pub log_folder: Option<String>,

    /// Whether to flush after every write (default: false)
    #[serde(default)]
    pub force_flush: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            log_type: LogType::Console,
            threshold: LogLevel::Info,
            file_path: None,
            log_folder: None,
            force_flush: false,
        }
    }
}

/// Wrapper matching the [logging] section of the application file
#[derive(Debug, Deserialize)]
struct ConfigWrapper {
    logging: LogConfig,
}

impl LogConfig {
    /// Reads the configuration from a TOML file, falling back to defaults when
    /// the file cannot be read
    pub fn from_file(file_path: &str) -> Result<Self, String> {
        let config_str = match fs::read_to_string(file_path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!(
                    "Warning: Could not read config file '{}': {}. Using defaults.",
                    file_path, e
                );
                return Ok(LogConfig::default());
            }
        };

        Self::from_toml(&config_str)
    }

    /// Parses either a document with a [logging] table or a bare logging table
    pub fn from_toml(content: &str) -> Result<Self, String> {
        match toml::from_str::<ConfigWrapper>(content) {
            Ok(wrapper) => Ok(wrapper.logging),
            Err(e) => toml::from_str::<LogConfig>(content)
                .map_err(|_| format!("Failed to parse config file: {}", e)),
        }
    }

    /// Whether a record of `level` passes the configured threshold
    pub fn accepts(&self, level: LogLevel) -> bool {
        level >= self.threshold
    }
}
