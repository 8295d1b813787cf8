/*
 * Global logger
 *
 * One process-wide instance behind a OnceCell. Until it is initialized,
 * records at Info and above go to stderr. Initializing again replaces the
 * configuration and output.
 */

use chrono::Utc;
use once_cell::sync::OnceCell;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use crate::config::{LogConfig, LogLevel};
use crate::outputs::{create_log_output, LogOutput};

static LOGGER_INSTANCE: OnceCell<Mutex<LoggerInner>> = OnceCell::new();

struct LoggerInner {
    config: LogConfig,
    output: Option<Box<dyn LogOutput>>,
}

impl LoggerInner {
    fn new() -> Self {
        LoggerInner {
            config: LogConfig::default(),
            output: None,
        }
    }

    fn log(&mut self, level: LogLevel, message: &str, context: Option<&str>, file: &str, line: u32, module: &str) {
        if !self.config.accepts(level) {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let formatted = format_log_message(&timestamp, level, message, context, file, line, module);

        match self.output.as_mut() {
            Some(output) => {
                if let Err(e) = output.write_log(&formatted) {
                    eprintln!("Failed to write log: {}", e);
                }
            }
            None => {
                let _ = writeln!(io::stderr(), "{}", formatted);
            }
        }
    }
}

pub(crate) fn format_log_message(
    timestamp: &str,
    level: LogLevel,
    message: &str,
    context: Option<&str>,
    file: &str,
    line: u32,
    module: &str,
) -> String {
    let level_str = level.as_str();
    match context {
        Some(ctx) => format!(
            "{} [{}] [{}:{}] [{}] {} | {}",
            timestamp, level_str, file, line, module, message, ctx
        ),
        None => format!(
            "{} [{}] [{}:{}] [{}] {}",
            timestamp, level_str, file, line, module, message
        ),
    }
}

fn instance() -> &'static Mutex<LoggerInner> {
    LOGGER_INSTANCE.get_or_init(|| Mutex::new(LoggerInner::new()))
}

pub struct Logger;

impl Logger {
    /// Initialize from the default configuration file "app_config.toml"
    pub fn init() {
        if let Err(e) = Self::init_with_config_file("app_config.toml") {
            eprintln!("Failed to initialize logger: {}", e);
        }
    }

    /// Initialize from the [logging] section of a TOML file
    pub fn init_with_config_file(config_path: &str) -> Result<(), String> {
        let config = LogConfig::from_file(config_path)?;
        Self::init_with_config(config)
    }

    /// Initialize with an explicit configuration
    pub fn init_with_config(config: LogConfig) -> Result<(), String> {
        let output = create_log_output(&config)?;

        let mut inner = match instance().lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        inner.config = config;
        inner.output = Some(output);

        Ok(())
    }

    pub fn debug(message: &str, context: Option<String>, file: &'static str, line: u32, module: &'static str) {
        Self::log_with_metadata(LogLevel::Debug, message, context, file, line, module)
    }

    pub fn info(message: &str, context: Option<String>, file: &'static str, line: u32, module: &'static str) {
        Self::log_with_metadata(LogLevel::Info, message, context, file, line, module)
    }

    pub fn warn(message: &str, context: Option<String>, file: &'static str, line: u32, module: &'static str) {
        Self::log_with_metadata(LogLevel::Warn, message, context, file, line, module)
    }

    pub fn error(message: &str, context: Option<String>, file: &'static str, line: u32, module: &'static str) {
        Self::log_with_metadata(LogLevel::Error, message, context, file, line, module)
    }

    fn log_with_metadata(level: LogLevel, message: &str, context: Option<String>, file: &str, line: u32, module: &str) {
        let file_name = Path::new(file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file);

        match instance().lock() {
            Ok(mut logger) => logger.log(level, message, context.as_deref(), file_name, line, module),
            Err(_) => {
                let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
                let formatted = format_log_message(&timestamp, level, message, context.as_deref(), file_name, line, module);
                let _ = writeln!(io::stderr(), "{} | MUTEX POISONED", formatted);
            }
        }
    }

    /// Flush the configured output
    pub fn flush() -> Result<(), String> {
        if let Some(logger) = LOGGER_INSTANCE.get() {
            if let Ok(mut inner) = logger.lock() {
                if let Some(output) = inner.output.as_mut() {
                    return output.flush();
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogType;

    #[test]
    fn formats_with_and_without_context() {
        let plain = format_log_message("T", LogLevel::Info, "loaded", None, "loader.rs", 7, "addon_loader");
        assert_eq!(plain, "T [INFO] [loader.rs:7] [addon_loader] loaded");

        let with_ctx = format_log_message("T", LogLevel::Warn, "slow", Some("pinyin"), "f.rs", 1, "m");
        assert_eq!(with_ctx, "T [WARN] [f.rs:1] [m] slow | pinyin");
    }

    #[test]
    fn writes_to_configured_file_above_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            log_type: LogType::File,
            threshold: LogLevel::Info,
            file_path: Some("test.log".into()),
            log_folder: Some(dir.path().to_string_lossy().into_owned()),
            force_flush: true,
        };
        Logger::init_with_config(config).unwrap();

        crate::log_debug!("hidden");
        crate::log_info!("visible", Some("ctx".to_string()));
        Logger::flush().unwrap();

        let written = std::fs::read_to_string(dir.path().join("test.log")).unwrap();
        assert!(!written.contains("hidden"));
        assert!(written.contains("[INFO]"));
        assert!(written.contains("visible | ctx"));
    }
}
