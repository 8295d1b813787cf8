/*
 * Log output implementations
 *
 * - ConsoleOutput: writes records to stdout
 * - FileOutput: appends records to a file, creating its folder on demand
 *
 * Both implement LogOutput; create_log_output picks one from the config.
 */

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::{LogConfig, LogType};

pub trait LogOutput: Send {
    fn write_log(&mut self, formatted_message: &str) -> Result<(), String>;

    fn flush(&mut self) -> Result<(), String> {
        Ok(())
    }
}

pub struct ConsoleOutput;

impl LogOutput for ConsoleOutput {
    fn write_log(&mut self, formatted_message: &str) -> Result<(), String> {
        writeln!(io::stdout(), "{}", formatted_message)
            .map_err(|e| format!("Failed to write to console: {}", e))
    }
}

pub struct FileOutput {
    file: File,
    force_flush: bool,
}

impl FileOutput {
    pub fn new(file_path: &Path, force_flush: bool) -> Result<Self, String> {
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create log directory: {}", e))?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        Ok(FileOutput { file, force_flush })
    }
}

impl LogOutput for FileOutput {
    fn write_log(&mut self, formatted_message: &str) -> Result<(), String> {
        writeln!(self.file, "{}", formatted_message)
            .map_err(|e| format!("Failed to write to log file: {}", e))?;

        if self.force_flush {
            self.flush()?;
        }

        Ok(())
    }

    fn flush(&mut self) -> Result<(), String> {
        self.file
            .flush()
            .map_err(|e| format!("Failed to flush log file: {}", e))
    }
}

/// Full path of the log file: `log_folder/file_path`, or `file_path` alone
pub fn log_file_path(config: &LogConfig) -> Result<PathBuf, String> {
    let file_path = config
        .file_path
        .as_ref()
        .ok_or_else(|| "File path not specified in configuration".to_string())?;

    Ok(match &config.log_folder {
        Some(folder) => Path::new(folder).join(file_path),
        None => PathBuf::from(file_path),
    })
}

/// Creates the output selected by the configuration
pub fn create_log_output(config: &LogConfig) -> Result<Box<dyn LogOutput>, String> {
    match config.log_type {
        LogType::Console => Ok(Box::new(ConsoleOutput)),
        LogType::File => {
            let full_path = log_file_path(config)?;
            Ok(Box::new(FileOutput::new(&full_path, config.force_flush)?))
        }
    }
}
