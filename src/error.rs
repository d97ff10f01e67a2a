//! Errors that end the program

use std::fmt;

use crate::config::ConfigError;
use crate::storage::StorageError;

#[derive(Debug)]
pub enum AppError {
    /// Terminal or log file I/O
    Io(std::io::Error),
    /// A config file named on the command line could not be used
    Config(ConfigError),
    /// Not even an in-memory database could be opened
    Storage(StorageError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "I/O error: {}", e),
            AppError::Config(e) => write!(f, "configuration error: {}", e),
            AppError::Storage(e) => write!(f, "storage error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Storage(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Storage(e)
    }
}
