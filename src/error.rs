//! Global error handling for contextforge
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use thiserror::Error;

use crate::git::GitError;

/// Global error type for contextforge operations
#[derive(Error, Debug)]
pub enum ContextForgeError {
    /// Usage errors: bad flag combinations, missing paths, invalid filters
    #[error("{0}")]
    Usage(String),

    /// Git-related errors (remote repository acquisition)
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regular expression errors
    #[error("Invalid regex pattern: {0}")]
    Regex(#[from] regex::Error),
}

/// Specialized Result type for contextforge operations
pub type Result<T> = std::result::Result<T, ContextForgeError>;

/// Creates a ContextForgeError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::ContextForgeError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
