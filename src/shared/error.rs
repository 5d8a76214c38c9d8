use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Everything except a usage error collapses into `ApplicationError`;
/// the run never emits a partial report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Report rendered successfully
    Success = 0,
    /// Configuration, scan, resolver, encoding or I/O failure
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Application-specific errors for the enrichment pipeline.
///
/// Each variant carries enough context for a one-shot diagnostic plus a hint,
/// since every one of them terminates the run.
#[derive(Debug, Error)]
pub enum SbomMetaError {
    #[error("Invalid configuration: {variable}\nDetails: {details}\n\n💡 Hint: Check the value of {variable} or unset it to use the default")]
    Configuration { variable: String, details: String },

    #[error("Invalid source path: {path}\nReason: {reason}\n\n💡 Hint: Please specify an existing project directory or lockfile")]
    InvalidSourcePath { path: PathBuf, reason: String },

    #[error("No package inventory found in: {path}\n\n💡 Hint: {suggestion}")]
    InventoryNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to scan inventory file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file is in the correct format")]
    ScanError { path: PathBuf, details: String },

    #[error("Failed to connect to the metadata database at {host}:{port}\nDetails: {details}\n\n💡 Hint: Check CHAI_DB_HOST, CHAI_DB_PORT, CHAI_DB_USER and CHAI_DB_PASSWORD")]
    DatabaseConnection {
        host: String,
        port: u16,
        details: String,
    },

    #[error("Failed to resolve metadata for package \"{package_name}\"\nDetails: {details}")]
    ResolverError {
        package_name: String,
        details: String,
    },

    #[error("Failed to generate {format} output\nDetails: {details}")]
    EncodingError { format: String, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for builder patterns and config values
    #[error("Validation error: {message}")]
    Validation { message: String },
}
