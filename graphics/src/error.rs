//! Graphics error types.

use thiserror::Error;

/// Recoverable errors raised by backends and configuration loading.
///
/// Pipeline contract violations are not represented here; they panic.
#[derive(Error, Debug)]
pub enum GraphicsError {
    /// A backend failed to create a resource.
    #[error("resource creation failed: {0}")]
    ResourceCreationFailed(String),
    /// A shader program failed to compile or link.
    #[error("shader compile failed for '{name}': {log}")]
    ShaderCompileFailed {
        /// Debug name of the shader.
        name: String,
        /// Compiler output.
        log: String,
    },
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Reading a configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A configuration file could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result alias for fallible graphics operations.
pub type GraphicsResult<T> = Result<T, GraphicsError>;
