//! Theme error types

use thiserror::Error;

/// Theme-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ThemeError {
    /// A preference string was not `light`, `dark` or `system`
    #[error("unknown theme preference '{0}' (expected light, dark or system)")]
    InvalidPreference(String),

    /// The process-wide theme context was installed twice
    #[error("theme context already installed")]
    AlreadyInstalled,
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
