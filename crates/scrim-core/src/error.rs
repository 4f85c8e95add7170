//! Error types for Scrim

use thiserror::Error;

/// The main error type for Scrim operations
#[derive(Debug, Error)]
pub enum ScrimError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Fighter not found: {0}")]
    FighterNotFound(usize),

    #[error("Fighter {index} fault: {reason}")]
    FighterFault { index: usize, reason: String },

    #[error("Save error: {0}")]
    SaveError(String),
}

/// Result type alias for Scrim operations
pub type Result<T> = std::result::Result<T, ScrimError>;

impl From<toml::de::Error> for ScrimError {
    fn from(err: toml::de::Error) -> Self {
        ScrimError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for ScrimError {
    fn from(err: toml::ser::Error) -> Self {
        ScrimError::TomlSerError(err.to_string())
    }
}
