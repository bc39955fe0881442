//! Error types for target rule operations.

use std::path::PathBuf;

/// Errors that can occur while assembling or loading target rules.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading/writing configuration files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file not found.
    #[error("configuration file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Platform name not recognized.
    #[error("unknown platform '{name}'")]
    UnknownPlatform {
        /// The name as given.
        name: String,
    },

    /// A `$(Name)` placeholder had no value to substitute.
    #[error("unresolved variable $({name})")]
    UnresolvedVariable {
        /// Placeholder name without the `$(` `)` delimiters.
        name: String,
    },

    /// A `$(` with no closing parenthesis.
    #[error("malformed placeholder in '{text}'")]
    MalformedPlaceholder {
        /// The offending token.
        text: String,
    },

    /// The native-library linker rejected the configuration.
    #[error("native library '{library}': {detail}")]
    Linker {
        /// Linker name.
        library: String,
        /// Description of the failure.
        detail: String,
    },
}

/// Result type for target rule operations.
pub type Result<T> = std::result::Result<T, TargetError>;
