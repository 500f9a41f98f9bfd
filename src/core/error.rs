use thiserror::Error;

/// Errors raised while loading or validating static definition data.
///
/// In-combat player input never produces an error: illegal commands are
/// silent no-ops on the session (the UI is expected to prevent them, the
/// engine re-validates as a second line of defense).
#[derive(Error, Debug)]
pub enum GridfallError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GridfallError>;
