use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum EngineError {
    /// An operation ran before `reset` or `load_layout` created a session.
    #[error("game not initialized")]
    NotInitialized,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
