use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Unknown unit: {0:?}")]
    UnknownUnit(crate::core::types::UnitId),

    #[error("Invalid map data: {0}")]
    InvalidMap(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Narrative service error: {0}")]
    Narrative(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
