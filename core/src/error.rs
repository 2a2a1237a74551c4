use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(&'static str),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("Unknown tile id {0:?}")]
    UnknownTileId(String),
    #[error("Game has not started, the first move must go through start")]
    NotStarted,
    #[error("Game already started")]
    AlreadyStarted,
}

pub type Result<T> = core::result::Result<T, GameError>;
