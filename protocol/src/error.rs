use bombdisposer_core::GameError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Could not encode or decode message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown session {0}")]
    UnknownSession(Uuid),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
