use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid race definition: {0}")]
    InvalidRace(String),
}

pub type Result<T> = std::result::Result<T, Error>;
