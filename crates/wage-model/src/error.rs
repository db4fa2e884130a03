use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown sex value: {0}")]
    UnknownSex(String),
    #[error("unknown area type: {0}")]
    UnknownAreaType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
