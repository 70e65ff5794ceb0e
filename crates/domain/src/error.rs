/// Shared error type used across all meshmap crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("client: {0}")]
    Client(String),

    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("config: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
