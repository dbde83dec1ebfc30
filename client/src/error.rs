use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Server responded with status {0}")]
    Http(u16),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
