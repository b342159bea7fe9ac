use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid header value for {0}")]
    Header(&'static str),
}

pub type Result<T> = std::result::Result<T, ClientError>;
