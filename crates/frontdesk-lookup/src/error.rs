use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("directory unavailable: {0}")]
    Unavailable(String),
    #[error("unexpected response status: {0}")]
    Status(u16),
    #[cfg(feature = "http")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[cfg(feature = "http")]
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, LookupError>;
