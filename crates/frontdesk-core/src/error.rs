use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("visitor name is required")]
    EmptyName,
    #[error("invalid email: {0}")]
    InvalidEmail(String),
    #[error("invalid phone: {0}")]
    InvalidPhone(String),
    #[error("visitor id cannot be empty")]
    EmptyVisitorId,
}
