use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("parent id is required")]
    EmptyParentId,
}
