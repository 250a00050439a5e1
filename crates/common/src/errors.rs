use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page size must be greater than zero")]
    InvalidPageSize,
    #[error("page parameter name must not be empty")]
    EmptyPageParam,
}
