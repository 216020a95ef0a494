use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwinMapError {
    #[error("KEY_NOT_FOUND")]
    NotFound,
}
