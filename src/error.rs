use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("mine count must be strictly between 0 and the cell count")]
    InvalidConfiguration,
    #[error("cell is outside the board")]
    OutOfBounds,
}

pub type Result<T> = core::result::Result<T, BoardError>;
