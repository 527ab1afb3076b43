use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board size must be positive, got {width}x{height}")]
    InvalidSize { width: Coord, height: Coord },
    #[error("Too many mines, requested {mines} but only {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Board has more cells than can be counted")]
    BoardTooLarge,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid game configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;
