use crate::tile::TileId;
use thiserror::Error;

/// Ways a puzzle instance can fail to assemble.
///
/// Well-formed input never produces any of these; they exist so that broken
/// input (non-unique edges, missing tiles, mixed tile sizes) is reported
/// instead of silently yielding a wrong image.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MosaicError {
    #[error("the puzzle contains no tiles")]
    EmptyPuzzle,
    #[error("{0} tiles can't be arranged in a square grid")]
    NonSquareTileCount(usize),
    #[error("tile {id} is {found}x{found}, expected {expected}x{expected}")]
    TileSizeMismatch {
        id: TileId,
        expected: usize,
        found: usize,
    },
    #[error("tile {id} is {size}x{size}, too small to have an interior")]
    TileTooSmall { id: TileId, size: usize },
    #[error("no tile has exactly 2 candidate neighbours")]
    NoCornerTile,
    #[error("corner tile {id} has unmatched sides {unmatched:?}, expected two adjacent sides")]
    AmbiguousCorner { id: TileId, unmatched: Vec<usize> },
    #[error("no orientation of tile {other_id} joins tile {static_id} on an opposite side")]
    NoMatchingOrientation { static_id: TileId, other_id: TileId },
    #[error("tile {id} would be placed outside the grid at ({row}, {col})")]
    PlacementOutOfBounds { id: TileId, row: isize, col: isize },
    #[error("tile {id} would be placed at ({row}, {col}), already taken by tile {occupant}")]
    PlacementConflict {
        id: TileId,
        occupant: TileId,
        row: usize,
        col: usize,
    },
    #[error("only {placed} of {total} tiles are reachable from the starting corner")]
    Disconnected { placed: usize, total: usize },
    #[error("the product of corner tile ids {ids:?} doesn't fit in 64 bits")]
    CornerProductOverflow { ids: Vec<TileId> },
}

pub type Result<T, E = MosaicError> = std::result::Result<T, E>;
