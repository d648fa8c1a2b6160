//! Common types: cell states, shot outcomes, and board errors.

use crate::bitboard::BitBoardError;
use crate::ship::VesselClass;

/// State of one board cell as seen by its owner or by the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Nothing known (opponent view) or open water (own board).
    Empty,
    /// Own ship segment, not yet struck.
    Occupied,
    /// Ship segment that has been struck.
    Hit,
    /// Shot landed in open water.
    Missed,
}

/// Result of a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Hit,
    Missed,
}

impl From<Outcome> for CellState {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Hit => CellState::Hit,
            Outcome::Missed => CellState::Missed,
        }
    }
}

impl TryFrom<CellState> for Outcome {
    type Error = BoardError;

    fn try_from(state: CellState) -> Result<Self, Self::Error> {
        match state {
            CellState::Hit => Ok(Outcome::Hit),
            CellState::Missed => Ok(Outcome::Missed),
            other => Err(BoardError::InvalidOutcome(other)),
        }
    }
}

/// Errors returned by Board and Player operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (e.g., invalid size or index).
    BitBoardError(BitBoardError),
    /// Coordinate lies outside the L-shaped board.
    InvalidCell { row: i32, col: i32 },
    /// Outcome reported for a cell that was already shot at.
    AlreadyShot { row: i32, col: i32 },
    /// Shot outcome other than HIT or MISSED.
    InvalidOutcome(CellState),
    /// Random placement gave up on this vessel.
    UnableToPlaceShip(VesselClass),
    /// Footprint does not match any vessel class.
    MalformedShape { cells: usize },
    /// No empty cell left to fire at.
    BoardExhausted,
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::InvalidCell { row, col } => {
                write!(f, "Cell ({}, {}) is not on the board", row, col)
            }
            BoardError::AlreadyShot { row, col } => {
                write!(f, "Cell ({}, {}) has already been shot at", row, col)
            }
            BoardError::InvalidOutcome(state) => {
                write!(f, "Invalid input: {:?} is not a shot outcome", state)
            }
            BoardError::UnableToPlaceShip(class) => write!(f, "Unable to place {}", class),
            BoardError::MalformedShape { cells } => {
                write!(f, "No vessel class has a {}-cell footprint like this", cells)
            }
            BoardError::BoardExhausted => write!(f, "No empty cell left to target"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
