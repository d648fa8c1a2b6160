//! Commonly used types and utilities for ease of import.

pub use crate::{
    AiPlayer, Board, BoardError, Cell, CellState, Fleet, Outcome, Player, PlayerConfig,
    TargetingState, VesselClass,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, print_board, print_density_map};
