//! Random fleet deployment on the own board.

use alloc::vec::Vec;
use log::{debug, trace};
use rand::Rng;

use crate::board::Board;
use crate::common::BoardError;
use crate::config::{MAX_PLACEMENT_ATTEMPTS, VALID_CELLS};
use crate::geometry::{Cell, Rotation};
use crate::ship::Shape;

/// How strictly ships are kept apart during deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spacing {
    pub enabled: bool,
    /// Attempts per ship after which touching ships are accepted.
    pub relax_after: u32,
}

/// Uniformly random valid cell.
pub fn random_cell<R: Rng + ?Sized>(rng: &mut R) -> Cell {
    let idx = rng.random_range(0..VALID_CELLS);
    // all_valid() yields exactly VALID_CELLS cells
    Cell::all_valid().nth(idx).unwrap_or(Cell::new(0, 0))
}

/// Cells for `shape` rotated about its anchor and placed at `anchor`, or
/// `None` when the placement leaves the board, overlaps a ship, or (with
/// `keep_apart`) touches another ship edge-to-edge.
pub fn try_place(
    board: &Board,
    shape: &Shape,
    anchor: Cell,
    rotation: Rotation,
    keep_apart: bool,
) -> Option<Vec<Cell>> {
    let cells: Vec<Cell> = shape.place(anchor, rotation).collect();
    let ships = board.ship_map();
    for cell in &cells {
        if !cell.is_valid() || ships.contains(*cell) {
            return None;
        }
        if keep_apart && cell.neighbors4().iter().any(|n| ships.contains(*n)) {
            return None;
        }
    }
    Some(cells)
}

/// Place one shape by rejection sampling.
pub fn place_shape<R: Rng + ?Sized>(
    rng: &mut R,
    board: &mut Board,
    shape: &Shape,
    spacing: Spacing,
) -> Result<(), BoardError> {
    for attempt in 0..MAX_PLACEMENT_ATTEMPTS {
        let anchor = random_cell(rng);
        let rotation = Rotation::ALL[rng.random_range(0..4)];
        let keep_apart = spacing.enabled && attempt < spacing.relax_after;
        if let Some(cells) = try_place(board, shape, anchor, rotation, keep_apart) {
            for cell in cells {
                board.occupy(cell)?;
            }
            trace!(
                "placed {} at {} ({:?}) after {} attempts",
                shape.class(),
                anchor,
                rotation,
                attempt + 1
            );
            return Ok(());
        }
    }
    Err(BoardError::UnableToPlaceShip(shape.class()))
}

/// Build a fresh own board with every shape of `shapes` placed.
pub fn deploy_fleet<R: Rng + ?Sized>(
    rng: &mut R,
    shapes: &[Shape],
    spacing: Spacing,
) -> Result<Board, BoardError> {
    let mut board = Board::new();
    for shape in shapes {
        place_shape(rng, &mut board, shape, spacing)?;
    }
    debug!(
        "deployed {} ships over {} cells",
        shapes.len(),
        board.ship_map().count_ones()
    );
    Ok(board)
}
