//! Board state on the L-shaped grid, kept as three cell bitsets.

use core::fmt;

use crate::bitboard::CellSet;
use crate::common::{BoardError, CellState, Outcome};
use crate::geometry::Cell;

/// One side's board: the own board (authoritative) or this player's view of
/// the opponent's board (belief state).
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Board {
    ship_map: CellSet,
    hits: CellSet,
    misses: CellSet,
}

fn checked(cell: Cell) -> Result<Cell, BoardError> {
    if cell.is_valid() {
        Ok(cell)
    } else {
        Err(BoardError::InvalidCell {
            row: cell.row,
            col: cell.col,
        })
    }
}

impl Board {
    /// Create an empty board (no ships, no shots).
    pub fn new() -> Self {
        Self::default()
    }

    /// State of `cell`, or `None` when it is not on the board.
    pub fn state(&self, cell: Cell) -> Option<CellState> {
        if !cell.is_valid() {
            None
        } else if self.hits.contains(cell) {
            Some(CellState::Hit)
        } else if self.misses.contains(cell) {
            Some(CellState::Missed)
        } else if self.ship_map.contains(cell) {
            Some(CellState::Occupied)
        } else {
            Some(CellState::Empty)
        }
    }

    /// True for valid cells nobody has fired at and that hold no ship.
    #[inline]
    pub fn is_empty_at(&self, cell: Cell) -> bool {
        self.state(cell) == Some(CellState::Empty)
    }

    /// Every ship segment, struck or not.
    pub fn ship_map(&self) -> CellSet {
        self.ship_map
    }

    pub fn hits(&self) -> CellSet {
        self.hits
    }

    pub fn misses(&self) -> CellSet {
        self.misses
    }

    /// Cells that have been fired at.
    pub fn shots(&self) -> CellSet {
        self.hits | self.misses
    }

    pub fn count(&self, state: CellState) -> usize {
        Cell::all_valid()
            .filter(|&c| self.state(c) == Some(state))
            .count()
    }

    /// Valid cells in `Empty` state, row-major.
    pub fn empty_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        Cell::all_valid().filter(move |&c| self.is_empty_at(c))
    }

    /// Mark a ship segment on the own board.
    pub fn occupy(&mut self, cell: Cell) -> Result<(), BoardError> {
        let cell = checked(cell)?;
        self.ship_map.insert(cell)?;
        Ok(())
    }

    /// Record the outcome of a shot fired at the opponent.
    pub fn record_shot(&mut self, cell: Cell, outcome: Outcome) -> Result<(), BoardError> {
        let cell = checked(cell)?;
        if self.shots().contains(cell) {
            return Err(BoardError::AlreadyShot {
                row: cell.row,
                col: cell.col,
            });
        }
        match outcome {
            Outcome::Hit => self.hits.insert(cell)?,
            Outcome::Missed => self.misses.insert(cell)?,
        }
        Ok(())
    }

    /// Resolve an incoming shot against the own board. Shooting the same
    /// segment twice still reports a hit.
    pub fn receive_shot(&mut self, cell: Cell) -> Result<Outcome, BoardError> {
        let cell = checked(cell)?;
        if self.ship_map.contains(cell) {
            self.hits.insert(cell)?;
            Ok(Outcome::Hit)
        } else {
            self.misses.insert(cell)?;
            Ok(Outcome::Missed)
        }
    }

    /// Returns `true` when every ship segment has been struck.
    pub fn all_sunk(&self) -> bool {
        !self.ship_map.is_empty() && self.ship_map.is_subset(&self.hits)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  ship_map: {:?},\n  hits: {:?},\n  misses: {:?}\n}}",
            self.ship_map, self.hits, self.misses
        )
    }
}
