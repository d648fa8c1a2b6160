//! Cell coordinates on the L-shaped board, adjacency, and shape rotation.

use core::ops::Add;

use crate::config::{BOARD_COLS, BOARD_ROWS, SHORT_COLS, SHORT_ROWS};

/// Relative (row, col) displacement used by ship shapes.
pub type Offset = (i32, i32);

/// A board coordinate. Coordinates may lie off the board; use
/// [`Cell::is_valid`] before touching board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

/// 4-connected neighbour directions: up, right, down, left.
pub const DIRECTIONS: [Offset; 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The board is a 6×6 block (rows 0-5) on top of a 6×12 block (rows 6-11).
    pub const fn is_valid(&self) -> bool {
        if self.row < 0 || self.col < 0 {
            return false;
        }
        if self.row >= BOARD_ROWS as i32 || self.col >= BOARD_COLS as i32 {
            return false;
        }
        !(self.row < SHORT_ROWS as i32 && self.col >= SHORT_COLS as i32)
    }

    /// The four orthogonal neighbours, not filtered for validity.
    pub fn neighbors4(&self) -> [Cell; 4] {
        DIRECTIONS.map(|d| *self + d)
    }

    pub fn is_adjacent(&self, other: Cell) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }

    /// Every valid cell in row-major order.
    pub fn all_valid() -> impl Iterator<Item = Cell> {
        (0..BOARD_ROWS as i32).flat_map(|row| {
            let cols = if row < SHORT_ROWS as i32 {
                SHORT_COLS
            } else {
                BOARD_COLS
            };
            (0..cols as i32).map(move |col| Cell::new(row, col))
        })
    }
}

impl Add<Offset> for Cell {
    type Output = Cell;
    fn add(self, (dr, dc): Offset) -> Cell {
        Cell::new(self.row + dr, self.col + dc)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Cell::new(row, col)
    }
}

impl core::fmt::Display for Cell {
    /// Rows are lettered from `A`, columns numbered from 1.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_valid() {
            write!(f, "{}{}", (b'A' + self.row as u8) as char, self.col + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// Free-function form of [`Cell::is_valid`].
pub fn is_valid_cell(cell: Cell) -> bool {
    cell.is_valid()
}

/// Quarter-turn rotations about the origin.
///
/// `R90` maps `(x, y)` to `(-y, x)`, so the four variants form a cyclic group:
/// applying `R90` four times gives back the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    pub fn from_index(index: u8) -> Option<Rotation> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn apply(self, (x, y): Offset) -> Offset {
        match self {
            Rotation::R0 => (x, y),
            Rotation::R90 => (-y, x),
            Rotation::R180 => (-x, -y),
            Rotation::R270 => (y, -x),
        }
    }

    /// Rotation equivalent to applying `self` then `other`.
    pub fn then(self, other: Rotation) -> Rotation {
        Self::ALL[((self.index() + other.index()) % 4) as usize]
    }
}

/// Rotate `offset` by `rotation` about the origin.
pub fn rotate(rotation: Rotation, offset: Offset) -> Offset {
    rotation.apply(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corners_of_the_l() {
        assert!(Cell::new(0, 0).is_valid());
        assert!(Cell::new(5, 5).is_valid());
        assert!(!Cell::new(5, 6).is_valid());
        assert!(Cell::new(6, 11).is_valid());
        assert!(Cell::new(11, 11).is_valid());
        assert!(!Cell::new(12, 0).is_valid());
        assert!(!Cell::new(-1, 3).is_valid());
    }

    #[test]
    fn all_valid_matches_predicate() {
        assert_eq!(Cell::all_valid().count(), 108);
        assert!(Cell::all_valid().all(|c| c.is_valid()));
    }

    #[test]
    fn predicate_accepts_exactly_the_l() {
        let mut accepted = Vec::new();
        for row in -2..14 {
            for col in -2..14 {
                let cell = Cell::new(row, col);
                assert_eq!(is_valid_cell(cell), cell.is_valid());
                let expected =
                    (0..12).contains(&row) && (0..12).contains(&col) && !(row < 6 && col > 5);
                assert_eq!(cell.is_valid(), expected, "{:?}", cell);
                if cell.is_valid() {
                    accepted.push(cell);
                }
            }
        }
        assert_eq!(accepted.len(), 108);
        assert_eq!(accepted, Cell::all_valid().collect::<Vec<_>>());
    }

    #[test]
    fn four_quarter_turns_are_the_identity() {
        for x in -6..=6 {
            for y in -6..=6 {
                let mut o = (x, y);
                for _ in 0..4 {
                    o = rotate(Rotation::R90, o);
                }
                assert_eq!(o, (x, y));
                for r in Rotation::ALL {
                    let back = (0..4).fold((x, y), |acc, _| r.apply(acc));
                    assert_eq!(back, (x, y), "{:?}", r);
                }
            }
        }
    }

    #[test]
    fn rotations_compose() {
        let o = (2, -3);
        assert_eq!(rotate(Rotation::R90, rotate(Rotation::R90, o)), rotate(Rotation::R180, o));
        assert_eq!(Rotation::R90.then(Rotation::R180), Rotation::R270);
        assert_eq!(Rotation::R270.then(Rotation::R90), Rotation::R0);
        assert_eq!(Rotation::from_index(4), None);
    }

    #[test]
    fn neighbours_are_adjacent() {
        let c = Cell::new(6, 0);
        for n in c.neighbors4() {
            assert!(c.is_adjacent(n));
        }
        assert_eq!(c.neighbors4().iter().filter(|n| n.is_valid()).count(), 3);
    }
}
