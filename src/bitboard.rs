//! A fixed-size bitboard implementation using const generics.
//!
//! The type is `no_std` friendly and avoids heap allocations. Boards are
//! represented as an `N×N` grid packed into `W` unsigned words of type `T`,
//! so grids wider than a single primitive integer (the 12×12 game board needs
//! 144 bits) still fit in a `Copy` value.

use core::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Sub, SubAssign,
};
use core::{any, fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::geometry::Cell;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitBoardError {
    /// Requested board size N*N exceeds the capacity of `W` words of `T`.
    SizeTooLarge { n: usize, capacity: usize },
    /// Row or column index is out of bounds [0..N).
    IndexOutOfBounds { row: i32, col: i32 },
}

impl core::fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BitBoardError::SizeTooLarge { n, capacity } => {
                write!(
                    f,
                    "SizeTooLarge: N*N={} exceeds capacity={}",
                    n * n,
                    capacity
                )
            }
            BitBoardError::IndexOutOfBounds { row, col } => {
                write!(f, "IndexOutOfBounds: row={}, col={}", row, col)
            }
        }
    }
}

/// A fixed-size N×N bitboard stored in `W` words of the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitBoard<T, const W: usize, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    words: [T; W],
}

impl<T, const W: usize, const N: usize> BitBoard<T, W, N>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Number of usable bits in the board (`N * N`).
    const BOARD_BITS: usize = N * N;

    #[inline]
    fn word_bits() -> usize {
        mem::size_of::<T>() * 8
    }

    /// Mask of the bits of word `w` that map onto board squares.
    #[inline]
    fn word_mask(w: usize) -> T {
        let bits = Self::word_bits();
        let start = w * bits;
        if start + bits <= Self::BOARD_BITS {
            !T::zero()
        } else if start >= Self::BOARD_BITS {
            T::zero()
        } else {
            (T::one() << (Self::BOARD_BITS - start)) - T::one()
        }
    }

    /// Create a new empty bitboard (all bits cleared) without size check.
    #[inline]
    pub fn new() -> Self {
        BitBoard {
            words: [T::zero(); W],
        }
    }

    /// Fallible constructor: returns `Err(SizeTooLarge)` if N*N does not fit in `W` words.
    pub fn try_new() -> Result<Self, BitBoardError> {
        let capacity = W * Self::word_bits();
        if Self::BOARD_BITS > capacity {
            Err(BitBoardError::SizeTooLarge { n: N, capacity })
        } else {
            Ok(Self::new())
        }
    }

    /// Returns the number of set bits (occupied cells).
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.is_zero())
    }

    #[inline]
    fn locate(row: usize, col: usize) -> (usize, usize) {
        let idx = row * N + col;
        (idx / Self::word_bits(), idx % Self::word_bits())
    }

    /// Gets the bit at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<bool, BitBoardError> {
        self.check_bounds(row, col)?;
        let (w, b) = Self::locate(row, col);
        Ok(((self.words[w] >> b) & T::one()) != T::zero())
    }

    /// Sets the bit at (row, col) to 1.
    pub fn set(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        self.check_bounds(row, col)?;
        let (w, b) = Self::locate(row, col);
        self.words[w] = self.words[w] | (T::one() << b);
        Ok(())
    }

    /// Clears the bit at (row, col) to 0.
    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        self.check_bounds(row, col)?;
        let (w, b) = Self::locate(row, col);
        self.words[w] = self.words[w] & !(T::one() << b);
        Ok(())
    }

    /// Toggles the bit at (row, col).
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        self.check_bounds(row, col)?;
        let (w, b) = Self::locate(row, col);
        self.words[w] = self.words[w] ^ (T::one() << b);
        Ok(())
    }

    /// Clears all bits to `0`.
    #[inline]
    pub fn clear_all(&mut self) {
        self.words = [T::zero(); W];
    }

    #[inline]
    fn check_bounds(&self, row: usize, col: usize) -> Result<(), BitBoardError> {
        if row >= N || col >= N {
            Err(BitBoardError::IndexOutOfBounds {
                row: row as i32,
                col: col as i32,
            })
        } else {
            Ok(())
        }
    }

    #[inline]
    fn grid_index(cell: Cell) -> Option<(usize, usize)> {
        if cell.row < 0 || cell.col < 0 || cell.row as usize >= N || cell.col as usize >= N {
            None
        } else {
            Some((cell.row as usize, cell.col as usize))
        }
    }

    /// Whether `cell` is set. Cells outside the grid are never members.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        match Self::grid_index(cell) {
            Some((r, c)) => self.get(r, c).unwrap_or(false),
            None => false,
        }
    }

    /// Sets `cell`, failing for cells outside the grid.
    #[inline]
    pub fn insert(&mut self, cell: Cell) -> Result<(), BitBoardError> {
        let (r, c) = Self::grid_index(cell).ok_or(BitBoardError::IndexOutOfBounds {
            row: cell.row,
            col: cell.col,
        })?;
        self.set(r, c)
    }

    /// Clears `cell`; cells outside the grid are ignored.
    #[inline]
    pub fn remove(&mut self, cell: Cell) {
        if let Some((r, c)) = Self::grid_index(cell) {
            let _ = self.clear(r, c);
        }
    }

    /// True when every set bit of `self` is also set in `other`.
    #[inline]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(&a, &b)| (a & !b).is_zero())
    }

    /// True when the two boards share at least one set bit.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(&a, &b)| !(a & b).is_zero())
    }

    /// Creates a bitboard from an iterator over cells.
    pub fn from_cells<I>(iter: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut board = Self::new();
        for cell in iter {
            board.insert(cell)?;
        }
        Ok(board)
    }

    /// Lowest set cell in row-major order.
    pub fn first(&self) -> Option<Cell> {
        self.iter().next()
    }

    /// Iterator over the set cells of the board, in row-major order.
    #[inline]
    pub fn iter(&self) -> SetBits<'_, T, W, N> {
        SetBits {
            board: self,
            idx: 0,
        }
    }

    #[inline]
    fn zip_with(self, rhs: Self, op: impl Fn(T, T) -> T) -> Self {
        let mut words = self.words;
        for (w, r) in words.iter_mut().zip(rhs.words.iter()) {
            *w = op(*w, *r);
        }
        BitBoard { words }
    }
}

impl<T, const W: usize, const N: usize> Default for BitBoard<T, W, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const W: usize, const N: usize> fmt::Debug for BitBoard<T, W, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}, {}, {}>:", any::type_name::<T>(), W, N)?;
        write!(f, "{}", self)
    }
}

impl<T, const W: usize, const N: usize> fmt::Display for BitBoard<T, W, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..N {
            for c in 0..N {
                let bit = if self.get(r, c).unwrap_or(false) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", bit)?;
            }
            if r + 1 < N {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the set cells of a bitboard.
#[derive(Clone, Copy)]
pub struct SetBits<'a, T, const W: usize, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    board: &'a BitBoard<T, W, N>,
    idx: usize,
}

impl<'a, T, const W: usize, const N: usize> Iterator for SetBits<'a, T, W, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Cell;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let bits = BitBoard::<T, W, N>::word_bits();
        while self.idx < N * N {
            let idx = self.idx;
            let word = self.board.words[idx / bits];
            if word.is_zero() && idx % bits == 0 {
                // skip empty words wholesale
                self.idx += bits;
                continue;
            }
            self.idx += 1;
            if ((word >> (idx % bits)) & T::one()) != T::zero() {
                return Some(Cell::new((idx / N) as i32, (idx % N) as i32));
            }
        }
        None
    }
}

impl<T, const W: usize, const N: usize> BitAnd for BitBoard<T, W, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a & b)
    }
}

impl<T, const W: usize, const N: usize> BitOr for BitBoard<T, W, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a | b)
    }
}

impl<T, const W: usize, const N: usize> BitXor for BitBoard<T, W, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a ^ b)
    }
}

/// Set difference: bits of `self` not present in `rhs`.
impl<T, const W: usize, const N: usize> Sub for BitBoard<T, W, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a & !b)
    }
}

/// Bitwise NOT for inverting a bitboard (within board bounds).
impl<T, const W: usize, const N: usize> Not for BitBoard<T, W, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        let mut words = self.words;
        for (i, w) in words.iter_mut().enumerate() {
            *w = !*w & Self::word_mask(i);
        }
        BitBoard { words }
    }
}

impl<T, const W: usize, const N: usize> BitAndAssign for BitBoard<T, W, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl<T, const W: usize, const N: usize> BitOrAssign for BitBoard<T, W, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl<T, const W: usize, const N: usize> BitXorAssign for BitBoard<T, W, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

impl<T, const W: usize, const N: usize> SubAssign for BitBoard<T, W, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// The 12×12 game grid in three `u64` words.
pub type CellSet = BitBoard<u64, 3, 12>;
