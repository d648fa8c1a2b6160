//! Clusters of hit cells presumed to belong to the same vessel.

use alloc::vec::Vec;

use crate::bitboard::CellSet;
use crate::board::Board;
use crate::geometry::Cell;

/// A set of hit cells believed (not guaranteed) to be 4-connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    cells: CellSet,
}

impl HitRegion {
    pub fn new(cells: CellSet) -> Self {
        Self { cells }
    }

    pub fn single(cell: Cell) -> Self {
        let mut cells = CellSet::new();
        // callers only pass board cells
        let _ = cells.insert(cell);
        Self { cells }
    }

    pub fn cells(&self) -> CellSet {
        self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(cell)
    }

    /// True when `cell` is in the region or 4-adjacent to it.
    pub fn touches(&self, cell: Cell) -> bool {
        self.contains(cell) || cell.neighbors4().iter().any(|&n| self.contains(n))
    }

    pub fn absorb(&mut self, other: HitRegion) {
        self.cells |= other.cells;
    }

    /// Valid empty cells 4-adjacent to the region.
    pub fn border(&self, board: &Board) -> CellSet {
        let mut border = CellSet::new();
        for cell in self.cells.iter() {
            for n in cell.neighbors4() {
                if board.is_empty_at(n) {
                    let _ = border.insert(n);
                }
            }
        }
        border
    }
}

/// Fold a new hit into the regions it touches. Every touched region merges
/// into one, which moves to the front; an isolated hit starts a new front
/// region.
pub fn merge_hit(regions: &mut Vec<HitRegion>, cell: Cell) {
    let mut merged = HitRegion::single(cell);
    regions.retain(|region| {
        if region.touches(cell) {
            merged.absorb(*region);
            false
        } else {
            true
        }
    });
    regions.insert(0, merged);
}

/// Split `hits` into 4-connected components, smallest first.
pub fn cluster_hits(hits: CellSet) -> Vec<HitRegion> {
    let mut remaining = hits;
    let mut regions = Vec::new();
    while let Some(seed) = remaining.first() {
        let mut component = CellSet::new();
        let mut stack = Vec::new();
        stack.push(seed);
        remaining.remove(seed);
        while let Some(cell) = stack.pop() {
            let _ = component.insert(cell);
            for n in cell.neighbors4() {
                if remaining.contains(n) {
                    remaining.remove(n);
                    stack.push(n);
                }
            }
        }
        regions.push(HitRegion::new(component));
    }
    regions.sort_by_key(HitRegion::len);
    regions
}
