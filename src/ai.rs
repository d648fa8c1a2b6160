// Placement-density targeting over the opponent board, plus the cheap
// fallbacks used when the reasoning engine has nothing better to offer.
// Uses no_std and only allocates for tie lists.

use alloc::vec::Vec;
use rand::Rng;

use crate::{
    bitboard::CellSet,
    board::Board,
    common::Outcome,
    config::{
        BOARD_COLS, BOARD_ROWS, DIAGONAL_BIAS_ATTEMPTS, HIT_BIAS, RANDOM_FALLBACK_ATTEMPTS,
    },
    geometry::Cell,
    placement::random_cell,
    ship::Shape,
};

/// Per-cell placement weights for the opponent board.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DensityMap {
    weights: [[u64; BOARD_COLS]; BOARD_ROWS],
}

impl DensityMap {
    pub fn get(&self, cell: Cell) -> u64 {
        if cell.is_valid() {
            self.weights[cell.row as usize][cell.col as usize]
        } else {
            0
        }
    }

    pub fn max(&self) -> u64 {
        self.weights.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.weights.iter().flatten().sum()
    }

    /// Highest-weight cell, ties broken uniformly at random. `None` when the
    /// map is all zero.
    pub fn best<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        pick_best(Cell::all_valid().map(|c| (c, self.get(c))), rng)
    }

    /// Weights scaled to sum to one; uniform over valid cells when empty.
    pub fn normalized(&self) -> [[f64; BOARD_COLS]; BOARD_ROWS] {
        let mut matrix = [[0.0f64; BOARD_COLS]; BOARD_ROWS];
        let total = self.total();
        let valid = Cell::all_valid().count() as f64;
        for cell in Cell::all_valid() {
            let (r, c) = (cell.row as usize, cell.col as usize);
            matrix[r][c] = if total == 0 {
                1.0 / valid
            } else {
                self.weights[r][c] as f64 / total as f64
            };
        }
        matrix
    }
}

impl core::fmt::Debug for DensityMap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (r, row) in self.weights.iter().enumerate() {
            for (c, w) in row.iter().enumerate() {
                if Cell::new(r as i32, c as i32).is_valid() {
                    write!(f, "{:4}", w)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Count, for every empty cell, the weighted number of ways the remaining
/// `shapes` could cover it.
///
/// A placement is legal when every cell is on the board and empty. When
/// `through` is non-empty, placements may also cross those hit cells, and each
/// crossed hit multiplies the placement's weight by [`HIT_BIAS`].
pub fn density_map(board: &Board, shapes: &[Shape], through: CellSet) -> DensityMap {
    let mut weights = [[0u64; BOARD_COLS]; BOARD_ROWS];

    for shape in shapes {
        for orientation in shape.orientations() {
            for anchor in Cell::all_valid() {
                let mut valid = true;
                let mut n_hits = 0u32;
                for &o in orientation {
                    let cell = anchor + o;
                    if through.contains(cell) {
                        n_hits += 1;
                    } else if !board.is_empty_at(cell) {
                        valid = false;
                        break;
                    }
                }
                if !valid {
                    continue;
                }

                let weight = HIT_BIAS.pow(n_hits);
                for &o in orientation {
                    let cell = anchor + o;
                    if !through.contains(cell) {
                        weights[cell.row as usize][cell.col as usize] += weight;
                    }
                }
            }
        }
    }

    DensityMap { weights }
}

/// The candidate with the largest positive score, ties broken uniformly at
/// random.
pub fn pick_best<R, I>(scores: I, rng: &mut R) -> Option<Cell>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = (Cell, u64)>,
{
    let mut best = 0u64;
    let mut ties: Vec<Cell> = Vec::new();
    for (cell, score) in scores {
        if score == 0 || score < best {
            continue;
        }
        if score > best {
            best = score;
            ties.clear();
        }
        ties.push(cell);
    }
    if ties.is_empty() {
        None
    } else {
        Some(ties[rng.random_range(0..ties.len())])
    }
}

/// First empty neighbour of a hit, walking the history from the most recent
/// shot backwards. Hits outside `resolved` are tried before the rest.
pub fn flood_fill(board: &Board, history: &[(Cell, Outcome)], resolved: CellSet) -> Option<Cell> {
    let hits = || {
        history
            .iter()
            .rev()
            .filter(|(_, outcome)| *outcome == Outcome::Hit)
            .map(|&(cell, _)| cell)
    };
    let open_neighbour = |cell: Cell| {
        cell.neighbors4()
            .into_iter()
            .find(|&n| board.is_empty_at(n))
    };
    hits()
        .filter(|&c| !resolved.contains(c))
        .find_map(open_neighbour)
        .or_else(|| hits().find_map(open_neighbour))
}

/// Random empty cell, preferring one colour of the checkerboard for the
/// first [`DIAGONAL_BIAS_ATTEMPTS`] samples so early shots spread out.
pub fn random_target<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Cell> {
    for attempt in 0..RANDOM_FALLBACK_ATTEMPTS {
        let cell = random_cell(rng);
        if attempt < DIAGONAL_BIAS_ATTEMPTS && (cell.row + cell.col) % 2 != 0 {
            continue;
        }
        if board.is_empty_at(cell) {
            return Some(cell);
        }
    }
    let open: Vec<Cell> = board.empty_cells().collect();
    if open.is_empty() {
        None
    } else {
        Some(open[rng.random_range(0..open.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::{Fleet, VesselClass};
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn open_board_prefers_the_wide_region() {
        let board = Board::new();
        let density = density_map(&board, Fleet::full().shapes(), CellSet::new());
        let mut rng = SmallRng::seed_from_u64(0);
        let best = density.best(&mut rng).unwrap();
        assert!(best.row >= 6, "best cell {} should be in the wide part", best);
        assert_eq!(density.get(Cell::new(0, 9)), 0);
        assert!(density.get(Cell::new(0, 0)) > 0);
    }

    #[test]
    fn misses_block_placements() {
        let mut board = Board::new();
        // isolate (0, 0) behind two misses
        board.record_shot(Cell::new(0, 1), Outcome::Missed).unwrap();
        board.record_shot(Cell::new(1, 0), Outcome::Missed).unwrap();
        let destroyer = [Shape::canonical(VesselClass::Destroyer)];
        let density = density_map(&board, &destroyer, CellSet::new());
        assert_eq!(density.get(Cell::new(0, 0)), 0);
        assert_eq!(density.get(Cell::new(0, 1)), 0);
        assert!(density.get(Cell::new(1, 1)) > 0);
    }

    #[test]
    fn hits_attract_weight_when_allowed() {
        let mut board = Board::new();
        let hit = Cell::new(8, 8);
        board.record_shot(hit, Outcome::Hit).unwrap();
        let through = CellSet::from_cells([hit]).unwrap();
        let density = density_map(&board, Fleet::full().shapes(), through);
        let mut rng = SmallRng::seed_from_u64(5);
        let best = density.best(&mut rng).unwrap();
        assert!(best.is_adjacent(hit));
        assert_eq!(density.get(hit), 0);
    }

    #[test]
    fn normalized_sums_to_one() {
        let density = density_map(&Board::new(), Fleet::full().shapes(), CellSet::new());
        let sum: f64 = density.normalized().iter().flatten().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn flood_prefers_recent_hits() {
        let mut board = Board::new();
        let old = Cell::new(0, 0);
        let new = Cell::new(9, 9);
        board.record_shot(old, Outcome::Hit).unwrap();
        board.record_shot(new, Outcome::Hit).unwrap();
        let history = [(old, Outcome::Hit), (new, Outcome::Hit)];
        let pick = flood_fill(&board, &history, CellSet::new()).unwrap();
        assert!(pick.is_adjacent(new));
        let resolved = CellSet::from_cells([new]).unwrap();
        let pick = flood_fill(&board, &history, resolved).unwrap();
        assert!(pick.is_adjacent(old));
    }

    #[test]
    fn random_target_finds_the_last_cell() {
        let mut board = Board::new();
        let last = Cell::new(11, 0);
        for cell in Cell::all_valid().filter(|&c| c != last) {
            board.record_shot(cell, Outcome::Missed).unwrap();
        }
        let mut rng = SmallRng::seed_from_u64(9);
        assert_eq!(random_target(&board, &mut rng), Some(last));
        board.record_shot(last, Outcome::Missed).unwrap();
        assert_eq!(random_target(&board, &mut rng), None);
    }
}
