//! Explaining hit regions with the remaining fleet.
//!
//! Three searches share the same placement enumeration:
//!
//! - [`cover_with_single_ship`] assumes the region is one vessel and scores
//!   the border cells its possible extensions would cover.
//! - [`exact_covers`] assigns distinct shapes to disjoint placements until
//!   every target cell is covered. Placements may extend into empty cells
//!   ([`CoverRule::ExtendIntoEmpty`]) or must stay inside the target
//!   ([`CoverRule::Strict`]).
//! - [`analyze_hit_region`] runs the strict search to name the vessels a fully
//!   destroyed region is made of.
//!
//! Hit cells outside the target are never available to a placement: they are
//! already claimed by another region.

use alloc::vec::Vec;
use rand::Rng;

use crate::ai::pick_best;
use crate::bitboard::CellSet;
use crate::board::Board;
use crate::config::{BOARD_COLS, BOARD_ROWS};
use crate::geometry::Cell;
use crate::ship::{Shape, VesselClass};

/// Which cells a placement may use besides the target cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverRule {
    /// Target cells and empty cells.
    ExtendIntoEmpty,
    /// Target cells only.
    Strict,
}

/// One vessel pinned to concrete cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub class: VesselClass,
    pub cells: CellSet,
}

/// Disjoint placements that together cover a target set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover {
    pub placements: Vec<Placement>,
}

impl Cover {
    /// Union of all placements.
    pub fn covered(&self) -> CellSet {
        self.placements
            .iter()
            .fold(CellSet::new(), |acc, p| acc | p.cells)
    }

    pub fn classes(&self) -> Vec<VesselClass> {
        self.placements.iter().map(|p| p.class).collect()
    }
}

/// Result of a bounded exact-cover search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoverSearch {
    pub covers: Vec<Cover>,
    /// The node budget ran out before the search space was exhausted.
    pub truncated: bool,
}

/// Collect `cells` into a set if every one of them passes `allowed`.
fn footprint(cells: &[Cell], allowed: impl Fn(Cell) -> bool) -> Option<CellSet> {
    let mut set = CellSet::new();
    for &cell in cells {
        if !cell.is_valid() || !allowed(cell) {
            return None;
        }
        set.insert(cell).ok()?;
    }
    Some(set)
}

/// Most promising border cell under the assumption that `region` is part of
/// a single vessel. `None` when no shape can extend the region into the
/// border, either because the region is already a whole vessel or because no
/// remaining shape fits it.
pub fn cover_with_single_ship<R: Rng + ?Sized>(
    board: &Board,
    region: CellSet,
    border: CellSet,
    shapes: &[Shape],
    rng: &mut R,
) -> Option<Cell> {
    let anchor = region.first()?;
    let mut scores = [[0u64; BOARD_COLS]; BOARD_ROWS];

    for shape in shapes {
        for cells in shape.placements_covering(anchor) {
            let Some(placed) = footprint(&cells, |c| region.contains(c) || board.is_empty_at(c))
            else {
                continue;
            };
            if !region.is_subset(&placed) {
                continue;
            }
            for b in (placed & border).iter() {
                scores[b.row as usize][b.col as usize] += 1;
            }
        }
    }

    pick_best(
        border
            .iter()
            .map(|c| (c, scores[c.row as usize][c.col as usize])),
        rng,
    )
}

struct Search<'a> {
    board: &'a Board,
    target: CellSet,
    shapes: &'a [Shape],
    rule: CoverRule,
    budget: usize,
    nodes: usize,
    truncated: bool,
    covers: Vec<Cover>,
}

impl Search<'_> {
    fn allowed(&self, cell: Cell) -> bool {
        match self.rule {
            CoverRule::Strict => self.target.contains(cell),
            CoverRule::ExtendIntoEmpty => {
                self.target.contains(cell) || self.board.is_empty_at(cell)
            }
        }
    }

    /// `used` is a bitmask over `shapes`; each shape is placed at most once.
    fn descend(
        &mut self,
        uncovered: CellSet,
        covered: CellSet,
        used: u32,
        chosen: &mut Vec<Placement>,
    ) {
        if uncovered.is_empty() {
            self.covers.push(Cover {
                placements: chosen.clone(),
            });
            return;
        }
        if self.truncated {
            return;
        }

        let capacity: usize = self
            .shapes
            .iter()
            .enumerate()
            .filter(|(i, _)| used & (1 << i) == 0)
            .map(|(_, s)| s.size())
            .sum();
        if capacity < uncovered.count_ones() {
            return;
        }

        self.nodes += 1;
        if self.nodes > self.budget {
            self.truncated = true;
            return;
        }

        let Some(pivot) = uncovered.first() else {
            return;
        };
        let shapes = self.shapes;
        for (i, shape) in shapes.iter().enumerate() {
            if used & (1 << i) != 0 {
                continue;
            }
            for cells in shape.placements_covering(pivot) {
                let Some(placed) =
                    footprint(&cells, |c| !covered.contains(c) && self.allowed(c))
                else {
                    continue;
                };
                chosen.push(Placement {
                    class: shape.class(),
                    cells: placed,
                });
                self.descend(uncovered - placed, covered | placed, used | (1 << i), chosen);
                chosen.pop();
                if self.truncated {
                    return;
                }
            }
        }
    }
}

/// Every assignment of distinct `shapes` to disjoint placements whose union
/// contains all of `target`, explored depth-first from the lowest uncovered
/// cell. At most `budget` interior nodes are expanded.
pub fn exact_covers(
    board: &Board,
    target: CellSet,
    shapes: &[Shape],
    rule: CoverRule,
    budget: usize,
) -> CoverSearch {
    debug_assert!(shapes.len() <= 32, "fleet too large for the shape bitmask");
    let mut search = Search {
        board,
        target,
        shapes,
        rule,
        budget,
        nodes: 0,
        truncated: false,
        covers: Vec::new(),
    };
    let mut chosen = Vec::new();
    search.descend(target, CellSet::new(), 0, &mut chosen);
    CoverSearch {
        covers: search.covers,
        truncated: search.truncated,
    }
}

/// How many covers use each border cell.
pub fn border_scores(covers: &[Cover], border: CellSet) -> Vec<(Cell, u64)> {
    let mut scores: Vec<(Cell, u64)> = border.iter().map(|c| (c, 0)).collect();
    for cover in covers {
        let used = cover.covered() & border;
        for (cell, score) in scores.iter_mut() {
            if used.contains(*cell) {
                *score += 1;
            }
        }
    }
    scores
}

/// The vessel combinations that exactly tile `region`, fewest vessels first.
/// Each combination is listed once, in the order the search found it.
pub fn analyze_hit_region(
    region: CellSet,
    shapes: &[Shape],
    budget: usize,
) -> Vec<Vec<VesselClass>> {
    let search = exact_covers(&Board::new(), region, shapes, CoverRule::Strict, budget);
    let mut solutions: Vec<Vec<VesselClass>> = Vec::new();
    for cover in &search.covers {
        let mut classes = cover.classes();
        classes.sort_unstable();
        if !solutions.contains(&classes) {
            solutions.push(classes);
        }
    }
    solutions.sort_by_key(Vec::len);
    solutions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Outcome;
    use crate::region::HitRegion;
    use crate::ship::Fleet;
    use rand::{rngs::SmallRng, SeedableRng};

    fn set(cells: &[(i32, i32)]) -> CellSet {
        CellSet::from_cells(cells.iter().map(|&c| Cell::from(c))).unwrap()
    }

    fn board_with_hits(cells: &[(i32, i32)]) -> Board {
        let mut board = Board::new();
        for &c in cells {
            board.record_shot(Cell::from(c), Outcome::Hit).unwrap();
        }
        board
    }

    #[test]
    fn single_ship_extends_a_line() {
        let hits = [(8, 4), (8, 5)];
        let mut board = board_with_hits(&hits);
        board.record_shot(Cell::new(8, 3), Outcome::Missed).unwrap();
        let region = HitRegion::new(set(&hits));
        let border = region.border(&board);
        let line = [
            Shape::canonical(VesselClass::Battleship),
            Shape::canonical(VesselClass::Cruiser),
        ];
        let mut rng = SmallRng::seed_from_u64(1);
        let pick = cover_with_single_ship(&board, region.cells(), border, &line, &mut rng);
        assert_eq!(pick, Some(Cell::new(8, 6)));
    }

    #[test]
    fn single_ship_gives_up_on_a_boxed_in_destroyer() {
        let hits = [(7, 7), (8, 7)];
        let mut board = board_with_hits(&hits);
        for c in [(6, 7), (9, 7), (7, 6), (8, 6), (7, 8), (8, 8)] {
            board.record_shot(Cell::from(c), Outcome::Missed).unwrap();
        }
        let region = HitRegion::new(set(&hits));
        let border = region.border(&board);
        assert!(border.is_empty());
        let mut rng = SmallRng::seed_from_u64(1);
        let pick =
            cover_with_single_ship(&board, region.cells(), border, Fleet::full().shapes(), &mut rng);
        assert_eq!(pick, None);
        assert_eq!(
            analyze_hit_region(region.cells(), Fleet::full().shapes(), 10_000),
            [[VesselClass::Destroyer]]
        );
    }

    #[test]
    fn adjacent_destroyer_and_cruiser() {
        // Destroyer standing on (6, 0)-(7, 0), Cruiser along row 6 next to it.
        let hits = [(6, 0), (7, 0), (6, 1), (6, 2), (6, 3)];
        let board = board_with_hits(&hits);
        let target = set(&hits);
        let fleet = Fleet::full();

        let search = exact_covers(
            &board,
            target,
            fleet.shapes(),
            CoverRule::ExtendIntoEmpty,
            20_000,
        );
        assert!(!search.covers.is_empty());
        for cover in &search.covers {
            assert!(target.is_subset(&cover.covered()));
            let total: usize = cover.placements.iter().map(|p| p.cells.count_ones()).sum();
            assert_eq!(total, cover.covered().count_ones(), "placements overlap");
        }

        let solutions = analyze_hit_region(target, fleet.shapes(), 20_000);
        assert_eq!(
            solutions,
            [[VesselClass::Destroyer, VesselClass::Cruiser]]
        );
    }

    #[test]
    fn search_respects_the_budget() {
        let target = set(&[(8, 2), (8, 3)]);
        let search = exact_covers(
            &Board::new(),
            target,
            Fleet::full().shapes(),
            CoverRule::ExtendIntoEmpty,
            1,
        );
        assert!(search.truncated);
    }

    #[test]
    fn truncation_can_follow_a_found_cover() {
        let hits = [(6, 0), (7, 0), (6, 1), (6, 2), (6, 3)];
        let mut board = board_with_hits(&hits);
        for c in [(5, 0), (5, 1), (5, 2), (5, 3), (6, 4), (7, 1), (7, 2), (7, 3), (8, 0)] {
            board.record_shot(Cell::from(c), Outcome::Missed).unwrap();
        }
        let shapes = [
            Shape::canonical(VesselClass::Destroyer),
            Shape::canonical(VesselClass::Cruiser),
            Shape::canonical(VesselClass::Battleship),
        ];
        let search = exact_covers(&board, set(&hits), &shapes, CoverRule::ExtendIntoEmpty, 3);
        assert_eq!(search.covers.len(), 1);
        assert!(search.truncated);
    }

    #[test]
    fn foreign_hits_are_off_limits() {
        // a lone hit whose only open side is another region's hit
        let mut board = board_with_hits(&[(0, 0), (0, 1)]);
        board.record_shot(Cell::new(1, 0), Outcome::Missed).unwrap();
        let search = exact_covers(
            &board,
            set(&[(0, 0)]),
            Fleet::full().shapes(),
            CoverRule::ExtendIntoEmpty,
            1_000,
        );
        assert!(search.covers.is_empty());
        assert!(!search.truncated);
    }

    #[test]
    fn border_scores_count_covers() {
        let covers = [
            Cover {
                placements: [Placement {
                    class: VesselClass::Destroyer,
                    cells: set(&[(9, 1), (9, 2)]),
                }]
                .to_vec(),
            },
            Cover {
                placements: [Placement {
                    class: VesselClass::Destroyer,
                    cells: set(&[(9, 1), (10, 1)]),
                }]
                .to_vec(),
            },
        ];
        let scores = border_scores(&covers, set(&[(9, 2), (10, 1), (8, 1)]));
        assert_eq!(
            scores,
            [
                (Cell::new(8, 1), 0),
                (Cell::new(9, 2), 1),
                (Cell::new(10, 1), 1)
            ]
        );
    }
}
