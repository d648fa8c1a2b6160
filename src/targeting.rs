//! The targeting state machine: seek with the density map, engage hit
//! regions with cover searches, and degrade through panic and flood when the
//! evidence stops making sense.

use alloc::vec::Vec;
use core::mem;
use log::{debug, info, warn};
use rand::Rng;

use crate::ai::{density_map, flood_fill, pick_best};
use crate::bitboard::CellSet;
use crate::board::Board;
use crate::common::Outcome;
use crate::config::{PlayerConfig, MAX_TRANSITIONS};
use crate::cover::{
    analyze_hit_region, border_scores, cover_with_single_ship, exact_covers, CoverRule,
};
use crate::geometry::Cell;
use crate::region::{cluster_hits, merge_hit, HitRegion};
use crate::ship::{Fleet, Shape};

/// Which algorithm the next move comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TargetingState {
    /// No unresolved hits: fire at the densest cell.
    #[default]
    Seek,
    /// Assume the front region is a single vessel.
    EngageSingle { regions: Vec<HitRegion> },
    /// Explain the front region with several vessels.
    EngageMulti { regions: Vec<HitRegion> },
    /// Regions rebuilt from the board, resolved smallest first.
    Panic {
        regions: Vec<HitRegion>,
        reversed: bool,
    },
    /// Probe around hits without further reasoning.
    Flood,
}

impl TargetingState {
    pub fn name(&self) -> &'static str {
        match self {
            TargetingState::Seek => "seek",
            TargetingState::EngageSingle { .. } => "engage-single",
            TargetingState::EngageMulti { .. } => "engage-multi",
            TargetingState::Panic { .. } => "panic",
            TargetingState::Flood => "flood",
        }
    }

    /// Hit regions currently being worked on.
    pub fn regions(&self) -> &[HitRegion] {
        match self {
            TargetingState::EngageSingle { regions }
            | TargetingState::EngageMulti { regions }
            | TargetingState::Panic { regions, .. } => regions,
            TargetingState::Seek | TargetingState::Flood => &[],
        }
    }
}

/// What a cover search concluded about one region.
enum Resolution {
    Target(Cell),
    Retired,
    Contradiction,
}

/// Offence engine for one round: the enemy fleet still unaccounted for, the
/// hits already explained by retired vessels, and the current state.
#[derive(Debug, Clone)]
pub struct Targeter {
    state: TargetingState,
    fleet: Fleet,
    resolved: CellSet,
    config: PlayerConfig,
}

impl Targeter {
    pub fn new(fleet: Fleet, config: PlayerConfig) -> Self {
        Self {
            state: TargetingState::Seek,
            fleet,
            resolved: CellSet::new(),
            config,
        }
    }

    pub fn state(&self) -> &TargetingState {
        &self.state
    }

    /// Enemy vessels not yet proven destroyed.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Hits attributed to retired vessels.
    pub fn resolved(&self) -> CellSet {
        self.resolved
    }

    fn set_state(&mut self, next: TargetingState) {
        self.state = next;
    }

    fn log_transition(&self, from: &'static str) {
        if from != self.state.name() {
            debug!("targeting {} -> {}", from, self.state.name());
        }
    }

    /// Fold the outcome of our last shot into the hit regions.
    pub fn record(&mut self, cell: Cell, outcome: Outcome) {
        let from = self.state.name();
        let next = match mem::take(&mut self.state) {
            TargetingState::Seek => match outcome {
                Outcome::Hit => TargetingState::EngageSingle {
                    regions: [HitRegion::single(cell)].to_vec(),
                },
                Outcome::Missed => TargetingState::Seek,
            },
            TargetingState::EngageSingle { mut regions }
            | TargetingState::EngageMulti { mut regions } => {
                if outcome == Outcome::Hit {
                    merge_hit(&mut regions, cell);
                }
                TargetingState::EngageSingle { regions }
            }
            TargetingState::Panic { mut regions, .. } => {
                if outcome == Outcome::Hit {
                    merge_hit(&mut regions, cell);
                }
                TargetingState::Panic {
                    regions,
                    reversed: false,
                }
            }
            TargetingState::Flood => TargetingState::Flood,
        };
        self.set_state(next);
        self.log_transition(from);
    }

    /// Choose the next cell to fire at, or `None` when every state gave up
    /// within [`MAX_TRANSITIONS`] steps.
    pub fn next_move<R: Rng + ?Sized>(
        &mut self,
        board: &Board,
        history: &[(Cell, Outcome)],
        rng: &mut R,
    ) -> Option<Cell> {
        for _ in 0..MAX_TRANSITIONS {
            let from = self.state.name();
            let pick = self.step(board, history, rng);
            self.log_transition(from);
            if pick.is_some() {
                return pick;
            }
        }
        warn!(
            "targeting gave up in state {} with {} ships left",
            self.state.name(),
            self.fleet.len()
        );
        None
    }

    fn step<R: Rng + ?Sized>(
        &mut self,
        board: &Board,
        history: &[(Cell, Outcome)],
        rng: &mut R,
    ) -> Option<Cell> {
        match mem::take(&mut self.state) {
            TargetingState::Seek => {
                let through = if self.config.seek_through_hits {
                    board.hits() - self.resolved
                } else {
                    CellSet::new()
                };
                let density = density_map(board, self.fleet.shapes(), through);
                match density.best(rng) {
                    Some(cell) => {
                        self.set_state(TargetingState::Seek);
                        Some(cell)
                    }
                    None => {
                        self.enter_panic(board);
                        None
                    }
                }
            }
            TargetingState::EngageSingle { regions } => {
                let Some(front) = regions.first() else {
                    self.set_state(TargetingState::Seek);
                    return None;
                };
                let border = front.border(board);
                let pick = cover_with_single_ship(
                    board,
                    front.cells(),
                    border,
                    self.fleet.shapes(),
                    rng,
                );
                match pick {
                    Some(cell) => {
                        self.set_state(TargetingState::EngageSingle { regions });
                        Some(cell)
                    }
                    None => {
                        self.set_state(TargetingState::EngageMulti { regions });
                        None
                    }
                }
            }
            TargetingState::EngageMulti { mut regions } => {
                if regions.is_empty() {
                    self.set_state(TargetingState::Seek);
                    return None;
                }
                match self.resolve(board, regions[0], false, rng) {
                    Resolution::Target(cell) => {
                        self.set_state(TargetingState::EngageMulti { regions });
                        Some(cell)
                    }
                    Resolution::Retired => {
                        regions.remove(0);
                        if regions.is_empty() {
                            self.set_state(TargetingState::Seek);
                        } else {
                            self.set_state(TargetingState::EngageSingle { regions });
                        }
                        None
                    }
                    Resolution::Contradiction => {
                        self.enter_panic(board);
                        None
                    }
                }
            }
            TargetingState::Panic {
                mut regions,
                reversed,
            } => {
                if regions.is_empty() {
                    self.set_state(TargetingState::Seek);
                    return None;
                }
                match self.resolve(board, regions[0], reversed, rng) {
                    Resolution::Target(cell) => {
                        self.set_state(TargetingState::Panic { regions, reversed });
                        Some(cell)
                    }
                    Resolution::Retired => {
                        regions.remove(0);
                        if regions.is_empty() {
                            self.set_state(TargetingState::Seek);
                        } else {
                            self.set_state(TargetingState::Panic {
                                regions,
                                reversed: false,
                            });
                        }
                        None
                    }
                    Resolution::Contradiction if !reversed => {
                        self.set_state(TargetingState::Panic {
                            regions,
                            reversed: true,
                        });
                        None
                    }
                    Resolution::Contradiction => {
                        self.set_state(TargetingState::Flood);
                        None
                    }
                }
            }
            TargetingState::Flood => match flood_fill(board, history, self.resolved) {
                Some(cell) => {
                    self.set_state(TargetingState::Flood);
                    Some(cell)
                }
                None => {
                    self.set_state(TargetingState::Seek);
                    None
                }
            },
        }
    }

    /// Rebuild every region from the unresolved hits on the board.
    fn enter_panic(&mut self, board: &Board) {
        let regions = cluster_hits(board.hits() - self.resolved);
        self.set_state(TargetingState::Panic {
            regions,
            reversed: false,
        });
    }

    /// Run the exact-cover search on `region` and either pick a border cell
    /// or retire the vessels the region is made of.
    fn resolve<R: Rng + ?Sized>(
        &mut self,
        board: &Board,
        region: HitRegion,
        reversed: bool,
        rng: &mut R,
    ) -> Resolution {
        let shapes: Vec<Shape> = if reversed {
            self.fleet.reversed()
        } else {
            self.fleet.shapes().to_vec()
        };
        let border = region.border(board);
        let search = exact_covers(
            board,
            region.cells(),
            &shapes,
            CoverRule::ExtendIntoEmpty,
            self.config.search_budget,
        );
        if search.covers.is_empty() {
            debug!(
                "no cover for a {}-cell region (truncated: {})",
                region.len(),
                search.truncated
            );
            return Resolution::Contradiction;
        }
        if let Some(cell) = pick_best(border_scores(&search.covers, border), rng) {
            return Resolution::Target(cell);
        }
        if search.truncated {
            // unseen covers might still reach the border
            debug!("cover search truncated on a {}-cell region", region.len());
            return Resolution::Contradiction;
        }

        let solutions = analyze_hit_region(region.cells(), &shapes, self.config.search_budget);
        let Some(classes) = solutions.first() else {
            return Resolution::Contradiction;
        };
        for &class in classes {
            self.fleet.remove(class);
            info!("{} destroyed", class);
        }
        self.resolved |= region.cells();
        Resolution::Retired
    }
}
