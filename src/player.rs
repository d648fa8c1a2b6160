use alloc::vec::Vec;
use log::{debug, trace};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    ai::random_target,
    board::Board,
    common::{BoardError, CellState, Outcome},
    config::PlayerConfig,
    geometry::Cell,
    placement::{self, Spacing},
    ship::Fleet,
    targeting::{Targeter, TargetingState},
};

/// The entry points a game runner drives a player through.
pub trait Player {
    /// Start a round: reset all state and place every vessel. Returns the own
    /// board.
    fn deploy_fleet(&mut self) -> Result<Board, BoardError>;

    /// Pick an empty cell on the opponent board. Calling again before
    /// [`Player::set_outcome`] returns the same cell.
    fn choose_move(&mut self) -> Result<Cell, BoardError>;

    /// Report what the last shot at (`row`, `col`) revealed.
    fn set_outcome(&mut self, entry: CellState, row: i32, col: i32) -> Result<(), BoardError>;

    /// Resolve the opponent's shot at (`row`, `col`) against the own board.
    fn get_opponent_move(&mut self, row: i32, col: i32) -> Result<Outcome, BoardError>;
}

/// Computer player: random spaced deployment, density seeking and cover-based
/// hit resolution.
pub struct AiPlayer<R: Rng = SmallRng> {
    rng: R,
    config: PlayerConfig,
    own: Board,
    opponent: Board,
    history: Vec<(Cell, Outcome)>,
    targeter: Targeter,
    pending: Option<Cell>,
}

impl AiPlayer<SmallRng> {
    /// Player with a reproducible RNG.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Player seeded from the thread-local generator.
    #[cfg(feature = "std")]
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> AiPlayer<R> {
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, PlayerConfig::default())
    }

    pub fn with_config(rng: R, config: PlayerConfig) -> Self {
        Self {
            rng,
            config,
            own: Board::new(),
            opponent: Board::new(),
            history: Vec::new(),
            targeter: Targeter::new(Fleet::full(), config),
            pending: None,
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn own_board(&self) -> &Board {
        &self.own
    }

    /// What this player knows about the opponent's board.
    pub fn opponent_board(&self) -> &Board {
        &self.opponent
    }

    /// Own shots and their outcomes, oldest first.
    pub fn history(&self) -> &[(Cell, Outcome)] {
        &self.history
    }

    /// Enemy vessels not yet accounted for.
    pub fn fleet(&self) -> &Fleet {
        self.targeter.fleet()
    }

    pub fn targeting_state(&self) -> &TargetingState {
        self.targeter.state()
    }

    pub fn is_defeated(&self) -> bool {
        self.own.all_sunk()
    }
}

impl<R: Rng> Player for AiPlayer<R> {
    fn deploy_fleet(&mut self) -> Result<Board, BoardError> {
        self.opponent = Board::new();
        self.history.clear();
        self.targeter = Targeter::new(Fleet::full(), self.config);
        self.pending = None;

        let spacing = Spacing {
            enabled: self.config.spacing,
            relax_after: self.config.spacing_relax_after,
        };
        self.own = placement::deploy_fleet(&mut self.rng, Fleet::full().shapes(), spacing)?;
        Ok(self.own)
    }

    fn choose_move(&mut self) -> Result<Cell, BoardError> {
        if let Some(cell) = self.pending {
            if self.opponent.is_empty_at(cell) {
                return Ok(cell);
            }
        }
        if self.opponent.empty_cells().next().is_none() {
            return Err(BoardError::BoardExhausted);
        }

        let planned = self
            .targeter
            .next_move(&self.opponent, &self.history, &mut self.rng)
            .filter(|&cell| self.opponent.is_empty_at(cell));
        let cell = match planned {
            Some(cell) => cell,
            None => {
                debug!("no planned move, firing at random");
                random_target(&self.opponent, &mut self.rng).ok_or(BoardError::BoardExhausted)?
            }
        };
        debug_assert!(cell.is_valid() && self.opponent.is_empty_at(cell));

        trace!("{} fires at {}", self.targeter.state().name(), cell);
        self.pending = Some(cell);
        Ok(cell)
    }

    fn set_outcome(&mut self, entry: CellState, row: i32, col: i32) -> Result<(), BoardError> {
        let outcome = Outcome::try_from(entry)?;
        let cell = Cell::new(row, col);
        if !cell.is_valid() {
            return Err(BoardError::InvalidCell { row, col });
        }
        self.opponent.record_shot(cell, outcome)?;

        self.history.push((cell, outcome));
        self.targeter.record(cell, outcome);
        self.pending = None;
        Ok(())
    }

    fn get_opponent_move(&mut self, row: i32, col: i32) -> Result<Outcome, BoardError> {
        let outcome = self.own.receive_shot(Cell::new(row, col))?;
        trace!("opponent fired at ({}, {}): {:?}", row, col, outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_is_validated_before_the_cell() {
        let mut player = AiPlayer::seeded(1);
        player.deploy_fleet().unwrap();
        assert_eq!(
            player.set_outcome(CellState::Empty, 0, 9),
            Err(BoardError::InvalidOutcome(CellState::Empty))
        );
        assert_eq!(
            player.set_outcome(CellState::Hit, 0, 9),
            Err(BoardError::InvalidCell { row: 0, col: 9 })
        );
        player.set_outcome(CellState::Missed, 3, 3).unwrap();
        assert_eq!(
            player.set_outcome(CellState::Hit, 3, 3),
            Err(BoardError::AlreadyShot { row: 3, col: 3 })
        );
        assert_eq!(player.history(), &[(Cell::new(3, 3), Outcome::Missed)]);
    }

    #[test]
    fn opponent_shots_land_on_the_own_board() {
        let mut player = AiPlayer::seeded(2);
        let board = player.deploy_fleet().unwrap();
        let ship = board.ship_map().first().unwrap();
        let water = board.empty_cells().next().unwrap();

        assert_eq!(player.get_opponent_move(ship.row, ship.col), Ok(Outcome::Hit));
        assert_eq!(player.get_opponent_move(ship.row, ship.col), Ok(Outcome::Hit));
        assert_eq!(player.get_opponent_move(water.row, water.col), Ok(Outcome::Missed));
        assert_eq!(player.own_board().state(ship), Some(CellState::Hit));
        assert_eq!(player.own_board().state(water), Some(CellState::Missed));
        assert!(player.get_opponent_move(-1, 0).is_err());
        assert!(!player.is_defeated());
    }

    #[test]
    fn exhausted_board_is_an_error() {
        let mut player = AiPlayer::seeded(3);
        player.deploy_fleet().unwrap();
        for cell in Cell::all_valid() {
            player.set_outcome(CellState::Missed, cell.row, cell.col).unwrap();
        }
        assert_eq!(player.choose_move(), Err(BoardError::BoardExhausted));
    }
}
