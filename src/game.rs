//! Referee for two [`Player`]s sharing no state but the shots they exchange.

use crate::{
    common::{BoardError, Outcome},
    config::TOTAL_SHIP_CELLS,
    player::Player,
};

/// Current status of a match from one side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// Shot tally for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SideStats {
    pub shots: usize,
    pub hits: usize,
}

impl SideStats {
    /// The opposing fleet is fully destroyed.
    pub fn has_won(&self) -> bool {
        self.hits >= TOTAL_SHIP_CELLS
    }
}

/// Result of [`play_match`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSummary {
    pub first: SideStats,
    pub second: SideStats,
    pub turns: usize,
}

impl MatchSummary {
    pub fn status(&self) -> (GameStatus, GameStatus) {
        match (self.first.has_won(), self.second.has_won()) {
            (true, _) => (GameStatus::Won, GameStatus::Lost),
            (_, true) => (GameStatus::Lost, GameStatus::Won),
            _ => (GameStatus::InProgress, GameStatus::InProgress),
        }
    }

    /// 0 for the first player, 1 for the second.
    pub fn winner(&self) -> Option<usize> {
        match self.status() {
            (GameStatus::Won, _) => Some(0),
            (_, GameStatus::Won) => Some(1),
            _ => None,
        }
    }
}

/// One shot from `shooter` at `target`. Returns the outcome.
pub fn exchange<A, B>(shooter: &mut A, target: &mut B) -> Result<Outcome, BoardError>
where
    A: Player + ?Sized,
    B: Player + ?Sized,
{
    let cell = shooter.choose_move()?;
    let outcome = target.get_opponent_move(cell.row, cell.col)?;
    shooter.set_outcome(outcome.into(), cell.row, cell.col)?;
    Ok(outcome)
}

/// Deploy both fleets and alternate shots, `first` opening, until one fleet
/// is destroyed or `max_turns` full turns have passed.
pub fn play_match<A, B>(
    first: &mut A,
    second: &mut B,
    max_turns: usize,
) -> Result<MatchSummary, BoardError>
where
    A: Player + ?Sized,
    B: Player + ?Sized,
{
    first.deploy_fleet()?;
    second.deploy_fleet()?;

    let mut summary = MatchSummary {
        first: SideStats::default(),
        second: SideStats::default(),
        turns: 0,
    };
    while summary.turns < max_turns {
        summary.turns += 1;

        summary.first.shots += 1;
        if exchange(first, second)? == Outcome::Hit {
            summary.first.hits += 1;
        }
        if summary.first.has_won() {
            break;
        }

        summary.second.shots += 1;
        if exchange(second, first)? == Outcome::Hit {
            summary.second.hits += 1;
        }
        if summary.second.has_won() {
            break;
        }
    }
    log::debug!(
        "match over after {} turns: {:?} vs {:?}",
        summary.turns,
        summary.first,
        summary.second
    );
    Ok(summary)
}
