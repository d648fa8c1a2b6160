use crate::ship::VesselClass;

pub const BOARD_ROWS: usize = 12;
pub const BOARD_COLS: usize = 12;
/// Rows 0..SHORT_ROWS only span columns 0..SHORT_COLS.
pub const SHORT_ROWS: usize = 6;
pub const SHORT_COLS: usize = 6;
pub const VALID_CELLS: usize = SHORT_ROWS * SHORT_COLS + (BOARD_ROWS - SHORT_ROWS) * BOARD_COLS;

pub const NUM_SHIPS: usize = 5;
/// Deployment order, largest first.
pub const FLEET: [VesselClass; NUM_SHIPS] = [
    VesselClass::Hovercraft,
    VesselClass::Carrier,
    VesselClass::Battleship,
    VesselClass::Cruiser,
    VesselClass::Destroyer,
];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 6 + 6 + 4 + 3 + 2;

/// Placement attempts per ship before deployment gives up.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;
/// Dispatch steps the targeting state machine may take for one move.
pub const MAX_TRANSITIONS: usize = 16;
/// Random samples restricted to even `row + col` before any cell is accepted.
pub const DIAGONAL_BIAS_ATTEMPTS: u32 = 50;
/// Unrestricted random samples before scanning for any empty cell.
pub const RANDOM_FALLBACK_ATTEMPTS: u32 = 1_000;
/// Weight multiplier per known hit for placements crossing unresolved hits.
pub const HIT_BIAS: u64 = 10;

/// Runtime knobs for an [`crate::AiPlayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Keep own ships from touching edge-to-edge.
    pub spacing: bool,
    /// Per-ship attempt count after which spacing violations are tolerated.
    pub spacing_relax_after: u32,
    /// Let seek-mode placements run through unresolved hits.
    pub seek_through_hits: bool,
    /// Node budget for one exact-cover search.
    pub search_budget: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spacing: true,
            spacing_relax_after: 200,
            seek_through_hits: false,
            search_budget: 20_000,
        }
    }
}
