use broadside::{Board, BoardError, Cell, CellState, Outcome};

#[test]
fn test_l_shape_validity() {
    assert_eq!(Cell::all_valid().count(), 108);
    assert!(Cell::new(5, 5).is_valid());
    assert!(!Cell::new(5, 6).is_valid());
    assert!(Cell::new(6, 6).is_valid());
    assert!(Cell::new(11, 11).is_valid());
    assert!(!Cell::new(12, 0).is_valid());
    assert!(!Cell::new(0, -1).is_valid());
}

#[test]
fn test_state_precedence() -> Result<(), BoardError> {
    let mut board = Board::new();
    let cell = Cell::new(7, 7);
    assert_eq!(board.state(cell), Some(CellState::Empty));
    board.occupy(cell)?;
    assert_eq!(board.state(cell), Some(CellState::Occupied));
    assert_eq!(board.receive_shot(cell)?, Outcome::Hit);
    assert_eq!(board.state(cell), Some(CellState::Hit));
    assert_eq!(board.state(Cell::new(0, 11)), None);
    Ok(())
}

#[test]
fn test_record_shot_errors() {
    let mut board = Board::new();
    assert_eq!(
        board.record_shot(Cell::new(2, 8), Outcome::Hit),
        Err(BoardError::InvalidCell { row: 2, col: 8 })
    );
    board.record_shot(Cell::new(2, 2), Outcome::Missed).unwrap();
    assert_eq!(
        board.record_shot(Cell::new(2, 2), Outcome::Hit),
        Err(BoardError::AlreadyShot { row: 2, col: 2 })
    );
    assert_eq!(board.count(CellState::Missed), 1);
    assert_eq!(board.count(CellState::Hit), 0);
    assert_eq!(board.empty_cells().count(), 107);
}

#[test]
fn test_all_sunk() -> Result<(), BoardError> {
    let mut board = Board::new();
    assert!(!board.all_sunk());
    board.occupy(Cell::new(8, 1))?;
    board.occupy(Cell::new(8, 2))?;
    assert_eq!(board.receive_shot(Cell::new(8, 3))?, Outcome::Missed);
    board.receive_shot(Cell::new(8, 1))?;
    assert!(!board.all_sunk());
    board.receive_shot(Cell::new(8, 2))?;
    assert!(board.all_sunk());
    Ok(())
}

#[test]
fn test_outcome_conversions() {
    assert_eq!(CellState::from(Outcome::Hit), CellState::Hit);
    assert_eq!(Outcome::try_from(CellState::Missed), Ok(Outcome::Missed));
    assert_eq!(
        Outcome::try_from(CellState::Occupied),
        Err(BoardError::InvalidOutcome(CellState::Occupied))
    );
}
