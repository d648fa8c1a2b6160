use broadside::{AiPlayer, Cell, CellState, Player, TargetingState, VesselClass};

fn shoot(player: &mut AiPlayer, state: CellState, cells: &[(i32, i32)]) {
    for &(row, col) in cells {
        player.set_outcome(state, row, col).unwrap();
    }
}

#[test]
fn test_boxed_in_destroyer_is_retired() {
    let mut player = AiPlayer::seeded(5);
    player.deploy_fleet().unwrap();
    shoot(
        &mut player,
        CellState::Missed,
        &[(7, 4), (7, 5), (9, 4), (9, 5), (8, 3), (8, 6)],
    );
    shoot(&mut player, CellState::Hit, &[(8, 4), (8, 5)]);
    assert!(matches!(
        player.targeting_state(),
        TargetingState::EngageSingle { .. }
    ));

    let next = player.choose_move().unwrap();
    assert_eq!(player.targeting_state(), &TargetingState::Seek);
    assert!(!player.fleet().contains(VesselClass::Destroyer));
    assert_eq!(player.fleet().len(), 4);
    assert_eq!(player.opponent_board().state(next), Some(CellState::Empty));
}

#[test]
fn test_adjacent_destroyer_and_cruiser_are_retired_together() {
    let mut player = AiPlayer::seeded(6);
    player.deploy_fleet().unwrap();
    shoot(
        &mut player,
        CellState::Missed,
        &[
            (5, 0),
            (5, 1),
            (5, 2),
            (5, 3),
            (6, 4),
            (7, 1),
            (7, 2),
            (7, 3),
            (8, 0),
        ],
    );
    shoot(
        &mut player,
        CellState::Hit,
        &[(6, 0), (7, 0), (6, 1), (6, 2), (6, 3)],
    );

    player.choose_move().unwrap();
    assert_eq!(player.targeting_state(), &TargetingState::Seek);
    let remaining: Vec<VesselClass> = player.fleet().classes().collect();
    assert_eq!(
        remaining,
        vec![
            VesselClass::Hovercraft,
            VesselClass::Carrier,
            VesselClass::Battleship
        ]
    );
}

#[test]
fn test_open_line_is_extended() {
    let mut player = AiPlayer::seeded(7);
    player.deploy_fleet().unwrap();
    shoot(&mut player, CellState::Missed, &[(9, 5), (10, 6), (10, 7)]);
    shoot(&mut player, CellState::Hit, &[(9, 6), (9, 7)]);
    let next = player.choose_move().unwrap();
    let border = [Cell::new(8, 6), Cell::new(8, 7), Cell::new(9, 8)];
    assert!(border.contains(&next), "unexpected pick {}", next);
    assert_eq!(player.fleet().len(), 5);
}

#[test]
fn test_choose_move_is_idempotent() {
    let mut player = AiPlayer::seeded(8);
    player.deploy_fleet().unwrap();
    let first = player.choose_move().unwrap();
    assert_eq!(player.choose_move().unwrap(), first);
    player
        .set_outcome(CellState::Hit, first.row, first.col)
        .unwrap();
    let second = player.choose_move().unwrap();
    assert_ne!(second, first);
    assert_eq!(player.choose_move().unwrap(), second);
}

#[test]
fn test_redeploy_resets_the_round() {
    let mut player = AiPlayer::seeded(9);
    player.deploy_fleet().unwrap();
    shoot(
        &mut player,
        CellState::Missed,
        &[(7, 4), (7, 5), (9, 4), (9, 5), (8, 3), (8, 6)],
    );
    shoot(&mut player, CellState::Hit, &[(8, 4), (8, 5)]);
    player.choose_move().unwrap();
    assert_eq!(player.fleet().len(), 4);

    let board = player.deploy_fleet().unwrap();
    assert_eq!(board.ship_map().count_ones(), 21);
    assert_eq!(player.fleet().len(), 5);
    assert!(player.history().is_empty());
    assert!(player.opponent_board().shots().is_empty());
    assert_eq!(player.targeting_state(), &TargetingState::Seek);
}
