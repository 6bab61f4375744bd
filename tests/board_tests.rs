use seabattle::{
    Board, BoardError, CellState, Orientation, FLEET_TEMPLATE, GRID_SIZE, TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_place_single_ship_marks_cells() {
    let mut board = Board::new();
    assert!(board.try_place_ship(2, 3, 3, Orientation::Horizontal));
    for x in 2..5 {
        assert_eq!(board.cell(x, 3).unwrap(), CellState::Ship);
    }
    assert_eq!(board.cell(5, 3).unwrap(), CellState::Empty);
    assert_eq!(board.ship_cells_count(), 3);
    assert_eq!(board.ships().len(), 1);
}

#[test]
fn test_placement_off_grid_rejected() {
    let mut board = Board::new();
    assert!(!board.try_place_ship(8, 0, 3, Orientation::Horizontal));
    assert!(!board.try_place_ship(0, 7, 4, Orientation::Vertical));
    assert!(!board.try_place_ship(GRID_SIZE, 0, 1, Orientation::Horizontal));
    assert!(!board.try_place_ship(usize::MAX, 0, 2, Orientation::Horizontal));
    // exactly touching the edge is fine
    assert!(board.try_place_ship(6, 9, 4, Orientation::Horizontal));
    assert_eq!(board.ship_cells_count(), 4);
}

#[test]
fn test_placement_bad_length_rejected() {
    let mut board = Board::new();
    assert!(!board.try_place_ship(0, 0, 0, Orientation::Horizontal));
    assert!(!board.try_place_ship(0, 0, 5, Orientation::Horizontal));
    assert_eq!(board.ship_cells_count(), 0);
}

#[test]
fn test_placement_separation_enforced() {
    let mut board = Board::new();
    assert!(board.try_place_ship(4, 4, 2, Orientation::Horizontal));

    // overlapping
    assert!(!board.try_place_ship(5, 3, 2, Orientation::Vertical));
    // edge-adjacent
    assert!(!board.try_place_ship(4, 5, 1, Orientation::Horizontal));
    // corner-adjacent only
    assert!(!board.try_place_ship(6, 5, 1, Orientation::Horizontal));
    assert!(!board.try_place_ship(3, 3, 1, Orientation::Horizontal));

    // one empty cell of gap is enough
    assert!(board.try_place_ship(7, 4, 1, Orientation::Horizontal));
    assert!(board.try_place_ship(4, 6, 2, Orientation::Horizontal));

    // rejected attempts left the board untouched
    assert_eq!(board.ship_cells_count(), 5);
    assert_eq!(board.ships().len(), 3);
}

#[test]
fn test_random_fleet_complete() {
    let mut board = Board::new();
    let mut rng = SmallRng::seed_from_u64(42);
    board.place_fleet_random(&mut rng);

    assert!(board.is_fleet_complete());
    assert_eq!(board.ship_cells_count(), TOTAL_SHIP_CELLS);
    let mut lengths: Vec<usize> = board.ships().iter().map(|s| s.length()).collect();
    lengths.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(lengths, FLEET_TEMPLATE.to_vec());
    assert!(board.missing_ship_lengths().is_empty());
}

#[test]
fn test_random_fleet_replaces_previous_layout() {
    let mut board = Board::new();
    assert!(board.try_place_ship(0, 0, 4, Orientation::Horizontal));
    let mut rng = SmallRng::seed_from_u64(7);
    board.place_fleet_random(&mut rng);
    assert_eq!(board.ships().len(), FLEET_TEMPLATE.len());
    assert_eq!(board.ship_cells_count(), TOTAL_SHIP_CELLS);
}

#[test]
fn test_missing_lengths_track_placed_ships() {
    let mut board = Board::new();
    assert_eq!(board.missing_ship_lengths(), FLEET_TEMPLATE.to_vec());

    assert!(board.try_place_ship(0, 0, 4, Orientation::Horizontal));
    assert!(board.try_place_ship(0, 2, 2, Orientation::Horizontal));
    assert_eq!(board.missing_ship_lengths(), vec![3, 3, 2, 2, 1, 1, 1, 1]);
    assert!(!board.is_fleet_complete());
}

#[test]
fn test_shot_outcomes_and_destroyed_reported_once() {
    let mut board = Board::new();
    assert!(board.try_place_ship(1, 1, 2, Orientation::Vertical));
    assert!(board.try_place_ship(5, 5, 1, Orientation::Horizontal));

    let miss = board.receive_shot(0, 0).unwrap();
    assert!(!miss.hit);
    assert_eq!(miss.state, CellState::Miss);
    assert_eq!(miss.destroyed_ship, None);

    let first = board.receive_shot(1, 1).unwrap();
    assert!(first.hit);
    assert_eq!(first.state, CellState::Hit);
    assert_eq!(first.destroyed_ship, None);
    assert!(!first.fleet_destroyed);

    let sinking = board.receive_shot(1, 2).unwrap();
    assert!(sinking.hit);
    assert_eq!(sinking.destroyed_ship, Some(2));
    assert!(!sinking.fleet_destroyed);

    // firing again at a sunk ship reports nothing new
    let again = board.receive_shot(1, 2).unwrap();
    assert!(!again.hit);
    assert_eq!(again.destroyed_ship, None);
    assert_eq!(again.state, CellState::Hit);

    let last = board.receive_shot(5, 5).unwrap();
    assert_eq!(last.destroyed_ship, Some(1));
    assert!(last.fleet_destroyed);
    assert_eq!(board.ship_cells_count(), 0);
}

#[test]
fn test_repeat_shot_at_miss_is_not_a_hit() {
    let mut board = Board::new();
    assert!(board.try_place_ship(0, 0, 1, Orientation::Horizontal));
    assert!(!board.receive_shot(9, 9).unwrap().hit);
    let report = board.receive_shot(9, 9).unwrap();
    assert!(!report.hit);
    assert_eq!(report.state, CellState::Miss);
    assert_eq!(board.ship_cells_count(), 1);
}

#[test]
fn test_out_of_bounds_coordinates() {
    let mut board = Board::new();
    assert_eq!(
        board.receive_shot(10, 0).unwrap_err(),
        BoardError::OutOfBounds { x: 10, y: 0 }
    );
    assert_eq!(
        board.mark_shot_result(0, 12, true).unwrap_err(),
        BoardError::OutOfBounds { x: 0, y: 12 }
    );
    assert!(board.cell(GRID_SIZE, GRID_SIZE).is_err());
}

#[test]
fn test_mark_shot_result_never_downgrades_hit() {
    let mut board = Board::new();
    board.mark_shot_result(3, 3, true).unwrap();
    board.mark_shot_result(3, 3, false).unwrap();
    assert_eq!(board.cell(3, 3).unwrap(), CellState::Hit);

    board.mark_shot_result(4, 4, false).unwrap();
    board.mark_shot_result(4, 4, false).unwrap();
    assert_eq!(board.cell(4, 4).unwrap(), CellState::Miss);

    // the enemy-facing board never learns ship cells
    assert_eq!(board.ship_cells_count(), 0);
    assert!(board.destroyed_ship_at(3, 3).is_none());
}

#[test]
fn test_clear_resets_everything() {
    let mut board = Board::new();
    let mut rng = SmallRng::seed_from_u64(3);
    board.place_fleet_random(&mut rng);
    let _ = board.receive_shot(0, 0);
    board.clear();
    assert_eq!(board, Board::new());
}

#[test]
fn test_same_seed_same_fleet() {
    let mut a = Board::new();
    let mut b = Board::new();
    a.place_fleet_random(&mut SmallRng::seed_from_u64(12345));
    b.place_fleet_random(&mut SmallRng::seed_from_u64(12345));
    assert_eq!(a, b);
}
