use seabattle::{pick_target, Board, CellState, FLEET_TEMPLATE, GRID_SIZE, TOTAL_SHIP_CELLS};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_fleet(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new();
    board.place_fleet_random(&mut rng);
    board
}

fn ship_at(board: &Board, x: isize, y: isize) -> Option<usize> {
    if x < 0 || y < 0 || x >= GRID_SIZE as isize || y >= GRID_SIZE as isize {
        return None;
    }
    board
        .ships()
        .iter()
        .position(|s| s.contains(x as usize, y as usize))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn random_fleet_is_complete(seed in any::<u64>()) {
        let board = random_fleet(seed);
        prop_assert!(board.is_fleet_complete());
        prop_assert_eq!(board.ship_cells_count(), TOTAL_SHIP_CELLS);

        let mut lengths: Vec<usize> = board.ships().iter().map(|s| s.length()).collect();
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        prop_assert_eq!(lengths, FLEET_TEMPLATE.to_vec());

        let ship_cells = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| (x, y)))
            .filter(|&(x, y)| board.cell(x, y).unwrap() == CellState::Ship)
            .count();
        prop_assert_eq!(ship_cells, TOTAL_SHIP_CELLS);
    }

    #[test]
    fn random_fleet_ships_never_touch(seed in any::<u64>()) {
        let board = random_fleet(seed);
        for (idx, ship) in board.ships().iter().enumerate() {
            for (x, y) in ship.cells() {
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if let Some(other) = ship_at(&board, x as isize + dx, y as isize + dy) {
                            prop_assert_eq!(other, idx, "ships {} and {} touch", idx, other);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn destroyed_ship_reported_exactly_once(seed in any::<u64>()) {
        let mut board = random_fleet(seed);
        let mut rng = SmallRng::seed_from_u64(seed ^ 0x5eed);
        let mut sunk = Vec::new();
        let mut fleet_destroyed = 0;

        // fire everywhere, twice, in a shuffled order
        let mut shots: Vec<(usize, usize)> = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| (x, y)))
            .collect();
        shots.extend(shots.clone());
        for i in (1..shots.len()).rev() {
            let j = rng.random_range(0..=i);
            shots.swap(i, j);
        }

        for (x, y) in shots {
            let report = board.receive_shot(x, y).unwrap();
            if let Some(len) = report.destroyed_ship {
                sunk.push(len);
            }
            if report.fleet_destroyed {
                fleet_destroyed += 1;
            }
        }

        sunk.sort_unstable_by(|a, b| b.cmp(a));
        prop_assert_eq!(sunk, FLEET_TEMPLATE.to_vec());
        prop_assert_eq!(fleet_destroyed, 1);
        prop_assert_eq!(board.ship_cells_count(), 0);
    }

    #[test]
    fn pick_target_only_returns_open_cells(seed in any::<u64>(), marks in 0..GRID_SIZE * GRID_SIZE) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut enemy = Board::new();
        for _ in 0..marks {
            let x = rng.random_range(0..GRID_SIZE);
            let y = rng.random_range(0..GRID_SIZE);
            enemy.mark_shot_result(x, y, rng.random_bool(0.2)).unwrap();
        }
        match pick_target(&enemy, &mut rng) {
            Some((x, y)) => prop_assert!(!enemy.cell(x, y).unwrap().is_decided()),
            None => {
                for y in 0..GRID_SIZE {
                    for x in 0..GRID_SIZE {
                        prop_assert!(enemy.cell(x, y).unwrap().is_decided());
                    }
                }
            }
        }
    }
}

#[test]
fn test_pick_target_follows_up_on_a_hit() {
    let mut enemy = Board::new();
    enemy.mark_shot_result(5, 5, true).unwrap();
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..50 {
        let (x, y) = pick_target(&enemy, &mut rng).unwrap();
        let dist = x.abs_diff(5) + y.abs_diff(5);
        assert_eq!(dist, 1, "expected a neighbour of the hit, got ({}, {})", x, y);
    }
}

#[test]
fn test_pick_target_none_when_board_decided() {
    let mut enemy = Board::new();
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            enemy.mark_shot_result(x, y, false).unwrap();
        }
    }
    let mut rng = SmallRng::seed_from_u64(0);
    assert_eq!(pick_target(&enemy, &mut rng), None);
}
