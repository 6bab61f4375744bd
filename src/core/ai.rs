// Hunt/target shot selection over the enemy-facing board.
// Ships never touch, not even diagonally, so every cell diagonal to a hit is
// known water and a line of hits can only be extended along its own axis.

use alloc::vec::Vec;

use rand::Rng;

use crate::core::board::Board;
use crate::core::common::CellState;
use crate::core::config::GRID_SIZE;

const ORTHOGONAL: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

fn offset(x: usize, y: usize, (dx, dy): (isize, isize)) -> Option<(usize, usize)> {
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    (nx < GRID_SIZE && ny < GRID_SIZE).then_some((nx, ny))
}

fn state(board: &Board, x: usize, y: usize) -> CellState {
    board.cell(x, y).unwrap_or(CellState::Miss)
}

fn touches_hit(board: &Board, x: usize, y: usize, dirs: &[(isize, isize)]) -> bool {
    dirs.iter()
        .filter_map(|&d| offset(x, y, d))
        .any(|(nx, ny)| state(board, nx, ny) == CellState::Hit)
}

/// Choose the next cell to fire at, or `None` once every cell is decided.
///
/// Target mode fires next to an existing hit; hunt mode picks uniformly among
/// the cells that can still hold a ship.
pub fn pick_target<R: Rng>(enemy: &Board, rng: &mut R) -> Option<(usize, usize)> {
    let mut open = Vec::new();
    let mut plausible = Vec::new();
    let mut targets = Vec::new();

    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            if state(enemy, x, y).is_decided() {
                continue;
            }
            open.push((x, y));
            if touches_hit(enemy, x, y, &DIAGONAL) {
                continue;
            }
            plausible.push((x, y));
            if touches_hit(enemy, x, y, &ORTHOGONAL) {
                targets.push((x, y));
            }
        }
    }

    let pool = if !targets.is_empty() {
        targets
    } else if !plausible.is_empty() {
        plausible
    } else {
        open
    };
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.random_range(0..pool.len())])
}
