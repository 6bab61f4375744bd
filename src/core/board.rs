//! Grid and fleet engine: placement validation, random fleets and shot
//! resolution.
//!
//! The same type backs both the player's own board (holds `Ship` cells and the
//! ship list) and the enemy-facing board, where only `Hit`/`Miss` are ever
//! written because the opponent's layout is never known.

use alloc::vec::Vec;

use rand::Rng;

use crate::core::common::{BoardError, CellState, ShotReport};
use crate::core::config::{
    FLEET_TEMPLATE, GRID_SIZE, MAX_SHIP_LEN, PLACEMENT_ATTEMPTS, TOTAL_SHIP_CELLS,
};
use crate::core::ship::{Orientation, Ship};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[CellState; GRID_SIZE]; GRID_SIZE],
    ships: Vec<Ship>,
    ship_cells: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board (no ships placed).
    pub fn new() -> Self {
        Board {
            cells: [[CellState::Empty; GRID_SIZE]; GRID_SIZE],
            ships: Vec::new(),
            ship_cells: 0,
        }
    }

    /// Reset every cell to `Empty` and forget all ships.
    pub fn clear(&mut self) {
        self.cells = [[CellState::Empty; GRID_SIZE]; GRID_SIZE];
        self.ships.clear();
        self.ship_cells = 0;
    }

    /// State of the cell at (x, y).
    pub fn cell(&self, x: usize, y: usize) -> Result<CellState, BoardError> {
        check_bounds(x, y)?;
        Ok(self.cells[y][x])
    }

    /// Ship segments not yet hit.
    pub fn ship_cells_count(&self) -> usize {
        self.ship_cells
    }

    pub fn is_fleet_complete(&self) -> bool {
        self.ship_cells == TOTAL_SHIP_CELLS
    }

    /// Ships placed on this board, in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Template lengths that have no placed ship yet, longest first.
    pub fn missing_ship_lengths(&self) -> Vec<usize> {
        let mut placed: Vec<usize> = self.ships.iter().map(Ship::length).collect();
        let mut missing = Vec::new();
        for &len in FLEET_TEMPLATE.iter() {
            if let Some(pos) = placed.iter().position(|&l| l == len) {
                placed.swap_remove(pos);
            } else {
                missing.push(len);
            }
        }
        missing
    }

    /// Try to place a ship of `length` at (x, y).
    ///
    /// Rejected when any covered cell is off the grid, or when a covered cell
    /// or one of its eight neighbours already holds a ship. A rejected
    /// placement leaves the board untouched.
    pub fn try_place_ship(
        &mut self,
        x: usize,
        y: usize,
        length: usize,
        orientation: Orientation,
    ) -> bool {
        if length == 0 || length > MAX_SHIP_LEN {
            return false;
        }
        let fits = match orientation {
            Orientation::Horizontal => {
                x.checked_add(length).map_or(false, |end| end <= GRID_SIZE) && y < GRID_SIZE
            }
            Orientation::Vertical => {
                y.checked_add(length).map_or(false, |end| end <= GRID_SIZE) && x < GRID_SIZE
            }
        };
        if !fits {
            return false;
        }

        let ship = Ship::new(x, y, length, orientation);
        if !self.is_clear_around(&ship) {
            return false;
        }

        for (cx, cy) in ship.cells() {
            self.cells[cy][cx] = CellState::Ship;
        }
        self.ship_cells += length;
        self.ships.push(ship);
        true
    }

    /// No cell of `ship` nor any of its neighbours is occupied.
    fn is_clear_around(&self, ship: &Ship) -> bool {
        ship.cells().all(|(cx, cy)| {
            (cx.saturating_sub(1)..=(cx + 1).min(GRID_SIZE - 1)).all(|nx| {
                (cy.saturating_sub(1)..=(cy + 1).min(GRID_SIZE - 1))
                    .all(|ny| self.cells[ny][nx] != CellState::Ship)
            })
        })
    }

    /// Clear the board and lay out the standard fleet at random.
    ///
    /// Ships are placed in template order, longest first. Each ship is
    /// rejection-sampled over uniformly random origins and orientations; if a
    /// ship finds no room within `PLACEMENT_ATTEMPTS` tries the layout is a
    /// dead end and the whole fleet starts over.
    pub fn place_fleet_random<R: Rng>(&mut self, rng: &mut R) {
        'fleet: loop {
            self.clear();
            for &len in FLEET_TEMPLATE.iter() {
                if !self.place_ship_random(rng, len) {
                    continue 'fleet;
                }
            }
            return;
        }
    }

    fn place_ship_random<R: Rng>(&mut self, rng: &mut R, length: usize) -> bool {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orientation = if rng.random_bool(0.5) {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let x = rng.random_range(0..GRID_SIZE);
            let y = rng.random_range(0..GRID_SIZE);
            if self.try_place_ship(x, y, length, orientation) {
                return true;
            }
        }
        false
    }

    /// Resolve an opponent shot at (x, y).
    ///
    /// Shots at already decided cells are not guarded: the cell is left as is
    /// and the shot is reported as not a hit.
    pub fn receive_shot(&mut self, x: usize, y: usize) -> Result<ShotReport, BoardError> {
        check_bounds(x, y)?;
        let mut report = ShotReport {
            state: self.cells[y][x],
            hit: false,
            fleet_destroyed: false,
            destroyed_ship: None,
        };

        match self.cells[y][x] {
            CellState::Ship => {
                self.cells[y][x] = CellState::Hit;
                self.ship_cells -= 1;
                report.hit = true;
                report.fleet_destroyed = self.ship_cells == 0;
                report.destroyed_ship = self.destroyed_ship_at(x, y).map(Ship::length);
            }
            CellState::Empty => self.cells[y][x] = CellState::Miss,
            CellState::Hit | CellState::Miss => {}
        }
        report.state = self.cells[y][x];
        Ok(report)
    }

    /// The ship covering (x, y), if every one of its cells has been hit.
    pub fn destroyed_ship_at(&self, x: usize, y: usize) -> Option<&Ship> {
        self.ships.iter().find(|ship| {
            ship.contains(x, y) && ship.cells().all(|(cx, cy)| self.cells[cy][cx] == CellState::Hit)
        })
    }

    /// Record the peer-confirmed outcome of a shot we fired at (x, y).
    ///
    /// A hit always marks `Hit`; a miss only marks an `Empty` cell, so a
    /// duplicate report never downgrades a hit.
    pub fn mark_shot_result(&mut self, x: usize, y: usize, is_hit: bool) -> Result<(), BoardError> {
        check_bounds(x, y)?;
        let cell = &mut self.cells[y][x];
        if is_hit {
            *cell = CellState::Hit;
        } else if *cell == CellState::Empty {
            *cell = CellState::Miss;
        }
        Ok(())
    }
}

fn check_bounds(x: usize, y: usize) -> Result<(), BoardError> {
    if x < GRID_SIZE && y < GRID_SIZE {
        Ok(())
    } else {
        Err(BoardError::OutOfBounds { x, y })
    }
}
