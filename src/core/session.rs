//! Per-player turn and phase state machine.
//!
//! A session pairs the player's own board with the enemy-facing board and
//! reconciles both with what the peer reports. It has no internal locking: a
//! single consumer is expected to drive every mutator.

use alloc::vec::Vec;

use rand::Rng;

use crate::core::board::Board;
use crate::core::common::{BoardError, SessionError, ShotFeedback, ShotReport, ShotResult};
use crate::core::config::TOTAL_SHIP_CELLS;

/// Which side of the connection this player is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Accepted the connection; moves first in a fresh session.
    Host,
    /// Initiated the connection.
    Client,
}

/// Phase of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    FleetReady,
    InProgress,
    Finished,
}

/// How the own board is populated for a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetSetup {
    Random,
    Manual,
}

pub struct GameSession {
    my_board: Board,
    enemy_board: Board,
    role: Role,
    is_my_turn: bool,
    phase: GamePhase,
    hits_on_enemy: usize,
    fleet_ready: bool,
    enemy_ships_destroyed: Vec<usize>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            my_board: Board::new(),
            enemy_board: Board::new(),
            role: Role::Client,
            is_my_turn: false,
            phase: GamePhase::NotStarted,
            hits_on_enemy: 0,
            fleet_ready: false,
            enemy_ships_destroyed: Vec::new(),
        }
    }

    pub fn my_board(&self) -> &Board {
        &self.my_board
    }

    /// Mutable own board, for manual placement.
    pub fn my_board_mut(&mut self) -> &mut Board {
        &mut self.my_board
    }

    pub fn enemy_board(&self) -> &Board {
        &self.enemy_board
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_host(&self) -> bool {
        self.role == Role::Host
    }

    pub fn is_my_turn(&self) -> bool {
        self.is_my_turn
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Confirmed hits on the enemy fleet this round.
    pub fn hits_on_enemy(&self) -> usize {
        self.hits_on_enemy
    }

    pub fn is_fleet_ready(&self) -> bool {
        self.fleet_ready
    }

    /// Lengths of enemy ships the peer reported destroyed this round.
    pub fn enemy_ships_destroyed(&self) -> &[usize] {
        &self.enemy_ships_destroyed
    }

    /// Fix the role for this connection. The host moves first.
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.is_my_turn = role == Role::Host;
    }

    /// Back to a blank session, as after a disconnect.
    pub fn clear_all(&mut self) {
        self.my_board.clear();
        self.enemy_board.clear();
        self.hits_on_enemy = 0;
        self.enemy_ships_destroyed.clear();
        self.phase = GamePhase::NotStarted;
        self.is_my_turn = false;
        self.fleet_ready = false;
    }

    /// Lay out a random fleet on the own board and get ready for a round.
    pub fn prepare_random_fleet_for_me<R: Rng>(&mut self, rng: &mut R) {
        self.my_board.place_fleet_random(rng);
        self.reset_enemy_view();
        self.phase = GamePhase::FleetReady;
        self.fleet_ready = true;
    }

    /// Manual placement through `my_board_mut` is finished.
    pub fn notify_manual_fleet_completed(&mut self) -> Result<(), SessionError> {
        if !self.my_board.is_fleet_complete() {
            return Err(SessionError::FleetIncomplete {
                placed_cells: self.my_board.ship_cells_count(),
            });
        }
        self.reset_enemy_view();
        self.phase = GamePhase::FleetReady;
        self.fleet_ready = true;
        Ok(())
    }

    /// Begin the round. Turn ownership is left as `set_role` or the previous
    /// round established it.
    pub fn start_round(&mut self) -> Result<(), SessionError> {
        if !self.fleet_ready {
            return Err(SessionError::FleetNotReady);
        }
        self.phase = GamePhase::InProgress;
        Ok(())
    }

    /// The opponent fired at (x, y) on our board.
    pub fn receive_enemy_shot(&mut self, x: usize, y: usize) -> Result<ShotReport, BoardError> {
        let report = self.my_board.receive_shot(x, y)?;
        if !report.hit && !report.fleet_destroyed {
            self.is_my_turn = true;
        }
        if report.fleet_destroyed {
            self.phase = GamePhase::Finished;
        }
        Ok(report)
    }

    /// The peer reported `result` for the shot we fired at (x, y).
    ///
    /// The enemy counts as lost when our confirmed hits cover the whole fleet
    /// or when the peer says `WIN`, whichever is seen first.
    pub fn apply_my_shot_result(
        &mut self,
        x: usize,
        y: usize,
        result: ShotResult,
    ) -> Result<ShotFeedback, BoardError> {
        let hit = result.is_hit();
        self.enemy_board.mark_shot_result(x, y, hit)?;

        let mut enemy_lost = false;
        if hit {
            self.hits_on_enemy += 1;
            if self.hits_on_enemy >= TOTAL_SHIP_CELLS {
                enemy_lost = true;
            }
        }
        if result == ShotResult::Win {
            enemy_lost = true;
        }

        if enemy_lost {
            self.phase = GamePhase::Finished;
        } else if !hit {
            self.is_my_turn = false;
        }
        Ok(ShotFeedback { hit, enemy_lost })
    }

    /// The peer told us our last shot sank one of its ships.
    pub fn record_enemy_ship_destroyed(&mut self, length: usize) {
        self.enemy_ships_destroyed.push(length);
    }

    /// Prepare a new round on the same connection. Role and turn ownership
    /// carry over from the previous round.
    pub fn start_replay<R: Rng>(&mut self, setup: FleetSetup, rng: &mut R) {
        self.reset_enemy_view();
        match setup {
            FleetSetup::Random => {
                self.my_board.place_fleet_random(rng);
                self.fleet_ready = true;
            }
            FleetSetup::Manual => {
                self.my_board.clear();
                self.fleet_ready = false;
            }
        }
        self.phase = GamePhase::FleetReady;
    }

    fn reset_enemy_view(&mut self) {
        self.enemy_board.clear();
        self.hits_on_enemy = 0;
        self.enemy_ships_destroyed.clear();
    }
}
