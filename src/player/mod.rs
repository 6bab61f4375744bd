//! Player trait and implementations
//!
//! The player is the decision-making collaborator of a `PlayerNode`: it picks
//! how the fleet is laid out, where to fire and whether to play again, and it
//! is told what happened. The node owns every piece of game state.
//! - AiPlayer: random fleet and hunt/target shooting
//! - CliPlayer: interactive terminal player

use std::net::SocketAddr;

use rand::rngs::SmallRng;

use crate::core::{
    board::Board,
    common::{ShotFeedback, ShotReport, ShotResult},
    session::{FleetSetup, Role},
    ship::Orientation,
};

/// One manual placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipPlacement {
    pub x: usize,
    pub y: usize,
    pub length: usize,
    pub orientation: Orientation,
}

/// Interface implemented by different player types.
pub trait Player: Send {
    /// How the own board is populated for the next round.
    fn fleet_setup(&mut self) -> FleetSetup;

    /// Choose where the next ship goes during manual setup. `missing` lists the
    /// lengths still to place, longest first. `None` clears the board and
    /// starts the layout over.
    fn place_ship(
        &mut self,
        rng: &mut SmallRng,
        board: &Board,
        missing: &[usize],
    ) -> Option<ShipPlacement>;

    /// Choose the next cell to fire at on the enemy-facing board.
    fn select_target(&mut self, rng: &mut SmallRng, enemy: &Board) -> (usize, usize);

    /// Whether to play another round on the same connection.
    fn wants_replay(&mut self, won: bool) -> bool;

    fn handle_listening(&mut self, _addr: SocketAddr) {}

    fn handle_connected(&mut self, _role: Role) {}

    fn handle_placement_rejected(&mut self, _placement: ShipPlacement) {}

    /// Inform the player of the result of its last shot.
    fn handle_shot_result(&mut self, _coord: (usize, usize), _result: ShotResult, _feedback: ShotFeedback) {}

    /// Inform the player of an opponent shot against its board.
    fn handle_enemy_shot(&mut self, _coord: (usize, usize), _report: &ShotReport, _own: &Board) {}

    /// The player's last shot sank an enemy ship of `length`.
    fn handle_enemy_ship_destroyed(&mut self, _length: usize) {}

    fn handle_round_over(&mut self, _won: bool) {}

    fn handle_round_start(&mut self, _own: &Board) {}
}

// Re-export implementations
pub mod ai;
pub use ai::AiPlayer;

pub mod cli;
pub use cli::CliPlayer;
