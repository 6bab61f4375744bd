use rand::rngs::SmallRng;
use rand::Rng;

use crate::core::{
    ai,
    board::Board,
    config::GRID_SIZE,
    session::FleetSetup,
    ship::Orientation,
};

use super::{Player, ShipPlacement};

/// Automatic player: random fleets, hunt/target shooting and a fixed budget of
/// extra rounds it agrees to.
pub struct AiPlayer {
    replays_left: usize,
}

impl AiPlayer {
    /// Plays a single round and then declines.
    pub fn new() -> Self {
        Self { replays_left: 0 }
    }

    /// Agrees to `replays` further rounds before declining.
    pub fn with_replays(replays: usize) -> Self {
        Self {
            replays_left: replays,
        }
    }
}

impl Default for AiPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for AiPlayer {
    fn fleet_setup(&mut self) -> FleetSetup {
        FleetSetup::Random
    }

    fn place_ship(
        &mut self,
        rng: &mut SmallRng,
        _board: &Board,
        missing: &[usize],
    ) -> Option<ShipPlacement> {
        let length = *missing.first()?;
        let orientation = if rng.random_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        Some(ShipPlacement {
            x: rng.random_range(0..GRID_SIZE),
            y: rng.random_range(0..GRID_SIZE),
            length,
            orientation,
        })
    }

    fn select_target(&mut self, rng: &mut SmallRng, enemy: &Board) -> (usize, usize) {
        ai::pick_target(enemy, rng).unwrap_or((0, 0))
    }

    fn wants_replay(&mut self, _won: bool) -> bool {
        if self.replays_left == 0 {
            return false;
        }
        self.replays_left -= 1;
        true
    }
}
