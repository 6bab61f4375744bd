//! Core sea battle engine (no_std compatible)
//!
//! Pure game logic: the grid and fleet model, the session state machine,
//! replay consent and target selection. Needs only `alloc` and `rand`.

pub mod ai;
pub mod board;
pub mod common;
pub mod config;
pub mod replay;
pub mod session;
pub mod ship;

// Re-export commonly used types
pub use ai::pick_target;
pub use board::Board;
pub use common::{BoardError, CellState, SessionError, ShotFeedback, ShotReport, ShotResult};
pub use config::*;
pub use replay::{ReplayChoice, ReplayCoordinator, ReplayStep};
pub use session::{FleetSetup, GamePhase, GameSession, Role};
pub use ship::{Orientation, Ship};
