#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod core;
pub mod protocol;

#[cfg(feature = "std")]
pub mod config;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod player;
#[cfg(feature = "std")]
pub mod player_node;
#[cfg(feature = "std")]
pub mod transport;

pub use crate::core::*;
pub use protocol::{Message, ProtocolError};

#[cfg(feature = "std")]
pub use config::NetConfig;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use player::{AiPlayer, CliPlayer, Player, ShipPlacement};
#[cfg(feature = "std")]
pub use player_node::{AppState, PlayerNode, RoundTally};
#[cfg(feature = "std")]
pub use transport::{NetEvent, NetworkManager};
