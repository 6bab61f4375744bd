//! Point-to-point transport carrying the line protocol.

use std::net::SocketAddr;

use crate::core::ShotResult;

/// Notifications posted by the transport to its single consumer, in the order
/// they happened on the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetEvent {
    /// The host socket is bound and waiting for the peer.
    Listening(SocketAddr),
    /// The stream to the peer is open.
    Connected,
    ShotReceived { x: u8, y: u8 },
    ResultReceived(ShotResult),
    ShipDestroyed { length: u8 },
    ResetReceived,
    /// Raised exactly once per transport, whatever ended the session.
    Disconnected,
}

pub mod tcp;

pub use tcp::NetworkManager;
