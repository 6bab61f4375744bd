use crate::core::{Role, DEFAULT_PORT};

/// Environment variable holding the log level filter.
pub const LOG_ENV: &str = "SEABATTLE_LOG";

/// Address the host listens on.
pub const HOST_BIND_ADDR: &str = "0.0.0.0";

/// Where and how to open the session's connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetConfig {
    pub role: Role,
    /// Peer address for a client; ignored by the host.
    pub remote: String,
    pub port: u16,
}

impl NetConfig {
    /// Host listening on `port`.
    pub fn host(port: u16) -> Self {
        Self {
            role: Role::Host,
            remote: String::new(),
            port,
        }
    }

    /// Client connecting to `remote:port`.
    pub fn client(remote: impl Into<String>, port: u16) -> Self {
        Self {
            role: Role::Client,
            remote: remote.into(),
            port,
        }
    }
}

impl Default for NetConfig {
    fn default() -> Self {
        Self::host(DEFAULT_PORT)
    }
}
