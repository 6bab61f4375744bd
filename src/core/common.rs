//! Common types: cell states, shot reports and the engine's error enums.

/// State of one grid cell. `Hit` and `Miss` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Empty,
    Ship,
    Hit,
    Miss,
}

impl CellState {
    /// Whether a shot at this cell has already been decided.
    pub fn is_decided(self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss)
    }
}

/// Outcome of a shot resolved against a board holding ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotReport {
    /// Cell state after the shot.
    pub state: CellState,
    /// The shot struck a ship segment.
    pub hit: bool,
    /// No ship segment is left afloat.
    pub fleet_destroyed: bool,
    /// Length of the ship this exact shot finished off.
    pub destroyed_ship: Option<usize>,
}

/// Result tag the shot's target reports back to the shooter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotResult {
    Hit,
    Miss,
    /// The shot hit and no ship segment is left.
    Win,
}

impl ShotResult {
    /// Wire tag of this result.
    pub fn as_str(self) -> &'static str {
        match self {
            ShotResult::Hit => "HIT",
            ShotResult::Miss => "MISS",
            ShotResult::Win => "WIN",
        }
    }

    /// Parse a wire tag, ignoring ASCII case and surrounding whitespace.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        [ShotResult::Hit, ShotResult::Miss, ShotResult::Win]
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(tag))
    }

    /// Tag to report for a resolved shot.
    pub fn for_report(report: &ShotReport) -> Self {
        if report.fleet_destroyed {
            ShotResult::Win
        } else if report.hit {
            ShotResult::Hit
        } else {
            ShotResult::Miss
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(self, ShotResult::Hit | ShotResult::Win)
    }
}

impl core::fmt::Display for ShotResult {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of our own shot as confirmed by the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotFeedback {
    pub hit: bool,
    pub enemy_lost: bool,
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate lies outside the grid.
    OutOfBounds { x: usize, y: usize },
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::OutOfBounds { x, y } => {
                write!(f, "coordinate ({}, {}) is outside the grid", x, y)
            }
        }
    }
}

/// Illegal-state errors raised by the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// A round was started before the fleet was ready.
    FleetNotReady,
    /// Manual placement was reported complete with ships still missing.
    FleetIncomplete { placed_cells: usize },
}

impl core::fmt::Display for SessionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SessionError::FleetNotReady => write!(f, "Fleet is not ready"),
            SessionError::FleetIncomplete { placed_cells } => write!(
                f,
                "Fleet is incomplete: {} of {} ship cells placed",
                placed_cells,
                crate::core::config::TOTAL_SHIP_CELLS
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

#[cfg(feature = "std")]
impl std::error::Error for SessionError {}
