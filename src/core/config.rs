/// Width and height of the square grid.
pub const GRID_SIZE: usize = 10;

/// Ship lengths of the standard fleet, in placement order.
pub const FLEET_TEMPLATE: [usize; 10] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// Total number of ship segments used in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 4 + 3 + 3 + 2 + 2 + 2 + 1 + 1 + 1 + 1;

/// Longest ship the fleet template contains.
pub const MAX_SHIP_LEN: usize = 4;

/// Well-known TCP port of a session.
pub const DEFAULT_PORT: u16 = 5000;

/// Random placement tries per ship before the whole fleet is laid out again.
pub const PLACEMENT_ATTEMPTS: usize = 10_000;
