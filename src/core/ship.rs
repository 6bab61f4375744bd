//! Ship descriptors.

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Unit step along the ship's axis as `(dx, dy)`.
    fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

/// A placed ship: origin, length and orientation. Never mutated once placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    x: usize,
    y: usize,
    length: usize,
    orientation: Orientation,
}

impl Ship {
    pub const fn new(x: usize, y: usize, length: usize, orientation: Orientation) -> Self {
        Self {
            x,
            y,
            length,
            orientation,
        }
    }

    /// Origin of the ship (x, y).
    pub fn origin(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Covered cells, starting at the origin and following the ship's axis.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (dx, dy) = self.orientation.step();
        let (x, y) = (self.x, self.y);
        (0..self.length).map(move |i| (x + i * dx, y + i * dy))
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.cells().any(|c| c == (x, y))
    }
}
