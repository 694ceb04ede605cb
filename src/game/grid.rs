use super::direction::Direction;
use rand::Rng;
use std::fmt;

/// A cell coordinate on the playing field.
///
/// Coordinates are signed so that a snake head which has just crossed the
/// top or left edge can still be represented (and detected as out of
/// bounds).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Position {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Position {
    pub(crate) const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    /// Return the cell one step away from `self` in `direction`
    pub(crate) fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The dimensions of the playing field, in cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    /// Number of cells along the x axis
    pub(crate) width: u16,

    /// Number of cells along the y axis
    pub(crate) height: u16,
}

impl Grid {
    pub(crate) const fn new(width: u16, height: u16) -> Grid {
        Grid { width, height }
    }

    /// Test whether `pos` lies within `[0, width) × [0, height)`
    pub(crate) fn contains(self, pos: Position) -> bool {
        (0..i32::from(self.width)).contains(&pos.x) && (0..i32::from(self.height)).contains(&pos.y)
    }

    /// Return a cell chosen uniformly at random from the grid.
    ///
    /// An empty grid always yields the origin.
    pub(crate) fn random_cell<R: Rng + ?Sized>(self, rng: &mut R) -> Position {
        if self.width == 0 || self.height == 0 {
            return Position::default();
        }
        Position {
            x: rng.random_range(0..i32::from(self.width)),
            y: rng.random_range(0..i32::from(self.height)),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}
