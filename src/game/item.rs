use super::grid::{Grid, Position};
use crate::consts;
use rand::Rng;

/// A pickup lying on the grid: the food (apple) or the bonus coconut
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Item {
    pos: Position,
}

impl Item {
    pub(crate) fn at(pos: Position) -> Item {
        Item { pos }
    }

    /// Create an item at a uniformly random cell of `grid`
    pub(crate) fn random<R: Rng + ?Sized>(rng: &mut R, grid: Grid) -> Item {
        Item {
            pos: grid.random_cell(rng),
        }
    }

    pub(crate) fn pos(self) -> Position {
        self.pos
    }

    /// Move the item to a uniformly random cell of `grid`.  The new cell may
    /// be occupied by something else.
    pub(crate) fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, grid: Grid) {
        self.pos = grid.random_cell(rng);
    }

    /// Re-randomize the item's position for as long as `blocked` returns
    /// `true` for it, giving up after
    /// [`MAX_PLACEMENT_ATTEMPTS`][consts::MAX_PLACEMENT_ATTEMPTS] attempts.
    ///
    /// Returns `false` if the item is still on a blocked cell.
    pub(crate) fn relocate_while<R, F>(&mut self, rng: &mut R, grid: Grid, blocked: F) -> bool
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        for _ in 0..consts::MAX_PLACEMENT_ATTEMPTS {
            if !blocked(self.pos) {
                return true;
            }
            self.randomize(rng, grid);
        }
        let free = !blocked(self.pos);
        if !free {
            tracing::debug!(pos = %self.pos, "Gave up looking for a free cell");
        }
        free
    }
}
