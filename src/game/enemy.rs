use super::direction::Direction;
use super::grid::{Grid, Position};
use rand::Rng;

/// A wandering hazard.  Enemies drift one cell at a time every
/// `move_interval` ticks and occasionally change course.  Touching one with
/// the snake's head ends the game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Enemy {
    pos: Position,
    direction: Direction,
    /// Ticks elapsed since the enemy last moved
    timer: u32,
    move_interval: u32,
}

impl Enemy {
    pub(crate) fn new(pos: Position, direction: Direction, move_interval: u32) -> Enemy {
        Enemy {
            pos,
            direction,
            timer: 0,
            move_interval,
        }
    }

    /// Create an enemy at a random cell of `grid` heading in a random
    /// direction
    pub(crate) fn random<R: Rng + ?Sized>(rng: &mut R, grid: Grid, move_interval: u32) -> Enemy {
        let pos = grid.random_cell(rng);
        Enemy::new(pos, rng.random(), move_interval)
    }

    pub(crate) fn pos(&self) -> Position {
        self.pos
    }

    pub(crate) fn set_pos(&mut self, pos: Position) {
        self.pos = pos;
    }

    /// Advance the enemy's clock by one tick.  When the clock reaches the
    /// move interval, the enemy steps forwards if that keeps it on the grid
    /// and otherwise stays put and picks a new heading; either way it then
    /// turns at random with probability `turn_chance`.
    pub(crate) fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, grid: Grid, turn_chance: f64) {
        self.timer = self.timer.saturating_add(1);
        if self.timer < self.move_interval {
            return;
        }
        self.timer = 0;
        let next = self.pos.step(self.direction);
        if grid.contains(next) {
            self.pos = next;
        } else {
            self.direction = rng.random();
        }
        if rng.random::<f64>() < turn_chance {
            self.direction = rng.random();
        }
    }
}
