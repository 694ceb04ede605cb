use super::direction::Direction;
use super::grid::{Grid, Position};
use crate::consts;
use std::collections::VecDeque;

/// The player-controlled snake
///
/// The segments are stored head first, tail last.  There is always at least
/// one segment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    segments: VecDeque<Position>,

    /// The direction in which the snake will move on the next call to
    /// [`Snake::advance()`]
    direction: Direction,

    /// Change in length requested for the next move
    pending: PendingChange,
}

/// A length change that takes effect on the snake's next move
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum PendingChange {
    #[default]
    None,
    Grow,
    Shrink,
}

impl Snake {
    /// Create a snake from its segments (head first) facing in `direction`.
    /// Returns `None` if `segments` is empty.
    #[cfg(test)]
    pub(crate) fn new<I>(segments: I, direction: Direction) -> Option<Snake>
    where
        I: IntoIterator<Item = Position>,
    {
        let segments = segments.into_iter().collect::<VecDeque<_>>();
        (!segments.is_empty()).then_some(Snake {
            segments,
            direction,
            pending: PendingChange::None,
        })
    }

    /// Create a snake of [`INITIAL_SNAKE_LENGTH`][consts::INITIAL_SNAKE_LENGTH]
    /// segments with its head at `head`, facing right, and its body trailing
    /// off to the left
    pub(crate) fn starting_at(head: Position) -> Snake {
        let mut segments = VecDeque::with_capacity(consts::INITIAL_SNAKE_LENGTH);
        let mut pos = head;
        for _ in 0..consts::INITIAL_SNAKE_LENGTH {
            segments.push_back(pos);
            pos = pos.step(Direction::Left);
        }
        Snake {
            segments,
            direction: Direction::Right,
            pending: PendingChange::None,
        }
    }

    pub(crate) fn head(&self) -> Position {
        self.segments.front().copied().unwrap_or_default()
    }

    /// Return the segments, head first
    pub(crate) fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// Test whether any segment (head included) occupies `pos`
    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Change the direction used by the next move.  A turn to the exact
    /// opposite of the current direction is ignored.
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if direction != self.direction.opposite() {
            self.direction = direction;
        }
    }

    /// Request that the next move lengthen the snake by one segment
    pub(crate) fn grow(&mut self) {
        self.pending = match self.pending {
            PendingChange::Shrink => PendingChange::None,
            _ => PendingChange::Grow,
        };
    }

    /// Request that the next move shorten the snake by one segment.  Does
    /// nothing if the snake is only one segment long.
    pub(crate) fn shrink(&mut self) {
        if self.segments.len() <= 1 {
            return;
        }
        self.pending = match self.pending {
            PendingChange::Grow => PendingChange::None,
            _ => PendingChange::Shrink,
        };
    }

    /// Move the snake one cell in its current direction, applying any pending
    /// length change.  Bounds are not checked here; see
    /// [`Snake::check_collision()`].
    pub(crate) fn advance(&mut self) {
        let new_head = self.head().step(self.direction);
        match std::mem::take(&mut self.pending) {
            PendingChange::Grow => (),
            PendingChange::Shrink if self.segments.len() > 2 => {
                self.segments.truncate(self.segments.len() - 2);
            }
            PendingChange::Shrink => self.segments.clear(),
            PendingChange::None => {
                let _ = self.segments.pop_back();
            }
        }
        self.segments.push_front(new_head);
    }

    /// Returns `true` if the head is outside of `grid` or overlaps another
    /// segment
    pub(crate) fn check_collision(&self, grid: Grid) -> bool {
        let head = self.head();
        !grid.contains(head) || self.segments.iter().skip(1).any(|&p| p == head)
    }
}
