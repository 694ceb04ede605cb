use rand::{
    distr::{Distribution, StandardUniform},
    Rng,
};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the unit vector `(dx, dy)` for moving one cell in this
    /// direction.  The y axis points down.
    pub(crate) const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub(crate) const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

// Lets `rng.random::<Direction>()` pick one of the four directions uniformly.
impl Distribution<Direction> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        match rng.random_range(0..4u8) {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            _ => Direction::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case(Direction::Up, (0, -1))]
    #[case(Direction::Down, (0, 1))]
    #[case(Direction::Left, (-1, 0))]
    #[case(Direction::Right, (1, 0))]
    fn test_delta(#[case] d: Direction, #[case] delta: (i32, i32)) {
        assert_eq!(d.delta(), delta);
    }

    #[rstest]
    #[case(Direction::Up)]
    #[case(Direction::Down)]
    #[case(Direction::Left)]
    #[case(Direction::Right)]
    fn opposite_cancels_delta(#[case] d: Direction) {
        let (dx, dy) = d.delta();
        let (ox, oy) = d.opposite().delta();
        assert_eq!((dx + ox, dy + oy), (0, 0));
        assert_eq!(d.opposite().opposite(), d);
    }

    #[test]
    fn random_directions_cover_all() {
        let mut rng = ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF);
        let seen = (0..200)
            .map(|_| rng.random::<Direction>())
            .collect::<HashSet<_>>();
        assert_eq!(seen.len(), 4);
    }
}
