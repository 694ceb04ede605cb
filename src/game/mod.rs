mod direction;
mod enemy;
mod grid;
mod item;
mod snake;
pub(crate) use self::direction::Direction;
pub(crate) use self::enemy::Enemy;
pub(crate) use self::grid::{Grid, Position};
pub(crate) use self::item::Item;
pub(crate) use self::snake::Snake;
use crate::command::Command;
use crate::config::GameConfig;
use crate::consts;
use crate::highscores::HighScores;
use rand::Rng;
use std::time::Duration;

/// The phase the game is in
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SessionState {
    /// Title screen; nothing moves
    Menu,
    /// The snake is moving and ticks are being delivered
    Playing,
    Paused,
    /// The snake has crashed.  The final score has been recorded.
    GameOver,
}

/// A game of snake: the playing field, everything on it, and the rules that
/// move it forwards one tick at a time.
///
/// The session never sleeps or reads input itself.  The driver calls
/// [`Session::update()`] once per tick while [`Session::state()`] is
/// [`SessionState::Playing`], delivers player input through
/// [`Session::handle_command()`], and polls
/// [`Session::take_interval_change()`] to learn when the tick rate changes.
#[derive(Clone, Debug)]
pub(crate) struct Session<R = rand::rngs::StdRng> {
    rng: R,
    config: GameConfig,
    high_scores: HighScores,
    state: SessionState,
    score: u32,
    /// Current tick interval in milliseconds
    speed: u32,
    snake: Snake,
    food: Item,
    coconut: Option<Item>,
    enemies: Vec<Enemy>,
    /// Whether the score of the last finished game topped the high score list
    new_high_score: bool,
    /// Set whenever `speed` changes, cleared by `take_interval_change()`
    interval_changed: bool,
}

impl<R: Rng> Session<R> {
    /// Create a session sitting at the main menu
    pub(crate) fn new(config: GameConfig, high_scores: HighScores, mut rng: R) -> Session<R> {
        let food = Item::random(&mut rng, config.grid);
        let mut session = Session {
            rng,
            config,
            high_scores,
            state: SessionState::Menu,
            score: 0,
            speed: config.snake_speed,
            snake: Snake::starting_at(snake_start(config.grid)),
            food,
            coconut: None,
            enemies: Vec::new(),
            new_high_score: false,
            interval_changed: false,
        };
        session.populate();
        session
    }

    /// Apply a player command.  Commands that make no sense in the current
    /// state are ignored.  [`Command::Quit`] is left for the driver to act on.
    pub(crate) fn handle_command(&mut self, cmd: Command) {
        match (self.state, cmd) {
            (SessionState::Playing, Command::MoveUp) => self.snake.set_direction(Direction::Up),
            (SessionState::Playing, Command::MoveDown) => {
                self.snake.set_direction(Direction::Down);
            }
            (SessionState::Playing, Command::MoveLeft) => {
                self.snake.set_direction(Direction::Left);
            }
            (SessionState::Playing, Command::MoveRight) => {
                self.snake.set_direction(Direction::Right);
            }
            (SessionState::Menu, Command::Start) | (SessionState::GameOver, Command::Restart) => {
                self.start();
            }
            (SessionState::Playing, Command::TogglePause) => {
                tracing::info!(score = self.score, "Game paused");
                self.state = SessionState::Paused;
            }
            (SessionState::Paused, Command::TogglePause) => {
                tracing::info!("Game resumed");
                self.state = SessionState::Playing;
            }
            (SessionState::Paused | SessionState::GameOver, Command::ToMenu) => {
                tracing::info!("Returning to main menu");
                self.state = SessionState::Menu;
            }
            _ => (),
        }
    }

    /// Begin a new game: fresh snake, food, and enemies, no coconut, zero
    /// score, and the configured starting speed
    pub(crate) fn start(&mut self) {
        self.snake = Snake::starting_at(snake_start(self.config.grid));
        self.coconut = None;
        self.score = 0;
        self.new_high_score = false;
        self.speed = self.config.snake_speed;
        self.interval_changed = true;
        self.populate();
        self.state = SessionState::Playing;
        tracing::info!(grid = %self.config.grid, speed = self.speed, "Starting new game");
    }

    /// Advance the game by one tick.  Does nothing unless the game is being
    /// played.
    pub(crate) fn update(&mut self) {
        if self.state != SessionState::Playing {
            return;
        }
        let grid = self.config.grid;
        self.snake.advance();
        for enemy in &mut self.enemies {
            enemy.update(&mut self.rng, grid, self.config.enemy_turn_chance);
        }
        let head = self.snake.head();
        if self.food.pos() == head {
            self.eat_food();
        }
        if self.coconut.is_some_and(|c| c.pos() == head) {
            self.eat_coconut();
        }
        if self.enemies.iter().any(|e| e.pos() == head) {
            self.game_over("enemy");
        } else if self.snake.check_collision(grid) {
            self.game_over(if grid.contains(head) { "self" } else { "wall" });
        }
    }

    /// Shorten the tick interval by the configured step without going below
    /// the configured minimum
    pub(crate) fn increase_speed(&mut self) {
        let speed = self
            .speed
            .saturating_sub(self.config.speed_increase)
            .max(self.config.min_snake_speed);
        if speed != self.speed {
            tracing::debug!(from = self.speed, to = speed, "Speeding up");
            self.speed = speed;
            self.interval_changed = true;
        }
    }

    fn eat_food(&mut self) {
        let grid = self.config.grid;
        self.food.randomize(&mut self.rng, grid);
        self.snake.grow();
        self.score = self.score.saturating_add(consts::FOOD_POINTS);
        let roll = self.rng.random::<f64>();
        if roll < self.config.coconut_spawn_chance && self.coconut.is_none() {
            let mut coconut = Item::random(&mut self.rng, grid);
            let snake = &self.snake;
            coconut.relocate_while(&mut self.rng, grid, |p| snake.occupies(p));
            self.food
                .relocate_while(&mut self.rng, grid, |p| p == coconut.pos());
            tracing::debug!(pos = %coconut.pos(), "Coconut appeared");
            self.coconut = Some(coconut);
        }
        let snake = &self.snake;
        let coconut = self.coconut.map(Item::pos);
        self.food.relocate_while(&mut self.rng, grid, |p| {
            snake.occupies(p) || Some(p) == coconut
        });
    }

    fn eat_coconut(&mut self) {
        self.snake.shrink();
        self.increase_speed();
        self.coconut = None;
        self.score = self.score.saturating_add(consts::COCONUT_POINTS);
    }

    fn game_over(&mut self, cause: &str) {
        self.state = SessionState::GameOver;
        self.new_high_score = self.high_scores.add_score(self.score);
        tracing::info!(
            score = self.score,
            length = self.snake.len(),
            cause,
            new_high_score = self.new_high_score,
            "Game over"
        );
    }

    /// Scatter the food and enemies across the grid, keeping them off the
    /// snake where possible
    fn populate(&mut self) {
        let grid = self.config.grid;
        let snake = &self.snake;
        self.food.randomize(&mut self.rng, grid);
        self.food
            .relocate_while(&mut self.rng, grid, |p| snake.occupies(p));
        let mut enemies = Vec::with_capacity(self.config.enemies);
        for _ in 0..self.config.enemies {
            let mut enemy = Enemy::random(&mut self.rng, grid, self.config.enemy_move_interval);
            let mut spot = Item::at(enemy.pos());
            spot.relocate_while(&mut self.rng, grid, |p| snake.occupies(p));
            enemy.set_pos(spot.pos());
            enemies.push(enemy);
        }
        self.enemies = enemies;
    }
}

impl<R> Session<R> {
    pub(crate) fn state(&self) -> SessionState {
        self.state
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    /// Current tick interval in milliseconds
    pub(crate) fn speed(&self) -> u32 {
        self.speed
    }

    pub(crate) fn tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.speed))
    }

    /// If the tick interval has changed since the last call, return the new
    /// interval
    pub(crate) fn take_interval_change(&mut self) -> Option<Duration> {
        std::mem::take(&mut self.interval_changed).then(|| self.tick_interval())
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.high_scores.high_score()
    }

    /// Whether the game that just ended set a new high score
    pub(crate) fn new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub(crate) fn grid(&self) -> Grid {
        self.config.grid
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Position {
        self.food.pos()
    }

    pub(crate) fn coconut(&self) -> Option<Position> {
        self.coconut.map(Item::pos)
    }

    pub(crate) fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }
}

/// Where to put the snake's head at the start of a game on `grid`.  The head
/// always has a free cell to its right and room for the body to its left.
fn snake_start(grid: Grid) -> Position {
    let (x, y) = consts::SNAKE_START;
    let tail_room = i32::try_from(consts::INITIAL_SNAKE_LENGTH - 1).unwrap_or(i32::MAX);
    Position::new(
        x.min(i32::from(grid.width) - 2).max(tail_room),
        y.min(i32::from(grid.height) - 1).max(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// A "random" number generator that only ever produces one value.  With
    /// 0, every roll is 0.0; with `u64::MAX`, every roll is just below 1.0.
    #[derive(Clone, Debug)]
    struct ConstRng(u64);

    impl RngCore for ConstRng {
        fn next_u32(&mut self) -> u32 {
            let [a, b, c, d, ..] = self.0.to_be_bytes();
            u32::from_be_bytes([a, b, c, d])
        }

        fn next_u64(&mut self) -> u64 {
            self.0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.0.to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }

    /// Settings with nothing random going on during play
    fn quiet_config() -> GameConfig {
        GameConfig {
            coconut_spawn_chance: 0.0,
            enemies: 0,
            ..GameConfig::default()
        }
    }

    fn playing<R: Rng>(config: GameConfig, high_scores: HighScores, rng: R) -> Session<R> {
        let mut game = Session::new(config, high_scores, rng);
        game.handle_command(Command::Start);
        assert_eq!(game.state(), SessionState::Playing);
        game
    }

    fn seeded() -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(RNG_SEED)
    }

    fn snake(segments: &[(i32, i32)], direction: Direction) -> Snake {
        Snake::new(
            segments.iter().map(|&(x, y)| Position::new(x, y)),
            direction,
        )
        .unwrap()
    }

    #[test]
    fn new_session() {
        let mut game = Session::new(GameConfig::default(), HighScores::default(), seeded());
        assert_eq!(game.state(), SessionState::Menu);
        assert_eq!(game.score(), 0);
        assert_eq!(game.speed(), consts::SNAKE_SPEED);
        assert_eq!(game.coconut(), None);
        assert_eq!(game.enemies().len(), consts::ENEMY_COUNT);
        assert!(game.grid().contains(game.food()));
        assert!(!game.snake().occupies(game.food()));
        for enemy in game.enemies() {
            assert!(!game.snake().occupies(enemy.pos()));
        }
        assert_eq!(game.take_interval_change(), None);
        let before = game.snake().clone();
        game.update();
        assert_eq!(game.snake(), &before, "update() moved the snake in the menu");
    }

    #[test]
    fn start_arms_timer() {
        let mut game = playing(GameConfig::default(), HighScores::default(), seeded());
        assert_eq!(
            game.take_interval_change(),
            Some(Duration::from_millis(150))
        );
        assert_eq!(game.take_interval_change(), None);
        let segments = game.snake().segments().iter().copied().collect::<Vec<_>>();
        assert_eq!(
            segments,
            [
                Position::new(5, 10),
                Position::new(4, 10),
                Position::new(3, 10)
            ]
        );
    }

    #[test]
    fn eat_food() {
        let mut game = playing(quiet_config(), HighScores::default(), seeded());
        game.food = Item::at(Position::new(6, 10));
        game.update();
        assert_eq!(game.snake().head(), Position::new(6, 10));
        assert_eq!(game.score(), 1);
        assert_ne!(game.food(), Position::new(6, 10));
        assert!(!game.snake().occupies(game.food()));
        assert_eq!(game.snake().len(), 3);
        game.food = Item::at(Position::new(0, 0));
        game.update();
        assert_eq!(game.snake().len(), 4);
        assert_eq!(game.snake().head(), Position::new(7, 10));
        assert_eq!(game.score(), 1);
        assert_eq!(game.state(), SessionState::Playing);
    }

    #[test]
    fn coconut_spawns_on_low_roll() {
        let config = GameConfig {
            coconut_spawn_chance: 0.15,
            ..GameConfig::default()
        };
        for _ in 0..50 {
            let mut game = playing(config, HighScores::default(), ConstRng(0));
            game.food = Item::at(Position::new(6, 10));
            assert_eq!(game.coconut(), None);
            game.update();
            assert_eq!(game.score(), 1);
            let coconut = game.coconut().expect("coconut should have spawned");
            assert!(!game.snake().occupies(coconut));
        }
    }

    #[test]
    fn coconut_never_spawns_on_high_roll() {
        let config = GameConfig {
            coconut_spawn_chance: 0.15,
            ..GameConfig::default()
        };
        for _ in 0..50 {
            let mut game = playing(config, HighScores::default(), ConstRng(u64::MAX));
            game.food = Item::at(Position::new(6, 10));
            game.update();
            assert_eq!(game.score(), 1);
            assert_eq!(game.coconut(), None);
        }
    }

    #[test]
    fn only_one_coconut() {
        let config = GameConfig {
            coconut_spawn_chance: 1.0,
            ..quiet_config()
        };
        let mut game = playing(config, HighScores::default(), seeded());
        game.coconut = Some(Item::at(Position::new(0, 0)));
        game.food = Item::at(Position::new(6, 10));
        game.update();
        assert_eq!(game.coconut(), Some(Position::new(0, 0)));
        assert_ne!(game.food(), Position::new(0, 0));
    }

    #[test]
    fn eat_coconut() {
        let mut game = playing(quiet_config(), HighScores::default(), seeded());
        let _ = game.take_interval_change();
        game.food = Item::at(Position::new(0, 0));
        game.coconut = Some(Item::at(Position::new(6, 10)));
        game.update();
        assert_eq!(game.coconut(), None);
        assert_eq!(game.score(), 2);
        assert_eq!(game.speed(), 130);
        assert_eq!(
            game.take_interval_change(),
            Some(Duration::from_millis(130))
        );
        assert_eq!(game.snake().len(), 3);
        game.update();
        assert_eq!(game.snake().len(), 2);
        assert_eq!(game.state(), SessionState::Playing);
    }

    #[test]
    fn speed_floor() {
        let mut game = playing(GameConfig::default(), HighScores::default(), seeded());
        let mut previous = game.speed();
        for _ in 0..20 {
            game.increase_speed();
            assert!(game.speed() <= previous);
            assert!(game.speed() >= consts::MIN_SNAKE_SPEED);
            previous = game.speed();
        }
        assert_eq!(game.speed(), consts::MIN_SNAKE_SPEED);
        let _ = game.take_interval_change();
        game.increase_speed();
        assert_eq!(game.speed(), consts::MIN_SNAKE_SPEED);
        assert_eq!(game.take_interval_change(), None);
    }

    #[test]
    fn run_into_wall() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("high-scores.json");
        fs_err::write(&path, "[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]").unwrap();
        let high_scores = HighScores::load_or_default(&path);
        let mut game = playing(quiet_config(), high_scores, seeded());
        game.snake = snake(&[(39, 5), (38, 5), (37, 5)], Direction::Right);
        game.food = Item::at(Position::new(0, 0));
        game.score = 7;
        game.update();
        assert_eq!(game.snake().head(), Position::new(40, 5));
        assert!(game.snake().check_collision(game.grid()));
        assert_eq!(game.state(), SessionState::GameOver);
        assert!(!game.new_high_score());
        assert_eq!(
            game.high_scores.scores(),
            [11, 10, 9, 8, 7, 7, 6, 5, 4, 3]
        );
        let saved = HighScores::load(&path).unwrap();
        assert_eq!(saved.scores(), game.high_scores.scores());
    }

    #[test]
    fn new_high_score() {
        let mut game = playing(quiet_config(), HighScores::in_memory([5]), seeded());
        game.snake = snake(&[(0, 3), (1, 3)], Direction::Left);
        game.score = 6;
        game.update();
        assert_eq!(game.state(), SessionState::GameOver);
        assert!(game.new_high_score());
        assert_eq!(game.high_score(), 6);
    }

    #[test]
    fn run_into_self() {
        let mut game = playing(quiet_config(), HighScores::default(), seeded());
        game.snake = snake(&[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)], Direction::Left);
        game.handle_command(Command::MoveDown);
        game.update();
        assert_eq!(game.state(), SessionState::GameOver);
    }

    #[test]
    fn run_into_enemy() {
        let mut game = playing(quiet_config(), HighScores::default(), seeded());
        game.food = Item::at(Position::new(0, 0));
        game.enemies = vec![
            Enemy::new(Position::new(6, 10), Direction::Up, 1000),
            Enemy::new(Position::new(6, 10), Direction::Down, 1000),
        ];
        game.update();
        assert_eq!(game.state(), SessionState::GameOver);
        // The score is recorded once, not once per enemy.
        assert_eq!(game.high_scores.scores(), [0, 0]);
    }

    #[test]
    fn game_over_is_final() {
        let mut game = playing(quiet_config(), HighScores::default(), seeded());
        game.snake = snake(&[(0, 3)], Direction::Left);
        game.update();
        assert_eq!(game.state(), SessionState::GameOver);
        let snake_at_death = game.snake().clone();
        game.update();
        game.handle_command(Command::MoveUp);
        assert_eq!(game.snake(), &snake_at_death);
        assert_eq!(game.high_scores.scores(), [0, 0]);
    }

    #[test]
    fn reverse_is_ignored() {
        let mut game = playing(quiet_config(), HighScores::default(), seeded());
        game.handle_command(Command::MoveLeft);
        game.update();
        assert_eq!(game.snake().head(), Position::new(6, 10));
        assert_eq!(game.state(), SessionState::Playing);
    }

    #[test]
    fn pause_and_resume() {
        let mut game = playing(quiet_config(), HighScores::default(), seeded());
        game.handle_command(Command::TogglePause);
        assert_eq!(game.state(), SessionState::Paused);
        game.handle_command(Command::MoveUp);
        game.update();
        assert_eq!(game.snake().head(), Position::new(5, 10));
        assert_eq!(game.snake().direction(), Direction::Right);
        game.handle_command(Command::TogglePause);
        assert_eq!(game.state(), SessionState::Playing);
        game.update();
        assert_eq!(game.snake().head(), Position::new(6, 10));
    }

    #[test]
    fn menu_transitions() {
        let mut game = playing(quiet_config(), HighScores::default(), seeded());
        game.handle_command(Command::ToMenu);
        assert_eq!(game.state(), SessionState::Playing);
        game.handle_command(Command::TogglePause);
        game.handle_command(Command::ToMenu);
        assert_eq!(game.state(), SessionState::Menu);
        game.handle_command(Command::Restart);
        assert_eq!(game.state(), SessionState::Menu);
        game.handle_command(Command::Start);
        assert_eq!(game.state(), SessionState::Playing);
        game.snake = snake(&[(0, 3)], Direction::Left);
        game.update();
        assert_eq!(game.state(), SessionState::GameOver);
        game.handle_command(Command::Start);
        assert_eq!(game.state(), SessionState::GameOver);
        game.handle_command(Command::ToMenu);
        assert_eq!(game.state(), SessionState::Menu);
    }

    #[test]
    fn restart_resets() {
        let mut game = playing(GameConfig::default(), HighScores::default(), seeded());
        game.coconut = Some(Item::at(Position::new(1, 1)));
        game.score = 12;
        game.increase_speed();
        game.increase_speed();
        game.snake = snake(&[(0, 3)], Direction::Left);
        game.update();
        assert_eq!(game.state(), SessionState::GameOver);
        let _ = game.take_interval_change();
        game.handle_command(Command::Restart);
        assert_eq!(game.state(), SessionState::Playing);
        assert_eq!(game.coconut(), None);
        assert_eq!(game.score(), 0);
        assert_eq!(game.speed(), consts::SNAKE_SPEED);
        assert!(!game.new_high_score());
        assert_eq!(game.snake().head(), Position::new(5, 10));
        assert_eq!(game.snake().len(), consts::INITIAL_SNAKE_LENGTH);
        assert_eq!(game.enemies().len(), consts::ENEMY_COUNT);
        assert_eq!(
            game.take_interval_change(),
            Some(Duration::from_millis(150))
        );
    }

    #[test]
    fn snake_start_small_grid() {
        assert_eq!(snake_start(Grid::new(40, 19)), Position::new(5, 10));
        assert_eq!(snake_start(Grid::new(4, 2)), Position::new(2, 1));
        assert_eq!(snake_start(Grid::new(6, 19)), Position::new(4, 10));
    }

    #[test]
    fn smallest_grid_is_playable() {
        let config = GameConfig {
            grid: Grid::new(4, 2),
            ..quiet_config()
        };
        let mut game = playing(
            config,
            HighScores::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        assert_eq!(
            game.snake().segments().iter().copied().collect::<Vec<_>>(),
            [Position::new(2, 1), Position::new(1, 1), Position::new(0, 1)]
        );
        game.update();
        assert_eq!(game.state(), SessionState::Playing);
        assert_eq!(game.snake().head(), Position::new(3, 1));
    }
}
