//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Default number of cells across the playing field
pub(crate) const GRID_WIDTH: u16 = 40;

/// Default number of cells down the playing field
pub(crate) const GRID_HEIGHT: u16 = 19;

/// Widest playing field that fits in the display area inside its border
pub(crate) const MAX_GRID_WIDTH: u16 = DISPLAY_SIZE.width - 2;

/// Tallest playing field that fits in the display area below the status bar
/// and inside its border
pub(crate) const MAX_GRID_HEIGHT: u16 = DISPLAY_SIZE.height - 3;

/// Length of the snake at the start of a game
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// Where the snake's head is placed at the start of a game, if the grid is
/// large enough
pub(crate) const SNAKE_START: (i32, i32) = (5, 10);

/// Default time between ticks, in milliseconds
pub(crate) const SNAKE_SPEED: u32 = 150;

/// Default shortest time between ticks, in milliseconds
pub(crate) const MIN_SNAKE_SPEED: u32 = 80;

/// Default longest time between ticks, in milliseconds
pub(crate) const MAX_SNAKE_SPEED: u32 = 300;

/// Default number of milliseconds taken off the tick interval per coconut
pub(crate) const SPEED_INCREASE: u32 = 20;

/// Default probability of a coconut appearing when the food is eaten
pub(crate) const COCONUT_SPAWN_CHANCE: f64 = 0.15;

/// Default number of enemies on the field
pub(crate) const ENEMY_COUNT: usize = 3;

/// Default number of ticks between enemy moves
pub(crate) const ENEMY_MOVE_INTERVAL: u32 = 60;

/// Default probability of an enemy changing direction when it moves
pub(crate) const ENEMY_TURN_CHANCE: f64 = 0.3;

/// Maximum number of attempts made to find an unoccupied cell for an item
pub(crate) const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Number of entries kept in the high score list
pub(crate) const MAX_HIGH_SCORES: usize = 10;

/// Points awarded for eating the food
pub(crate) const FOOD_POINTS: u32 = 1;

/// Points awarded for eating a coconut
pub(crate) const COCONUT_POINTS: u32 = 2;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the coconut
pub(crate) const COCONUT_SYMBOL: char = '◍';

/// Glyph for enemies
pub(crate) const ENEMY_SYMBOL: char = '¤';

/// Glyph for the snake's head when it's collided with something
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for the coconut
pub(crate) const COCONUT_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for enemies
pub(crate) const ENEMY_STYLE: Style = Style::new()
    .fg(Color::Magenta)
    .add_modifier(Modifier::BOLD);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the high score line on the menu
pub(crate) const HIGH_SCORE_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the "GAME OVER" banner
pub(crate) const GAME_OVER_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::BOLD);
