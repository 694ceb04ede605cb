use crate::consts;
use crate::game::Grid;
use crate::highscores::HighScores;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
pub(crate) struct Config {
    /// Gameplay settings
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("coconut-snake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the file in which high scores should be stored: the file given
    /// in the configuration or, if that is not set, a file in the local data
    /// directory.  Returns `None` if scores should not be saved or no path
    /// could be determined.
    pub(crate) fn high_scores_file(&self) -> Option<PathBuf> {
        if !self.files.save_high_scores {
            return None;
        }
        self.files.high_scores_file.clone().or_else(|| {
            dirs::data_local_dir().map(|p| p.join("coconut-snake").join("high-scores.json"))
        })
    }

    /// Load the high score list from the configured file, falling back to an
    /// in-memory list when there is no file to use
    pub(crate) fn load_high_scores(&self) -> HighScores {
        match self.high_scores_file() {
            Some(path) => HighScores::load_or_default(&path),
            None => HighScores::default(),
        }
    }
}

/// Gameplay settings
#[derive(Clone, Copy, Deserialize, Debug, PartialEq)]
#[serde(try_from = "RawGameConfig")]
pub(crate) struct GameConfig {
    /// Size of the playing field, in cells
    pub(crate) grid: Grid,

    /// Tick interval, in milliseconds, at the start of a game
    pub(crate) snake_speed: u32,

    /// Shortest tick interval, in milliseconds
    pub(crate) min_snake_speed: u32,

    /// Longest tick interval, in milliseconds
    pub(crate) max_snake_speed: u32,

    /// Milliseconds taken off the tick interval per coconut eaten
    pub(crate) speed_increase: u32,

    /// Probability of a coconut appearing when the food is eaten
    pub(crate) coconut_spawn_chance: f64,

    /// Number of enemies placed at the start of a game
    pub(crate) enemies: usize,

    /// Number of ticks between enemy moves
    pub(crate) enemy_move_interval: u32,

    /// Probability of an enemy turning when it moves
    pub(crate) enemy_turn_chance: f64,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            grid: Grid::new(consts::GRID_WIDTH, consts::GRID_HEIGHT),
            snake_speed: consts::SNAKE_SPEED,
            min_snake_speed: consts::MIN_SNAKE_SPEED,
            max_snake_speed: consts::MAX_SNAKE_SPEED,
            speed_increase: consts::SPEED_INCREASE,
            coconut_spawn_chance: consts::COCONUT_SPAWN_CHANCE,
            enemies: consts::ENEMY_COUNT,
            enemy_move_interval: consts::ENEMY_MOVE_INTERVAL,
            enemy_turn_chance: consts::ENEMY_TURN_CHANCE,
        }
    }
}

#[derive(Clone, Deserialize, Debug, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawGameConfig {
    width: u16,
    height: u16,
    snake_speed: u32,
    min_snake_speed: u32,
    max_snake_speed: u32,
    speed_increase: u32,
    coconut_spawn_chance: f64,
    enemies: usize,
    enemy_move_interval: u32,
    enemy_turn_chance: f64,
}

impl Default for RawGameConfig {
    fn default() -> RawGameConfig {
        let dflt = GameConfig::default();
        RawGameConfig {
            width: dflt.grid.width,
            height: dflt.grid.height,
            snake_speed: dflt.snake_speed,
            min_snake_speed: dflt.min_snake_speed,
            max_snake_speed: dflt.max_snake_speed,
            speed_increase: dflt.speed_increase,
            coconut_spawn_chance: dflt.coconut_spawn_chance,
            enemies: dflt.enemies,
            enemy_move_interval: dflt.enemy_move_interval,
            enemy_turn_chance: dflt.enemy_turn_chance,
        }
    }
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameConfigError;

    fn try_from(value: RawGameConfig) -> Result<GameConfig, GameConfigError> {
        if usize::from(value.width) <= consts::INITIAL_SNAKE_LENGTH || value.height < 2 {
            return Err(GameConfigError::GridTooSmall {
                width: value.width,
                height: value.height,
            });
        }
        if value.width > consts::MAX_GRID_WIDTH || value.height > consts::MAX_GRID_HEIGHT {
            return Err(GameConfigError::GridTooLarge {
                width: value.width,
                height: value.height,
            });
        }
        if value.min_snake_speed == 0
            || value.min_snake_speed > value.max_snake_speed
            || !(value.min_snake_speed..=value.max_snake_speed).contains(&value.snake_speed)
        {
            return Err(GameConfigError::SpeedRange {
                speed: value.snake_speed,
                min: value.min_snake_speed,
                max: value.max_snake_speed,
            });
        }
        for (name, p) in [
            ("coconut-spawn-chance", value.coconut_spawn_chance),
            ("enemy-turn-chance", value.enemy_turn_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GameConfigError::Probability { name, value: p });
            }
        }
        if value.enemy_move_interval == 0 {
            return Err(GameConfigError::ZeroMoveInterval);
        }
        Ok(GameConfig {
            grid: Grid::new(value.width, value.height),
            snake_speed: value.snake_speed,
            min_snake_speed: value.min_snake_speed,
            max_snake_speed: value.max_snake_speed,
            speed_increase: value.speed_increase,
            coconut_spawn_chance: value.coconut_spawn_chance,
            enemies: value.enemies,
            enemy_move_interval: value.enemy_move_interval,
            enemy_turn_chance: value.enemy_turn_chance,
        })
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub(crate) enum GameConfigError {
    #[error("grid size {width}×{height} is too small for the snake")]
    GridTooSmall { width: u16, height: u16 },
    #[error(
        "grid size {width}×{height} does not fit on screen (at most {}×{})",
        consts::MAX_GRID_WIDTH,
        consts::MAX_GRID_HEIGHT
    )]
    GridTooLarge { width: u16, height: u16 },
    #[error("snake speed {speed} must lie within a nonzero range {min}..={max}")]
    SpeedRange { speed: u32, min: u32, max: u32 },
    #[error("{name} must be between 0 and 1, got {value}")]
    Probability { name: &'static str, value: f64 },
    #[error("enemy-move-interval must be at least 1")]
    ZeroMoveInterval,
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which high scores should be stored
    high_scores_file: Option<PathBuf>,

    /// Whether to load & save high scores in a file
    save_high_scores: bool,
}

impl FileConfig {
    pub(crate) fn set_high_scores_file(&mut self, path: PathBuf) {
        self.high_scores_file = Some(path);
        self.save_high_scores = true;
    }
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_scores_file: None,
            save_high_scores: true,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
