mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscores;
mod ui;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::game::Session;
use anyhow::Context;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable used to set the log filter
const LOG_ENV_VAR: &str = "COCONUT_SNAKE_LOG";

#[derive(Clone, Debug, Eq, PartialEq)]
enum CliCommand {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    high_scores: Option<PathBuf>,
    seed: Option<u64>,
}

impl CliCommand {
    fn from_parser(mut parser: Parser) -> Result<CliCommand, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("high-scores") => {
                    args.high_scores = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Arg::Short('h') | Arg::Long("help") => return Ok(CliCommand::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(CliCommand::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(CliCommand::Run(args))
    }

    fn run(self) -> ExitCode {
        match self {
            CliCommand::Run(args) => exit_status(run(args)),
            CliCommand::Help => {
                println!("Usage: coconut-snake [--config FILE] [--high-scores FILE] [--seed N]");
                println!();
                println!("Play snake in your terminal");
                println!();
                println!("Options:");
                println!("  -c, --config FILE       Read configuration from FILE");
                println!("      --high-scores FILE  Store high scores in FILE");
                println!("      --seed N            Seed the random number generator with N");
                println!("  -h, --help              Display this help message and exit");
                println!("  -V, --version           Show the program version and exit");
                ExitCode::SUCCESS
            }
            CliCommand::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                ExitCode::SUCCESS
            }
        }
    }
}

fn main() -> ExitCode {
    match CliCommand::from_parser(Parser::from_env()) {
        Ok(cmd) => cmd.run(),
        Err(e) => {
            eprintln!("coconut-snake: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> anyhow::Result<()> {
    init_logging();
    let mut config = match args.config {
        Some(path) => Config::load(&path, false)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) => Config::load(&path, true).with_context(|| {
                format!("failed to load configuration from {}", path.display())
            })?,
            Err(e) => {
                tracing::warn!(error = %e, "Using default configuration");
                Config::default()
            }
        },
    };
    if let Some(path) = args.high_scores {
        config.files.set_high_scores_file(path);
    }
    let high_scores = config.load_high_scores();
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    tracing::debug!(?config, seed = args.seed, "Configuration loaded");
    let session = Session::new(config.game, high_scores, rng);
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableFocusChange)
        .and_then(|()| App::new(session).run(terminal));
    let _ = execute!(io::stdout(), DisableFocusChange);
    ratatui::restore();
    r.context("terminal I/O failed")
}

/// Send log events to a file in the local data directory.  Logging is
/// silently disabled if the file cannot be opened.
fn init_logging() {
    let Some(path) = dirs::data_local_dir().map(|p| p.join("coconut-snake").join("coconut-snake.log"))
    else {
        return;
    };
    let file = path
        .parent()
        .map_or(Ok(()), fs_err::create_dir_all)
        .and_then(|()| {
            fs_err::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
        });
    let Ok(file) = file else {
        return;
    };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
}

fn exit_status(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = ?e, "Fatal error");
            eprintln!("coconut-snake: {e:?}");
            ExitCode::from(2)
        }
    }
}
