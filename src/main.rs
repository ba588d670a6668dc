//! Wordtrix: falling-letter word puzzle in the terminal.

mod app;
mod input;
mod theme;
mod ui;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};
use wordtrix::{Dictionary, Game, GameConfig, LetterSource, WeightedLetters};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = args.game_config();
    config.validate().context("invalid game options")?;
    let dictionary = Dictionary::load(&args.dictionary)
        .with_context(|| format!("failed to load dictionary {}", args.dictionary.display()))?;
    anyhow::ensure!(
        !dictionary.is_empty(),
        "dictionary {} contains no words",
        args.dictionary.display()
    );

    let letters: Box<dyn LetterSource + Send> = match args.seed {
        Some(seed) => Box::new(WeightedLetters::seeded(seed)),
        None => Box::new(WeightedLetters::from_entropy()),
    };
    let game = Game::new(config, Arc::new(dictionary), letters)?;
    let theme = theme::Theme::for_palette(args.palette);
    let mut app = App::new(game, theme);
    app.run()?;
    Ok(())
}

/// The terminal belongs to the game, so logs only go to a file, and only when asked.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Falling-letter word puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "wordtrix",
    version,
    about = "Falling-letter word puzzle in the terminal. Drop letter pairs, spell words across rows and columns to clear them.",
    long_about = "Wordtrix is a terminal word puzzle.\n\n\
        Pairs of letters fall onto the board. Once a pair lands, loose letters fall, and every \
        row and column is searched for dictionary words of three letters or more. Found words \
        are cleared and everything above them falls. The game ends when a new pair cannot spawn.\n\n\
        CONTROLS:\n  Left/Right a/d  Move    Down s   Drop      Up w  Flip letters\n  \
        k / j           Rotate  Space    Set in place as an obstacle\n  \
        p Pause   r Restart   q / Esc Quit"
)]
pub struct Args {
    /// Word list: one word per line, letters a-z only.
    #[arg(short, long, default_value = "dictionary.txt", value_name = "FILE")]
    pub dictionary: PathBuf,

    /// Board width in cells.
    #[arg(long, default_value = "10", value_name = "COLS")]
    pub width: usize,

    /// Board height in cells.
    #[arg(long, default_value = "10", value_name = "ROWS")]
    pub height: usize,

    /// Obstacles scattered over the bottom rows at the start.
    #[arg(long, default_value = "10", value_name = "N")]
    pub obstacles: usize,

    /// How many bottom rows the obstacles may occupy.
    #[arg(long, default_value = "3", value_name = "ROWS")]
    pub obstacle_rows: usize,

    /// Seed for letters and obstacles, for a repeatable game.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Time between piece falls in ms.
    #[arg(long, default_value = "1500", value_name = "MS")]
    pub fall_ms: u64,

    /// Time between gravity and scan steps once a piece has landed, in ms.
    #[arg(long, default_value = "250", value_name = "MS")]
    pub settle_ms: u64,

    /// How long found words stay on screen before clearing, in ms.
    #[arg(long, default_value = "300", value_name = "MS")]
    pub clear_ms: u64,

    /// Colour palette.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Write logs to this file (RUST_LOG filters them).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            playing_interval: Duration::from_millis(self.fall_ms),
            settling_interval: Duration::from_millis(self.settle_ms),
            scanning_interval: Duration::from_millis(self.settle_ms),
            clearing_interval: Duration::from_millis(self.clear_ms),
            obstacles: self.obstacles,
            obstacle_rows: self.obstacle_rows,
            seed: self.seed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,
}
