//! Wordtrix: a falling-letter word puzzle engine.
//!
//! Pairs of lettered tiles fall onto a grid. Once a pair lands, loose tiles settle
//! under gravity, rows and columns are searched for dictionary words, matched words
//! are removed and the board settles again before the next pair spawns.
//!
//! The host drives a [`Game`] with [`Game::apply_intents`] and [`Game::advance`] and
//! draws from [`Game::snapshot`].

pub mod config;
pub mod dictionary;
pub mod game;
pub mod grid;
pub mod intent;
pub mod letters;
pub mod physics;
pub mod piece;
pub mod scanner;
pub mod snapshot;
pub mod tile;

pub use config::{ConfigError, GameConfig};
pub use dictionary::{Dictionary, DictionaryError};
pub use game::{Game, Phase};
pub use grid::{Grid, GridError};
pub use intent::{Intent, IntentSet};
pub use letters::{LetterSource, ScriptedLetters, WeightedLetters};
pub use piece::{Layout, Piece, Rotation, SpawnBlocked};
pub use snapshot::{CellView, Snapshot};
pub use tile::{Connection, Letter, Pos, Tile};
