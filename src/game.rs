//! Game state: board, falling piece, letter queue and the phase machine that
//! sequences falling, settling, word scanning and clearing.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{ConfigError, GameConfig};
use crate::dictionary::Dictionary;
use crate::grid::Grid;
use crate::intent::{Intent, IntentSet};
use crate::letters::LetterSource;
use crate::physics;
use crate::piece::{Piece, Rotation};
use crate::scanner;
use crate::snapshot::Snapshot;
use crate::tile::Letter;

/// Where the game is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// A piece is falling under player control.
    Playing,
    /// No piece; committed tiles fall one gravity pass per step.
    Settling,
    /// The board is at rest; one word scan runs.
    Scanning,
    /// Marked words are shown, then removed.
    Clearing,
    /// A new piece could not spawn. Absorbing.
    GameOver,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Playing => "Playing",
            Self::Settling => "Settling",
            Self::Scanning => "Scanning",
            Self::Clearing => "Clearing",
            Self::GameOver => "Game over",
        }
    }
}

pub struct Game {
    config: GameConfig,
    dictionary: Arc<Dictionary>,
    letters: Box<dyn LetterSource + Send>,
    rng: StdRng,
    grid: Grid,
    piece: Option<Piece>,
    /// Letters of the next piece.
    queue: [Letter; 2],
    phase: Phase,
    /// Time accumulated towards the next step.
    clock: Duration,
    paused: bool,
}

impl Game {
    /// Validate `config`, generate a board and spawn the first piece.
    pub fn new(
        config: GameConfig,
        dictionary: Arc<Dictionary>,
        mut letters: Box<dyn LetterSource + Send>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let queue = [letters.next_letter(), letters.next_letter()];
        let mut game = Self {
            grid: Grid::new(config.width, config.height),
            config,
            dictionary,
            letters,
            rng,
            piece: None,
            queue,
            phase: Phase::Settling,
            clock: Duration::ZERO,
            paused: false,
        };
        game.generate_board();
        Ok(game)
    }

    fn generate_board(&mut self) {
        self.grid.clear();
        let placed = self.grid.scatter_obstacles(
            self.config.obstacles,
            self.config.obstacle_rows,
            &mut self.rng,
            &mut self.letters,
        );
        debug!(
            "new {}x{} board with {placed} obstacles",
            self.config.width, self.config.height
        );
        self.clock = Duration::ZERO;
        self.paused = false;
        self.spawn_next();
    }

    /// Throw away the current board and start over with a fresh one.
    pub fn restart(&mut self) {
        info!("restarting game");
        self.piece = None;
        self.queue = [self.letters.next_letter(), self.letters.next_letter()];
        self.generate_board();
    }

    /// Entering a new phase restarts the clock, so each phase waits its own full
    /// interval however the previous one ended.
    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!("phase {:?} -> {:?}", self.phase, phase);
            self.clock = Duration::ZERO;
        }
        self.phase = phase;
    }

    /// Spawn a piece from the queued letters and queue a new pair, or end the game.
    fn spawn_next(&mut self) {
        let [first, second] = self.queue;
        match Piece::spawn(first, second, &self.grid) {
            Ok(piece) => {
                self.piece = Some(piece);
                self.queue = [self.letters.next_letter(), self.letters.next_letter()];
                self.set_phase(Phase::Playing);
            }
            Err(blocked) => {
                info!("game over: {blocked}");
                self.piece = None;
                self.set_phase(Phase::GameOver);
            }
        }
    }

    /// Write the falling piece into the grid and start settling.
    fn lock_piece(&mut self, anchored: bool) -> bool {
        let Some(piece) = self.piece.take() else {
            return false;
        };
        let committed = if anchored {
            piece.commit_anchored(&mut self.grid)
        } else {
            piece.commit(&mut self.grid)
        };
        if let Err(e) = &committed {
            error!("piece commit failed: {e}");
        }
        debug_assert!(committed.is_ok());
        self.set_phase(Phase::Settling);
        true
    }

    /// Run one step of the current phase immediately.
    pub fn step(&mut self) {
        match self.phase {
            Phase::Playing => {
                let fell = match self.piece.as_mut() {
                    Some(piece) => piece.try_move(0, 1, &self.grid),
                    None => false,
                };
                if !fell {
                    self.lock_piece(false);
                }
            }
            Phase::Settling => {
                if !physics::apply_gravity(&mut self.grid) {
                    self.set_phase(Phase::Scanning);
                }
            }
            Phase::Scanning => {
                if scanner::scan(&mut self.grid, &self.dictionary) {
                    self.set_phase(Phase::Clearing);
                } else {
                    self.spawn_next();
                }
            }
            Phase::Clearing => {
                let removed = physics::clear_marked(&mut self.grid);
                debug!("cleared {removed} tiles");
                self.set_phase(Phase::Settling);
            }
            Phase::GameOver => {}
        }
    }

    /// Feed wall-clock time in. Runs at most one step once the current phase's
    /// interval has elapsed; time beyond that is dropped, so a stalled host never
    /// replays missed steps. Does nothing while paused or after game over.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.paused {
            return;
        }
        let Some(interval) = self.config.interval(self.phase) else {
            return;
        };
        self.clock += elapsed;
        if self.clock >= interval {
            self.clock = Duration::ZERO;
            self.step();
        }
    }

    /// Apply this tick's intents, each at most once. Only a falling piece reacts.
    /// Returns true if anything changed.
    pub fn apply_intents(&mut self, intents: &IntentSet) -> bool {
        if self.paused {
            return false;
        }
        let mut changed = false;
        for intent in intents.iter() {
            if self.phase != Phase::Playing {
                break;
            }
            changed |= self.apply_intent(intent);
        }
        changed
    }

    fn apply_intent(&mut self, intent: Intent) -> bool {
        let Some(mut piece) = self.piece else {
            return false;
        };
        let changed = match intent {
            Intent::MoveLeft => piece.try_move(-1, 0, &self.grid),
            Intent::MoveRight => piece.try_move(1, 0, &self.grid),
            Intent::RotateCw => piece.try_rotate(Rotation::Cw, &self.grid),
            Intent::RotateCcw => piece.try_rotate(Rotation::Ccw, &self.grid),
            Intent::Flip => {
                piece.flip();
                true
            }
            Intent::SoftDrop => {
                if !piece.try_move(0, 1, &self.grid) {
                    return self.lock_piece(false);
                }
                self.clock = Duration::ZERO;
                true
            }
            Intent::HardCommit => return self.lock_piece(true),
        };
        self.piece = Some(piece);
        changed
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub fn next_letters(&self) -> [Letter; 2] {
        self.queue
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            cells: self.grid.cells().to_vec(),
            piece: self.piece.map(|p| p.tiles()),
            next: self.queue,
            phase: self.phase,
            paused: self.paused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::ScriptedLetters;
    use crate::tile::Pos;

    fn game(width: usize, height: usize, words: &[&str], script: &str) -> Game {
        let config = GameConfig {
            width,
            height,
            obstacles: 0,
            obstacle_rows: 0,
            seed: Some(1),
            ..GameConfig::default()
        };
        let dict = Dictionary::from_words(words.iter().copied()).unwrap();
        Game::new(config, Arc::new(dict), Box::new(ScriptedLetters::new(script))).unwrap()
    }

    fn intents(list: &[Intent]) -> IntentSet {
        list.iter().copied().collect()
    }

    /// Step until the phase is `phase`, with a bound on the number of steps.
    fn step_until(game: &mut Game, phase: Phase) {
        for _ in 0..200 {
            if game.phase() == phase {
                return;
            }
            game.step();
        }
        panic!("never reached {phase:?}, stuck in {:?}", game.phase());
    }

    fn piece_cells(game: &Game) -> (Pos, Pos) {
        let piece = game.piece().unwrap();
        (piece.primary().pos, piece.secondary().pos)
    }

    #[test]
    fn new_game_spawns_and_queues() {
        let game = game(10, 10, &["cat"], "ABCD");
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(piece_cells(&game), (Pos::new(4, 0), Pos::new(5, 0)));
        let next: String = game.next_letters().iter().map(|l| l.upper()).collect();
        assert_eq!(next, "CD");
    }

    #[test]
    fn obstacles_are_scattered_in_bottom_rows() {
        let config = GameConfig {
            seed: Some(9),
            ..GameConfig::default()
        };
        let dict = Arc::new(Dictionary::from_words(["cat"]).unwrap());
        let game = Game::new(config, dict, Box::new(ScriptedLetters::new("XZ"))).unwrap();
        let greyed: Vec<_> = game.grid().iter_filled().collect();
        assert_eq!(greyed.len(), 10);
        assert!(greyed.iter().all(|t| t.greyed && t.pos.y >= 7));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig {
            height: 2,
            ..GameConfig::default()
        };
        let dict = Arc::new(Dictionary::new());
        assert!(Game::new(config, dict, Box::new(ScriptedLetters::new("A"))).is_err());
    }

    #[test]
    fn piece_falls_on_the_playing_cadence() {
        let mut game = game(10, 10, &["cat"], "XZ");
        game.advance(Duration::from_millis(1499));
        assert_eq!(piece_cells(&game).0.y, 0);
        game.advance(Duration::from_millis(1));
        assert_eq!(piece_cells(&game).0.y, 1);
        game.advance(Duration::from_millis(3000));
        assert_eq!(piece_cells(&game).0.y, 2);
    }

    #[test]
    fn stalled_host_does_not_replay_missed_steps() {
        let mut game = game(6, 6, &["cat"], "XZ");
        game.advance(Duration::from_secs(60));
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(piece_cells(&game).0.y, 1);
        game.advance(Duration::from_millis(1499));
        assert_eq!(piece_cells(&game).0.y, 1);
    }

    #[test]
    fn lock_by_intent_restarts_the_clock() {
        let mut game = game(6, 6, &["cat"], "XZ");
        for _ in 0..5 {
            assert!(game.apply_intents(&intents(&[Intent::SoftDrop])));
        }
        assert_eq!(piece_cells(&game).0.y, 5);
        game.advance(Duration::from_millis(1400));
        assert_eq!(game.phase(), Phase::Playing);

        assert!(game.apply_intents(&intents(&[Intent::SoftDrop])));
        assert_eq!(game.phase(), Phase::Settling);
        game.advance(Duration::from_millis(16));
        assert_eq!(game.phase(), Phase::Settling);
        game.advance(Duration::from_millis(234));
        assert_eq!(game.phase(), Phase::Scanning);
    }

    #[test]
    fn soft_drop_resets_the_fall_timer() {
        let mut game = game(10, 10, &["cat"], "XZ");
        game.advance(Duration::from_millis(1000));
        assert!(game.apply_intents(&intents(&[Intent::SoftDrop])));
        assert_eq!(piece_cells(&game).0.y, 1);
        game.advance(Duration::from_millis(1000));
        assert_eq!(piece_cells(&game).0.y, 1);
        game.advance(Duration::from_millis(500));
        assert_eq!(piece_cells(&game).0.y, 2);
    }

    #[test]
    fn landing_commits_and_settles() {
        let mut game = game(6, 6, &["cat"], "XZ");
        step_until(&mut game, Phase::Settling);
        assert!(game.piece().is_none());
        assert_eq!(game.grid().to_rows()[5], "..XZ..");
        step_until(&mut game, Phase::Playing);
        assert_eq!(piece_cells(&game), (Pos::new(2, 0), Pos::new(3, 0)));
    }

    #[test]
    fn each_intent_applies_once_per_tick() {
        let mut game = game(10, 10, &["cat"], "XZ");
        let mut set = IntentSet::new();
        set.insert(Intent::MoveLeft);
        set.insert(Intent::MoveLeft);
        assert!(game.apply_intents(&set));
        assert_eq!(piece_cells(&game).0.x, 3);
    }

    #[test]
    fn hard_commit_anchors_in_place() {
        let mut game = game(6, 6, &["cat"], "XZ");
        game.step();
        game.step();
        assert!(game.apply_intents(&intents(&[Intent::HardCommit, Intent::MoveLeft])));
        assert_eq!(game.phase(), Phase::Settling);
        // MoveLeft was applied first, then the pair was set in place.
        assert_eq!(game.grid().to_rows()[2], ".xz...");
        step_until(&mut game, Phase::Playing);
        assert_eq!(game.grid().to_rows()[2], ".xz...");
    }

    #[test]
    fn intents_are_ignored_outside_playing() {
        let mut game = game(6, 6, &["cat"], "XZ");
        game.apply_intents(&intents(&[Intent::HardCommit]));
        assert_eq!(game.phase(), Phase::Settling);
        assert!(!game.apply_intents(&intents(&[Intent::MoveLeft, Intent::Flip])));
    }

    #[test]
    fn paused_game_does_not_advance() {
        let mut game = game(10, 10, &["cat"], "XZ");
        game.pause();
        game.advance(Duration::from_secs(60));
        assert!(!game.apply_intents(&intents(&[Intent::MoveLeft])));
        assert_eq!(piece_cells(&game), (Pos::new(4, 0), Pos::new(5, 0)));
        game.resume();
        game.advance(Duration::from_millis(1500));
        assert_eq!(piece_cells(&game).0.y, 1);
    }

    #[test]
    fn blocked_spawn_ends_the_game() {
        let mut game = game(4, 4, &["cat"], "XZ");
        // Each pair stacks on the last in columns 1 and 2 until row 0 is taken.
        for _ in 0..4 {
            assert_eq!(game.phase(), Phase::Playing);
            while game.phase() == Phase::Playing {
                game.apply_intents(&intents(&[Intent::SoftDrop]));
            }
            step_until(&mut game, Phase::Scanning);
            game.step();
        }
        assert_eq!(game.phase(), Phase::GameOver);
        assert!(game.piece().is_none());
        assert!(game.snapshot().is_game_over());

        let before = game.grid().clone();
        game.step();
        game.advance(Duration::from_secs(10));
        assert_eq!(game.grid(), &before);
        assert_eq!(game.phase(), Phase::GameOver);
    }

    #[test]
    fn restart_starts_a_fresh_board() {
        let mut game = game(4, 4, &["cat"], "XZ");
        game.apply_intents(&intents(&[Intent::HardCommit]));
        game.restart();
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.grid().filled_count(), 0);
    }

    #[test]
    fn snapshot_overlays_the_piece() {
        let game = game(6, 6, &["cat"], "QU");
        let snap = game.snapshot();
        assert_eq!(snap.rows()[0], "..QU..");
        assert!(matches!(snap.cell(2, 0), crate::snapshot::CellView::Falling(_)));
        assert_eq!(snap.phase, Phase::Playing);
    }
}
