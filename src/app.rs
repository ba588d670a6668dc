//! App: terminal init, main loop, key handling and game clock.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;
use ratatui::DefaultTerminal;
use wordtrix::{Game, IntentSet};

use crate::input::{Action, key_to_action};
use crate::theme::Theme;

/// Frame budget; also the longest we block waiting for input.
const FRAME: Duration = Duration::from_millis(16);

pub struct App {
    game: Game,
    theme: Theme,
    /// Intents collected since the last frame.
    pending: IntentSet,
    last_frame: Instant,
}

impl App {
    pub fn new(game: Game, theme: Theme) -> Self {
        Self {
            game,
            theme,
            pending: IntentSet::new(),
            last_frame: Instant::now(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size},
        };

        let config = self.game.config();
        let (need_w, need_h) = crate::ui::required_terminal_size(config.width, config.height);
        let (cols, rows) = size()?;
        if cols < need_w || rows < need_h {
            anyhow::bail!("terminal is {cols}x{rows}, the board needs at least {need_w}x{need_h}");
        }

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let result = self.run_loop(&mut terminal);

        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;
        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        self.last_frame = Instant::now();
        loop {
            let snapshot = self.game.snapshot();
            terminal.draw(|f| crate::ui::draw(f, &snapshot, &self.theme))?;

            let timeout = FRAME.saturating_sub(self.last_frame.elapsed());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    let Event::Key(key) = event::read()? else {
                        continue;
                    };
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key_to_action(key) {
                        Action::Quit => {
                            info!("quit");
                            return Ok(());
                        }
                        Action::Pause => self.game.toggle_pause(),
                        Action::Restart => {
                            self.pending.clear();
                            self.game.restart();
                        }
                        Action::Play(intent) => {
                            self.pending.insert(intent);
                        }
                        Action::None => {}
                    }
                }
            }

            let now = Instant::now();
            let elapsed = now.duration_since(self.last_frame);
            self.last_frame = now;
            self.game.apply_intents(&self.pending.take());
            self.game.advance(elapsed);
        }
    }
}
