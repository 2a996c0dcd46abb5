use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};

use typing_feast::config::Config;
use typing_feast::engine::DifficultyKey;
use typing_feast::phrase::PhraseBank;
use typing_feast::session::round::Keystroke;
use typing_feast::{Phase, SessionController};

use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

pub struct App {
    pub game: SessionController,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub should_quit: bool,
    /// Shown on the title screen when a session could not be started.
    pub last_error: Option<String>,
    /// Where the last chosen difficulty is remembered. `None` keeps it in memory.
    config_path: Option<PathBuf>,
    last_tick: Instant,
}

impl App {
    pub fn new(
        config: &Config,
        config_path: Option<PathBuf>,
        theme: &'static Theme,
    ) -> Result<Self> {
        let bank = PhraseBank::italian()?;
        let game = SessionController::new(bank)?.with_session_secs(config.session_secs);

        let mut menu = Menu::new(theme);
        menu.select(config.difficulty_key());

        Ok(Self {
            game,
            menu,
            theme,
            should_quit: false,
            last_error: None,
            config_path,
            last_tick: Instant::now(),
        })
    }

    pub fn phase(&self) -> Phase {
        self.game.phase()
    }

    /// Feeds the wall-clock time since the last call into the game so timers
    /// due before the next input fire first.
    pub fn sync_clock(&mut self) {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        if self.game.phase() == Phase::Playing {
            self.game.advance(elapsed);
        }
    }

    pub fn start(&mut self, difficulty: DifficultyKey) {
        self.sync_clock();
        self.menu.select(difficulty);
        match self.game.start(difficulty) {
            Ok(()) => {
                self.last_error = None;
                info!(difficulty = %difficulty, "started from title screen");
                if let Err(err) = self.remember_difficulty(difficulty) {
                    warn!(%err, "could not save difficulty");
                }
            }
            Err(err) => {
                warn!(%err, "could not start session");
                self.last_error = Some(err.to_string());
            }
        }
    }

    /// Rewrites only the `difficulty` field of the stored config, leaving
    /// command-line overrides out of the file.
    fn remember_difficulty(&self, difficulty: DifficultyKey) -> Result<()> {
        let Some(path) = self.config_path.as_deref() else {
            return Ok(());
        };
        let mut stored = Config::load_from(path)?;
        if stored.difficulty == difficulty.as_str() && path.exists() {
            return Ok(());
        }
        stored.difficulty = difficulty.as_str().to_string();
        stored.save_to(path)
    }

    pub fn start_selected(&mut self) {
        self.start(self.menu.selected_difficulty());
    }

    pub fn type_char(&mut self, ch: char) -> Keystroke {
        self.sync_clock();
        self.game.submit_character(ch)
    }

    pub fn backspace(&mut self) {
        self.sync_clock();
        let typed = self.game.round().round().map_or(0, |r| r.cursor);
        if typed > 0 {
            self.game.submit_backspace_to(typed - 1);
        }
    }

    pub fn end_session(&mut self) {
        self.sync_clock();
        self.game.end_session();
    }

    pub fn return_to_title(&mut self) {
        if self.game.return_to_title() {
            self.last_tick = Instant::now();
        }
    }
}
