mod app;
mod event;
mod ui;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use typing_feast::Phase;
use typing_feast::config::Config;
use typing_feast::engine::DifficultyKey;

use app::App;
use event::{AppEvent, EventHandler};
use ui::components::phrase_area::PhraseArea;
use ui::components::pizza_timer::PizzaTimer;
use ui::components::result_panel::ResultPanel;
use ui::components::status_bar::StatusBar;
use ui::layout::PlayLayout;
use ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "typing-feast",
    version,
    about = "Type Italian phrases before the pizza timer runs out"
)]
struct Cli {
    #[arg(short, long, help = "Difficulty (easy/facile, medium/medio, hard/difficile)")]
    difficulty: Option<String>,

    #[arg(short, long, help = "Session length in seconds")]
    seconds: Option<u32>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,
}

fn init_logging() -> Result<PathBuf> {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("typing-feast");
    fs::create_dir_all(&dir)?;
    let path = dir.join("typing-feast.log");
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))?;
    Ok(path)
}

fn apply_cli(config: &mut Config, cli: Cli) -> Result<()> {
    if let Some(difficulty) = cli.difficulty {
        let key: DifficultyKey = difficulty.parse()?;
        config.difficulty = key.as_str().to_string();
    }
    if let Some(seconds) = cli.seconds {
        if seconds == 0 {
            return Err(anyhow!("--seconds must be at least 1"));
        }
        config.session_secs = seconds;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match init_logging() {
        Ok(path) => info!(path = %path.display(), "logging to file"),
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    let mut config = Config::load().unwrap_or_else(|err| {
        warn!(%err, path = %Config::config_path().display(), "bad config file, using defaults");
        Config::default()
    });
    apply_cli(&mut config, cli)?;

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        warn!(theme = %config.theme, available = ?Theme::available_themes(), "unknown theme");
        Theme::default()
    });
    let theme: &'static Theme = Box::leak(Box::new(theme));

    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let mut app = App::new(&config, Some(Config::config_path()), theme)?;
    info!(difficulty = %app.menu.selected_difficulty(), "typing-feast starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(tick_rate);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.sync_clock(),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            info!("quitting");
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.phase() {
        Phase::Title => handle_title_key(app, key),
        Phase::Playing => handle_playing_key(app, key),
        Phase::Result => handle_result_key(app, key),
    }
}

fn handle_title_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char(ch @ '1'..='3') => {
            let index = ch as usize - '1' as usize;
            app.start(DifficultyKey::ALL[index]);
        }
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => app.start_selected(),
        _ => {}
    }
}

fn handle_playing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.end_session(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.type_char(ch);
        }
        _ => {}
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('t') => app.return_to_title(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.phase() {
        Phase::Title => render_title(frame, app),
        Phase::Playing => render_playing(frame, app),
        Phase::Result => render_result(frame, app),
    }
}

fn render_title(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let menu_area = ui::layout::centered_rect(50, 70, layout[0]);
    frame.render_widget(&app.menu, menu_area);

    if let Some(ref err) = app.last_error {
        let line = Paragraph::new(Line::from(Span::styled(
            format!(" {err}"),
            Style::default().fg(colors.error()),
        )));
        frame.render_widget(line, layout[1]);
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        format!(
            " [1-3] Start  [\u{2191}/\u{2193} Enter] Choose  [q] Quit   session: {}s",
            app.game.session_secs()
        ),
        Style::default().fg(colors.text_pending()),
    )));
    frame.render_widget(footer, layout[2]);
}

fn render_playing(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let snapshot = app.game.snapshot();
    let layout = PlayLayout::new(frame.area());

    frame.render_widget(
        StatusBar::new(&snapshot.state, snapshot.label, app.theme),
        layout.header,
    );

    if let Some(ref round) = snapshot.round {
        frame.render_widget(PhraseArea::new(round, app.theme), layout.phrase);
        frame.render_widget(
            PizzaTimer::new(round.remaining_fraction, app.theme),
            layout.pizza,
        );
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        " [Esc] End session  [Backspace] Delete",
        Style::default()
            .fg(colors.text_pending())
            .add_modifier(Modifier::DIM),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_result(frame: &mut ratatui::Frame, app: &App) {
    if let Some(result) = app.game.result() {
        let area = ui::layout::centered_rect(40, 50, frame.area());
        frame.render_widget(ResultPanel::new(&result, app.theme), area);
    }
}
