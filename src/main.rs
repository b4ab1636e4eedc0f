mod app;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod player;
mod ticker;
mod todo;
mod ui;

use anyhow::{Context, Result};
use app::{Account, AppState};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        KeyEventKind,
    },
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::calendar::{month_text, parse_month};
use domain::month_view;
use persistence::{ensure_nook_dir, init_local_nook, load_settings, settings_file, Settings};
use player::{MediaElement, NullAudio, NullSurface, Player, ProcessAudio, ProcessVideoSurface, VideoSurface};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use ticker::SecondTicker;
use todo::{AuthContext, Identity, LocalTodoStore, RemoteTodoStore, RestTodoBackend, TodoStore};

#[derive(Parser)]
#[command(name = "nook")]
#[command(about = "A cozy terminal room with music, a pomodoro timer, todos and a calendar", long_about = None)]
struct Cli {
    /// Start without audio or video playback
    #[arg(long, global = true)]
    mute: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .nook directory in the current directory
    Init,
    /// Print a month calendar
    Calendar {
        /// Month to show (YYYY-MM format). Defaults to the current month.
        #[arg(short, long)]
        month: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let nook_dir = init_local_nook()?;
            println!("Initialized nook directory: {}", nook_dir.display());
            println!();
            println!("Nook will now keep its settings and log here.");
            println!("Run 'nook' to step into the room.");
            Ok(())
        }
        Some(Commands::Calendar { month }) => {
            let today = chrono::Local::now().date_naive();
            let date = match month {
                Some(text) => parse_month(&text)
                    .with_context(|| format!("Invalid month '{}'. Use YYYY-MM", text))?,
                None => today,
            };
            print!("{}", month_text(&month_view(date), today));
            Ok(())
        }
        None => run_tui(cli.mute),
    }
}

/// Audio element and video surface for the configured player commands
fn media_backends(settings: &Settings, mute: bool) -> (Box<dyn MediaElement>, Box<dyn VideoSurface>) {
    if mute {
        return (Box::new(NullAudio), Box::new(NullSurface));
    }
    let audio: Box<dyn MediaElement> = match settings.audio_template() {
        Some(template) => Box::new(ProcessAudio::new(template)),
        None => Box::new(NullAudio),
    };
    let surface: Box<dyn VideoSurface> = match settings.video_template() {
        Some(template) => Box::new(ProcessVideoSurface::new(template)),
        None => Box::new(NullSurface),
    };
    (audio, surface)
}

/// Synced store when a remote section is configured, local otherwise
fn todo_store(settings: &Settings) -> Result<(Box<dyn TodoStore>, Option<Account>)> {
    let Some(remote) = &settings.remote else {
        return Ok((Box::new(LocalTodoStore::new()), None));
    };

    let backend = RestTodoBackend::new(&remote.url, &remote.api_key)
        .context("Failed to create todo backend client")?;
    let auth = AuthContext::new();
    let identity = Identity {
        user_id: remote.user_id.clone(),
        access_token: remote.access_token.clone(),
    };
    auth.sign_in(identity.clone());

    let store = RemoteTodoStore::new(backend, auth.clone());
    Ok((Box::new(store), Some(Account { auth, identity })))
}

fn run_tui(mute: bool) -> Result<()> {
    let nook_dir = ensure_nook_dir()?;
    let _log_guard = logging::init(Some(&nook_dir));
    tracing::info!(dir = %nook_dir.display(), "starting nook");

    let settings_path = settings_file()?;
    let settings = load_settings(&settings_path)?;

    let (audio, surface) = media_backends(&settings, mute);
    let player = Player::new(audio, surface, settings.volume);
    let (todos, account) = todo_store(&settings)?;

    let mut app = AppState::new(settings, player, todos, Box::new(SecondTicker::new()));
    app.settings_path = Some(settings_path);
    app.account = account;

    // Setup terminal
    install_panic_hook();
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    // Save on exit
    app.needs_save = true;
    if let Err(e) = app.save() {
        tracing::error!(error = %e, "saving settings failed");
        eprintln!("Error saving settings: {}", e);
    }

    if let Err(err) = &result {
        tracing::error!(error = %err, "nook exited with an error");
    }
    result
}

/// Put the terminal back before the default hook prints the panic
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        previous(info);
    }));
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange,
        Show
    );
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let frame_rate = ticker::frame_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle at most one event per frame
        if event::poll(frame_rate)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key)? {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::FocusLost => input::handle_focus(app, false),
                Event::FocusGained => input::handle_focus(app, true),
                _ => {}
            }
        }

        app.tick();

        // Autosave if needed
        if app.needs_save {
            if let Err(e) = app.save() {
                tracing::warn!(error = %e, "autosave failed");
                app.needs_save = false;
            }
        }
    }
}
