use cue::adapters::{FileArchiveStore, TokioRevealScheduler, WsBridgeConfig, WsHostBridge};
use cue::app::{App, AppServices};
use cue::cli::{parse_args, usage, version_string, CliCommand};
use cue::error::{ErrorContext, ResultExt, UiError};
use cue::input::CommandRegistry;
use cue::preferences::{FileStore, Preferences};
use cue::reveal::RevealTask;
use cue::startup::{default_data_dir, home_data_dir, init_tracing, StartupConfig};
use cue::traits::HostBridge;
use cue::ui;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Redraw and timer tick.
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let overrides = match parse_args(std::env::args()) {
        CliCommand::Version => {
            println!("{}", version_string());
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", usage());
            return Ok(());
        }
        CliCommand::Invalid(message) => {
            eprintln!("error: {}\n\n{}", message, usage());
            std::process::exit(2);
        }
        CliCommand::RunTui(overrides) => overrides,
    };

    color_eyre::install()?;

    let config = StartupConfig::from_env().with_overrides(&overrides);
    if let Err(e) = init_tracing(&config) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    info!("Starting {} (host {})", version_string(), config.host_url);
    if config.data_dir == default_data_dir() {
        if let Err(e) = home_data_dir() {
            warn!("{} [{}], using {}", e, e.error_code(), config.data_dir.display());
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;

    // Connect before taking over the terminal so failures print normally.
    let bridge = runtime
        .block_on(WsHostBridge::connect(
            WsBridgeConfig::default().with_url(config.host_url.clone()),
        ))
        .context(ErrorContext::new("connect").with_component("bridge"))
        .map_err(|e| {
            error!("{} [{}]", e, e.error_code());
            eyre!("{}. {}", e.user_message(), e.recovery_hint())
        })?;
    let bridge: Arc<dyn HostBridge> = Arc::new(bridge);

    let preferences = Preferences::new(FileStore::open(config.data_dir()));
    let archive = Arc::new(FileArchiveStore::new(config.data_dir()));
    let (scheduler, reveal_rx) = TokioRevealScheduler::channel();

    setup_panic_hook();

    let mut terminal = setup_terminal()?;

    let result = runtime.block_on(async {
        let mut app = App::new(
            AppServices {
                bridge: Arc::clone(&bridge),
                preferences,
                archive,
                scheduler: Box::new(scheduler),
            },
            config.reveal,
        );
        let size = terminal.size()?;
        app.update_terminal_dimensions(size.width, size.height);
        app.attach();

        let result = run_app(&mut terminal, &mut app, reveal_rx).await;

        // Let the quit request (and anything else in flight) reach the host.
        if tokio::time::timeout(Duration::from_secs(2), app.settle())
            .await
            .is_err()
        {
            error!("Timed out waiting for bridge calls to finish");
        }
        result
    });

    bridge.shutdown();
    restore_terminal(&mut terminal)?;
    info!("Exited");
    result
}

/// Setup panic hook to restore terminal on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen, Show);
        original_hook(panic_info);
    }));
}

fn setup_terminal() -> std::result::Result<Terminal<CrosstermBackend<io::Stdout>>, UiError> {
    let init_failed = |e: io::Error| UiError::TerminalInitFailed {
        message: e.to_string(),
    };
    enable_raw_mode().map_err(init_failed)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste).map_err(init_failed)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(init_failed)?;
    terminal.clear().map_err(init_failed)?;
    Ok(terminal)
}

/// Restore terminal to normal mode
fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> std::result::Result<(), UiError> {
    let restore_failed = |e: io::Error| UiError::TerminalRestoreFailed {
        message: e.to_string(),
    };
    disable_raw_mode().map_err(restore_failed)?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )
    .map_err(restore_failed)?;
    terminal.show_cursor().map_err(restore_failed)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut reveal_rx: mpsc::UnboundedReceiver<RevealTask>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let registry = CommandRegistry::new();
    let mut event_stream = EventStream::new();
    let mut message_rx = app
        .message_rx
        .take()
        .ok_or_else(|| eyre!("message receiver already taken"))?;

    let result = loop {
        if app.should_quit {
            break Ok(());
        }

        // Draw only when state changed or a reveal is in progress
        if app.needs_redraw || app.is_animating() {
            if let Err(e) = terminal.draw(|f| ui::render(f, &mut *app)) {
                break Err(e.into());
            }
            app.needs_redraw = false;
        }

        let timeout = tokio::time::sleep(TICK);

        tokio::select! {
            _ = timeout => {
                app.tick(Instant::now());
            }

            Some(task) = reveal_rx.recv() => {
                app.apply_reveal(task);
            }

            Some(msg) = message_rx.recv() => {
                app.handle_message(msg);
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) => {
                        if let Some(cmd) = registry.dispatch(key, app.view) {
                            app.handle_command(cmd);
                            app.mark_dirty();
                        }
                    }
                    Some(Ok(Event::Paste(text))) => app.paste(&text),
                    Some(Ok(Event::Resize(width, height))) => {
                        app.update_terminal_dimensions(width, height);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(eyre!("terminal input failed: {}", e)),
                    None => break Ok(()),
                }
            }
        }
    };

    app.message_rx = Some(message_rx);
    result
}
