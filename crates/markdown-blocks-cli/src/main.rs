mod app;
mod keys;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use markdown_blocks_config::Config;
use markdown_blocks_engine::{Modifiers, io};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

use app::App;

fn main() -> Result<()> {
    env_logger::init();

    // Determine notes path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let config;
    let from_config;

    if args.len() == 2 {
        // CLI argument provided; parser settings still come from the config file
        let parser = match Config::load() {
            Ok(Some(loaded)) => loaded.parser,
            _ => Default::default(),
        };
        config = Config {
            parser,
            ..Config::new(PathBuf::from(&args[1]))
        };
        from_config = false;
    } else if args.len() == 1 {
        match Config::load() {
            Ok(Some(loaded)) => {
                config = loaded;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No notes path provided and no config file found");
                eprintln!("Usage: {} <notes-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <notes-folder-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [notes-folder-path]", args[0]);
        process::exit(1);
    };

    if let Err(e) = io::validate_notes_dir(&config.notes_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Notes path '{}'{} is invalid: {e}",
            config.notes_path.display(),
            source
        );
        process::exit(1);
    }

    // Remember a notes path given on the command line when no config exists yet
    if !from_config && !config_path.exists() {
        match config.save() {
            Ok(()) => log::info!("saved config to {}", config_path.display()),
            Err(e) => log::warn!("could not save config to {}: {e}", config_path.display()),
        }
    }

    log::info!("opening notes at {}", config.notes_path.display());
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(action) = keys::action_for(key)
                    && !app.apply(action)
                {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let modifiers = Modifiers {
                    shift: mouse.modifiers.contains(KeyModifiers::SHIFT),
                    toggle: mouse
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER),
                };
                app.click(mouse.column, mouse.row, modifiers);
            }
            _ => {}
        }
    }
}
