pub mod app;
pub mod event;
pub mod state;
pub mod theme;
pub mod ui;

pub use app::App;
pub use state::{get_state_path, load_last_scenario, save_last_scenario, LastScenario};
pub use theme::ThemeColors;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer log output while TUI is active to prevent it corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);

    let outcome = (|| -> anyhow::Result<()> {
        loop {
            terminal.draw(|frame| ui::draw(frame, &app))?;

            match events.next()? {
                Event::Key(key) => handle_key_event(&mut app, key),
                Event::Tick => app.update_flash(),
            }

            if app.should_quit {
                return Ok(());
            }
        }
    })();

    // Restore terminal
    ratatui::restore();

    // Flush buffered log messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    outcome
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => match key.code {
            // Quit
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            // Slider selection
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => app.next_field(),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => app.previous_field(),

            // Slider value
            KeyCode::Char('l') | KeyCode::Right => app.adjust(1),
            KeyCode::Char('h') | KeyCode::Left => app.adjust(-1),
            KeyCode::Char('L') => app.adjust(5),
            KeyCode::Char('H') => app.adjust(-5),

            KeyCode::Char('p') => app.cycle_preset(),
            KeyCode::Char('s') => app.save_scenario(),
            KeyCode::Char('b') => app.toggle_breakdown(),
            KeyCode::Char('?') => app.show_help(),

            _ => {}
        },
        app::InputMode::ScoreBreakdown => match key.code {
            KeyCode::Esc | KeyCode::Char('b') => app.toggle_breakdown(),
            // Sliders stay live so the breakdown updates as you tweak
            KeyCode::Char('j') | KeyCode::Down => app.next_field(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_field(),
            KeyCode::Char('l') | KeyCode::Right => app.adjust(1),
            KeyCode::Char('h') | KeyCode::Left => app.adjust(-1),
            KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
