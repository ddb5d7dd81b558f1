use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use crate::app::App;
use crate::config::Settings;
use crate::runtime::input::handle_key_event;
use crate::runtime::messages::{create_channel, process_pending_events};
use crate::runtime::terminal::Tui;
use crate::ui::draw;

/// Short enough that streamed install output feels live.
const TICK_RATE: Duration = Duration::from_millis(100);

pub async fn run_app(terminal: &mut Tui, settings: Settings) -> anyhow::Result<()> {
    let mut app = App::new(settings);
    app.screen_height = terminal.size()?.height;
    let (tx, mut rx) = create_channel();

    info!(brew = %app.brew.display_command(&[]), "starting");
    app.request_catalog(&tx);
    app.request_installed(&tx);

    loop {
        if app.needs_redraw {
            terminal.draw(|frame| draw(frame, &app))?;
            app.needs_redraw = false;
        }

        if process_pending_events(&mut app, &mut rx, &tx) {
            app.needs_redraw = true;
        }

        if event::poll(TICK_RATE)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(result) = handle_key_event(&mut app, key, &tx) {
                        info!("quitting");
                        return result;
                    }
                }
                Event::Resize(_, height) => {
                    app.screen_height = height;
                    app.needs_redraw = true;
                }
                _ => {}
            }
        }

        app.on_tick();
    }
}
