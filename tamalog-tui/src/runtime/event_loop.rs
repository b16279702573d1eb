use crate::api::Backend;
use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use futures::stream::{FuturesUnordered, StreamExt};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use super::action_queue::channel;
use super::actions::{complete, start_action, Pending};
use super::views::handle_key;

const TICK: Duration = Duration::from_millis(100);

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    backend: &dyn Backend,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    // Backend calls run here while keys keep being handled
    let mut in_flight: FuturesUnordered<Pending<'_>> = FuturesUnordered::new();

    loop {
        app.sync_auth_state();
        app.is_loading = !in_flight.is_empty();
        if app.is_loading {
            app.throbber_state.calc_next();
        }
        terminal.draw(|f| ui::render(f, app))?;

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key(key, app, &action_tx);
                }
                Event::Resize(..) => {
                    app.viewport_width = viewport_width(app.cell_width_px);
                }
                _ => {}
            }
        }

        while let Ok(action) = action_rx.try_recv() {
            in_flight.extend(start_action(action, app, backend));
        }

        if !app.running {
            break;
        }

        let done = tokio::select! {
            Some(done) = in_flight.next() => Some(done),
            _ = tokio::time::sleep(TICK) => None,
        };
        if let Some(done) = done {
            in_flight.extend(complete(done, app, backend));
        }
    }

    if !in_flight.is_empty() {
        tracing::info!(pending = in_flight.len(), "quitting with backend calls in flight");
    }
    Ok(())
}

/// Width of the terminal window in pixels.
///
/// Terminals that don't report pixel sizes are measured in columns times the
/// configured cell width. `None` when there is no terminal to ask.
pub fn viewport_width(cell_width_px: u32) -> Option<u32> {
    match crossterm::terminal::window_size() {
        Ok(size) if size.width > 0 => Some(u32::from(size.width)),
        Ok(size) => Some(cells_to_px(size.columns, cell_width_px)),
        Err(_) => crossterm::terminal::size()
            .ok()
            .map(|(columns, _)| cells_to_px(columns, cell_width_px)),
    }
}

fn cells_to_px(columns: u16, cell_width_px: u32) -> u32 {
    u32::from(columns).saturating_mul(cell_width_px)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_scale_by_cell_width() {
        assert_eq!(cells_to_px(80, 8), 640);
        assert_eq!(cells_to_px(0, 8), 0);
    }

    #[test]
    fn huge_cell_width_saturates() {
        assert_eq!(cells_to_px(u16::MAX, u32::MAX), u32::MAX);
        assert_eq!(cells_to_px(2, u32::MAX / 2 + 1), u32::MAX);
    }
}
