use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{List, ListState};

use crate::app::App;
use crate::ui::util::{format_elapsed, highlight_style, panel_block, styled_item, symbol};

pub fn draw_installed_panel(frame: &mut ratatui::Frame, area: Rect, app: &App, is_focused: bool) {
    let theme = &app.theme;
    let title = match app.last_installed_refresh {
        Some(at) => format!(
            " Installed ({}) {} {} ago ",
            app.installed.len(),
            symbol(app, "·", "-"),
            format_elapsed(at.elapsed().as_secs())
        ),
        None => format!(" Installed ({}) ", app.installed.len()),
    };

    let items = if app.installed.is_empty() {
        let label = if app.pending_installed {
            "  Loading..."
        } else {
            "  No packages installed"
        };
        vec![styled_item(label, theme.text_muted)]
    } else {
        app.installed
            .iter()
            .map(|name| styled_item(format!(" {name}"), theme.text_primary))
            .collect()
    };

    let list = List::new(items)
        .block(panel_block(app, title, is_focused))
        .style(Style::default().bg(theme.bg_panel))
        .highlight_style(highlight_style(app))
        .highlight_symbol(symbol(app, "▌", "> "));

    let mut state = ListState::default();
    state.select(app.installed_selected);
    frame.render_stateful_widget(list, area, &mut state);
}
