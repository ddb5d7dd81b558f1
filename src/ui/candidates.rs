use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListState, Paragraph};

use crate::app::{App, CandidateSource, InputMode};
use crate::ui::util::{highlight_style, panel_block, styled_item, symbol};

pub fn draw_candidates_panel(frame: &mut ratatui::Frame, area: Rect, app: &App, is_focused: bool) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    draw_search_input(frame, rows[0], app);
    draw_candidate_list(frame, rows[1], app, is_focused);
}

fn draw_search_input(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let editing = app.input_mode == InputMode::EditSearch;
    let icon = symbol(app, "󰍉", "?");

    let text = if app.search_query.is_empty() && !editing {
        Span::styled(
            "/ search, r recommend",
            Style::default().fg(theme.text_muted),
        )
    } else if editing {
        Span::styled(
            format!("{}_", app.search_query),
            Style::default().fg(theme.text_primary),
        )
    } else {
        Span::styled(
            app.search_query.as_str(),
            Style::default().fg(theme.text_secondary),
        )
    };

    let block = panel_block(app, format!(" {icon} Search "), editing);
    let input = Paragraph::new(Line::from(vec![Span::raw(" "), text]))
        .block(block)
        .style(Style::default().bg(theme.bg_panel));
    frame.render_widget(input, area);
}

fn draw_candidate_list(frame: &mut ratatui::Frame, area: Rect, app: &App, is_focused: bool) {
    let theme = &app.theme;

    let title = match &app.candidate_source {
        CandidateSource::Recommended => format!(" Recommended ({}) ", app.candidates.len()),
        CandidateSource::Search(keyword) => {
            format!(" Results for \"{keyword}\" ({}) ", app.candidates.len())
        }
    };

    let items = if app.candidates.is_empty() {
        let label = if app.pending_catalog || app.pending_search.is_some() {
            "  Loading..."
        } else {
            "  Nothing to show"
        };
        vec![styled_item(label, theme.text_muted)]
    } else {
        app.candidates
            .iter()
            .map(|name| {
                let color = if app.tasks.get(name).is_some_and(|task| task.is_running()) {
                    theme.yellow
                } else if app.installed.contains(name) {
                    theme.green
                } else {
                    theme.text_primary
                };
                styled_item(format!(" {name}"), color)
            })
            .collect()
    };

    let list = List::new(items)
        .block(panel_block(app, title, is_focused))
        .style(Style::default().bg(theme.bg_panel))
        .highlight_style(highlight_style(app))
        .highlight_symbol(symbol(app, "▌", "> "));

    let mut state = ListState::default();
    state.select(app.candidates_selected);
    frame.render_stateful_widget(list, area, &mut state);
}
