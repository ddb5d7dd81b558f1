mod candidates;
mod footer;
pub mod help;
mod installed;
pub mod popup;
mod tasks;
mod util;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::app::{App, FocusedPanel};

pub fn draw(frame: &mut ratatui::Frame, app: &App) {
    let theme = &app.theme;

    let bg_block = Block::default().style(Style::default().bg(theme.bg_main));
    frame.render_widget(bg_block, frame.area());

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, layout[0], app);
    draw_body(frame, layout[1], app);
    footer::draw_footer(frame, layout[2], app);

    if let Some(popup) = app.popup.as_ref() {
        popup::draw_popup(frame, app, popup);
    }
}

fn draw_header(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let uptime = app.started_at.elapsed().as_secs();

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            " brewdeck ",
            Style::default()
                .fg(theme.text_on_accent)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.text_muted),
        ),
        Span::raw("  "),
        Span::styled(&app.status, Style::default().fg(theme.text_secondary)),
        Span::raw("  "),
        Span::styled(
            format!("[{}] {}", app.theme_mode.label(), util::format_elapsed(uptime)),
            Style::default().fg(theme.text_muted),
        ),
    ]);

    let header = Paragraph::new(line).style(Style::default().bg(theme.bg_panel));
    frame.render_widget(header, area);
}

fn draw_body(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(area);

    candidates::draw_candidates_panel(
        frame,
        columns[0],
        app,
        app.focus_panel == FocusedPanel::Candidates,
    );
    tasks::draw_tasks_panel(
        frame,
        columns[1],
        app,
        app.focus_panel == FocusedPanel::Tasks,
    );
    installed::draw_installed_panel(
        frame,
        columns[2],
        app,
        app.focus_panel == FocusedPanel::Installed,
    );
}
