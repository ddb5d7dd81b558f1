use std::time::Instant;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use crate::app::App;
use crate::task::{InstallTask, TaskStatus};
use crate::theme::Theme;
use crate::ui::util::{format_elapsed, panel_block, symbol};

/// Border plus name, gauge and last output line.
const CARD_HEIGHT: u16 = 5;

pub fn draw_tasks_panel(frame: &mut ratatui::Frame, area: Rect, app: &App, is_focused: bool) {
    let theme = &app.theme;
    let running = app.tasks.running_count();
    let title = format!(" Installs ({running} running) ");
    let block = panel_block(app, title, is_focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.tasks.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "  Press i on a candidate to install it",
            Style::default().fg(theme.text_muted),
        )));
        frame.render_widget(hint, inner);
        return;
    }

    let visible = (inner.height / CARD_HEIGHT).max(1) as usize;
    let selected = app.tasks_selected.unwrap_or(0);
    let offset = selected.saturating_sub(visible - 1);

    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible])
        .split(inner);

    for (slot, (index, task)) in slots
        .iter()
        .zip(app.tasks.iter().enumerate().skip(offset))
    {
        let is_selected = is_focused && app.tasks_selected == Some(index);
        draw_task_card(frame, *slot, app, task, is_selected);
    }
}

fn draw_task_card(
    frame: &mut ratatui::Frame,
    area: Rect,
    app: &App,
    task: &InstallTask,
    is_selected: bool,
) {
    let theme = &app.theme;
    let color = status_color(theme, task.status());
    let border = if is_selected {
        theme.border_active
    } else {
        theme.border
    };

    let elapsed = task
        .finished_at()
        .unwrap_or_else(Instant::now)
        .saturating_duration_since(task.started_at())
        .as_secs();

    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", task.pkg()),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} {} ", status_symbol(app, task.status()), task.status().label()),
            Style::default().fg(color),
        ),
        Span::styled(
            format!("{} ", format_elapsed(elapsed)),
            Style::default().fg(theme.text_muted),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme.bg_panel))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(theme.bg_gauge))
        .percent(u16::from(task.progress()))
        .label(format!("{}%", task.progress()));
    frame.render_widget(gauge, rows[0]);

    let last = task.last_line().unwrap_or("");
    let output = Paragraph::new(Line::from(Span::styled(
        last.to_string(),
        Style::default().fg(theme.text_secondary),
    )));
    frame.render_widget(output, rows[1]);
}

fn status_color(theme: &Theme, status: TaskStatus) -> Color {
    match status {
        TaskStatus::Running => theme.yellow,
        TaskStatus::Succeeded => theme.green,
        TaskStatus::Failed | TaskStatus::Errored => theme.red,
    }
}

fn status_symbol(app: &App, status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Running => symbol(app, "◐", "*"),
        TaskStatus::Succeeded => symbol(app, "✔", "+"),
        TaskStatus::Failed => symbol(app, "✘", "x"),
        TaskStatus::Errored => symbol(app, "⚠", "!"),
    }
}
