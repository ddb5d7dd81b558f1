use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, FocusedPanel, InputMode, ToastLevel};

pub fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    if let Some(toast) = app.toast.as_ref() {
        let color = match toast.level {
            ToastLevel::Info => theme.accent_secondary,
            ToastLevel::Success => theme.green,
            ToastLevel::Error => theme.red,
        };
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!(" {} ", toast.message),
                Style::default()
                    .fg(theme.text_on_accent)
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(theme.bg_panel)),
            area,
        );
        return;
    }

    let keys: &[(&str, &str)] = match (app.input_mode, app.focus_panel) {
        (InputMode::EditSearch, _) => &[("Enter", "search"), ("Esc", "cancel")],
        (_, FocusedPanel::Candidates) => &[
            ("q", "quit"),
            ("tab", "panes"),
            ("/", "search"),
            ("r", "recommend"),
            ("i", "install"),
            ("Enter", "info"),
            ("?", "help"),
        ],
        (_, FocusedPanel::Tasks) => &[
            ("q", "quit"),
            ("tab", "panes"),
            ("l", "log"),
            ("x", "dismiss"),
            ("?", "help"),
        ],
        (_, FocusedPanel::Installed) => &[
            ("q", "quit"),
            ("tab", "panes"),
            ("u", "uninstall"),
            ("U", "upgrade"),
            ("R", "refresh"),
            ("Enter", "info"),
            ("?", "help"),
        ],
    };

    let mut spans = vec![Span::raw(" ")];
    for (key, label) in keys {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.text_on_accent)
                .bg(theme.accent_secondary),
        ));
        spans.push(Span::styled(
            format!(" {label} "),
            Style::default().fg(theme.text_secondary),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg_panel));
    frame.render_widget(footer, area);
}
