use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::theme::Theme;

const KEYMAPS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("Tab / S-Tab", "Next / previous pane"),
            ("j / k", "Move down / up"),
            ("Enter", "Package info"),
            ("c", "Copy info (in info popup)"),
        ],
    ),
    (
        "Packages",
        &[
            ("/", "Edit search keyword"),
            ("r", "New recommendations"),
            ("i", "Install selected candidate"),
            ("u", "Uninstall selected (confirm)"),
            ("U", "Upgrade selected"),
            ("R", "Refresh installed list"),
        ],
    ),
    (
        "Installs",
        &[
            ("l", "Show task log"),
            ("x", "Dismiss finished task"),
        ],
    ),
    (
        "Other",
        &[
            ("t", "Cycle theme"),
            ("?", "Toggle help"),
            ("q", "Quit"),
        ],
    ),
];

const KEY_COLUMN: usize = 14;

pub fn help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, (section, commands)) in KEYMAPS.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            *section,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )));
        for (key, description) in commands.iter() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {key:<width$}", width = KEY_COLUMN),
                    Style::default().fg(theme.accent_secondary),
                ),
                Span::styled(*description, Style::default().fg(theme.text_primary)),
            ]));
        }
        if index + 1 < KEYMAPS.len() {
            lines.push(Line::from(""));
        }
    }
    lines
}

pub fn help_line_count() -> usize {
    let commands: usize = KEYMAPS.iter().map(|(_, commands)| commands.len()).sum();
    KEYMAPS.len() + commands + KEYMAPS.len().saturating_sub(1)
}
