use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, ListItem};

use crate::app::App;

pub fn symbol<'a>(app: &App, nerd: &'a str, ascii: &'a str) -> &'a str {
    if app.icons_ascii { ascii } else { nerd }
}

pub fn styled_item(text: impl Into<String>, color: Color) -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(
        text.into(),
        Style::default().fg(color),
    )))
}

pub fn panel_block(app: &App, title: String, is_focused: bool) -> Block<'static> {
    let theme = &app.theme;
    let border_color = if is_focused {
        theme.border_active
    } else {
        theme.border
    };
    let title_modifier = if is_focused {
        Modifier::BOLD
    } else {
        Modifier::empty()
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_panel))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.accent)
                .add_modifier(title_modifier),
        ))
}

pub fn highlight_style(app: &App) -> Style {
    Style::default()
        .bg(app.theme.bg_selection)
        .fg(app.theme.accent)
        .add_modifier(Modifier::BOLD)
}

/// A `width` x `height` rect centered in `area`, shrunk to leave a margin.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn format_elapsed(secs: u64) -> String {
    if secs < 60 {
        format!("{secs}s")
    } else {
        format!("{}m{:02}s", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_small_areas() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect(area, 80, 30);
        assert_eq!(rect, Rect::new(2, 2, 36, 6));
    }

    #[test]
    fn elapsed_switches_to_minutes() {
        assert_eq!(format_elapsed(42), "42s");
        assert_eq!(format_elapsed(125), "2m05s");
    }
}
