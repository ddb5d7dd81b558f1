use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{App, Popup};
use crate::brew::PackageInfo;
use crate::ui::help;
use crate::ui::util::centered_rect;

const SCROLL_HINT: &str = " j/k scroll · Esc close ";
const INFO_HINT: &str = " c copy · j/k scroll · Esc close ";

/// Outer width and height requested for each popup.
fn popup_size(popup: &Popup) -> (u16, u16) {
    match popup {
        Popup::ConfirmUninstall { .. } => (44, 7),
        Popup::Error { .. } => (64, 10),
        Popup::Info { .. } => (90, 40),
        Popup::Log { .. } => (100, 40),
        Popup::Help { .. } => (50, 24),
    }
}

/// Body rows the popup shows on a screen `screen_height` rows tall.
pub fn visible_rows(popup: &Popup, screen_height: u16) -> usize {
    let (width, height) = popup_size(popup);
    let screen = Rect::new(0, 0, width.saturating_add(4), screen_height);
    centered_rect(screen, width, height).height.saturating_sub(2) as usize
}

pub fn draw_popup(frame: &mut ratatui::Frame, app: &App, popup: &Popup) {
    let theme = &app.theme;
    let area = frame.area();
    let (width, height) = popup_size(popup);
    let rect = centered_rect(area, width, height);

    match popup {
        Popup::ConfirmUninstall { pkg } => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("Uninstall {pkg}?"),
                    Style::default()
                        .fg(theme.text_primary)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "y confirm · n/Esc cancel",
                    Style::default().fg(theme.text_muted),
                )),
            ];
            render_static(frame, app, rect, " Confirm ", theme.yellow, lines, Alignment::Center);
        }
        Popup::Error { title, message } => {
            let mut lines = vec![Line::from("")];
            lines.extend(message.lines().map(|line| {
                Line::from(Span::styled(
                    line.to_string(),
                    Style::default().fg(theme.text_primary),
                ))
            }));
            let title = format!(" {title} ");
            render_static(frame, app, rect, &title, theme.red, lines, Alignment::Left);
        }
        Popup::Info { pkg, scroll } => {
            let lines = match app.info_cache.peek(pkg) {
                Some(info) => info_lines(app, info),
                None => vec![Line::from(Span::styled(
                    "No info loaded",
                    Style::default().fg(theme.text_muted),
                ))],
            };
            let title = format!(" {pkg} ");
            render_scrollable(frame, app, rect, &title, lines, *scroll, Some(INFO_HINT));
        }
        Popup::Log { pkg, scroll } => {
            let lines: Vec<Line<'static>> = app
                .tasks
                .get(pkg)
                .map(|task| {
                    task.log_lines()
                        .map(|line| {
                            Line::from(Span::styled(
                                line.to_string(),
                                Style::default().fg(theme.text_primary),
                            ))
                        })
                        .collect()
                })
                .unwrap_or_default();
            let title = format!(" Log: {pkg} ");
            render_scrollable(frame, app, rect, &title, lines, *scroll, None);
        }
        Popup::Help { scroll } => {
            let lines = help::help_lines(theme);
            render_scrollable(frame, app, rect, " Keymaps ", lines, *scroll, None);
        }
    }
}

fn info_lines(app: &App, info: &PackageInfo) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let blocks = info.display_blocks();
    if blocks.is_empty() {
        // Nothing recognisable; show brew's text as is.
        return info
            .raw
            .lines()
            .map(|line| {
                Line::from(Span::styled(
                    line.to_string(),
                    Style::default().fg(theme.text_primary),
                ))
            })
            .collect();
    }

    let mut lines = Vec::new();
    for block in blocks {
        lines.push(Line::from(Span::styled(
            block.title.to_string(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )));
        for line in block.lines {
            lines.push(Line::from(Span::styled(
                format!("  {line}"),
                Style::default().fg(theme.text_primary),
            )));
        }
        lines.push(Line::from(""));
    }
    lines
}

fn popup_block(app: &App, title: &str, border: Color) -> Block<'static> {
    let theme = &app.theme;
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme.bg_main))
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_static(
    frame: &mut ratatui::Frame,
    app: &App,
    rect: Rect,
    title: &str,
    border: Color,
    lines: Vec<Line<'static>>,
    alignment: Alignment,
) {
    frame.render_widget(Clear, rect);
    let body = Paragraph::new(lines)
        .block(popup_block(app, title, border))
        .alignment(alignment)
        .wrap(Wrap { trim: false });
    frame.render_widget(body, rect);
}

/// One text line per row, so scroll offsets match line indices.
fn render_scrollable(
    frame: &mut ratatui::Frame,
    app: &App,
    rect: Rect,
    title: &str,
    lines: Vec<Line<'static>>,
    scroll: usize,
    hint: Option<&str>,
) {
    let theme = &app.theme;
    frame.render_widget(Clear, rect);

    let visible = rect.height.saturating_sub(2) as usize;
    let scroll = scroll.min(lines.len().saturating_sub(visible));
    let hint = hint.or((lines.len() > visible).then_some(SCROLL_HINT));

    let mut block = popup_block(app, title, theme.border_active);
    if let Some(hint) = hint {
        block = block.title_bottom(Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(theme.text_muted),
        )));
    }

    let offset = u16::try_from(scroll).unwrap_or(u16::MAX);
    let body = Paragraph::new(lines).block(block).scroll((offset, 0));
    frame.render_widget(body, rect);
}
