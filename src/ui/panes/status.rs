//! Status bar rendering with keybindings and the cursor position

use super::screen::to_color;
use crate::screen::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the status bar at the bottom.
///
/// `crashed` is set when the active page stopped responding.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    selected_address: u32,
    crashed: bool,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let bar_bg = to_color(DEFAULT_THEME.popup_bg);
    let address_bg = if crashed {
        DEFAULT_THEME.error
    } else {
        DEFAULT_THEME.primary
    };

    let left_spans = vec![
        Span::styled(
            format!(" {:08X} ", selected_address),
            Style::default()
                .bg(to_color(address_bg))
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default().bg(bar_bg).fg(to_color(DEFAULT_THEME.comment)),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default().bg(bar_bg).fg(to_color(if crashed {
                DEFAULT_THEME.error
            } else {
                DEFAULT_THEME.text
            })),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(bar_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds with visual grouping
    let key_style = Style::default()
        .bg(to_color(DEFAULT_THEME.comment))
        .fg(Color::Black);
    let desc_style = Style::default().bg(bar_bg).fg(to_color(DEFAULT_THEME.text));
    let sep_style = Style::default().bg(bar_bg).fg(to_color(DEFAULT_THEME.comment));

    let right_spans = vec![
        Span::styled(" [/] ", key_style),
        Span::styled(" page ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" s ", key_style),
        Span::styled(" controls ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" p ", key_style),
        Span::styled(" print ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(bar_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
