//! Token list pane

use crate::parser::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the token stream with the selected row highlighted
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    selected: usize,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Tokens ({}) ", tokens.len()))
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    super::keep_visible(scroll, selected, visible_height);

    let rows: Vec<Line> = tokens
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, token)| {
            let location = token.location;
            let position = format!("{:>4}:{:<4}", location.line, location.column);
            let mut spans = vec![
                Span::styled(position, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    format!("{:<24}", token.kind.name()),
                    Style::default().fg(DEFAULT_THEME.keyword),
                ),
                Span::styled(
                    token.lexeme.escape_debug().to_string(),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
            ];

            if idx == selected {
                for span in &mut spans {
                    span.style = span
                        .style
                        .bg(DEFAULT_THEME.selection_bg)
                        .add_modifier(Modifier::BOLD);
                }
            }

            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(rows).block(block), area);
}
