//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the core program
//! with syntax highlighting and the line of the current selection.
//!
//! # Features
//!
//! - Syntax highlighting driven by the real [`Scanner`], so what is colored
//!   as a keyword, number or error is exactly what the scanner produces
//! - Current line highlighting
//! - Scroll state management for navigating large files
//! - Line numbering
//!
//! Highlighting runs once per source, line by line; a string literal that
//! spans lines is only colored on its first line.

use crate::parser::{Scanner, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Highlight every line of `source`.
pub fn highlight_source(source: &str) -> Vec<Line<'static>> {
    // Errors were already reported by the real scan
    let quiet = tracing::subscriber::NoSubscriber::default();
    tracing::subscriber::with_default(quiet, || source.lines().map(highlight_line).collect())
}

fn highlight_line(line: &str) -> Line<'static> {
    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut scanner = Scanner::new(line);
    let mut cursor = 0;

    loop {
        let token = scanner.next_token();
        if token.is(TokenKind::Eof) {
            break;
        }

        let start = token.location.column.saturating_sub(1).min(chars.len());
        let end = scanner.offset().min(chars.len());

        if start > cursor {
            spans.push(Span::raw(chars[cursor..start].iter().collect::<String>()));
        }
        spans.push(Span::styled(
            chars[start..end].iter().collect::<String>(),
            token_style(token.kind),
        ));
        cursor = end;
    }

    if cursor < chars.len() {
        spans.push(Span::raw(chars[cursor..].iter().collect::<String>()));
    }

    Line::from(spans)
}

fn token_style(kind: TokenKind) -> Style {
    match kind {
        _ if kind.is_data_type() || kind == TokenKind::Void => {
            Style::default().fg(DEFAULT_THEME.type_name) // Types
        }
        _ if kind.is_keyword() => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        _ if kind.is_error() => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::UNDERLINED),
        TokenKind::Comment => Style::default().fg(DEFAULT_THEME.comment),
        TokenKind::String | TokenKind::CharLiteral => {
            Style::default().fg(DEFAULT_THEME.string)
        }
        TokenKind::IntegerLiteral | TokenKind::FloatLiteral => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        TokenKind::Identifier => Style::default().fg(DEFAULT_THEME.identifier),
        TokenKind::LeftParen
        | TokenKind::RightParen
        | TokenKind::LeftBracket
        | TokenKind::RightBracket
        | TokenKind::LeftBrace
        | TokenKind::RightBrace => Style::default().fg(DEFAULT_THEME.primary), // Brackets
        _ => Style::default().fg(DEFAULT_THEME.fg), // Operators
    }
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    highlighted: &[Line<'static>],
    current_line: Option<usize>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));

    let total_lines = highlighted.len();
    // Account for borders (2), min 1
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if let Some(line) = current_line.filter(|l| (1..=total_lines).contains(l)) {
        super::keep_visible(scroll, line - 1, visible_height);
    }
    *scroll = (*scroll).min(total_lines.saturating_sub(visible_height));

    let visible_lines: Vec<Line> = highlighted
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = current_line == Some(line_num);

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment) // Line numbers
            };

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            for span in &line.spans {
                let mut span = span.clone();
                if is_current {
                    span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                }
                spans.push(span);
            }

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_highlight_preserves_text() {
        let source = "int  x = 1'000; // count\n\tprintf(\"a b\");";
        let lines = highlight_source(source);
        assert_eq!(lines.len(), 2);
        assert_eq!(text(&lines[0]), "int  x = 1'000; // count");
        assert_eq!(text(&lines[1]), "\tprintf(\"a b\");");
    }

    #[test]
    fn test_keyword_and_error_styles() {
        let lines = highlight_source("while @");
        let spans = &lines[0].spans;
        assert_eq!(spans[0].content, "while");
        assert_eq!(spans[0].style.fg, Some(DEFAULT_THEME.keyword));
        assert_eq!(spans[2].content, "@");
        assert_eq!(spans[2].style.fg, Some(DEFAULT_THEME.error));
    }
}
