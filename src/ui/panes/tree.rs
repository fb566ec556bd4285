//! Parse tree pane
//!
//! The tree is flattened once into [`TreeRow`]s (pre-order, one row per node)
//! and drawn as an indented list.

use crate::parser::{ParseTree, SourceLocation, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// One displayed node
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub depth: usize,
    pub text: String,
    pub is_terminal: bool,
    /// Position of the first token under the node
    pub location: Option<SourceLocation>,
}

impl TreeRow {
    pub fn flatten(tree: &ParseTree) -> Vec<TreeRow> {
        tree.flatten()
            .into_iter()
            .map(|row| {
                let node = row.node;
                let text = match &node.token {
                    Some(token) if token.kind.shows_lexeme() => {
                        format!("{} {}", token.kind, token.lexeme.escape_debug())
                    }
                    Some(token) => token.kind.to_string(),
                    None => node.label.clone(),
                };

                TreeRow {
                    depth: row.depth,
                    text,
                    is_terminal: node.is_terminal(),
                    location: node
                        .first_leaf()
                        .filter(|t| !t.is(TokenKind::Eof))
                        .map(|t| t.location),
                }
            })
            .collect()
    }
}

/// Render the flattened parse tree
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[TreeRow],
    selected: usize,
    is_focused: bool,
    is_partial: bool,
    scroll: &mut usize,
) {
    let title = if is_partial {
        " Parse Tree (partial) "
    } else {
        " Parse Tree "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    super::keep_visible(scroll, selected, visible_height);

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, row)| {
            let color = if row.is_terminal {
                DEFAULT_THEME.fg
            } else {
                DEFAULT_THEME.production
            };
            let mut style = Style::default().fg(color);
            if idx == selected {
                style = style
                    .bg(DEFAULT_THEME.selection_bg)
                    .add_modifier(Modifier::BOLD);
            }

            Line::from(vec![
                Span::styled(
                    "  ".repeat(row.depth),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(row.text.clone(), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
