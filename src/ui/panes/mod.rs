//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with scanner-driven highlighting and current line indicator
//! - [`tokens`]: The filtered token stream, one selectable row per token
//! - [`tree`]: The parse tree flattened into indented, selectable rows
//! - [`status`]: Status bar with keybindings and diagnostics summary
//!
//! Each pane module exports a primary `render_*` function. The helpers here
//! are shared by the scrolling list panes.

pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

pub use source::{highlight_source, render_source_pane};
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use tree::{render_tree_pane, TreeRow};

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Adjust `offset` so that row `selected` lies within a window of `height` rows.
pub(crate) fn keep_visible(offset: &mut usize, selected: usize, height: usize) {
    if selected < *offset {
        *offset = selected;
    } else if height > 0 && selected >= *offset + height {
        *offset = selected + 1 - height;
    }
}
