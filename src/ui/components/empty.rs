//! Empty and loading state renderers.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Row the centered message starts on.
const MESSAGE_ROW: usize = 6;

/// Renders the empty-feed message with its retry button below it.
pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme, cols: usize) {
    position_cursor(out, MESSAGE_ROW, 1);
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    centered_line(out, &empty.message, cols);
    out.push_str(Theme::reset());

    let button = format!("[ {} ]  (l)", empty.action_label);
    position_cursor(out, MESSAGE_ROW + 2, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.button_fg));
    centered_line(out, &button, cols);
    out.push_str(Theme::reset());
}

/// Renders the indicator shown while the initial load runs.
pub fn render_loading(out: &mut String, theme: &Theme, cols: usize) {
    position_cursor(out, MESSAGE_ROW, 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    centered_line(out, "Loading practices...", cols);
    out.push_str(Theme::reset());
}

fn centered_line(out: &mut String, text: &str, cols: usize) {
    let len = char_len(text);
    let padding = cols.saturating_sub(len) / 2;
    out.push_str(&" ".repeat(padding));
    out.push_str(text);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + len)));
}
