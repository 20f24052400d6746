//! Footer component renderer: load-more button, error line and help text.

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Shown in place of the button label while a load-more is in flight.
const BUSY_INDICATOR: &str = "[ loading... ]";

/// Renders the footer so that its last line lands on `last_row`.
///
/// ```text
/// [error, only when surfaced]
/// [ Load more ]   or   [ loading... ]
/// keybindings
/// ```
pub fn render_footer(out: &mut String, last_row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) {
    let button_row = last_row.saturating_sub(1);

    if let Some(error) = &footer.error {
        let text = truncate(&format!("Could not load more: {error}  (x: dismiss)"), cols);
        position_cursor(out, button_row.saturating_sub(1), 1);
        out.push_str(&Theme::fg(&theme.colors.error_fg));
        centered(out, &text, cols);
        out.push_str(Theme::reset());
    }

    let button = footer
        .load_more_label
        .map_or_else(|| BUSY_INDICATOR.to_string(), |label| format!("[ {label} ]"));

    position_cursor(out, button_row, 1);
    if footer.busy {
        out.push_str(Theme::dim());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
    } else {
        out.push_str(Theme::bold());
        out.push_str(&Theme::fg(&theme.colors.button_fg));
    }
    centered(out, &button, cols);
    out.push_str(Theme::reset());

    let help_text = truncate(&footer.keybindings, cols);
    position_cursor(out, last_row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    centered(out, &help_text, cols);
    out.push_str(Theme::reset());
}

fn centered(out: &mut String, text: &str, cols: usize) {
    let text_len = char_len(text).min(cols);
    let padding = cols.saturating_sub(text_len) / 2;

    out.push_str(&" ".repeat(padding));
    out.push_str(text);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + text_len)));
}
