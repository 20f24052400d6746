//! Header component renderer.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centered, bold title bar. Returns the next free row.
///
/// A refresh in progress is shown next to the title so the list underneath
/// can stay visible.
pub fn render_header(
    out: &mut String,
    row: usize,
    header: &HeaderInfo,
    refreshing: bool,
    theme: &Theme,
    cols: usize,
) -> usize {
    let title = if refreshing {
        format!("{}(refreshing...) ", header.title)
    } else {
        header.title.clone()
    };
    let title_len = char_len(&title);
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    out.push_str(&" ".repeat(padding));
    out.push_str(&title);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + title_len)));

    out.push_str(Theme::reset());
    row + 1
}
