//! Filter bar component renderer.
//!
//! Shown between the header and the list while a text filter is active.

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;

/// Horizontal margin for the filter box.
const FILTER_BOX_MARGIN: usize = 5;

/// Rows the filter box occupies.
pub const FILTER_BOX_ROWS: usize = 3;

/// Renders a 3-line bordered box around `filter`. Returns the next free row.
///
/// ```text
/// [margin] ┌──────────────────────┐ [margin]
/// [margin] │ Filter title: scales │ [margin]
/// [margin] └──────────────────────┘ [margin]
/// ```
pub fn render_filter_bar(
    out: &mut String,
    row: usize,
    filter: &str,
    theme: &Theme,
    cols: usize,
) -> usize {
    let box_width = cols.saturating_sub(FILTER_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(FILTER_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.filter_bar_border);

    position_cursor(out, row, 1);
    out.push_str(&margin);
    out.push_str(&border);
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    let text = truncate(&format!(" Filter {filter}"), inner_width);
    let padding = inner_width.saturating_sub(char_len(&text));

    position_cursor(out, row + 1, 1);
    out.push_str(&margin);
    out.push_str(&border);
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&text);
    out.push_str(&" ".repeat(padding));
    out.push_str(&border);
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    out.push_str(&margin);
    out.push_str(&border);
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    row + FILTER_BOX_ROWS
}
