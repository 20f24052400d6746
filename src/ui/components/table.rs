//! Practice table renderer.
//!
//! One row per practice with TITLE, LENGTH, BY, VIEWS and POSTED columns. The
//! title column takes whatever width the fixed columns leave over.

use crate::ui::helpers::{self, position_cursor, push_padded, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const LENGTH_WIDTH: usize = 9;
const BY_WIDTH: usize = 18;
const VIEWS_WIDTH: usize = 12;
const POSTED_WIDTH: usize = 16;
const MIN_TITLE_WIDTH: usize = 12;

fn title_width(cols: usize) -> usize {
    cols.saturating_sub(LENGTH_WIDTH + BY_WIDTH + VIEWS_WIDTH + POSTED_WIDTH)
        .max(MIN_TITLE_WIDTH)
}

/// Renders the bold column headers. Returns the next free row.
pub fn render_table_headers(out: &mut String, row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    push_padded(out, "TITLE", title_width(cols));
    push_padded(out, "LENGTH", LENGTH_WIDTH);
    push_padded(out, "BY", BY_WIDTH);
    push_padded(out, "VIEWS", VIEWS_WIDTH);
    out.push_str("POSTED");
    out.push_str(Theme::reset());
    row + 1
}

/// Renders every item, one per row. Returns the next free row.
pub fn render_table_rows(
    out: &mut String,
    row: usize,
    items: &[DisplayItem],
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(out, current_row, item, theme, cols);
    }
    current_row
}

/// Selection colors take precedence over match highlights, which take
/// precedence over the normal text color. The row is padded to the full
/// width so the selection background spans it.
fn render_table_row(
    out: &mut String,
    row: usize,
    item: &DisplayItem,
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(out, row, 1);

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    out.push_str(&base);

    let title_width = title_width(cols);
    let title = truncate(&item.title, title_width.saturating_sub(2));
    helpers::render_highlighted_text(
        out,
        &title,
        &item.title_highlights,
        theme,
        item.is_selected,
        &base,
    );
    out.push_str(&" ".repeat(title_width.saturating_sub(helpers::char_len(&title))));

    if !item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.duration_fg));
    }
    push_padded(out, item.duration.as_deref().unwrap_or(""), LENGTH_WIDTH);

    if !item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
    }
    let username = truncate(&item.username, BY_WIDTH.saturating_sub(2));
    helpers::render_highlighted_text(
        out,
        &username,
        &item.username_highlights,
        theme,
        item.is_selected,
        &base,
    );
    out.push_str(&" ".repeat(BY_WIDTH.saturating_sub(helpers::char_len(&username))));

    push_padded(out, &format!("{} views", item.views), VIEWS_WIDTH);
    push_padded(out, &item.elapsed, POSTED_WIDTH);

    let used = title_width + LENGTH_WIDTH + BY_WIDTH + VIEWS_WIDTH + POSTED_WIDTH;
    out.push_str(&" ".repeat(cols.saturating_sub(used)));

    out.push_str(Theme::reset());
    row + 1
}
