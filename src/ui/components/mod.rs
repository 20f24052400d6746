//! Composable UI component renderers.
//!
//! - [`header`]: Title bar
//! - [`filter`]: Active filter box
//! - [`table`]: Practice list with columns
//! - [`footer`]: Load-more button, error line and keybinding hints
//! - [`empty`]: Empty and loading states
//!
//! [`render_feed`] lays them out top to bottom:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Filter box - 3 lines, only while filtering]
//! [Table Headers]
//! [Table Rows]
//! [Blank padding]
//! [Border]
//! [Error line, only when surfaced]
//! [Load more]
//! [Keybindings]
//! ```

mod empty;
mod filter;
mod footer;
mod header;
mod table;

pub use empty::{render_empty_state, render_loading};
pub use filter::FILTER_BOX_ROWS;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FeedViewModel;

use filter::render_filter_bar;
use footer::render_footer;
use header::render_header;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal rule. Returns the next free row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the feed with entries.
pub fn render_feed(out: &mut String, vm: &FeedViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(out, current_row, &vm.header, vm.refreshing, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    if let Some(filter) = &vm.header.filter {
        current_row = render_filter_bar(out, current_row, filter, theme, cols);
    }
    current_row = render_table_headers(out, current_row, theme, cols);
    let _current_row = render_table_rows(out, current_row, &vm.display_items, theme, cols);

    render_chrome_bottom(out, vm, theme, cols, rows);
}

/// Renders header and footer around a list area that holds only a message.
pub fn render_frame(out: &mut String, vm: &FeedViewModel, theme: &Theme, cols: usize, rows: usize) {
    let current_row = render_header(out, 2, &vm.header, vm.refreshing, theme, cols);
    let current_row = render_border(out, current_row, &theme.colors.border, cols);
    if let Some(filter) = &vm.header.filter {
        render_filter_bar(out, current_row, filter, theme, cols);
    }
    render_chrome_bottom(out, vm, theme, cols, rows);
}

fn render_chrome_bottom(out: &mut String, vm: &FeedViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_rows = if vm.footer.error.is_some() { 3 } else { 2 };
    let border_row = rows.saturating_sub(footer_rows);

    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, rows, &vm.footer, theme, cols);
}
