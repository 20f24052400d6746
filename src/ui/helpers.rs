//! Shared rendering utilities.
//!
//! Components append to a frame buffer (`&mut String`) instead of printing, so
//! a whole frame can be written to the terminal in one go and inspected in
//! tests. All width arithmetic is in characters, not bytes.

use crate::ui::theme::Theme;

/// Appends the cursor move to `row`, `col` (both 1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` characters, ending in `...` when cut.
///
/// ```
/// use practice_feed::ui::helpers::truncate;
///
/// assert_eq!(truncate("Scales in C major", 10), "Scales ...");
/// assert_eq!(truncate("Scales", 10), "Scales");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if char_len(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{kept}...")
}

/// Appends `text` padded with spaces to `width` characters.
pub fn push_padded(out: &mut String, text: &str, width: usize) {
    out.push_str(text);
    out.push_str(&" ".repeat(width.saturating_sub(char_len(text))));
}

/// Appends `text` with the given character ranges highlighted.
///
/// Ranges are `(start, end)` character indices with exclusive end. Highlighting
/// is skipped on the selected row so it does not fight the selection colors.
/// `restore` is re-applied after each highlighted section.
pub fn render_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
    restore: &str,
) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);

        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(restore);

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_wraps_matched_characters() {
        let theme = Theme::default();
        let mut out = String::new();
        render_highlighted_text(&mut out, "scales", &[(0, 3)], &theme, false, "");

        let highlight = format!(
            "{}{}sca{}",
            Theme::fg(&theme.colors.match_highlight_fg),
            Theme::bg(&theme.colors.match_highlight_bg),
            Theme::reset()
        );
        assert_eq!(out, format!("{highlight}les"));
    }

    #[test]
    fn selected_row_is_not_highlighted() {
        let mut out = String::new();
        render_highlighted_text(&mut out, "scales", &[(0, 3)], &Theme::default(), true, "");
        assert_eq!(out, "scales");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("étude für klavier", 8), "étude...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
