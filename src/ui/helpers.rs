//! Shared rendering utilities.
//!
//! Everything here measures text in terminal columns (via `unicode-width`)
//! and indexes highlight ranges in characters, never bytes.

use crate::ui::theme::Theme;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Truncates `text` to at most `width` columns, ending in `…` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

/// Spaces needed to pad `text` to `width` columns.
#[must_use]
pub fn padding(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(text.width()))
}

/// Truncates and pads `text` to exactly `width` columns.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let pad = padding(&cut, width);
    cut + &pad
}

/// Centers `text` within `width` columns.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let left = width.saturating_sub(cut.width()) / 2;
    format!("{}{cut}", " ".repeat(left))
}

/// Appends `text` to `out`, highlighting the character range `range`.
///
/// Selected rows are not highlighted so the selection colors stay intact.
/// A range past the end of `text` (after truncation) is clamped.
pub fn push_highlighted(
    out: &mut String,
    text: &str,
    range: Option<(usize, usize)>,
    theme: &Theme,
    is_selected: bool,
) {
    let Some((start, end)) = range.filter(|_| !is_selected) else {
        out.push_str(text);
        return;
    };

    let chars: Vec<char> = text.chars().collect();
    let start = start.min(chars.len());
    let end = end.clamp(start, chars.len());

    out.extend(&chars[..start]);
    out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
    out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
    out.extend(&chars[start..end]);
    out.push_str(Theme::reset());
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.extend(&chars[end..]);
}

/// Removes ANSI SGR sequences, leaving only printable text.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for inner in chars.by_ref() {
                if inner == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate("Fido", 10), "Fido");
        assert_eq!(truncate("Fidelius", 5), "Fide…");
        assert_eq!(truncate("日本語の犬", 5), "日本…");
        assert_eq!(fit("Rex", 5), "Rex  ");
    }

    #[test]
    fn highlights_inside_clamped_range() {
        let theme = Theme::default();
        let mut out = String::new();
        push_highlighted(&mut out, "Fido", Some((1, 10)), &theme, false);

        assert!(out.starts_with('F'));
        assert_eq!(strip_ansi(&out), "Fido");
        assert!(out.contains(&Theme::bg(&theme.colors.match_highlight_bg)));
    }

    #[test]
    fn selected_rows_are_not_highlighted() {
        let mut out = String::new();
        push_highlighted(&mut out, "Fido", Some((0, 2)), &Theme::default(), true);
        assert_eq!(out, "Fido");
    }
}
