use chrono::{DateTime, Utc};
use colored::Colorize;
use dragly::index::DisplayItem;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const USED_MARKER: &str = "✓";

pub(crate) fn print_success(message: impl AsRef<str>) {
    println!("{}", message.as_ref().green());
}

pub(crate) fn print_info(message: impl AsRef<str>) {
    println!("{}", message.as_ref().dimmed());
}

pub(crate) fn print_items(items: &[DisplayItem<'_>]) {
    if items.is_empty() {
        println!("Queue is empty.");
        return;
    }

    for entry in items {
        let item = entry.item;
        let idx_str = format!("{}. ", entry.index);
        let marker = if item.is_used() {
            format!("  {} ", USED_MARKER)
        } else {
            "    ".to_string()
        };

        let time_ago = item
            .created_at()
            .map(format_time_ago)
            .unwrap_or_else(|| " ".repeat(TIME_WIDTH));

        let fixed_width = marker.width() + idx_str.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);

        let one_line: String = item
            .text()
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let text_display = truncate_to_width(&one_line, available);
        let padding = available.saturating_sub(text_display.width());

        let (marker, idx, text) = if item.is_used() {
            (
                marker.green(),
                idx_str.dimmed(),
                text_display.dimmed().strikethrough(),
            )
        } else {
            (marker.normal(), idx_str.yellow(), text_display.normal())
        };

        println!(
            "{}{}{}{}{}",
            marker,
            idx,
            text,
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_text_adds_ellipsis() {
        let out = truncate_to_width("abcdefghij", 5);
        assert_eq!(out, "abcd…");
        assert_eq!(out.width(), 5);
    }

    #[test]
    fn test_format_time_ago_is_padded() {
        let out = format_time_ago(Utc::now() - chrono::Duration::minutes(5));
        assert_eq!(out.width(), TIME_WIDTH);
        assert_eq!(out.trim_start(), "5 minutes ago");
    }
}
